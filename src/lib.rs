//! Raster and vector I/O on top of [GDAL](http://gdal.org/).
//!
//! The crate wraps the GDAL C API in a few stateful objects and a set of free
//! functions:
//!
//! * [`GdalRaster`] keeps a raster dataset open and reads, writes and describes its
//!   bands. [`raster::create`], [`raster::create_copy`], [`raster::warp`] and
//!   [`raster::combine`] produce new rasters.
//! * [`GdalVector`] keeps one layer of a vector data source open for reading, filtering
//!   and writing features, and runs layer algebra between layers.
//! * [`vector`] has geometry functions working on WKT, and [`spatial_ref`] converts SRS
//!   definitions and transforms coordinates.
//! * [`CmbTable`] counts distinct integer combinations, and [`RunningStats`] keeps
//!   summary statistics over a stream of values.
//!
//! ## Use
//!
//! ```rust, no_run
//! # fn main() -> gdalraster::errors::Result<()> {
//! use gdalraster::{GdalRaster, RunningStats};
//!
//! let ds = GdalRaster::new("elev.tif", true, &[] as &[&str])?;
//! let (xsize, ysize, _) = ds.dim()?;
//! let mut stats = RunningStats::new(true);
//! for row in 0..ysize {
//!     stats.update(&ds.read(1, 0, row, xsize, 1, xsize, 1)?);
//! }
//! println!("mean elevation: {}", stats.get_mean());
//! # Ok(())
//! # }
//! ```
//!
//! GDAL reports errors through a global handler. See [`config`] for routing them to
//! `tracing`.

#![crate_name = "gdalraster"]
#![crate_type = "lib"]

pub use version::version_info;

pub mod cmb_table;
pub mod config;
pub mod cpl;
pub mod dataset;
pub mod driver;
pub mod errors;
pub mod geo_transform;
pub mod helpers;
pub mod metadata;
pub mod progress;
pub mod raster;
pub mod running_stats;
pub mod spatial_ref;
mod utils;
pub mod vector;
pub mod version;

pub use cmb_table::CmbTable;
pub use dataset::Dataset;
pub use driver::Driver;
pub use metadata::{MajorObject, Metadata};
pub use raster::GdalRaster;
pub use running_stats::RunningStats;
pub use vector::GdalVector;

#[cfg(test)]
mod test_utils;
