//! GDAL Raster Data

mod combine;
mod create;
mod gdal_raster;
mod rasterband;
mod types;
mod warp;

pub use combine::{combine, CombineOutput};
pub use create::{create, create_copy};
pub use gdal_raster::GdalRaster;
pub use rasterband::{RasterBand, StatisticsAll};
pub use types::{
    data_type_by_name, data_type_is_floating, data_type_max_exact_int, data_type_name,
    data_type_size_bytes, GDALDataType, GdalType,
};
pub use warp::{warp, WarpAppOptions};
