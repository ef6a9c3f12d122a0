//! GDAL Vector Data
//!
//! [`GdalVector`] keeps one layer of a data source open for reading, filtering and
//! writing features. The `g_*` functions work on geometries given as WKT, and the
//! `ogr_*` functions create data sources, layers and fields.
//!
//! ```rust, no_run
//! # fn main() -> gdalraster::errors::Result<()> {
//! use gdalraster::vector::{g_area, g_buffer, GdalVector};
//!
//! let lyr = GdalVector::new("roads.geojson", "", true, &[] as &[&str], None, None)?;
//! println!("{} features", lyr.get_feature_count()?);
//! let area = g_area(&g_buffer("POINT (0 0)", 10.0, 30)?)?;
//! assert!(area > 300.0);
//! # Ok(())
//! # }
//! ```

mod algebra;
mod defn;
mod feature;
mod gdal_vector;
mod geom_wkt;
mod geometry;
mod manage;
mod ops;

pub use defn::{field_type_by_name, field_type_name, FieldDefn, GeomFieldDefn, LayerDefn};
pub use feature::{Feature, FieldValue, GeomValue, ReturnGeomAs};
pub use gdal_vector::{GdalVector, LayerCapabilities};
pub use geom_wkt::{
    bbox_from_wkt, bbox_to_wkt, g_area, g_buffer, g_centroid, g_contains, g_create,
    g_crosses, g_difference, g_disjoint, g_distance, g_equals, g_intersection, g_intersects,
    g_is_valid, g_length, g_overlaps, g_sym_difference, g_touches, g_union, g_within,
};
pub use geometry::{geometry_type_by_name, geometry_type_to_name, Geometry, WkbByteOrder};
pub use manage::{
    ogr_ds_create, ogr_ds_exists, ogr_ds_format, ogr_ds_layer_count, ogr_ds_layer_names,
    ogr_field_create, ogr_field_index, ogr_layer_create, ogr_layer_delete, ogr_layer_exists,
};
pub use gdal_sys::{OGRFieldType, OGRwkbGeometryType};
