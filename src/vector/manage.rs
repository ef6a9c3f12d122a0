//! Creating vector datasets, layers and fields
//!
//! These functions open the data source themselves, make one change and close it again.

use std::ffi::{c_int, CString};
use std::ptr;

use gdal_sys::{self, OGRErr, OGRLayerH};

use crate::cpl::CslStringList;
use crate::dataset::{Dataset, GdalOpenFlags};
use crate::driver::Driver;
use crate::errors::*;
use crate::spatial_ref::SpatialRef;
use crate::utils::_last_null_pointer_err;
use crate::vector::defn::{field_type_by_name, FieldDefn};
use crate::vector::geometry::geometry_type_by_name;

fn open_vector(dsn: &str, update: bool) -> Result<Dataset> {
    let mut flags = GdalOpenFlags::GDAL_OF_VECTOR;
    if update {
        flags |= GdalOpenFlags::GDAL_OF_UPDATE;
    }
    Dataset::open_ex(dsn, flags, &CslStringList::new())
}

fn open_vector_quiet(dsn: &str, update: bool) -> Option<Dataset> {
    unsafe { gdal_sys::CPLPushErrorHandler(Some(gdal_sys::CPLQuietErrorHandler)) };
    let ds = open_vector(dsn, update).ok();
    unsafe { gdal_sys::CPLPopErrorHandler() };
    ds
}

fn layer_by_name(ds: &Dataset, layer: &str) -> Option<OGRLayerH> {
    let c_name = CString::new(layer).ok()?;
    let c_layer = unsafe { gdal_sys::GDALDatasetGetLayerByName(ds.c_dataset(), c_name.as_ptr()) };
    (!c_layer.is_null()).then_some(c_layer)
}

/// Whether `dsn` opens as a vector data source, optionally for update.
pub fn ogr_ds_exists(dsn: &str, with_update: bool) -> bool {
    open_vector_quiet(dsn, with_update).is_some()
}

/// Short name of the driver that opens `dsn`.
pub fn ogr_ds_format(dsn: &str) -> Result<String> {
    Ok(open_vector(dsn, false)?.driver().short_name())
}

/// Number of layers in `dsn`.
pub fn ogr_ds_layer_count(dsn: &str) -> Result<usize> {
    let ds = open_vector(dsn, false)?;
    Ok(unsafe { gdal_sys::GDALDatasetGetLayerCount(ds.c_dataset()) }.max(0) as usize)
}

/// Layer names of `dsn`, in dataset order.
pub fn ogr_ds_layer_names(dsn: &str) -> Result<Vec<String>> {
    let ds = open_vector(dsn, false)?;
    let count = unsafe { gdal_sys::GDALDatasetGetLayerCount(ds.c_dataset()) };
    Ok((0..count)
        .map(|i| unsafe {
            let c_layer = gdal_sys::GDALDatasetGetLayer(ds.c_dataset(), i);
            crate::utils::_string(gdal_sys::OGR_L_GetName(c_layer))
        })
        .collect())
}

/// Creates a vector data source with `format`.
///
/// When `layer` is not empty, a layer of `geom_type` (`POINT`, `POLYGON`, ...) is created
/// too, with an optional attribute field `fld_name` of `fld_type`. `srs` is any
/// definition [`SpatialRef::from_definition`] understands, or empty for none.
#[allow(clippy::too_many_arguments)]
pub fn ogr_ds_create<S: AsRef<str>>(
    format: &str,
    dsn: &str,
    layer: &str,
    geom_type: &str,
    srs: &str,
    fld_name: &str,
    fld_type: &str,
    dsco: &[S],
    lco: &[S],
) -> Result<()> {
    let driver = Driver::get_driver_by_name(format)?;
    if !driver.has_capability("DCAP_VECTOR") || !driver.has_capability("DCAP_CREATE") {
        return Err(GdalError::BadArgument(format!(
            "driver '{format}' cannot create vector data sources"
        )));
    }
    let ds = driver.create_vector_only(dsn, &CslStringList::from_strings(dsco)?)?;
    tracing::debug!(dsn, format, "created vector data source");
    if layer.is_empty() {
        return Ok(());
    }
    let c_layer = create_layer(&ds, layer, geom_type, srs, lco)?;
    if !fld_name.is_empty() {
        let defn = FieldDefn::new(fld_name, field_type_by_name(fld_type)?);
        create_field(c_layer, &defn)?;
    }
    Ok(())
}

/// Whether `dsn` has a layer named `layer`.
pub fn ogr_layer_exists(dsn: &str, layer: &str) -> bool {
    open_vector_quiet(dsn, false)
        .map(|ds| layer_by_name(&ds, layer).is_some())
        .unwrap_or(false)
}

/// Adds a layer to an existing data source.
pub fn ogr_layer_create<S: AsRef<str>>(
    dsn: &str,
    layer: &str,
    geom_type: &str,
    srs: &str,
    lco: &[S],
) -> Result<()> {
    let ds = open_vector(dsn, true)?;
    if !ds.test_capability("CreateLayer")? {
        return Err(GdalError::BadArgument(format!(
            "'{dsn}' does not support layer creation"
        )));
    }
    create_layer(&ds, layer, geom_type, srs, lco)?;
    Ok(())
}

/// Deletes a layer by name.
pub fn ogr_layer_delete(dsn: &str, layer: &str) -> Result<()> {
    let ds = open_vector(dsn, true)?;
    let count = unsafe { gdal_sys::GDALDatasetGetLayerCount(ds.c_dataset()) };
    let Some(idx) = (0..count).find(|&i| unsafe {
        let c_layer = gdal_sys::GDALDatasetGetLayer(ds.c_dataset(), i);
        crate::utils::_string(gdal_sys::OGR_L_GetName(c_layer)) == layer
    }) else {
        return Err(GdalError::BadArgument(format!(
            "layer '{layer}' not found in '{dsn}'"
        )));
    };
    let rv = unsafe { gdal_sys::GDALDatasetDeleteLayer(ds.c_dataset(), idx) };
    if rv != OGRErr::OGRERR_NONE {
        return Err(GdalError::OgrError {
            err: rv,
            method_name: "GDALDatasetDeleteLayer",
        });
    }
    Ok(())
}

/// Index of the attribute field `fld_name` in `layer`, `None` if any of them is missing.
pub fn ogr_field_index(dsn: &str, layer: &str, fld_name: &str) -> Option<usize> {
    let ds = open_vector_quiet(dsn, false)?;
    let c_layer = layer_by_name(&ds, layer)?;
    let c_name = CString::new(fld_name).ok()?;
    let idx = unsafe {
        let c_defn = gdal_sys::OGR_L_GetLayerDefn(c_layer);
        gdal_sys::OGR_FD_GetFieldIndex(c_defn, c_name.as_ptr())
    };
    (idx >= 0).then_some(idx as usize)
}

/// Adds the attribute field described by `defn` to an existing layer.
pub fn ogr_field_create(dsn: &str, layer: &str, defn: &FieldDefn) -> Result<()> {
    let ds = open_vector(dsn, true)?;
    let c_layer = layer_by_name(&ds, layer).ok_or_else(|| {
        GdalError::BadArgument(format!("layer '{layer}' not found in '{dsn}'"))
    })?;
    create_field(c_layer, defn)
}

fn create_layer<S: AsRef<str>>(
    ds: &Dataset,
    layer: &str,
    geom_type: &str,
    srs: &str,
    lco: &[S],
) -> Result<OGRLayerH> {
    let geom_type = geometry_type_by_name(geom_type)?;
    let srs = if srs.is_empty() {
        None
    } else {
        Some(SpatialRef::from_definition(srs)?)
    };
    let c_name = CString::new(layer)?;
    let options = CslStringList::from_strings(lco)?;
    let c_layer = unsafe {
        gdal_sys::GDALDatasetCreateLayer(
            ds.c_dataset(),
            c_name.as_ptr(),
            srs.as_ref().map_or(ptr::null_mut(), |s| s.to_c_hsrs()),
            geom_type,
            options.as_ptr() as _,
        )
    };
    if c_layer.is_null() {
        return Err(_last_null_pointer_err("GDALDatasetCreateLayer"));
    }
    tracing::debug!(layer, "created layer");
    Ok(c_layer)
}

fn create_field(c_layer: OGRLayerH, defn: &FieldDefn) -> Result<()> {
    let c_name = CString::new(defn.name.as_str())?;
    unsafe {
        let c_defn = gdal_sys::OGR_L_GetLayerDefn(c_layer);
        if gdal_sys::OGR_FD_GetFieldIndex(c_defn, c_name.as_ptr()) >= 0 {
            return Err(GdalError::BadArgument(format!(
                "field '{}' already exists",
                defn.name
            )));
        }
    }
    let c_default = defn.default.as_deref().map(CString::new).transpose()?;

    let c_field = unsafe { gdal_sys::OGR_Fld_Create(c_name.as_ptr(), defn.field_type) };
    if c_field.is_null() {
        return Err(_last_null_pointer_err("OGR_Fld_Create"));
    }
    let rv = unsafe {
        gdal_sys::OGR_Fld_SetSubType(c_field, defn.subtype);
        gdal_sys::OGR_Fld_SetWidth(c_field, defn.width as c_int);
        gdal_sys::OGR_Fld_SetPrecision(c_field, defn.precision as c_int);
        gdal_sys::OGR_Fld_SetNullable(c_field, defn.is_nullable as c_int);
        #[cfg(any(major_ge_4, all(major_is_3, minor_ge_2)))]
        gdal_sys::OGR_Fld_SetUnique(c_field, defn.is_unique as c_int);
        if let Some(c_default) = &c_default {
            gdal_sys::OGR_Fld_SetDefault(c_field, c_default.as_ptr());
        }
        let rv = gdal_sys::OGR_L_CreateField(c_layer, c_field, 1);
        gdal_sys::OGR_Fld_Destroy(c_field);
        rv
    };
    if rv != OGRErr::OGRERR_NONE {
        return Err(GdalError::OgrError {
            err: rv,
            method_name: "OGR_L_CreateField",
        });
    }
    Ok(())
}
