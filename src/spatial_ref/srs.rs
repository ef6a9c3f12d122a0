use std::ffi::{c_char, c_int, CString};
use std::ptr::{self, null_mut};

use gdal_sys::{OGRErr, OGRSpatialReferenceH, OSRAxisMappingStrategy};

use crate::errors::*;
use crate::utils::{_last_null_pointer_err, _string, _string_free};

/// A OpenGIS Spatial Reference System definition.
///
/// Every `SpatialRef` uses the traditional GIS axis order (longitude/easting first),
/// whatever the authority defines.
#[derive(Debug)]
pub struct SpatialRef(OGRSpatialReferenceH);

impl Drop for SpatialRef {
    fn drop(&mut self) {
        unsafe { gdal_sys::OSRRelease(self.0) };
        self.0 = ptr::null_mut();
    }
}

impl Clone for SpatialRef {
    fn clone(&self) -> SpatialRef {
        let n_obj = unsafe { gdal_sys::OSRClone(self.0) };
        SpatialRef(n_obj)
    }
}

impl PartialEq for SpatialRef {
    fn eq(&self, other: &SpatialRef) -> bool {
        unsafe { gdal_sys::OSRIsSame(self.0, other.0) == 1 }
    }
}

impl SpatialRef {
    fn empty() -> Result<SpatialRef> {
        let c_obj = unsafe { gdal_sys::OSRNewSpatialReference(ptr::null()) };
        if c_obj.is_null() {
            return Err(_last_null_pointer_err("OSRNewSpatialReference"));
        }
        Ok(SpatialRef::traditional(c_obj))
    }

    fn traditional(c_obj: OGRSpatialReferenceH) -> SpatialRef {
        unsafe {
            gdal_sys::OSRSetAxisMappingStrategy(
                c_obj,
                OSRAxisMappingStrategy::OAMS_TRADITIONAL_GIS_ORDER,
            )
        };
        SpatialRef(c_obj)
    }

    /// Parses anything `OSRSetFromUserInput` accepts: WKT, PROJJSON, `EPSG:n`, a PROJ
    /// string, a well-known name such as `WGS84`, or a filename holding one of those.
    pub fn from_definition(definition: &str) -> Result<SpatialRef> {
        let srs = SpatialRef::empty()?;
        let c_definition = CString::new(definition)?;
        let rv = unsafe { gdal_sys::OSRSetFromUserInput(srs.0, c_definition.as_ptr()) };
        if rv != OGRErr::OGRERR_NONE {
            return Err(GdalError::OgrError {
                err: rv,
                method_name: "OSRSetFromUserInput",
            });
        }
        Ok(srs)
    }

    pub fn from_wkt(wkt: &str) -> Result<SpatialRef> {
        let c_str = CString::new(wkt)?;
        let c_obj = unsafe { gdal_sys::OSRNewSpatialReference(c_str.as_ptr()) };
        if c_obj.is_null() {
            return Err(_last_null_pointer_err("OSRNewSpatialReference"));
        }
        Ok(SpatialRef::traditional(c_obj))
    }

    pub fn from_epsg(epsg_code: u32) -> Result<SpatialRef> {
        let srs = SpatialRef::empty()?;
        let rv = unsafe { gdal_sys::OSRImportFromEPSG(srs.0, epsg_code as c_int) };
        if rv != OGRErr::OGRERR_NONE {
            return Err(GdalError::OgrError {
                err: rv,
                method_name: "OSRImportFromEPSG",
            });
        }
        Ok(srs)
    }

    /// A geographic system from a well-known name: `WGS84`, `WGS72`, `NAD27`, `NAD83`,
    /// or `EPSG:n` for a geographic EPSG code.
    pub fn from_well_known_geog_cs(name: &str) -> Result<SpatialRef> {
        let srs = SpatialRef::empty()?;
        let c_name = CString::new(name)?;
        let rv = unsafe { gdal_sys::OSRSetWellKnownGeogCS(srs.0, c_name.as_ptr()) };
        if rv != OGRErr::OGRERR_NONE {
            return Err(GdalError::OgrError {
                err: rv,
                method_name: "OSRSetWellKnownGeogCS",
            });
        }
        Ok(srs)
    }

    /// Copies a handle owned elsewhere, e.g. the SRS of a layer.
    ///
    /// # Safety
    /// `c_obj` must be a valid spatial reference handle.
    pub unsafe fn from_c_obj(c_obj: OGRSpatialReferenceH) -> Result<SpatialRef> {
        let mut_c_obj = gdal_sys::OSRClone(c_obj);
        if mut_c_obj.is_null() {
            return Err(_last_null_pointer_err("OSRClone"));
        }
        Ok(SpatialRef::traditional(mut_c_obj))
    }

    /// The geographic coordinate system underlying this one.
    pub fn geog_cs(&self) -> Result<SpatialRef> {
        let c_obj = unsafe { gdal_sys::OSRCloneGeogCS(self.0) };
        if c_obj.is_null() {
            return Err(_last_null_pointer_err("OSRCloneGeogCS"));
        }
        Ok(SpatialRef::traditional(c_obj))
    }

    pub fn to_wkt(&self) -> Result<String> {
        let mut c_wkt: *mut c_char = null_mut();
        let rv = unsafe { gdal_sys::OSRExportToWkt(self.0, &mut c_wkt) };
        let wkt = _string_free(c_wkt);
        if rv != OGRErr::OGRERR_NONE {
            return Err(GdalError::OgrError {
                err: rv,
                method_name: "OSRExportToWkt",
            });
        }
        Ok(wkt)
    }

    pub fn to_pretty_wkt(&self) -> Result<String> {
        let mut c_wkt: *mut c_char = null_mut();
        let rv = unsafe { gdal_sys::OSRExportToPrettyWkt(self.0, &mut c_wkt, false as c_int) };
        let wkt = _string_free(c_wkt);
        if rv != OGRErr::OGRERR_NONE {
            return Err(GdalError::OgrError {
                err: rv,
                method_name: "OSRExportToPrettyWkt",
            });
        }
        Ok(wkt)
    }

    pub fn is_geographic(&self) -> bool {
        unsafe { gdal_sys::OSRIsGeographic(self.0) == 1 }
    }

    pub fn is_projected(&self) -> bool {
        unsafe { gdal_sys::OSRIsProjected(self.0) == 1 }
    }

    /// `AUTHORITY:CODE` of the root node, e.g. `EPSG:4326`.
    pub fn authority(&self) -> Result<String> {
        let c_name = unsafe { gdal_sys::OSRGetAuthorityName(self.0, ptr::null()) };
        if c_name.is_null() {
            return Err(_last_null_pointer_err("OSRGetAuthorityName"));
        }
        let c_code = unsafe { gdal_sys::OSRGetAuthorityCode(self.0, ptr::null()) };
        if c_code.is_null() {
            return Err(_last_null_pointer_err("OSRGetAuthorityCode"));
        }
        Ok(format!("{}:{}", _string(c_name), _string(c_code)))
    }

    /// Returns the wrapped C pointer
    ///
    /// # Safety
    /// This method returns a raw C pointer
    pub unsafe fn to_c_hsrs(&self) -> OGRSpatialReferenceH {
        self.0
    }
}
