use std::ffi::CString;
use std::ptr;

use gdal_sys::{self, CPLErr, GDALMajorObjectH};

use crate::errors::*;
use crate::utils::{_last_cpl_err, _string, _string_array};

/// Anything that is a `GDALMajorObject` (datasets and raster bands).
pub trait MajorObject {
    fn gdal_object_ptr(&self) -> GDALMajorObjectH;
}

fn c_domain(domain: &str) -> Result<Option<CString>> {
    if domain.is_empty() {
        Ok(None)
    } else {
        Ok(Some(CString::new(domain)?))
    }
}

/// Description and metadata access shared by every [`MajorObject`].
///
/// An empty `domain` selects the default metadata domain.
pub trait Metadata: MajorObject {
    fn description(&self) -> String {
        _string(unsafe { gdal_sys::GDALGetDescription(self.gdal_object_ptr()) })
    }

    fn set_description(&self, description: &str) -> Result<()> {
        let c_description = CString::new(description)?;
        unsafe { gdal_sys::GDALSetDescription(self.gdal_object_ptr(), c_description.as_ptr()) };
        Ok(())
    }

    /// All `NAME=VALUE` entries of `domain`.
    fn metadata_domain(&self, domain: &str) -> Result<Vec<String>> {
        let c_domain = c_domain(domain)?;
        let c_domain_ptr = c_domain.as_ref().map_or(ptr::null(), |d| d.as_ptr());
        let c_list = unsafe { gdal_sys::GDALGetMetadata(self.gdal_object_ptr(), c_domain_ptr) };
        // owned by the object, not freed here
        Ok(_string_array(c_list))
    }

    fn metadata_item(&self, key: &str, domain: &str) -> Result<Option<String>> {
        let c_key = CString::new(key)?;
        let c_domain = c_domain(domain)?;
        let c_domain_ptr = c_domain.as_ref().map_or(ptr::null(), |d| d.as_ptr());
        let c_res = unsafe {
            gdal_sys::GDALGetMetadataItem(self.gdal_object_ptr(), c_key.as_ptr(), c_domain_ptr)
        };
        if c_res.is_null() {
            Ok(None)
        } else {
            Ok(Some(_string(c_res)))
        }
    }

    fn set_metadata_item(&self, key: &str, value: &str, domain: &str) -> Result<()> {
        let c_key = CString::new(key)?;
        let c_value = CString::new(value)?;
        let c_domain = c_domain(domain)?;
        let c_domain_ptr = c_domain.as_ref().map_or(ptr::null(), |d| d.as_ptr());
        let rv = unsafe {
            gdal_sys::GDALSetMetadataItem(
                self.gdal_object_ptr(),
                c_key.as_ptr(),
                c_value.as_ptr(),
                c_domain_ptr,
            )
        };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok(())
    }
}

impl<T: MajorObject> Metadata for T {}
