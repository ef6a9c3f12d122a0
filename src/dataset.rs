use std::ffi::{c_uint, CString};
use std::path::Path;
use std::ptr;
use std::sync::Once;

use bitflags::bitflags;
use gdal_sys::{GDALAccess, GDALDatasetH, GDALMajorObjectH};

use crate::cpl::CslStringList;
use crate::driver::Driver;
use crate::errors::*;
use crate::metadata::MajorObject;
use crate::utils::{_last_null_pointer_err, _path_to_c_string, _string_array};

static START: Once = Once::new();

pub fn _register_drivers() {
    START.call_once(|| unsafe {
        gdal_sys::GDALAllRegister();
    });
}

bitflags! {
    /// Open flags for `GDALOpenEx`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GdalOpenFlags: c_uint {
        const GDAL_OF_READONLY = 0x00;
        const GDAL_OF_UPDATE = 0x01;
        const GDAL_OF_RASTER = 0x02;
        const GDAL_OF_VECTOR = 0x04;
        const GDAL_OF_SHARED = 0x20;
        const GDAL_OF_VERBOSE_ERROR = 0x40;
    }
}

impl GdalOpenFlags {
    pub fn access(&self) -> GDALAccess::Type {
        if self.contains(GdalOpenFlags::GDAL_OF_UPDATE) {
            GDALAccess::GA_Update
        } else {
            GDALAccess::GA_ReadOnly
        }
    }
}

/// An owned `GDALDatasetH`, closed on drop.
///
/// [`crate::GdalRaster`] and [`crate::GdalVector`] hold one of these while open.
#[derive(Debug)]
pub struct Dataset {
    c_dataset: GDALDatasetH,
    access: GDALAccess::Type,
}

// GDAL datasets may be used from one thread at a time
unsafe impl Send for Dataset {}

impl Dataset {
    pub fn open_ex<P: AsRef<Path>>(
        path: P,
        open_flags: GdalOpenFlags,
        open_options: &CslStringList,
    ) -> Result<Dataset> {
        _register_drivers();
        let c_filename = _path_to_c_string(path.as_ref())?;
        let c_dataset = unsafe {
            gdal_sys::GDALOpenEx(
                c_filename.as_ptr(),
                open_flags.bits(),
                ptr::null(),
                open_options.as_ptr() as *const *const _,
                ptr::null(),
            )
        };
        if c_dataset.is_null() {
            return Err(_last_null_pointer_err("GDALOpenEx"));
        }
        tracing::debug!(path = %path.as_ref().display(), flags = ?open_flags, "opened dataset");
        Ok(Dataset {
            c_dataset,
            access: open_flags.access(),
        })
    }

    /// Takes ownership of a dataset handle returned by a GDAL create/copy/warp function.
    ///
    /// # Safety
    /// `c_dataset` must be a valid, non-NULL handle not owned by anything else.
    pub unsafe fn from_c_dataset(c_dataset: GDALDatasetH, access: GDALAccess::Type) -> Dataset {
        Dataset { c_dataset, access }
    }

    /// Returns the wrapped C pointer
    ///
    /// # Safety
    /// This method returns a raw C pointer
    pub unsafe fn c_dataset(&self) -> GDALDatasetH {
        self.c_dataset
    }

    pub fn is_update(&self) -> bool {
        self.access == GDALAccess::GA_Update
    }

    pub fn driver(&self) -> Driver {
        unsafe {
            let c_driver = gdal_sys::GDALGetDatasetDriver(self.c_dataset);
            Driver::from_c_driver(c_driver)
        }
    }

    /// Files making up the dataset, empty for purely in-memory datasets.
    pub fn file_list(&self) -> Vec<String> {
        let c_list = unsafe { gdal_sys::GDALGetFileList(self.c_dataset) };
        let files = _string_array(c_list);
        unsafe { gdal_sys::CSLDestroy(c_list) };
        files
    }

    pub fn test_capability(&self, capability: &str) -> Result<bool> {
        let c_cap = CString::new(capability)?;
        Ok(unsafe { gdal_sys::GDALDatasetTestCapability(self.c_dataset, c_cap.as_ptr()) } == 1)
    }

    pub fn flush_cache(&self) {
        unsafe {
            gdal_sys::GDALFlushCache(self.c_dataset);
        }
    }
}

impl MajorObject for Dataset {
    fn gdal_object_ptr(&self) -> GDALMajorObjectH {
        self.c_dataset
    }
}

impl Drop for Dataset {
    fn drop(&mut self) {
        unsafe {
            gdal_sys::GDALClose(self.c_dataset);
        }
    }
}
