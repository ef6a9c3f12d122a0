use std::ffi::{c_int, CString};
use std::path::Path;

use gdal_sys::{self, GDALAccess, GDALDataType, GDALDriverH, GDALMajorObjectH};

use crate::cpl::CslStringList;
use crate::dataset::{Dataset, _register_drivers};
use crate::errors::*;
use crate::metadata::{MajorObject, Metadata};
use crate::progress::ProgressHook;
use crate::utils::{_last_null_pointer_err, _path_to_c_string, _string};

#[allow(missing_copy_implementations)]
pub struct Driver {
    c_driver: GDALDriverH,
}

impl Driver {
    /// Looks a driver up by its short name, e.g. `GTiff` or `GPKG`.
    pub fn get_driver_by_name(name: &str) -> Result<Driver> {
        _register_drivers();
        let c_name = CString::new(name)?;
        let c_driver = unsafe { gdal_sys::GDALGetDriverByName(c_name.as_ptr()) };
        if c_driver.is_null() {
            return Err(_last_null_pointer_err("GDALGetDriverByName"));
        };
        Ok(Driver { c_driver })
    }

    /// Creates a new Driver object by wrapping a C pointer
    ///
    /// # Safety
    /// This method operates on a raw C pointer
    pub unsafe fn from_c_driver(c_driver: GDALDriverH) -> Driver {
        Driver { c_driver }
    }

    pub fn short_name(&self) -> String {
        let rv = unsafe { gdal_sys::GDALGetDriverShortName(self.c_driver) };
        _string(rv)
    }

    pub fn long_name(&self) -> String {
        let rv = unsafe { gdal_sys::GDALGetDriverLongName(self.c_driver) };
        _string(rv)
    }

    /// Whether the driver advertises a `DCAP_*` capability, e.g. `DCAP_CREATE`.
    pub fn has_capability(&self, capability: &str) -> bool {
        matches!(self.metadata_item(capability, ""), Ok(Some(v)) if v.eq_ignore_ascii_case("YES"))
    }

    pub fn create<P: AsRef<Path>>(
        &self,
        filename: P,
        size_x: usize,
        size_y: usize,
        bands: usize,
        data_type: GDALDataType::Type,
        options: &CslStringList,
    ) -> Result<Dataset> {
        let c_filename = _path_to_c_string(filename)?;
        let c_dataset = unsafe {
            gdal_sys::GDALCreate(
                self.c_driver,
                c_filename.as_ptr(),
                size_x as c_int,
                size_y as c_int,
                bands as c_int,
                data_type,
                options.as_ptr(),
            )
        };

        if c_dataset.is_null() {
            return Err(_last_null_pointer_err("GDALCreate"));
        };

        Ok(unsafe { Dataset::from_c_dataset(c_dataset, GDALAccess::GA_Update) })
    }

    pub fn create_vector_only<P: AsRef<Path>>(
        &self,
        filename: P,
        options: &CslStringList,
    ) -> Result<Dataset> {
        self.create(filename, 0, 0, 0, GDALDataType::GDT_Unknown, options)
    }

    pub fn create_copy<P: AsRef<Path>>(
        &self,
        filename: P,
        source: &Dataset,
        strict: bool,
        options: &CslStringList,
        progress: &mut ProgressHook,
    ) -> Result<Dataset> {
        let c_filename = _path_to_c_string(filename)?;
        let c_dataset = unsafe {
            gdal_sys::GDALCreateCopy(
                self.c_driver,
                c_filename.as_ptr(),
                source.c_dataset(),
                strict as c_int,
                options.as_ptr(),
                progress.func(),
                progress.arg(),
            )
        };
        if c_dataset.is_null() {
            return Err(_last_null_pointer_err("GDALCreateCopy"));
        }
        Ok(unsafe { Dataset::from_c_dataset(c_dataset, GDALAccess::GA_Update) })
    }
}

impl MajorObject for Driver {
    fn gdal_object_ptr(&self) -> GDALMajorObjectH {
        self.c_driver
    }
}
