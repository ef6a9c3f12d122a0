use gdal_sys::{self, CPLErr};
use std::ffi::{c_char, c_void, CStr, CString};
use std::path::Path;

use crate::errors::*;

/// Copies a GDAL-owned C string. A NULL pointer yields an empty string.
pub fn _string(raw_ptr: *const c_char) -> String {
    if raw_ptr.is_null() {
        return String::new();
    }
    let c_str = unsafe { CStr::from_ptr(raw_ptr) };
    c_str.to_string_lossy().into_owned()
}

/// Copies a C string allocated by GDAL for the caller, then releases it with `VSIFree`.
pub fn _string_free(raw_ptr: *mut c_char) -> String {
    let rv = _string(raw_ptr);
    if !raw_ptr.is_null() {
        unsafe { gdal_sys::VSIFree(raw_ptr as *mut c_void) };
    }
    rv
}

pub fn _string_array(raw_ptr: *mut *mut c_char) -> Vec<String> {
    let mut ret_val: Vec<String> = vec![];
    if raw_ptr.is_null() {
        return ret_val;
    }
    let mut i = 0;
    unsafe {
        loop {
            let next = raw_ptr.add(i).read();
            if next.is_null() {
                break;
            }
            ret_val.push(_string(next));
            i += 1;
        }
    }
    ret_val
}

/// Splits `NAME=VALUE` entries of a GDAL string list. Entries without `=` are skipped.
pub fn _string_tuple(raw_ptr: *mut *mut c_char, delim: char) -> Vec<(String, String)> {
    _string_array(raw_ptr)
        .into_iter()
        .filter_map(|entry| {
            entry
                .split_once(delim)
                .map(|(k, v)| (k.to_string(), v.to_string()))
        })
        .collect()
}

pub fn _last_cpl_err(cpl_err_class: CPLErr::Type) -> GdalError {
    let last_err_no = unsafe { gdal_sys::CPLGetLastErrorNo() };
    let last_err_msg = _string(unsafe { gdal_sys::CPLGetLastErrorMsg() });
    unsafe { gdal_sys::CPLErrorReset() };
    GdalError::CplError {
        class: cpl_err_class,
        number: last_err_no,
        msg: last_err_msg,
    }
}

pub fn _last_null_pointer_err(method_name: &'static str) -> GdalError {
    let last_err_msg = _string(unsafe { gdal_sys::CPLGetLastErrorMsg() });
    unsafe { gdal_sys::CPLErrorReset() };
    GdalError::NullPointer {
        method_name,
        msg: last_err_msg,
    }
}

pub fn _path_to_c_string<P: AsRef<Path>>(path: P) -> Result<CString> {
    let path_ref: &Path = path.as_ref();
    let path_str = path_ref.to_string_lossy();
    CString::new(path_str.as_ref()).map_err(Into::into)
}
