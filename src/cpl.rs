//! GDAL string lists
//!
//! Creation options, open options and command-line style argument vectors all travel
//! to GDAL as a NULL-terminated `char **`. [`CslStringList`] owns such a list.

use std::ffi::{c_char, CString};
use std::fmt::{Debug, Formatter};
use std::ptr;

use gdal_sys::{
    CSLAddString, CSLCount, CSLDestroy, CSLDuplicate, CSLFetchNameValue, CSLSetNameValue,
};

use crate::errors::{GdalError, Result};
use crate::utils::_string;

/// Wraps a [`gdal_sys::CSLConstList`] (a.k.a. `char **papszStrList`).
///
/// Entries are either `KEY=VALUE` pairs (creation and open options) or free-form
/// arguments (`-t_srs`, `EPSG:4326`, ...) for the GDAL utility functions.
pub struct CslStringList {
    list_ptr: *mut *mut c_char,
}

impl CslStringList {
    /// Creates an empty GDAL string list.
    pub fn new() -> Self {
        Self {
            list_ptr: ptr::null_mut(),
        }
    }

    /// Builds a list from string-like values, in order.
    pub fn from_strings<S: AsRef<str>>(values: &[S]) -> Result<Self> {
        let mut list = Self::new();
        for v in values {
            list.add_string(v.as_ref())?;
        }
        Ok(list)
    }

    /// Appends `value` as a new entry.
    pub fn add_string(&mut self, value: &str) -> Result<()> {
        let psz_value = CString::new(value)?;
        self.list_ptr = unsafe { CSLAddString(self.list_ptr, psz_value.as_ptr()) };
        Ok(())
    }

    /// Assigns `value` to `name`, overwriting an existing entry for `name`.
    pub fn set_name_value(&mut self, name: &str, value: &str) -> Result<()> {
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(GdalError::BadArgument(format!(
                "Invalid characters in name: '{name}'"
            )));
        }
        if value.contains(['\n', '\r']) {
            return Err(GdalError::BadArgument(format!(
                "Invalid characters in value: '{value}'"
            )));
        }
        let psz_name = CString::new(name)?;
        let psz_value = CString::new(value)?;

        unsafe {
            self.list_ptr = CSLSetNameValue(self.list_ptr, psz_name.as_ptr(), psz_value.as_ptr());
        }

        Ok(())
    }

    /// Looks up the value of a `KEY=VALUE` entry.
    pub fn fetch_name_value(&self, key: &str) -> Result<Option<String>> {
        let key = CString::new(key)?;
        let c_value = unsafe { CSLFetchNameValue(self.as_ptr(), key.as_ptr()) };
        let value = if c_value.is_null() {
            None
        } else {
            Some(_string(c_value))
        };
        Ok(value)
    }

    pub fn len(&self) -> usize {
        (unsafe { CSLCount(self.as_ptr()) }) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the raw entries.
    pub fn iter(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.len()).map(move |i| _string(unsafe { *self.list_ptr.add(i) }))
    }

    pub fn as_ptr(&self) -> gdal_sys::CSLConstList {
        self.list_ptr
    }

    /// Mutable view for the `char **papszArgv` parameters of the GDAL utility functions.
    pub fn as_mut_ptr(&mut self) -> *mut *mut c_char {
        self.list_ptr
    }
}

impl Drop for CslStringList {
    fn drop(&mut self) {
        unsafe { CSLDestroy(self.list_ptr) }
    }
}

impl Default for CslStringList {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CslStringList {
    fn clone(&self) -> Self {
        let list_ptr = unsafe { CSLDuplicate(self.list_ptr) };
        Self { list_ptr }
    }
}

impl Debug for CslStringList {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
