//! GDAL Configuration Functions
//!
//! The GDAL library can be configured at runtime using environment variables or
//! by using functions in this module. Options set by calling functions in this
//! module override options set in environment variables.
//!
//! ```
//! use gdalraster::config::*;
//!
//! set_config_option("GDAL_CACHEMAX", "1024").unwrap();
//! assert_eq!(get_config_option("GDAL_CACHEMAX", "").unwrap(), "1024");
//!
//! // an empty value unsets the option
//! set_config_option("GDAL_CACHEMAX", "").unwrap();
//! assert_eq!(get_config_option("GDAL_CACHEMAX", "XXX").unwrap(), "XXX");
//! ```
//!
//! GDAL prints native error messages to stderr by default. [`route_errors_to_tracing`] forwards
//! them to `tracing`, and [`set_error_handler`] installs an arbitrary sink.

use gdal_sys::{CPLErr, CPLErrorNum, CPLGetErrorHandlerUserData};
use std::ffi::{c_char, c_void, CString};
use std::ptr;
use std::sync::Mutex;

use crate::errors::{CplErrType, Result};
use crate::utils::_string;

/// Set a GDAL library configuration option.
///
/// Passing an empty `value` clears the option.
pub fn set_config_option(key: &str, value: &str) -> Result<()> {
    let c_key = CString::new(key.as_bytes())?;
    let c_val = CString::new(value.as_bytes())?;
    let c_val_ptr = if value.is_empty() {
        ptr::null()
    } else {
        c_val.as_ptr()
    };
    unsafe {
        gdal_sys::CPLSetConfigOption(c_key.as_ptr(), c_val_ptr);
    };
    Ok(())
}

/// Get the value of a GDAL library configuration option, or `default` when it is not set.
pub fn get_config_option(key: &str, default: &str) -> Result<String> {
    let c_key = CString::new(key.as_bytes())?;
    let c_default = CString::new(default.as_bytes())?;
    let rv = unsafe { gdal_sys::CPLGetConfigOption(c_key.as_ptr(), c_default.as_ptr()) };
    Ok(_string(rv))
}

/// Clear the value of a GDAL library configuration option.
pub fn clear_config_option(key: &str) -> Result<()> {
    let c_key = CString::new(key.as_bytes())?;
    unsafe {
        gdal_sys::CPLSetConfigOption(c_key.as_ptr(), ptr::null());
    };
    Ok(())
}

/// Set a GDAL library configuration option with **thread local** scope.
pub fn set_thread_local_config_option(key: &str, value: &str) -> Result<()> {
    let c_key = CString::new(key.as_bytes())?;
    let c_val = CString::new(value.as_bytes())?;
    unsafe {
        gdal_sys::CPLSetThreadLocalConfigOption(c_key.as_ptr(), c_val.as_ptr());
    };
    Ok(())
}

/// Get the value of a **thread local** GDAL configuration option, or `default`.
pub fn get_thread_local_config_option(key: &str, default: &str) -> Result<String> {
    let c_key = CString::new(key.as_bytes())?;
    let c_default = CString::new(default.as_bytes())?;
    let rv = unsafe { gdal_sys::CPLGetThreadLocalConfigOption(c_key.as_ptr(), c_default.as_ptr()) };
    Ok(_string(rv))
}

/// Clear the value of a **thread local** GDAL configuration option.
pub fn clear_thread_local_config_option(key: &str) -> Result<()> {
    let c_key = CString::new(key.as_bytes())?;
    unsafe {
        gdal_sys::CPLSetThreadLocalConfigOption(c_key.as_ptr(), ptr::null());
    };
    Ok(())
}

type ErrorCallbackType = dyn FnMut(CplErrType, i32, &str) + 'static + Send;
// Double-boxed: the outer `Box` keeps a stable address while the value moves in and out of
// the `Mutex`, the inner one turns the fat `dyn FnMut` pointer into a thin one that fits
// through GDAL's `void *pUserData`.
type PinnedErrorCallback = Box<Box<ErrorCallbackType>>;

static ERROR_CALLBACK: Mutex<Option<PinnedErrorCallback>> = Mutex::new(None);

/// Set a custom error handler for GDAL.
///
/// The callback receives the error class, the error number and the message. It must be
/// `Send` and `Sync` since GDAL may call it from any thread.
pub fn set_error_handler<F>(callback: F)
where
    F: FnMut(CplErrType, i32, &str) + 'static + Send + Sync,
{
    unsafe extern "C" fn error_handler(
        error_type: CPLErr::Type,
        error_num: CPLErrorNum,
        error_msg_ptr: *const c_char,
    ) {
        let error_msg = _string(error_msg_ptr);
        let error_type: CplErrType = error_type.into();

        let callback_raw = CPLGetErrorHandlerUserData();
        let callback: &mut Box<ErrorCallbackType> = &mut *(callback_raw as *mut Box<_>);

        callback(error_type, error_num, &error_msg);
    }

    let mut callback: PinnedErrorCallback = Box::new(Box::new(callback));

    let callback_ref: &mut Box<ErrorCallbackType> = callback.as_mut();

    let mut callback_lock = match ERROR_CALLBACK.lock() {
        Ok(guard) => guard,
        // poisoning could only occur on `CPLSetErrorHandler(Ex)` panicking
        Err(poison_error) => poison_error.into_inner(),
    };

    unsafe {
        gdal_sys::CPLSetErrorHandlerEx(Some(error_handler), callback_ref as *mut _ as *mut c_void);
    };

    callback_lock.replace(callback);
}

/// Remove a custom error handler, restoring GDAL's default handler.
pub fn remove_error_handler() {
    let mut callback_lock = match ERROR_CALLBACK.lock() {
        Ok(guard) => guard,
        Err(poison_error) => poison_error.into_inner(),
    };

    unsafe {
        gdal_sys::CPLSetErrorHandler(None);
    };

    callback_lock.take();
}

/// Forward every GDAL error message to `tracing`, with the level following the CPL class.
pub fn route_errors_to_tracing() {
    set_error_handler(|class, number, msg| match class {
        CplErrType::None | CplErrType::Debug => {
            tracing::debug!(target: "gdal", number, "{msg}")
        }
        CplErrType::Warning => tracing::warn!(target: "gdal", number, "{msg}"),
        CplErrType::Failure | CplErrType::Fatal => {
            tracing::error!(target: "gdal", number, "{msg}")
        }
    });
}
