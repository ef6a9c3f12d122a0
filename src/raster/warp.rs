use std::ffi::c_int;
use std::path::Path;
use std::ptr::null_mut;

use gdal_sys::{GDALAccess, GDALDatasetH, GDALWarpAppOptions, GDALWarpAppOptionsFree};

use crate::cpl::CslStringList;
use crate::dataset::{Dataset, GdalOpenFlags};
use crate::errors::*;
use crate::progress::ProgressHook;
use crate::utils::{_last_null_pointer_err, _path_to_c_string};

/// Wraps a [GDALWarpAppOptions] object.
///
/// [GDALWarpAppOptions]: https://gdal.org/api/gdal_utils.html#_CPPv418GDALWarpAppOptions
pub struct WarpAppOptions {
    c_options: *mut GDALWarpAppOptions,
}

impl WarpAppOptions {
    /// Parses gdalwarp command-line switches, e.g. `["-r", "bilinear", "-tr", "30", "30"]`.
    pub fn new<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let mut c_args = CslStringList::from_strings(args)?;
        let c_options = unsafe { gdal_sys::GDALWarpAppOptionsNew(c_args.as_mut_ptr(), null_mut()) };
        if c_options.is_null() {
            return Err(_last_null_pointer_err("GDALWarpAppOptionsNew"));
        }
        Ok(Self { c_options })
    }

    /// Attaches `progress` for the duration of the options' use.
    pub fn set_progress(&mut self, progress: &mut ProgressHook) {
        unsafe {
            gdal_sys::GDALWarpAppOptionsSetProgress(self.c_options, progress.func(), progress.arg())
        };
    }

    /// Returns the wrapped C pointer
    ///
    /// # Safety
    /// This method returns a raw C pointer
    pub unsafe fn c_options(&self) -> *mut GDALWarpAppOptions {
        self.c_options
    }
}

impl Drop for WarpAppOptions {
    fn drop(&mut self) {
        unsafe { GDALWarpAppOptionsFree(self.c_options) };
    }
}

/// Reprojects and mosaics `src_files` into `dst_filename` the way `gdalwarp` does.
///
/// `cl_arg` holds gdalwarp switches. A non-empty `t_srs` is appended as `-t_srs`.
/// An existing `dst_filename` is updated in place, otherwise it is created (`-of` selects
/// the format). Sources are closed before returning, also on failure.
pub fn warp<P: AsRef<Path>, Q: AsRef<Path>, S: AsRef<str>>(
    src_files: &[P],
    dst_filename: Q,
    t_srs: &str,
    cl_arg: &[S],
    quiet: bool,
) -> Result<()> {
    if src_files.is_empty() {
        return Err(GdalError::BadArgument(
            "warp needs at least one source raster".to_string(),
        ));
    }
    let sources = src_files
        .iter()
        .map(|f| {
            Dataset::open_ex(
                f,
                GdalOpenFlags::GDAL_OF_RASTER | GdalOpenFlags::GDAL_OF_VERBOSE_ERROR,
                &CslStringList::new(),
            )
        })
        .collect::<Result<Vec<_>>>()?;
    let mut c_sources: Vec<GDALDatasetH> =
        sources.iter().map(|ds| unsafe { ds.c_dataset() }).collect();

    let mut args = cl_arg
        .iter()
        .map(|a| a.as_ref().to_string())
        .collect::<Vec<_>>();
    if !t_srs.is_empty() {
        args.push("-t_srs".to_string());
        args.push(t_srs.to_string());
    }
    let mut options = WarpAppOptions::new(&args)?;
    let mut progress = ProgressHook::terminal(quiet);
    options.set_progress(&mut progress);

    let c_dst_filename = _path_to_c_string(&dst_filename)?;
    let mut usage_error: c_int = 0;
    let c_dst = unsafe {
        gdal_sys::GDALWarp(
            c_dst_filename.as_ptr(),
            null_mut(),
            c_sources.len() as c_int,
            c_sources.as_mut_ptr(),
            options.c_options(),
            &mut usage_error,
        )
    };
    if c_dst.is_null() {
        return Err(_last_null_pointer_err("GDALWarp"));
    }
    drop(unsafe { Dataset::from_c_dataset(c_dst, GDALAccess::GA_Update) });
    tracing::debug!(
        dst = %dst_filename.as_ref().display(),
        sources = src_files.len(),
        "warped raster"
    );
    Ok(())
}
