//! Layer algebra
//!
//! Overlay of an input layer (`self`) with a method layer, written into a result layer
//! opened for update. The result layer may be empty, in which case GDAL creates its
//! fields from the inputs. Options are the `KEY=VALUE` strings of `OGR_L_Intersection`
//! and friends (`SKIP_FAILURES=YES`, `PROMOTE_TO_MULTI=YES`, `INPUT_PREFIX=...`).
//!
//! Each operation returns `Ok(false)` when GDAL reports a failure, after logging it.
//! Using a closed layer, or a result layer that is read-only, is an error.

use gdal_sys::{self, GDALProgressFunc, OGRErr, OGRLayerH};

use crate::cpl::CslStringList;
use crate::errors::*;
use crate::progress::ProgressHook;
use crate::vector::GdalVector;

type OverlayFn = unsafe extern "C" fn(
    OGRLayerH,
    OGRLayerH,
    OGRLayerH,
    *mut *mut std::ffi::c_char,
    GDALProgressFunc,
    *mut std::ffi::c_void,
) -> OGRErr::Type;

macro_rules! overlay {
    ($(#[$doc:meta])* $name:ident, $ogr_fn:ident) => {
        $(#[$doc])*
        pub fn $name<S: AsRef<str>>(
            &self,
            method: &GdalVector,
            result: &GdalVector,
            quiet: bool,
            options: &[S],
        ) -> Result<bool> {
            self.overlay(gdal_sys::$ogr_fn, stringify!($ogr_fn), method, result, quiet, options)
        }
    };
}

impl GdalVector {
    fn overlay<S: AsRef<str>>(
        &self,
        ogr_fn: OverlayFn,
        method_name: &'static str,
        method: &GdalVector,
        result: &GdalVector,
        quiet: bool,
        options: &[S],
    ) -> Result<bool> {
        let c_input = self.layer(method_name)?;
        let c_method = method.layer(method_name)?;
        let c_result = result.layer_for_update(method_name)?;
        let mut options = CslStringList::from_strings(options)?;
        let mut progress = ProgressHook::terminal(quiet);

        let rv = unsafe {
            ogr_fn(
                c_input,
                c_method,
                c_result,
                options.as_mut_ptr(),
                progress.func(),
                progress.arg(),
            )
        };
        if rv != OGRErr::OGRERR_NONE {
            tracing::error!(err = rv, method_name, "layer overlay failed");
            return Ok(false);
        }
        Ok(true)
    }

    overlay!(
        /// Features whose geometry is the intersection of an input and a method feature.
        layer_intersection,
        OGR_L_Intersection
    );
    overlay!(
        /// Intersections, plus the parts of input and method features that do not
        /// overlap.
        layer_union,
        OGR_L_Union
    );
    overlay!(
        /// The parts of input and method features that do not overlap.
        layer_sym_difference,
        OGR_L_SymDifference
    );
    overlay!(
        /// Input features, split where they overlap method features.
        layer_identity,
        OGR_L_Identity
    );
    overlay!(
        /// Input features with the overlapping parts replaced by method features.
        layer_update,
        OGR_L_Update
    );
    overlay!(
        /// Parts of input features inside method features, keeping only input fields.
        layer_clip,
        OGR_L_Clip
    );
    overlay!(
        /// Parts of input features outside method features.
        layer_erase,
        OGR_L_Erase
    );
}
