use std::ffi::c_int;
use std::ptr::null_mut;

use gdal_sys::OGRCoordinateTransformationH;

use crate::errors::*;
use crate::spatial_ref::SpatialRef;
use crate::utils::_last_null_pointer_err;

#[derive(Debug)]
/// Defines a coordinate transformation from one [`SpatialRef`] to another.
pub struct CoordTransform {
    inner: OGRCoordinateTransformationH,
    from: String,
    to: String,
}

impl Drop for CoordTransform {
    fn drop(&mut self) {
        unsafe { gdal_sys::OCTDestroyCoordinateTransformation(self.inner) };
    }
}

impl CoordTransform {
    /// Constructs a new transformation from `source` to `target`.
    pub fn new(source: &SpatialRef, target: &SpatialRef) -> Result<CoordTransform> {
        let c_obj = unsafe {
            gdal_sys::OCTNewCoordinateTransformation(source.to_c_hsrs(), target.to_c_hsrs())
        };
        if c_obj.is_null() {
            return Err(_last_null_pointer_err("OCTNewCoordinateTransformation"));
        }
        Ok(Self {
            inner: c_obj,
            from: source.authority().or_else(|_| source.to_wkt())?,
            to: target.authority().or_else(|_| target.to_wkt())?,
        })
    }

    /// Transforms coordinates in place.
    ///
    /// Points that cannot be transformed are set to NaN. Returns the number of such points.
    /// `z` may be empty.
    pub fn transform_coords(&self, x: &mut [f64], y: &mut [f64], z: &mut [f64]) -> Result<usize> {
        let nb_coords = x.len();
        if y.len() != nb_coords || !(z.is_empty() || z.len() == nb_coords) {
            return Err(GdalError::BadArgument(format!(
                "transform coordinate slices have different lengths: {} {} {}",
                nb_coords,
                y.len(),
                z.len()
            )));
        }
        if nb_coords == 0 {
            return Ok(0);
        }
        let mut success: Vec<c_int> = vec![0; nb_coords];
        let ret_val = unsafe {
            gdal_sys::OCTTransformEx(
                self.inner,
                nb_coords as c_int,
                x.as_mut_ptr(),
                y.as_mut_ptr(),
                if z.is_empty() {
                    null_mut()
                } else {
                    z.as_mut_ptr()
                },
                success.as_mut_ptr(),
            )
        };
        // failures are reported per point
        if ret_val == 0 {
            unsafe { gdal_sys::CPLErrorReset() };
        }
        let mut failed = 0;
        for (i, ok) in success.iter().enumerate() {
            if *ok == 0 {
                failed += 1;
                x[i] = f64::NAN;
                y[i] = f64::NAN;
                if !z.is_empty() {
                    z[i] = f64::NAN;
                }
            }
        }
        if failed > 0 {
            tracing::warn!(
                from = %self.from,
                to = %self.to,
                failed,
                "some points failed to transform"
            );
        }
        Ok(failed)
    }

    /// Like [`CoordTransform::transform_coords`], but any failing point is an error.
    pub fn transform_coords_strict(
        &self,
        x: &mut [f64],
        y: &mut [f64],
        z: &mut [f64],
    ) -> Result<()> {
        if self.transform_coords(x, y, z)? > 0 {
            return Err(GdalError::InvalidCoordinateRange {
                from: self.from.clone(),
                to: self.to.clone(),
                msg: None,
            });
        }
        Ok(())
    }

    /// Returns a C pointer to the allocated [`gdal_sys::OGRCoordinateTransformationH`] memory.
    ///
    /// # Safety
    /// This method returns a raw C pointer
    pub unsafe fn to_c_hct(&self) -> OGRCoordinateTransformationH {
        self.inner
    }
}
