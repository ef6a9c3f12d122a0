use std::mem::MaybeUninit;

use geo_types::Coord;

use crate::errors::{GdalError, Result};

/// An affine transform between pixel/line `(P, L)` space and georeferenced `(Xp, Yp)` space.
///
///   * `GeoTransform[0]`: x-coordinate of the upper-left corner of the upper-left pixel.
///   * `GeoTransform[1]`: W-E pixel resolution (pixel width).
///   * `GeoTransform[2]`: row rotation (typically zero).
///   * `GeoTransform[3]`: y-coordinate of the upper-left corner of the upper-left pixel.
///   * `GeoTransform[4]`: column rotation (typically zero).
///   * `GeoTransform[5]`: N-S pixel resolution (pixel height), negative for a North-up image.
pub type GeoTransform = [f64; 6];

/// Extension methods on [`GeoTransform`]
pub trait GeoTransformEx {
    /// Apply GeoTransform to a pixel/line coordinate.
    fn apply(&self, pixel: f64, line: f64) -> (f64, f64);

    /// Invert a [`GeoTransform`].
    fn invert(&self) -> Result<GeoTransform>;
}

impl GeoTransformEx for GeoTransform {
    fn apply(&self, pixel: f64, line: f64) -> (f64, f64) {
        let mut geo_x = MaybeUninit::<f64>::uninit();
        let mut geo_y = MaybeUninit::<f64>::uninit();
        unsafe {
            gdal_sys::GDALApplyGeoTransform(
                self.as_ptr() as *mut f64,
                pixel,
                line,
                geo_x.as_mut_ptr(),
                geo_y.as_mut_ptr(),
            );
            (geo_x.assume_init(), geo_y.assume_init())
        }
    }

    fn invert(&self) -> Result<GeoTransform> {
        let mut gt_out = MaybeUninit::<GeoTransform>::uninit();
        let rv = unsafe {
            gdal_sys::GDALInvGeoTransform(
                self.as_ptr() as *mut f64,
                (*gt_out.as_mut_ptr()).as_mut_ptr(),
            )
        };
        if rv == 0 {
            return Err(GdalError::BadArgument(
                "Geo transform is uninvertible".to_string(),
            ));
        }
        let result = unsafe { gt_out.assume_init() };
        Ok(result)
    }
}

/// Inverse of `gt`, mapping georeferenced coordinates back to pixel/line.
pub fn inv_geotransform(gt: &GeoTransform) -> Result<GeoTransform> {
    gt.invert()
}

/// Fractional pixel/line positions of georeferenced points. NaN inputs stay NaN.
pub fn get_pixel_line_f64(xy: &[Coord<f64>], gt: &GeoTransform) -> Result<Vec<(f64, f64)>> {
    let inv = gt.invert()?;
    Ok(xy
        .iter()
        .map(|c| {
            if c.x.is_nan() || c.y.is_nan() {
                (f64::NAN, f64::NAN)
            } else {
                inv.apply(c.x, c.y)
            }
        })
        .collect())
}

/// Integer pixel/line (column/row) containing each georeferenced point.
///
/// Positions are floored, so a point on the left or top edge of a pixel belongs to that
/// pixel. Points with a NaN coordinate map to `i32::MIN`.
pub fn get_pixel_line(xy: &[Coord<f64>], gt: &GeoTransform) -> Result<Vec<(i32, i32)>> {
    Ok(get_pixel_line_f64(xy, gt)?
        .into_iter()
        .map(|(p, l)| {
            if p.is_nan() || l.is_nan() {
                (i32::MIN, i32::MIN)
            } else {
                (p.floor() as i32, l.floor() as i32)
            }
        })
        .collect())
}
