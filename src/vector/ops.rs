use std::ffi::c_int;

use gdal_sys::OGRErr;

use crate::errors::*;
use crate::utils::_last_null_pointer_err;
use crate::vector::Geometry;

/// # Geometric Predicates
///
/// Spatial relations between two geometries. Without GEOS most of these are not
/// available in GDAL and return `false`, see [`crate::version::has_geos`].
impl Geometry {
    pub fn intersects(&self, other: &Self) -> bool {
        let p = unsafe { gdal_sys::OGR_G_Intersects(self.c_geometry(), other.c_geometry()) };
        p != 0
    }

    pub fn equals(&self, other: &Self) -> bool {
        let p = unsafe { gdal_sys::OGR_G_Equals(self.c_geometry(), other.c_geometry()) };
        p != 0
    }

    pub fn disjoint(&self, other: &Self) -> bool {
        let p = unsafe { gdal_sys::OGR_G_Disjoint(self.c_geometry(), other.c_geometry()) };
        p != 0
    }

    pub fn touches(&self, other: &Self) -> bool {
        let p = unsafe { gdal_sys::OGR_G_Touches(self.c_geometry(), other.c_geometry()) };
        p != 0
    }

    /// `other` lies in `self`, and the interiors intersect.
    pub fn contains(&self, other: &Self) -> bool {
        let p = unsafe { gdal_sys::OGR_G_Contains(self.c_geometry(), other.c_geometry()) };
        p != 0
    }

    pub fn within(&self, other: &Self) -> bool {
        let p = unsafe { gdal_sys::OGR_G_Within(self.c_geometry(), other.c_geometry()) };
        p != 0
    }

    pub fn crosses(&self, other: &Self) -> bool {
        let p = unsafe { gdal_sys::OGR_G_Crosses(self.c_geometry(), other.c_geometry()) };
        p != 0
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        let p = unsafe { gdal_sys::OGR_G_Overlaps(self.c_geometry(), other.c_geometry()) };
        p != 0
    }

    /// Whether the geometry is valid in the OGC simple features sense.
    pub fn is_valid(&self) -> bool {
        let p = unsafe { gdal_sys::OGR_G_IsValid(self.c_geometry()) };
        p != 0
    }
}

/// # Set Operations
impl Geometry {
    fn owned_result(c_geom: gdal_sys::OGRGeometryH, method_name: &'static str) -> Result<Geometry> {
        if c_geom.is_null() {
            return Err(_last_null_pointer_err(method_name));
        }
        Ok(unsafe { Geometry::with_c_geometry(c_geom, true) })
    }

    pub fn intersection(&self, other: &Self) -> Result<Geometry> {
        let c_geom = unsafe { gdal_sys::OGR_G_Intersection(self.c_geometry(), other.c_geometry()) };
        Geometry::owned_result(c_geom, "OGR_G_Intersection")
    }

    pub fn union(&self, other: &Self) -> Result<Geometry> {
        let c_geom = unsafe { gdal_sys::OGR_G_Union(self.c_geometry(), other.c_geometry()) };
        Geometry::owned_result(c_geom, "OGR_G_Union")
    }

    pub fn difference(&self, other: &Self) -> Result<Geometry> {
        let c_geom = unsafe { gdal_sys::OGR_G_Difference(self.c_geometry(), other.c_geometry()) };
        Geometry::owned_result(c_geom, "OGR_G_Difference")
    }

    pub fn sym_difference(&self, other: &Self) -> Result<Geometry> {
        let c_geom =
            unsafe { gdal_sys::OGR_G_SymDifference(self.c_geometry(), other.c_geometry()) };
        Geometry::owned_result(c_geom, "OGR_G_SymDifference")
    }

    /// Buffer of `distance` around the geometry. `n_quad_segs` is the number of segments
    /// used to approximate a 90 degree curve.
    pub fn buffer(&self, distance: f64, n_quad_segs: u32) -> Result<Geometry> {
        let c_geom =
            unsafe { gdal_sys::OGR_G_Buffer(self.c_geometry(), distance, n_quad_segs as i32) };
        Geometry::owned_result(c_geom, "OGR_G_Buffer")
    }
}

/// # Measures
impl Geometry {
    /// Shortest distance between the geometries, an error when GDAL cannot compute it.
    pub fn distance(&self, other: &Self) -> Result<f64> {
        let d = unsafe { gdal_sys::OGR_G_Distance(self.c_geometry(), other.c_geometry()) };
        if d < 0.0 {
            return Err(GdalError::OgrError {
                err: OGRErr::OGRERR_FAILURE,
                method_name: "OGR_G_Distance",
            });
        }
        Ok(d)
    }

    /// Length of a curve, or the sum over a collection. `0` for other geometries.
    pub fn length(&self) -> f64 {
        unsafe { gdal_sys::OGR_G_Length(self.c_geometry()) }
    }

    /// Area of a surface, or the sum over a collection. `0` for other geometries.
    pub fn area(&self) -> f64 {
        unsafe { gdal_sys::OGR_G_Area(self.c_geometry()) }
    }

    pub fn centroid(&self) -> Result<(f64, f64)> {
        let point = Geometry::empty(gdal_sys::OGRwkbGeometryType::wkbPoint)?;
        let rv = unsafe { gdal_sys::OGR_G_Centroid(self.c_geometry(), point.c_geometry()) };
        if rv != OGRErr::OGRERR_NONE as c_int {
            return Err(GdalError::OgrError {
                err: OGRErr::OGRERR_FAILURE,
                method_name: "OGR_G_Centroid",
            });
        }
        let x = unsafe { gdal_sys::OGR_G_GetX(point.c_geometry(), 0) };
        let y = unsafe { gdal_sys::OGR_G_GetY(point.c_geometry(), 0) };
        Ok((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> Geometry {
        Geometry::bbox(x0, y0, x0 + size, y0 + size).unwrap()
    }

    #[test]
    fn predicates() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(5.0, 5.0, 10.0);
        let inner = square(2.0, 2.0, 2.0);
        let far = square(100.0, 100.0, 1.0);
        let adjacent = square(10.0, 0.0, 10.0);

        assert!(a.intersects(&b));
        assert!(a.overlaps(&b));
        assert!(a.contains(&inner));
        assert!(inner.within(&a));
        assert!(a.disjoint(&far));
        assert!(a.touches(&adjacent));
        assert!(!a.overlaps(&adjacent));
        assert!(a.equals(&a.clone()));

        let line = Geometry::from_wkt("LINESTRING (-5 5, 15 5)").unwrap();
        assert!(line.crosses(&a));
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn set_operations() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(5.0, 5.0, 10.0);
        assert_eq!(a.intersection(&b).unwrap().area(), 25.0);
        assert_eq!(a.union(&b).unwrap().area(), 175.0);
        assert_eq!(a.difference(&b).unwrap().area(), 75.0);
        assert_eq!(a.sym_difference(&b).unwrap().area(), 150.0);
    }

    #[test]
    fn measures() {
        let a = square(0.0, 0.0, 10.0);
        let far = square(20.0, 0.0, 10.0);
        assert_eq!(a.distance(&far).unwrap(), 10.0);
        assert_eq!(a.length(), 0.0);
        let line = Geometry::from_wkt("LINESTRING (0 0, 3 4)").unwrap();
        assert_eq!(line.length(), 5.0);
        assert_eq!(a.centroid().unwrap(), (5.0, 5.0));
    }

    #[test]
    fn validity_and_buffer() {
        let bowtie = Geometry::from_wkt("POLYGON ((0 0, 10 10, 10 0, 0 10, 0 0))").unwrap();
        assert!(!bowtie.is_valid());
        let pt = Geometry::from_wkt("POINT (0 0)").unwrap();
        let buf = pt.buffer(10.0, 30).unwrap();
        assert!(buf.is_valid());
        let area = buf.area();
        assert!(area > 310.0 && area < std::f64::consts::PI * 100.0);
    }
}
