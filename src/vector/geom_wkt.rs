//! Geometry operations on WKT strings
//!
//! Thin functions over [`Geometry`] that parse their inputs from WKT and hand results
//! back as WKT. Any input that does not parse is an error.

use geo_types::Coord;
use gdal_sys::OGRwkbGeometryType;

use crate::errors::*;
use crate::vector::Geometry;

/// Builds a geometry of `geom_type` from points and returns its WKT.
///
/// `geom_type` is one of `POINT`, `MULTIPOINT`, `LINESTRING` or `POLYGON`
/// (case-insensitive). A polygon's ring is closed if the last point differs from the
/// first one.
pub fn g_create(points: &[Coord<f64>], geom_type: &str) -> Result<String> {
    let geom = match geom_type.to_ascii_uppercase().as_str() {
        "POINT" => {
            if points.len() != 1 {
                return Err(GdalError::BadArgument(format!(
                    "a POINT needs exactly one coordinate, got {}",
                    points.len()
                )));
            }
            let mut pt = Geometry::empty(OGRwkbGeometryType::wkbPoint)?;
            pt.add_point_2d((points[0].x, points[0].y));
            pt
        }
        "MULTIPOINT" => {
            let mut multi = Geometry::empty(OGRwkbGeometryType::wkbMultiPoint)?;
            for c in points {
                let mut pt = Geometry::empty(OGRwkbGeometryType::wkbPoint)?;
                pt.add_point_2d((c.x, c.y));
                multi.add_geometry(&pt)?;
            }
            multi
        }
        "LINESTRING" => {
            let mut line = Geometry::empty(OGRwkbGeometryType::wkbLineString)?;
            for c in points {
                line.add_point_2d((c.x, c.y));
            }
            line
        }
        "POLYGON" => {
            if points.len() < 3 {
                return Err(GdalError::BadArgument(
                    "a POLYGON needs at least three coordinates".to_string(),
                ));
            }
            let mut ring = Geometry::empty(OGRwkbGeometryType::wkbLinearRing)?;
            for c in points {
                ring.add_point_2d((c.x, c.y));
            }
            let mut poly = Geometry::empty(OGRwkbGeometryType::wkbPolygon)?;
            poly.add_geometry(&ring)?;
            poly.close_rings();
            poly
        }
        _ => {
            return Err(GdalError::BadArgument(format!(
                "geometry type '{geom_type}' is not supported"
            )))
        }
    };
    geom.wkt()
}

pub fn g_is_valid(wkt: &str) -> Result<bool> {
    Ok(Geometry::from_wkt(wkt)?.is_valid())
}

macro_rules! binary_predicate {
    ($(#[$doc:meta])* $name:ident, $method:ident) => {
        $(#[$doc])*
        pub fn $name(this_wkt: &str, other_wkt: &str) -> Result<bool> {
            let this = Geometry::from_wkt(this_wkt)?;
            let other = Geometry::from_wkt(other_wkt)?;
            Ok(this.$method(&other))
        }
    };
}

binary_predicate!(g_intersects, intersects);
binary_predicate!(g_equals, equals);
binary_predicate!(g_disjoint, disjoint);
binary_predicate!(g_touches, touches);
binary_predicate!(
    /// Whether the first geometry contains the second.
    g_contains,
    contains
);
binary_predicate!(
    /// Whether the first geometry lies within the second.
    g_within,
    within
);
binary_predicate!(g_crosses, crosses);
binary_predicate!(g_overlaps, overlaps);

pub fn g_buffer(wkt: &str, dist: f64, quad_segs: u32) -> Result<String> {
    Geometry::from_wkt(wkt)?.buffer(dist, quad_segs)?.wkt()
}

macro_rules! binary_set_op {
    ($name:ident, $method:ident) => {
        pub fn $name(this_wkt: &str, other_wkt: &str) -> Result<String> {
            let this = Geometry::from_wkt(this_wkt)?;
            let other = Geometry::from_wkt(other_wkt)?;
            this.$method(&other)?.wkt()
        }
    };
}

binary_set_op!(g_intersection, intersection);
binary_set_op!(g_union, union);
binary_set_op!(g_difference, difference);
binary_set_op!(g_sym_difference, sym_difference);

pub fn g_distance(this_wkt: &str, other_wkt: &str) -> Result<f64> {
    Geometry::from_wkt(this_wkt)?.distance(&Geometry::from_wkt(other_wkt)?)
}

pub fn g_length(wkt: &str) -> Result<f64> {
    Ok(Geometry::from_wkt(wkt)?.length())
}

pub fn g_area(wkt: &str) -> Result<f64> {
    Ok(Geometry::from_wkt(wkt)?.area())
}

/// Centroid as `(x, y)`.
pub fn g_centroid(wkt: &str) -> Result<(f64, f64)> {
    Geometry::from_wkt(wkt)?.centroid()
}

/// Envelope of a geometry as `[xmin, ymin, xmax, ymax]`.
pub fn bbox_from_wkt(wkt: &str) -> Result<[f64; 4]> {
    Ok(Geometry::from_wkt(wkt)?.envelope())
}

/// Polygon WKT for a `[xmin, ymin, xmax, ymax]` box.
pub fn bbox_to_wkt(bbox: &[f64; 4]) -> Result<String> {
    let [xmin, ymin, xmax, ymax] = *bbox;
    if xmin > xmax || ymin > ymax {
        return Err(GdalError::BadArgument(format!(
            "invalid bounding box {bbox:?}"
        )));
    }
    Geometry::bbox(xmin, ymin, xmax, ymax)?.wkt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::SuppressGDALErrorLog;

    const SQUARE: &str = "POLYGON ((0 0,0 10,10 10,10 0,0 0))";
    const SHIFTED: &str = "POLYGON ((5 5,5 15,15 15,15 5,5 5))";

    fn coords(xy: &[(f64, f64)]) -> Vec<Coord<f64>> {
        xy.iter().map(|&(x, y)| Coord { x, y }).collect()
    }

    #[test]
    fn create_geometries() {
        assert_eq!(
            g_create(&coords(&[(1.0, 2.0)]), "point").unwrap(),
            "POINT (1 2)"
        );
        assert_eq!(
            g_create(&coords(&[(0.0, 0.0), (1.0, 1.0)]), "LINESTRING").unwrap(),
            "LINESTRING (0 0,1 1)"
        );
        assert_eq!(
            g_create(&coords(&[(0.0, 0.0), (1.0, 1.0)]), "MULTIPOINT").unwrap(),
            "MULTIPOINT (0 0,1 1)"
        );
        // the ring gets closed
        assert_eq!(
            g_create(&coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]), "POLYGON").unwrap(),
            "POLYGON ((0 0,0 1,1 1,0 0))"
        );
        assert!(g_create(&coords(&[(0.0, 0.0), (1.0, 1.0)]), "POINT").is_err());
        assert!(g_create(&coords(&[(0.0, 0.0)]), "TIN").is_err());
    }

    #[test]
    fn predicates_on_wkt() {
        assert!(g_intersects(SQUARE, SHIFTED).unwrap());
        assert!(g_overlaps(SQUARE, SHIFTED).unwrap());
        assert!(!g_disjoint(SQUARE, SHIFTED).unwrap());
        assert!(!g_touches(SQUARE, SHIFTED).unwrap());
        assert!(!g_contains(SQUARE, SHIFTED).unwrap());
        assert!(g_contains(SQUARE, "POINT (1 1)").unwrap());
        assert!(g_within("POINT (1 1)", SQUARE).unwrap());
        assert!(g_crosses("LINESTRING (-1 5,11 5)", SQUARE).unwrap());
        assert!(g_equals(SQUARE, SQUARE).unwrap());
        // equality is structural, vertex order matters
        assert!(!g_equals(SQUARE, "POLYGON ((0 0,10 0,10 10,0 10,0 0))").unwrap());
        assert!(g_is_valid(SQUARE).unwrap());
    }

    #[test]
    fn set_ops_on_wkt() {
        assert_eq!(g_area(&g_intersection(SQUARE, SHIFTED).unwrap()).unwrap(), 25.0);
        assert_eq!(g_area(&g_union(SQUARE, SHIFTED).unwrap()).unwrap(), 175.0);
        assert_eq!(g_area(&g_difference(SQUARE, SHIFTED).unwrap()).unwrap(), 75.0);
        assert_eq!(
            g_area(&g_sym_difference(SQUARE, SHIFTED).unwrap()).unwrap(),
            150.0
        );
        let buf = g_buffer("POINT (0 0)", 1.0, 30).unwrap();
        assert!(buf.starts_with("POLYGON"));
    }

    #[test]
    fn measures_on_wkt() {
        assert_eq!(g_length("LINESTRING (0 0,3 4)").unwrap(), 5.0);
        assert_eq!(g_distance("POINT (0 0)", "POINT (3 4)").unwrap(), 5.0);
        assert_eq!(g_centroid(SQUARE).unwrap(), (5.0, 5.0));
    }

    #[test]
    fn bbox_conversions() {
        assert_eq!(bbox_from_wkt(SHIFTED).unwrap(), [5.0, 5.0, 15.0, 15.0]);
        let wkt = bbox_to_wkt(&[0.0, 0.0, 10.0, 10.0]).unwrap();
        assert_eq!(bbox_from_wkt(&wkt).unwrap(), [0.0, 0.0, 10.0, 10.0]);
        assert_eq!(g_area(&wkt).unwrap(), 100.0);
        assert!(bbox_to_wkt(&[1.0, 0.0, 0.0, 1.0]).is_err());
    }

    #[test]
    fn invalid_wkt_is_an_error() {
        let _nolog = SuppressGDALErrorLog::new();
        assert!(g_area("POLYGON ((0 0").is_err());
        assert!(g_intersects("nonsense", SQUARE).is_err());
        assert!(bbox_from_wkt("").is_err());
    }
}
