use std::ffi::{c_char, c_int, c_void, CString};
use std::fmt::{self, Debug, Formatter};
use std::ptr::{self, null_mut};

use gdal_sys::{OGREnvelope, OGRErr, OGRGeometryH, OGRwkbByteOrder, OGRwkbGeometryType};

use crate::errors::*;
use crate::utils::{_last_null_pointer_err, _string, _string_free};

/// Byte order of exported WKB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WkbByteOrder {
    #[default]
    Lsb,
    Msb,
}

impl WkbByteOrder {
    fn to_ogr(self) -> OGRwkbByteOrder::Type {
        match self {
            WkbByteOrder::Lsb => OGRwkbByteOrder::wkbNDR,
            WkbByteOrder::Msb => OGRwkbByteOrder::wkbXDR,
        }
    }
}

impl std::str::FromStr for WkbByteOrder {
    type Err = GdalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "LSB" => Ok(WkbByteOrder::Lsb),
            "MSB" => Ok(WkbByteOrder::Msb),
            _ => Err(GdalError::BadArgument(format!(
                "invalid WKB byte order '{s}', expected LSB or MSB"
            ))),
        }
    }
}

/// OGR Geometry
///
/// An owned geometry is destroyed on drop. A borrowed one (the geometry of a feature)
/// is left alone.
pub struct Geometry {
    c_geometry: OGRGeometryH,
    owned: bool,
}

impl Geometry {
    /// Takes over a geometry handle.
    ///
    /// # Safety
    /// `c_geometry` must be valid. With `owned`, nothing else may destroy it.
    pub unsafe fn with_c_geometry(c_geometry: OGRGeometryH, owned: bool) -> Geometry {
        Geometry { c_geometry, owned }
    }

    /// Creates an empty geometry of `geometry_type`.
    pub fn empty(geometry_type: OGRwkbGeometryType::Type) -> Result<Geometry> {
        let c_geom = unsafe { gdal_sys::OGR_G_CreateGeometry(geometry_type) };
        if c_geom.is_null() {
            return Err(_last_null_pointer_err("OGR_G_CreateGeometry"));
        };
        Ok(unsafe { Geometry::with_c_geometry(c_geom, true) })
    }

    /// Create a geometry by parsing a
    /// [WKT](https://en.wikipedia.org/wiki/Well-known_text) string.
    pub fn from_wkt(wkt: &str) -> Result<Geometry> {
        let c_wkt = CString::new(wkt)?;
        // OGR_G_CreateFromWkt advances the pointer, so a copy is passed
        let mut c_wkt_ptr: *mut c_char = c_wkt.as_ptr() as *mut c_char;
        let mut c_geom = null_mut();
        let rv =
            unsafe { gdal_sys::OGR_G_CreateFromWkt(&mut c_wkt_ptr, ptr::null_mut(), &mut c_geom) };
        if rv != OGRErr::OGRERR_NONE {
            return Err(GdalError::OgrError {
                err: rv,
                method_name: "OGR_G_CreateFromWkt",
            });
        }
        Ok(unsafe { Geometry::with_c_geometry(c_geom, true) })
    }

    /// Create a rectangular geometry from West, South, East and North values.
    pub fn bbox(w: f64, s: f64, e: f64, n: f64) -> Result<Geometry> {
        Geometry::from_wkt(&format!(
            "POLYGON (({w} {n}, {e} {n}, {e} {s}, {w} {s}, {w} {n}))",
        ))
    }

    /// Serialize the geometry as WKT.
    pub fn wkt(&self) -> Result<String> {
        let mut c_wkt = null_mut();
        let rv = unsafe { gdal_sys::OGR_G_ExportToWkt(self.c_geometry, &mut c_wkt) };
        let wkt = _string_free(c_wkt);
        if rv != OGRErr::OGRERR_NONE {
            return Err(GdalError::OgrError {
                err: rv,
                method_name: "OGR_G_ExportToWkt",
            });
        }
        Ok(wkt)
    }

    /// Serialize the geometry as ISO SQL/MM WKT, which spells out Z and M.
    pub fn iso_wkt(&self) -> Result<String> {
        let mut c_wkt = null_mut();
        let rv = unsafe { gdal_sys::OGR_G_ExportToIsoWkt(self.c_geometry, &mut c_wkt) };
        let wkt = _string_free(c_wkt);
        if rv != OGRErr::OGRERR_NONE {
            return Err(GdalError::OgrError {
                err: rv,
                method_name: "OGR_G_ExportToIsoWkt",
            });
        }
        Ok(wkt)
    }

    /// Serialize the geometry as WKB.
    pub fn wkb(&self, byte_order: WkbByteOrder) -> Result<Vec<u8>> {
        let wkb_size = unsafe { gdal_sys::OGR_G_WkbSize(self.c_geometry) as usize };
        let mut wkb = vec![0u8; wkb_size];
        let rv = unsafe {
            gdal_sys::OGR_G_ExportToWkb(self.c_geometry, byte_order.to_ogr(), wkb.as_mut_ptr())
        };
        if rv != OGRErr::OGRERR_NONE {
            return Err(GdalError::OgrError {
                err: rv,
                method_name: "OGR_G_ExportToWkb",
            });
        }
        Ok(wkb)
    }

    pub fn iso_wkb(&self, byte_order: WkbByteOrder) -> Result<Vec<u8>> {
        let wkb_size = unsafe { gdal_sys::OGR_G_WkbSize(self.c_geometry) as usize };
        let mut wkb = vec![0u8; wkb_size];
        let rv = unsafe {
            gdal_sys::OGR_G_ExportToIsoWkb(self.c_geometry, byte_order.to_ogr(), wkb.as_mut_ptr())
        };
        if rv != OGRErr::OGRERR_NONE {
            return Err(GdalError::OgrError {
                err: rv,
                method_name: "OGR_G_ExportToIsoWkb",
            });
        }
        Ok(wkb)
    }

    /// Parses WKB, in either byte order.
    pub fn from_wkb(wkb: &[u8]) -> Result<Geometry> {
        let mut c_geom = null_mut();
        let rv = unsafe {
            gdal_sys::OGR_G_CreateFromWkb(
                wkb.as_ptr() as *const c_void as _,
                ptr::null_mut(),
                &mut c_geom,
                wkb.len() as c_int,
            )
        };
        if rv != OGRErr::OGRERR_NONE {
            return Err(GdalError::OgrError {
                err: rv,
                method_name: "OGR_G_CreateFromWkb",
            });
        }
        Ok(unsafe { Geometry::with_c_geometry(c_geom, true) })
    }

    pub fn geometry_type(&self) -> OGRwkbGeometryType::Type {
        unsafe { gdal_sys::OGR_G_GetGeometryType(self.c_geometry) }
    }

    /// Upper-case geometry name, e.g. `POLYGON`.
    pub fn geometry_name(&self) -> String {
        _string(unsafe { gdal_sys::OGR_G_GetGeometryName(self.c_geometry) })
    }

    /// Bounding box as `[xmin, ymin, xmax, ymax]`.
    pub fn envelope(&self) -> [f64; 4] {
        let mut envelope = OGREnvelope {
            MinX: 0.0,
            MaxX: 0.0,
            MinY: 0.0,
            MaxY: 0.0,
        };
        unsafe { gdal_sys::OGR_G_GetEnvelope(self.c_geometry, &mut envelope) };
        [envelope.MinX, envelope.MinY, envelope.MaxX, envelope.MaxY]
    }

    pub fn is_empty(&self) -> bool {
        unsafe { gdal_sys::OGR_G_IsEmpty(self.c_geometry) == 1 }
    }

    pub fn point_count(&self) -> usize {
        (unsafe { gdal_sys::OGR_G_GetPointCount(self.c_geometry) }) as usize
    }

    pub fn add_point_2d(&mut self, (x, y): (f64, f64)) {
        unsafe { gdal_sys::OGR_G_AddPoint_2D(self.c_geometry, x, y) };
    }

    /// Appends a copy of `sub` to this collection or polygon.
    pub fn add_geometry(&mut self, sub: &Geometry) -> Result<()> {
        let rv = unsafe { gdal_sys::OGR_G_AddGeometry(self.c_geometry, sub.c_geometry) };
        if rv != OGRErr::OGRERR_NONE {
            return Err(GdalError::OgrError {
                err: rv,
                method_name: "OGR_G_AddGeometry",
            });
        }
        Ok(())
    }

    /// Closes any open rings by repeating their first point.
    pub fn close_rings(&mut self) {
        unsafe { gdal_sys::OGR_G_CloseRings(self.c_geometry) };
    }

    /// Returns the wrapped C pointer
    ///
    /// # Safety
    /// This method returns a raw C pointer
    pub unsafe fn c_geometry(&self) -> OGRGeometryH {
        self.c_geometry
    }
}

impl Drop for Geometry {
    fn drop(&mut self) {
        if self.owned {
            unsafe { gdal_sys::OGR_G_DestroyGeometry(self.c_geometry) };
        }
    }
}

impl Clone for Geometry {
    fn clone(&self) -> Geometry {
        let c_geometry = unsafe { gdal_sys::OGR_G_Clone(self.c_geometry) };
        Geometry {
            c_geometry,
            owned: true,
        }
    }
}

impl Debug for Geometry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.wkt() {
            Ok(wkt) => f.write_str(wkt.as_str()),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl PartialEq for Geometry {
    fn eq(&self, other: &Self) -> bool {
        unsafe { gdal_sys::OGR_G_Equals(self.c_geometry, other.c_geometry) != 0 }
    }
}

/// Name of an OGR geometry type, e.g. `Multi Polygon` or `3D Point`.
pub fn geometry_type_to_name(ty: OGRwkbGeometryType::Type) -> String {
    _string(unsafe { gdal_sys::OGRGeometryTypeToName(ty) })
}

/// Parses a WKT-style type name such as `POINT`, `MULTIPOLYGON` or `LINESTRING Z`.
///
/// `NONE` is a layer without geometry, `UNKNOWN` and `GEOMETRY` accept any geometry.
pub fn geometry_type_by_name(name: &str) -> Result<OGRwkbGeometryType::Type> {
    let upper = name.trim().to_ascii_uppercase();
    let (base, z) = match upper.strip_suffix(" Z").or_else(|| upper.strip_suffix("25D")) {
        Some(base) => (base.trim(), true),
        None => (upper.as_str(), false),
    };
    let ty = match base {
        "UNKNOWN" | "GEOMETRY" => OGRwkbGeometryType::wkbUnknown,
        "NONE" => OGRwkbGeometryType::wkbNone,
        "POINT" => OGRwkbGeometryType::wkbPoint,
        "LINESTRING" => OGRwkbGeometryType::wkbLineString,
        "POLYGON" => OGRwkbGeometryType::wkbPolygon,
        "MULTIPOINT" => OGRwkbGeometryType::wkbMultiPoint,
        "MULTILINESTRING" => OGRwkbGeometryType::wkbMultiLineString,
        "MULTIPOLYGON" => OGRwkbGeometryType::wkbMultiPolygon,
        "GEOMETRYCOLLECTION" => OGRwkbGeometryType::wkbGeometryCollection,
        _ => {
            return Err(GdalError::BadArgument(format!(
                "unknown geometry type '{name}'"
            )))
        }
    };
    if z && ty != OGRwkbGeometryType::wkbNone {
        return Ok(unsafe { gdal_sys::OGR_GT_SetZ(ty) });
    }
    Ok(ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::SuppressGDALErrorLog;

    #[test]
    fn test_wkt_round_trip() {
        let geom = Geometry::from_wkt("POINT (1 2)").unwrap();
        assert_eq!(geom.wkt().unwrap(), "POINT (1 2)");
        assert_eq!(geom.geometry_name(), "POINT");
        assert_eq!(geom.geometry_type(), OGRwkbGeometryType::wkbPoint);
        let geom = Geometry::from_wkt("POINT (1 2 3)").unwrap();
        assert_eq!(geom.iso_wkt().unwrap(), "POINT Z (1 2 3)");
    }

    #[test]
    fn test_invalid_wkt() {
        let _nolog = SuppressGDALErrorLog::new();
        assert!(matches!(
            Geometry::from_wkt("POINT (1"),
            Err(GdalError::OgrError {
                method_name: "OGR_G_CreateFromWkt",
                ..
            })
        ));
    }

    #[test]
    fn test_wkb() {
        let geom = Geometry::from_wkt("POINT (1 2)").unwrap();
        let lsb = geom.wkb(WkbByteOrder::Lsb).unwrap();
        assert_eq!(lsb.len(), 21);
        assert_eq!(lsb[0], 1);
        assert_eq!(&lsb[1..5], &[1, 0, 0, 0]);
        let msb = geom.wkb(WkbByteOrder::Msb).unwrap();
        assert_eq!(msb[0], 0);
        assert_eq!(&msb[1..5], &[0, 0, 0, 1]);
        assert_eq!(Geometry::from_wkb(&msb).unwrap(), geom);
        assert_eq!("msb".parse::<WkbByteOrder>().unwrap(), WkbByteOrder::Msb);
        assert!("big".parse::<WkbByteOrder>().is_err());
    }

    #[test]
    fn test_bbox_and_envelope() {
        let geom = Geometry::bbox(-1.0, -2.0, 3.0, 4.0).unwrap();
        assert_eq!(geom.envelope(), [-1.0, -2.0, 3.0, 4.0]);
        assert!(!geom.is_empty());
        assert!(Geometry::empty(OGRwkbGeometryType::wkbPolygon)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_geometry_type_names() {
        assert_eq!(
            geometry_type_by_name("multipolygon").unwrap(),
            OGRwkbGeometryType::wkbMultiPolygon
        );
        assert_eq!(
            geometry_type_by_name("POINT Z").unwrap(),
            OGRwkbGeometryType::wkbPoint25D
        );
        assert_eq!(
            geometry_type_by_name("NONE").unwrap(),
            OGRwkbGeometryType::wkbNone
        );
        assert!(geometry_type_by_name("CIRCLE").is_err());
        assert_eq!(
            geometry_type_to_name(OGRwkbGeometryType::wkbMultiPolygon),
            "Multi Polygon"
        );
    }
}
