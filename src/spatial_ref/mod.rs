//! Spatial reference systems and coordinate transformation
//!
//! All functions take SRS definitions as strings in any form `OSRSetFromUserInput`
//! understands, and coordinates in traditional GIS order (x/longitude first).

mod srs;
mod transform;

use geo_types::Coord;

pub use srs::SpatialRef;
pub use transform::CoordTransform;

use crate::errors::*;

/// WKT for an EPSG code.
pub fn epsg_to_wkt(epsg: u32, pretty: bool) -> Result<String> {
    let srs = SpatialRef::from_epsg(epsg)?;
    if pretty {
        srs.to_pretty_wkt()
    } else {
        srs.to_wkt()
    }
}

/// Converts a user-supplied SRS definition to WKT. An empty definition yields an empty
/// string.
pub fn srs_to_wkt(srs: &str, pretty: bool) -> Result<String> {
    if srs.is_empty() {
        return Ok(String::new());
    }
    let srs = SpatialRef::from_definition(srs)?;
    if pretty {
        srs.to_pretty_wkt()
    } else {
        srs.to_wkt()
    }
}

pub fn srs_is_geographic(srs: &str) -> Result<bool> {
    if srs.is_empty() {
        return Ok(false);
    }
    Ok(SpatialRef::from_definition(srs)?.is_geographic())
}

pub fn srs_is_projected(srs: &str) -> Result<bool> {
    if srs.is_empty() {
        return Ok(false);
    }
    Ok(SpatialRef::from_definition(srs)?.is_projected())
}

fn transform_points(pts: &[Coord<f64>], ct: &CoordTransform) -> Result<Vec<Coord<f64>>> {
    let mut x = pts.iter().map(|c| c.x).collect::<Vec<_>>();
    let mut y = pts.iter().map(|c| c.y).collect::<Vec<_>>();
    ct.transform_coords(&mut x, &mut y, &mut [])?;
    Ok(x.into_iter()
        .zip(y)
        .map(|(x, y)| Coord { x, y })
        .collect())
}

/// Transforms points between two spatial reference systems. Points that fail to
/// transform come back as NaN.
pub fn transform_xy(pts: &[Coord<f64>], srs_from: &str, srs_to: &str) -> Result<Vec<Coord<f64>>> {
    let from = SpatialRef::from_definition(srs_from)?;
    let to = SpatialRef::from_definition(srs_to)?;
    let ct = CoordTransform::new(&from, &to)?;
    transform_points(pts, &ct)
}

/// Inverse projects points to longitude/latitude.
///
/// The geographic system is the one underlying `srs`, unless `well_known_gcs` names
/// another (`WGS84`, `NAD83`, `EPSG:4269`, ...).
pub fn inv_project(
    pts: &[Coord<f64>],
    srs: &str,
    well_known_gcs: Option<&str>,
) -> Result<Vec<Coord<f64>>> {
    let from = SpatialRef::from_definition(srs)?;
    let to = match well_known_gcs {
        Some(name) if !name.is_empty() => SpatialRef::from_well_known_geog_cs(name)?,
        _ => from.geog_cs()?,
    };
    let ct = CoordTransform::new(&from, &to)?;
    transform_points(pts, &ct)
}
