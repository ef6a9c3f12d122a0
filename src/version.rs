//! GDAL version and build inspection
//!
//! ```rust, no_run
//! let v = gdalraster::version::gdal_version();
//! println!("{}", v.summary);
//! ```
//! ```text
//! GDAL 3.8.4, released 2024/02/08
//! ```

use std::ffi::CString;
use std::fmt::{Display, Formatter};

use crate::utils::_string;

/// Calls `GDALVersionInfo`, expecting `key` as one of
/// `VERSION_NUM`, `RELEASE_DATE`, `RELEASE_NAME`, `--version`, `LICENSE`, `BUILD_INFO`.
pub fn version_info(key: &str) -> String {
    let c_key = CString::new(key.as_bytes()).unwrap_or_default();
    _string(unsafe { gdal_sys::GDALVersionInfo(c_key.as_ptr()) })
}

/// Version of the GDAL library in use at runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GdalVersion {
    /// One line summary, e.g. "GDAL 3.8.4, released 2024/02/08"
    pub summary: String,
    /// `GDAL_VERSION_NUM` formatted as a string, e.g. "3080400"
    pub version_num: String,
    /// e.g. "20240208"
    pub release_date: String,
    /// e.g. "3.8.4"
    pub release_name: String,
}

impl GdalVersion {
    /// `GDAL_VERSION_NUM` as an integer, 0 if GDAL reported something unparsable.
    pub fn version_number(&self) -> i64 {
        self.version_num.parse().unwrap_or(0)
    }
}

impl Display for GdalVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary)
    }
}

pub fn gdal_version() -> GdalVersion {
    GdalVersion {
        summary: version_info("--version"),
        version_num: version_info("VERSION_NUM"),
        release_date: version_info("RELEASE_DATE"),
        release_name: version_info("RELEASE_NAME"),
    }
}

/// `NAME=VALUE` pairs describing build-time options.
pub fn build_info() -> Vec<(String, String)> {
    version_info("BUILD_INFO")
        .lines()
        .filter_map(|l| l.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Whether GDAL was built against GEOS.
///
/// Without GEOS most of the geometry predicates and set operations fail or fall back to
/// envelope comparisons.
pub fn has_geos() -> bool {
    build_info()
        .iter()
        .any(|(k, v)| k == "GEOS_ENABLED" && v == "YES")
}
