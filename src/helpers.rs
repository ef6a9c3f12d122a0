//! Small string, path and buffer helpers shared across the crate.

use std::ffi::{c_char, c_int, c_void};
use std::path::{Path, PathBuf};

use geo_types::Coord;

use crate::errors::{GdalError, Result};
use crate::raster::GdalType;

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and paths for which no home directory is known, are
/// returned unchanged.
pub fn path_expand<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// Absolute, canonical form of `path` after tilde expansion.
///
/// When the path does not exist this fails if `must_work` is set, otherwise the
/// expanded path is returned as is. GDAL virtual paths (`/vsi...`) are never touched.
pub fn normalize_path<P: AsRef<Path>>(path: P, must_work: bool) -> Result<PathBuf> {
    let expanded = path_expand(path);
    if expanded.starts_with("/vsi") {
        return Ok(expanded);
    }
    match std::fs::canonicalize(&expanded) {
        Ok(p) => Ok(p),
        Err(_) if !must_work => Ok(expanded),
        Err(_) => Err(GdalError::PathNotFound(expanded.display().to_string())),
    }
}

pub fn str_toupper(s: &str) -> String {
    s.to_ascii_uppercase()
}

pub fn str_tolower(s: &str) -> String {
    s.to_ascii_lowercase()
}

/// Strips one leading `--`, or failing that one leading `-`, from each argument.
///
/// Used to compare GDAL command-line arguments regardless of how they were spelled.
pub fn remove_leading_dashes<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    args.iter()
        .map(|a| {
            let a = a.as_ref();
            a.strip_prefix("--")
                .or_else(|| a.strip_prefix('-'))
                .unwrap_or(a)
                .to_string()
        })
        .collect()
}

/// Whether `v` holds `s`, either as a whole element or as a substring of one.
pub fn contains_str<S: AsRef<str>>(v: &[S], s: &str, match_if_substr: bool) -> bool {
    if match_if_substr {
        v.iter().any(|e| e.as_ref().contains(s))
    } else {
        v.iter().any(|e| e.as_ref() == s)
    }
}

pub fn has_space_char(s: &str) -> bool {
    s.chars().any(char::is_whitespace)
}

/// Address of `data` formatted by `CPLPrintPointer`.
///
/// The result is what the MEM driver expects for its `DATAPOINTER=` open option. The
/// caller must keep `data` alive and unmoved for as long as the MEM dataset uses it.
pub fn data_pointer<T: GdalType>(data: &[T]) -> Result<String> {
    if data.is_empty() {
        return Err(GdalError::BadArgument("data buffer is empty".to_string()));
    }
    let mut buf = [0 as c_char; 32];
    let n = unsafe {
        gdal_sys::CPLPrintPointer(
            buf.as_mut_ptr(),
            data.as_ptr() as *mut c_void,
            buf.len() as c_int,
        )
    };
    let n = (n.max(0) as usize).min(buf.len());
    let bytes: Vec<u8> = buf[..n].iter().map(|&c| c as u8).collect();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Converts a row-major buffer with `ncol` columns into points.
///
/// Columns beyond x and y (z, m) are accepted and dropped. A single point may also be
/// given as a plain vector of 2 to 4 values with `ncol == values.len()`.
pub fn xy_from_flat(values: &[f64], ncol: usize) -> Result<Vec<Coord<f64>>> {
    if !(2..=4).contains(&ncol) {
        return Err(GdalError::BadArgument(format!(
            "input coordinates must have 2 to 4 columns, got {ncol}"
        )));
    }
    if values.len() % ncol != 0 {
        return Err(GdalError::BadArgument(format!(
            "{} values do not fill {ncol} columns",
            values.len()
        )));
    }
    Ok(values
        .chunks_exact(ncol)
        .map(|row| Coord { x: row[0], y: row[1] })
        .collect())
}
