use std::path::Path;

use crate::cpl::CslStringList;
use crate::dataset::{Dataset, GdalOpenFlags};
use crate::driver::Driver;
use crate::errors::*;
use crate::progress::ProgressHook;
use crate::raster::types::data_type_by_name;

/// Creates a new raster dataset and closes it again.
///
/// `data_type` is a GDAL type name (`Byte`, `Int16`, `Float32`, ...) and `options` are
/// driver creation options in `KEY=VALUE` form.
///
/// ```rust, no_run
/// # fn main() -> gdalraster::errors::Result<()> {
/// gdalraster::raster::create("GTiff", "/tmp/new.tif", 512, 512, 1, "Int16", &["COMPRESS=LZW"])?;
/// # Ok(())
/// # }
/// ```
pub fn create<P: AsRef<Path>, S: AsRef<str>>(
    format: &str,
    dst_filename: P,
    xsize: usize,
    ysize: usize,
    nbands: usize,
    data_type: &str,
    options: &[S],
) -> Result<()> {
    let driver = Driver::get_driver_by_name(format)?;
    if !driver.has_capability("DCAP_CREATE") {
        return Err(GdalError::BadArgument(format!(
            "driver '{format}' does not support create"
        )));
    }
    let data_type = data_type_by_name(data_type)?;
    let options = CslStringList::from_strings(options)?;
    let ds = driver.create(&dst_filename, xsize, ysize, nbands, data_type, &options)?;
    drop(ds);
    tracing::debug!(path = %dst_filename.as_ref().display(), format, "created raster");
    Ok(())
}

/// Copies `src_filename` into a new dataset of `format`.
///
/// With `strict`, the copy fails rather than silently dropping what the output format
/// cannot represent. Progress goes to the terminal unless `quiet`.
pub fn create_copy<P: AsRef<Path>, Q: AsRef<Path>, S: AsRef<str>>(
    format: &str,
    dst_filename: P,
    src_filename: Q,
    strict: bool,
    options: &[S],
    quiet: bool,
) -> Result<()> {
    let driver = Driver::get_driver_by_name(format)?;
    if !driver.has_capability("DCAP_CREATECOPY") && !driver.has_capability("DCAP_CREATE") {
        return Err(GdalError::BadArgument(format!(
            "driver '{format}' does not support copy creation"
        )));
    }
    let src = Dataset::open_ex(
        &src_filename,
        GdalOpenFlags::GDAL_OF_RASTER | GdalOpenFlags::GDAL_OF_VERBOSE_ERROR,
        &CslStringList::new(),
    )?;
    let options = CslStringList::from_strings(options)?;
    let mut progress = ProgressHook::terminal(quiet);
    let dst = driver.create_copy(&dst_filename, &src, strict, &options, &mut progress)?;
    drop(dst);
    tracing::debug!(
        src = %src_filename.as_ref().display(),
        dst = %dst_filename.as_ref().display(),
        format,
        "copied raster"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::GdalRaster;
    use crate::test_utils::{fixture, SuppressGDALErrorLog, TempFixture};

    #[test]
    fn test_create() {
        let tmp = TempFixture::empty("created.tif");
        create("GTiff", tmp.path(), 10, 8, 2, "UInt16", &["COMPRESS=DEFLATE"]).unwrap();
        let ds = GdalRaster::new(tmp.path(), true, &[] as &[&str]).unwrap();
        assert_eq!(ds.dim().unwrap(), (10, 8, 2));
        assert_eq!(ds.get_data_type_name(2).unwrap(), "UInt16");
        assert_eq!(
            ds.get_metadata_item(0, "COMPRESSION", "IMAGE_STRUCTURE")
                .unwrap()
                .as_deref(),
            Some("DEFLATE")
        );
    }

    #[test]
    fn test_create_bad_arguments() {
        let _nolog = SuppressGDALErrorLog::new();
        let tmp = TempFixture::empty("bad.tif");
        assert!(create("NOPE", tmp.path(), 1, 1, 1, "Byte", &[] as &[&str]).is_err());
        assert!(matches!(
            create("GTiff", tmp.path(), 1, 1, 1, "Int5", &[] as &[&str]),
            Err(GdalError::BadArgument(_))
        ));
        // AAIGrid can only copy
        assert!(matches!(
            create("AAIGrid", tmp.path(), 1, 1, 1, "Int32", &[] as &[&str]),
            Err(GdalError::BadArgument(_))
        ));
    }

    #[test]
    fn test_create_copy() {
        let tmp = TempFixture::empty("copy.tif");
        create_copy(
            "GTiff",
            tmp.path(),
            fixture("int_grid.asc"),
            false,
            &["TILED=YES"],
            true,
        )
        .unwrap();
        let ds = GdalRaster::new(tmp.path(), true, &[] as &[&str]).unwrap();
        assert_eq!(ds.dim().unwrap(), (5, 4, 1));
        assert_eq!(ds.get_no_data_value(1).unwrap(), Some(-9999.0));
        let src = GdalRaster::new(fixture("int_grid.asc"), true, &[] as &[&str]).unwrap();
        assert_eq!(
            ds.get_checksum(1, 0, 0, 5, 4).unwrap(),
            src.get_checksum(1, 0, 0, 5, 4).unwrap()
        );
    }
}
