use std::ffi::CString;
use std::path::{Path, PathBuf};
use std::ptr;

use gdal_sys::{self, CPLErr};

use crate::cpl::CslStringList;
use crate::dataset::{Dataset, GdalOpenFlags};
use crate::errors::*;
use crate::geo_transform::GeoTransform;
use crate::metadata::Metadata;
use crate::progress::ProgressHook;
use crate::raster::rasterband::{RasterBand, StatisticsAll};
use crate::raster::types::data_type_name;
use crate::raster::GdalType;
use crate::utils::{_last_cpl_err, _last_null_pointer_err, _string, _string_free};

#[cfg(feature = "ndarray")]
use ndarray::Array2;

/// A raster dataset kept open for reading and, optionally, writing.
///
/// Bands are addressed by 1-based index. Methods taking a `band` treat `0` as the
/// dataset itself where that makes sense (description and metadata).
///
/// ```rust, no_run
/// # fn main() -> gdalraster::errors::Result<()> {
/// use gdalraster::GdalRaster;
///
/// let ds = GdalRaster::new("elev.tif", true, &[] as &[&str])?;
/// let (xsize, ysize, _) = ds.dim()?;
/// let row = ds.read(1, 0, 0, xsize, 1, xsize, 1)?;
/// assert_eq!(row.len(), xsize);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GdalRaster {
    filename: PathBuf,
    open_options: CslStringList,
    dataset: Option<Dataset>,
}

impl GdalRaster {
    pub fn new<P: AsRef<Path>, S: AsRef<str>>(
        filename: P,
        read_only: bool,
        open_options: &[S],
    ) -> Result<GdalRaster> {
        let mut raster = GdalRaster {
            filename: filename.as_ref().to_path_buf(),
            open_options: CslStringList::from_strings(open_options)?,
            dataset: None,
        };
        raster.open(read_only)?;
        Ok(raster)
    }

    /// (Re-)opens the dataset, closing any handle that is currently open.
    pub fn open(&mut self, read_only: bool) -> Result<()> {
        self.close();
        let mut flags = GdalOpenFlags::GDAL_OF_RASTER | GdalOpenFlags::GDAL_OF_VERBOSE_ERROR;
        if !read_only {
            flags |= GdalOpenFlags::GDAL_OF_UPDATE;
        }
        self.dataset = Some(Dataset::open_ex(&self.filename, flags, &self.open_options)?);
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.dataset.is_some()
    }

    pub fn close(&mut self) {
        if self.dataset.take().is_some() {
            tracing::debug!(path = %self.filename.display(), "closed raster");
        }
    }

    pub fn get_filename(&self) -> &Path {
        &self.filename
    }

    /// Borrows the open dataset.
    pub fn dataset(&self) -> Result<&Dataset> {
        self.ds("dataset")
    }

    fn ds(&self, method_name: &'static str) -> Result<&Dataset> {
        self.dataset
            .as_ref()
            .ok_or(GdalError::DatasetClosed { method_name })
    }

    fn ds_update(&self, method_name: &'static str) -> Result<&Dataset> {
        let ds = self.ds(method_name)?;
        if !ds.is_update() {
            return Err(GdalError::ReadOnly { method_name });
        }
        Ok(ds)
    }

    fn band(&self, band: usize, method_name: &'static str) -> Result<RasterBand<'_>> {
        RasterBand::from_dataset(self.ds(method_name)?, band)
    }

    fn band_update(&self, band: usize, method_name: &'static str) -> Result<RasterBand<'_>> {
        RasterBand::from_dataset(self.ds_update(method_name)?, band)
    }

    pub fn get_file_list(&self) -> Result<Vec<String>> {
        Ok(self.ds("get_file_list")?.file_list())
    }

    pub fn get_driver_short_name(&self) -> Result<String> {
        Ok(self.ds("get_driver_short_name")?.driver().short_name())
    }

    pub fn get_driver_long_name(&self) -> Result<String> {
        Ok(self.ds("get_driver_long_name")?.driver().long_name())
    }

    pub fn get_raster_x_size(&self) -> Result<usize> {
        let ds = self.ds("get_raster_x_size")?;
        Ok((unsafe { gdal_sys::GDALGetRasterXSize(ds.c_dataset()) }) as usize)
    }

    pub fn get_raster_y_size(&self) -> Result<usize> {
        let ds = self.ds("get_raster_y_size")?;
        Ok((unsafe { gdal_sys::GDALGetRasterYSize(ds.c_dataset()) }) as usize)
    }

    pub fn get_raster_count(&self) -> Result<usize> {
        let ds = self.ds("get_raster_count")?;
        Ok((unsafe { gdal_sys::GDALGetRasterCount(ds.c_dataset()) }) as usize)
    }

    /// Raster size as (columns, rows, bands).
    pub fn dim(&self) -> Result<(usize, usize, usize)> {
        Ok((
            self.get_raster_x_size()?,
            self.get_raster_y_size()?,
            self.get_raster_count()?,
        ))
    }

    pub fn get_geo_transform(&self) -> Result<GeoTransform> {
        let ds = self.ds("get_geo_transform")?;
        let mut transformation = GeoTransform::default();
        let rv = unsafe {
            gdal_sys::GDALGetGeoTransform(ds.c_dataset(), transformation.as_mut_ptr())
        };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok(transformation)
    }

    pub fn set_geo_transform(&self, transformation: &GeoTransform) -> Result<()> {
        let ds = self.ds_update("set_geo_transform")?;
        let rv = unsafe {
            gdal_sys::GDALSetGeoTransform(ds.c_dataset(), transformation.as_ptr() as *mut f64)
        };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok(())
    }

    /// WKT of the dataset's spatial reference, empty if it has none.
    pub fn get_projection_ref(&self) -> Result<String> {
        let ds = self.ds("get_projection_ref")?;
        Ok(_string(unsafe { gdal_sys::GDALGetProjectionRef(ds.c_dataset()) }))
    }

    pub fn set_projection(&self, projection: &str) -> Result<()> {
        let ds = self.ds_update("set_projection")?;
        let c_projection = CString::new(projection)?;
        let rv = unsafe { gdal_sys::GDALSetProjection(ds.c_dataset(), c_projection.as_ptr()) };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok(())
    }

    /// Extent as `[xmin, ymin, xmax, ymax]`, computed from the geotransform.
    pub fn bbox(&self) -> Result<[f64; 4]> {
        let gt = self.get_geo_transform()?;
        let (xsize, ysize, _) = self.dim()?;
        let x0 = gt[0];
        let x1 = gt[0] + gt[1] * xsize as f64;
        let y0 = gt[3];
        let y1 = gt[3] + gt[5] * ysize as f64;
        Ok([x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1)])
    }

    /// Pixel size as (width, height), both positive.
    pub fn res(&self) -> Result<(f64, f64)> {
        let gt = self.get_geo_transform()?;
        Ok((gt[1].abs(), gt[5].abs()))
    }

    pub fn get_block_size(&self, band: usize) -> Result<(usize, usize)> {
        Ok(self.band(band, "get_block_size")?.block_size())
    }

    pub fn get_data_type_name(&self, band: usize) -> Result<String> {
        Ok(data_type_name(
            self.band(band, "get_data_type_name")?.band_type(),
        ))
    }

    pub fn get_no_data_value(&self, band: usize) -> Result<Option<f64>> {
        Ok(self.band(band, "get_no_data_value")?.no_data_value())
    }

    pub fn set_no_data_value(&self, band: usize, no_data: f64) -> Result<()> {
        self.band_update(band, "set_no_data_value")?
            .set_no_data_value(no_data)
    }

    pub fn delete_no_data_value(&self, band: usize) -> Result<()> {
        self.band_update(band, "delete_no_data_value")?
            .delete_no_data_value()
    }

    pub fn get_unit_type(&self, band: usize) -> Result<String> {
        Ok(self.band(band, "get_unit_type")?.unit_type())
    }

    pub fn set_unit_type(&self, band: usize, unit: &str) -> Result<()> {
        self.band_update(band, "set_unit_type")?.set_unit_type(unit)
    }

    pub fn get_scale(&self, band: usize) -> Result<Option<f64>> {
        Ok(self.band(band, "get_scale")?.scale())
    }

    pub fn set_scale(&self, band: usize, scale: f64) -> Result<()> {
        self.band_update(band, "set_scale")?.set_scale(scale)
    }

    pub fn get_offset(&self, band: usize) -> Result<Option<f64>> {
        Ok(self.band(band, "get_offset")?.offset())
    }

    pub fn set_offset(&self, band: usize, offset: f64) -> Result<()> {
        self.band_update(band, "set_offset")?.set_offset(offset)
    }

    /// Description of `band`, or of the dataset when `band == 0`.
    pub fn get_description(&self, band: usize) -> Result<String> {
        if band == 0 {
            return Ok(self.ds("get_description")?.description());
        }
        Ok(self.band(band, "get_description")?.description())
    }

    pub fn set_description(&self, band: usize, description: &str) -> Result<()> {
        if band == 0 {
            return self.ds_update("set_description")?.set_description(description);
        }
        self.band_update(band, "set_description")?
            .set_description(description)
    }

    /// Metadata `NAME=VALUE` entries of `band` (`0` for the dataset) in `domain`.
    pub fn get_metadata(&self, band: usize, domain: &str) -> Result<Vec<String>> {
        if band == 0 {
            return self.ds("get_metadata")?.metadata_domain(domain);
        }
        self.band(band, "get_metadata")?.metadata_domain(domain)
    }

    pub fn get_metadata_item(
        &self,
        band: usize,
        key: &str,
        domain: &str,
    ) -> Result<Option<String>> {
        if band == 0 {
            return self.ds("get_metadata_item")?.metadata_item(key, domain);
        }
        self.band(band, "get_metadata_item")?
            .metadata_item(key, domain)
    }

    /// Sets a metadata item. Formats with persistent auxiliary metadata (PAM) accept this
    /// on read-only datasets too, so no update access is required.
    pub fn set_metadata_item(
        &self,
        band: usize,
        key: &str,
        value: &str,
        domain: &str,
    ) -> Result<()> {
        if band == 0 {
            return self
                .ds("set_metadata_item")?
                .set_metadata_item(key, value, domain);
        }
        self.band(band, "set_metadata_item")?
            .set_metadata_item(key, value, domain)
    }

    pub fn get_statistics(
        &self,
        band: usize,
        approx_ok: bool,
        force: bool,
    ) -> Result<StatisticsAll> {
        self.band(band, "get_statistics")?
            .get_statistics(approx_ok, force)
    }

    pub fn get_min_max(&self, band: usize, approx_ok: bool) -> Result<(f64, f64)> {
        self.band(band, "get_min_max")?.compute_min_max(approx_ok)
    }

    pub fn get_histogram(
        &self,
        band: usize,
        min: f64,
        max: f64,
        num_buckets: usize,
        include_out_of_range: bool,
        approx_ok: bool,
    ) -> Result<Vec<u64>> {
        self.band(band, "get_histogram")?.histogram(
            min,
            max,
            num_buckets,
            include_out_of_range,
            approx_ok,
        )
    }

    pub fn get_checksum(
        &self,
        band: usize,
        xoff: usize,
        yoff: usize,
        xsize: usize,
        ysize: usize,
    ) -> Result<i32> {
        self.band(band, "get_checksum")?
            .checksum((xoff, yoff), (xsize, ysize))
    }

    pub fn fill_raster(&self, band: usize, value: f64, ivalue: f64) -> Result<()> {
        self.band_update(band, "fill_raster")?.fill(value, ivalue)
    }

    /// Builds overviews at the given decimation `levels` for `bands` (all bands when empty).
    ///
    /// An empty `levels` removes existing overviews. Read-only datasets get external
    /// `.ovr` overviews.
    pub fn build_overviews(
        &self,
        resampling: &str,
        levels: &[i32],
        bands: &[i32],
        quiet: bool,
    ) -> Result<()> {
        let ds = self.ds("build_overviews")?;
        let c_resampling = CString::new(resampling)?;
        let mut levels = levels.to_vec();
        let mut bands = bands.to_vec();
        let mut progress = ProgressHook::terminal(quiet);
        let rv = unsafe {
            gdal_sys::GDALBuildOverviews(
                ds.c_dataset(),
                c_resampling.as_ptr(),
                levels.len() as i32,
                if levels.is_empty() {
                    ptr::null_mut()
                } else {
                    levels.as_mut_ptr()
                },
                bands.len() as i32,
                if bands.is_empty() {
                    ptr::null_mut()
                } else {
                    bands.as_mut_ptr()
                },
                progress.func(),
                progress.arg(),
            )
        };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok(())
    }

    pub fn flush_cache(&self) -> Result<()> {
        self.ds("flush_cache")?.flush_cache();
        Ok(())
    }

    /// The report `gdalinfo` would print, with `args` as its command-line switches.
    pub fn info(&self, args: &[&str]) -> Result<String> {
        let ds = self.ds("info")?;
        let mut c_args = CslStringList::from_strings(args)?;
        let c_options =
            unsafe { gdal_sys::GDALInfoOptionsNew(c_args.as_mut_ptr(), ptr::null_mut()) };
        if c_options.is_null() {
            return Err(_last_null_pointer_err("GDALInfoOptionsNew"));
        }
        let c_info = unsafe { gdal_sys::GDALInfo(ds.c_dataset(), c_options) };
        unsafe { gdal_sys::GDALInfoOptionsFree(c_options) };
        if c_info.is_null() {
            return Err(_last_null_pointer_err("GDALInfo"));
        }
        Ok(_string_free(c_info))
    }

    /// Reads a window as `f64`, resampled to `out_xsize` x `out_ysize`.
    ///
    /// Values are row-major. Pixels equal to the band's nodata value come back as NaN.
    #[allow(clippy::too_many_arguments)]
    pub fn read(
        &self,
        band: usize,
        xoff: usize,
        yoff: usize,
        xsize: usize,
        ysize: usize,
        out_xsize: usize,
        out_ysize: usize,
    ) -> Result<Vec<f64>> {
        let rb = self.band(band, "read")?;
        let mut data =
            rb.read_as::<f64>((xoff, yoff), (xsize, ysize), (out_xsize, out_ysize))?;
        if let Some(no_data) = rb.no_data_value().filter(|nd| !nd.is_nan()) {
            data.iter_mut()
                .filter(|v| **v == no_data)
                .for_each(|v| *v = f64::NAN);
        }
        Ok(data)
    }

    /// Reads a window into a buffer of `T`, without nodata translation.
    #[allow(clippy::too_many_arguments)]
    pub fn read_as<T: GdalType + Default>(
        &self,
        band: usize,
        xoff: usize,
        yoff: usize,
        xsize: usize,
        ysize: usize,
        out_xsize: usize,
        out_ysize: usize,
    ) -> Result<Vec<T>> {
        self.band(band, "read_as")?
            .read_as::<T>((xoff, yoff), (xsize, ysize), (out_xsize, out_ysize))
    }

    #[cfg(feature = "ndarray")]
    /// Reads a full band as an array of shape (rows, cols).
    pub fn read_band_as_array<T: GdalType + Default>(&self, band: usize) -> Result<Array2<T>> {
        let rb = self.band(band, "read_band_as_array")?;
        let size = (rb.x_size(), rb.y_size());
        rb.read_as_array::<T>((0, 0), size, size)
    }

    pub fn write<T: GdalType>(
        &self,
        band: usize,
        xoff: usize,
        yoff: usize,
        xsize: usize,
        ysize: usize,
        data: &[T],
    ) -> Result<()> {
        self.band_update(band, "write")?
            .write((xoff, yoff), (xsize, ysize), data)
    }
}

impl Drop for GdalRaster {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_near;
    use crate::test_utils::{fixture, SuppressGDALErrorLog, TempFixture};

    #[test]
    fn test_open_and_dims() {
        let ds = GdalRaster::new(fixture("int_grid.asc"), true, &[] as &[&str]).unwrap();
        assert!(ds.is_open());
        assert_eq!(ds.dim().unwrap(), (5, 4, 1));
        assert_eq!(ds.get_driver_short_name().unwrap(), "AAIGrid");
        assert_eq!(ds.get_driver_long_name().unwrap(), "Arc/Info ASCII Grid");
        assert_eq!(ds.get_data_type_name(1).unwrap(), "Int32");
        assert_eq!(ds.get_no_data_value(1).unwrap(), Some(-9999.0));
    }

    #[test]
    fn test_georeference() {
        let ds = GdalRaster::new(fixture("int_grid.asc"), true, &[] as &[&str]).unwrap();
        let gt = ds.get_geo_transform().unwrap();
        assert_eq!(gt, [1000.0, 30.0, 0.0, 2120.0, 0.0, -30.0]);
        assert_eq!(ds.bbox().unwrap(), [1000.0, 2000.0, 1150.0, 2120.0]);
        assert_eq!(ds.res().unwrap(), (30.0, 30.0));
        assert!(ds.get_projection_ref().unwrap().contains("12N"));
    }

    #[test]
    fn test_read_with_nodata() {
        let ds = GdalRaster::new(fixture("int_grid.asc"), true, &[] as &[&str]).unwrap();
        let row = ds.read(1, 0, 0, 5, 1, 5, 1).unwrap();
        assert_eq!(&row[..4], &[1.0, 1.0, 2.0, 2.0]);
        assert!(row[4].is_nan());
        let raw: Vec<i32> = ds.read_as(1, 0, 0, 5, 1, 5, 1).unwrap();
        assert_eq!(raw, vec![1, 1, 2, 2, -9999]);
    }

    #[test]
    fn test_statistics() {
        let ds = GdalRaster::new(fixture("int_grid.asc"), true, &[] as &[&str]).unwrap();
        let (min, max) = ds.get_min_max(1, false).unwrap();
        assert_eq!((min, max), (1.0, 4.0));
        let hist = ds.get_histogram(1, 0.5, 4.5, 4, false, false).unwrap();
        assert_eq!(hist.iter().sum::<u64>(), 19);
        assert_eq!(hist, vec![4, 5, 5, 5]);

        // copy, so the .aux.xml lands in a scratch directory
        let tmp = TempFixture::fixture("int_grid.asc");
        let ds = GdalRaster::new(tmp.path(), true, &[] as &[&str]).unwrap();
        let expected = StatisticsAll {
            min: 1.0,
            max: 4.0,
            mean: 49.0 / 19.0,
            std_dev: (430.0f64 / 361.0).sqrt(),
        };
        let stats = ds.get_statistics(1, false, true).unwrap();
        assert_near!(StatisticsAll, stats, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_statistics_not_forced() {
        let tmp = TempFixture::fixture("int_grid.asc");
        let ds = GdalRaster::new(tmp.path(), true, &[] as &[&str]).unwrap();
        // nothing computed yet
        let stats = ds.get_statistics(1, false, false).unwrap();
        assert!(stats.min.is_nan());
        assert!(stats.max.is_nan());
        assert!(stats.mean.is_nan());
        assert!(stats.std_dev.is_nan());

        ds.get_statistics(1, false, true).unwrap();
        let cached = ds.get_statistics(1, false, false).unwrap();
        assert_near!(cached.min, 1.0);
        assert_near!(cached.max, 4.0);
    }

    #[test]
    fn test_build_overviews() {
        let tmp = TempFixture::empty("ovr.tif");
        crate::raster::create("GTiff", tmp.path(), 64, 64, 1, "Byte", &[] as &[&str]).unwrap();
        let ds = GdalRaster::new(tmp.path(), false, &[] as &[&str]).unwrap();
        ds.fill_raster(1, 10.0, 0.0).unwrap();

        let overview_count = |ds: &GdalRaster| unsafe {
            let c_band = gdal_sys::GDALGetRasterBand(ds.dataset().unwrap().c_dataset(), 1);
            gdal_sys::GDALGetOverviewCount(c_band)
        };
        assert_eq!(overview_count(&ds), 0);
        ds.build_overviews("NEAREST", &[2, 4], &[], true).unwrap();
        assert_eq!(overview_count(&ds), 2);

        // a reduced read is served from the overviews
        let small = ds.read(1, 0, 0, 64, 64, 16, 16).unwrap();
        assert_eq!(small.len(), 256);
        assert!(small.iter().all(|&v| v == 10.0));
    }

    #[test]
    fn test_metadata_on_read_only() {
        let tmp = TempFixture::fixture("int_grid.asc");
        let ds = GdalRaster::new(tmp.path(), true, &[] as &[&str]).unwrap();
        ds.set_metadata_item(1, "QUALITY", "checked", "").unwrap();
        assert_eq!(
            ds.get_metadata_item(1, "QUALITY", "").unwrap().as_deref(),
            Some("checked")
        );
        // other setters still need update access
        assert!(matches!(
            ds.set_description(1, "x"),
            Err(GdalError::ReadOnly { .. })
        ));
    }

    #[test]
    fn test_closed_raster() {
        let mut ds = GdalRaster::new(fixture("int_grid.asc"), true, &[] as &[&str]).unwrap();
        ds.close();
        assert!(!ds.is_open());
        assert!(matches!(
            ds.get_raster_x_size(),
            Err(GdalError::DatasetClosed {
                method_name: "get_raster_x_size"
            })
        ));
        ds.open(true).unwrap();
        assert_eq!(ds.get_raster_count().unwrap(), 1);
    }

    #[test]
    fn test_read_only_write_rejected() {
        let ds = GdalRaster::new(fixture("int_grid.asc"), true, &[] as &[&str]).unwrap();
        assert!(matches!(
            ds.write(1, 0, 0, 1, 1, &[5i32]),
            Err(GdalError::ReadOnly { method_name: "write" })
        ));
        assert!(matches!(
            ds.set_no_data_value(1, 0.0),
            Err(GdalError::ReadOnly { .. })
        ));
    }

    #[test]
    fn test_band_out_of_range() {
        let ds = GdalRaster::new(fixture("int_grid.asc"), true, &[] as &[&str]).unwrap();
        assert!(matches!(
            ds.get_block_size(2),
            Err(GdalError::BadArgument(_))
        ));
        assert!(ds.get_block_size(0).is_err());
    }

    #[test]
    fn test_missing_file() {
        let _nolog = SuppressGDALErrorLog::new();
        assert!(GdalRaster::new("does_not_exist.tif", true, &[] as &[&str]).is_err());
    }

    #[test]
    fn test_update_roundtrip() {
        let tmp = TempFixture::empty("update.tif");
        crate::raster::create(
            "GTiff",
            tmp.path(),
            4,
            3,
            1,
            "Float32",
            &[] as &[&str],
        )
        .unwrap();

        let ds = GdalRaster::new(tmp.path(), false, &[] as &[&str]).unwrap();
        ds.set_geo_transform(&[0.0, 10.0, 0.0, 30.0, 0.0, -10.0])
            .unwrap();
        ds.set_no_data_value(1, -1.0).unwrap();
        ds.fill_raster(1, 7.5, 0.0).unwrap();
        ds.write(1, 1, 1, 2, 1, &[1.0f32, -1.0]).unwrap();
        ds.set_unit_type(1, "m").unwrap();
        ds.set_scale(1, 0.5).unwrap();
        ds.set_description(1, "elevation").unwrap();
        ds.set_metadata_item(0, "SOURCE", "unit test", "").unwrap();
        ds.flush_cache().unwrap();

        let row = ds.read(1, 0, 1, 4, 1, 4, 1).unwrap();
        assert_eq!(row[0], 7.5);
        assert_eq!(row[1], 1.0);
        assert!(row[2].is_nan());
        assert_eq!(ds.get_unit_type(1).unwrap(), "m");
        assert_eq!(ds.get_scale(1).unwrap(), Some(0.5));
        assert_eq!(ds.get_description(1).unwrap(), "elevation");
        assert_eq!(
            ds.get_metadata_item(0, "SOURCE", "").unwrap().as_deref(),
            Some("unit test")
        );
        assert!(ds
            .get_metadata(0, "")
            .unwrap()
            .contains(&"SOURCE=unit test".to_string()));

        let stats = ds.get_statistics(1, false, true).unwrap();
        assert_near!(stats.min, 1.0);
        assert_near!(stats.max, 7.5);

        ds.delete_no_data_value(1).unwrap();
        assert_eq!(ds.get_no_data_value(1).unwrap(), None);
    }

    #[test]
    fn test_info_and_checksum() {
        let ds = GdalRaster::new(fixture("int_grid.asc"), true, &[] as &[&str]).unwrap();
        let info = ds.info(&["-nomd"]).unwrap();
        assert!(info.contains("Driver: AAIGrid/Arc/Info ASCII Grid"));
        assert!(info.contains("Size is 5, 4"));
        let c1 = ds.get_checksum(1, 0, 0, 5, 4).unwrap();
        let c2 = ds.get_checksum(1, 0, 0, 5, 4).unwrap();
        assert_eq!(c1, c2);
    }
}
