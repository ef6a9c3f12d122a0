use std::ffi::{c_int, c_void, CString};
use std::marker::PhantomData;

use gdal_sys::{self, CPLErr, GDALDataType, GDALMajorObjectH, GDALRWFlag, GDALRasterBandH};

use crate::dataset::Dataset;
use crate::errors::*;
use crate::metadata::MajorObject;
use crate::raster::GdalType;
use crate::utils::{_last_cpl_err, _string};

#[cfg(feature = "ndarray")]
use ndarray::Array2;

/// Summary statistics of a band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatisticsAll {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl StatisticsAll {
    pub(crate) fn unavailable() -> Self {
        StatisticsAll {
            min: f64::NAN,
            max: f64::NAN,
            mean: f64::NAN,
            std_dev: f64::NAN,
        }
    }
}

/// Represents a single band of a dataset.
///
/// This object carries the lifetime of the dataset that
/// contains it. This is necessary to prevent the dataset
/// from being dropped before the band.
pub struct RasterBand<'a> {
    c_rasterband: GDALRasterBandH,
    phantom: PhantomData<&'a Dataset>,
}

impl<'a> RasterBand<'a> {
    /// Fetches band `band_index` (1-based) of `dataset`.
    pub fn from_dataset(dataset: &'a Dataset, band_index: usize) -> Result<Self> {
        let count = unsafe { gdal_sys::GDALGetRasterCount(dataset.c_dataset()) } as usize;
        if band_index < 1 || band_index > count {
            return Err(GdalError::BadArgument(format!(
                "band {band_index} is out of range, the dataset has {count} band(s)"
            )));
        }
        let c_rasterband =
            unsafe { gdal_sys::GDALGetRasterBand(dataset.c_dataset(), band_index as c_int) };
        if c_rasterband.is_null() {
            return Err(crate::utils::_last_null_pointer_err("GDALGetRasterBand"));
        }
        Ok(RasterBand {
            c_rasterband,
            phantom: PhantomData,
        })
    }

    pub fn block_size(&self) -> (usize, usize) {
        let mut size_x = 0;
        let mut size_y = 0;
        unsafe { gdal_sys::GDALGetBlockSize(self.c_rasterband, &mut size_x, &mut size_y) };
        (size_x as usize, size_y as usize)
    }

    pub fn x_size(&self) -> usize {
        (unsafe { gdal_sys::GDALGetRasterBandXSize(self.c_rasterband) }) as usize
    }

    pub fn y_size(&self) -> usize {
        (unsafe { gdal_sys::GDALGetRasterBandYSize(self.c_rasterband) }) as usize
    }

    pub fn band_type(&self) -> GDALDataType::Type {
        unsafe { gdal_sys::GDALGetRasterDataType(self.c_rasterband) }
    }

    /// Read data from this band into a slice.
    ///
    /// `window` is the top-left offset, `window_size` the source size and `size` the
    /// buffer size. GDAL resamples (nearest neighbour) when the two sizes differ.
    pub fn read_into_slice<T: GdalType>(
        &self,
        window: (usize, usize),
        window_size: (usize, usize),
        size: (usize, usize),
        buffer: &mut [T],
    ) -> Result<()> {
        let pixels = size.0 * size.1;
        if buffer.len() != pixels {
            return Err(GdalError::BadArgument(format!(
                "buffer of length {} does not hold {} x {} pixels",
                buffer.len(),
                size.0,
                size.1
            )));
        }
        let rv = unsafe {
            gdal_sys::GDALRasterIO(
                self.c_rasterband,
                GDALRWFlag::GF_Read,
                window.0 as c_int,
                window.1 as c_int,
                window_size.0 as c_int,
                window_size.1 as c_int,
                buffer.as_mut_ptr() as *mut c_void,
                size.0 as c_int,
                size.1 as c_int,
                T::gdal_type(),
                0,
                0,
            )
        };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok(())
    }

    pub fn read_as<T: GdalType + Default>(
        &self,
        window: (usize, usize),
        window_size: (usize, usize),
        size: (usize, usize),
    ) -> Result<Vec<T>> {
        let mut data = vec![T::default(); size.0 * size.1];
        self.read_into_slice(window, window_size, size, &mut data)?;
        Ok(data)
    }

    #[cfg(feature = "ndarray")]
    /// The array shape is (rows, cols) while raster sizes are (cols, rows).
    pub fn read_as_array<T: GdalType + Default>(
        &self,
        window: (usize, usize),
        window_size: (usize, usize),
        array_size: (usize, usize),
    ) -> Result<Array2<T>> {
        let data = self.read_as::<T>(window, window_size, array_size)?;
        Ok(Array2::from_shape_vec(
            (array_size.1, array_size.0),
            data,
        )?)
    }

    pub fn write<T: GdalType>(
        &self,
        window: (usize, usize),
        window_size: (usize, usize),
        data: &[T],
    ) -> Result<()> {
        if data.len() != window_size.0 * window_size.1 {
            return Err(GdalError::BadArgument(format!(
                "{} values do not fill a {} x {} window",
                data.len(),
                window_size.0,
                window_size.1
            )));
        }
        let rv = unsafe {
            gdal_sys::GDALRasterIO(
                self.c_rasterband,
                GDALRWFlag::GF_Write,
                window.0 as c_int,
                window.1 as c_int,
                window_size.0 as c_int,
                window_size.1 as c_int,
                data.as_ptr() as *mut c_void,
                window_size.0 as c_int,
                window_size.1 as c_int,
                T::gdal_type(),
                0,
                0,
            )
        };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok(())
    }

    pub fn no_data_value(&self) -> Option<f64> {
        let mut pb_success = 1;
        let no_data =
            unsafe { gdal_sys::GDALGetRasterNoDataValue(self.c_rasterband, &mut pb_success) };
        if pb_success == 1 {
            return Some(no_data);
        }
        None
    }

    pub fn set_no_data_value(&self, no_data: f64) -> Result<()> {
        let rv = unsafe { gdal_sys::GDALSetRasterNoDataValue(self.c_rasterband, no_data) };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok(())
    }

    pub fn delete_no_data_value(&self) -> Result<()> {
        let rv = unsafe { gdal_sys::GDALDeleteRasterNoDataValue(self.c_rasterband) };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok(())
    }

    pub fn unit_type(&self) -> String {
        _string(unsafe { gdal_sys::GDALGetRasterUnitType(self.c_rasterband) })
    }

    pub fn set_unit_type(&self, unit: &str) -> Result<()> {
        let c_unit = CString::new(unit)?;
        let rv = unsafe { gdal_sys::GDALSetRasterUnitType(self.c_rasterband, c_unit.as_ptr()) };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok(())
    }

    /// Scale factor, `None` if the band does not define one.
    pub fn scale(&self) -> Option<f64> {
        let mut pb_success = 1;
        let scale = unsafe { gdal_sys::GDALGetRasterScale(self.c_rasterband, &mut pb_success) };
        (pb_success == 1).then_some(scale)
    }

    pub fn set_scale(&self, scale: f64) -> Result<()> {
        let rv = unsafe { gdal_sys::GDALSetRasterScale(self.c_rasterband, scale) };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok(())
    }

    /// Offset, `None` if the band does not define one.
    pub fn offset(&self) -> Option<f64> {
        let mut pb_success = 1;
        let offset = unsafe { gdal_sys::GDALGetRasterOffset(self.c_rasterband, &mut pb_success) };
        (pb_success == 1).then_some(offset)
    }

    pub fn set_offset(&self, offset: f64) -> Result<()> {
        let rv = unsafe { gdal_sys::GDALSetRasterOffset(self.c_rasterband, offset) };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok(())
    }

    /// Band statistics, all NaN when they are not cached and `force` is false.
    pub fn get_statistics(&self, approx_ok: bool, force: bool) -> Result<StatisticsAll> {
        let mut stats = StatisticsAll::unavailable();
        let rv = unsafe {
            gdal_sys::GDALGetRasterStatistics(
                self.c_rasterband,
                approx_ok as c_int,
                force as c_int,
                &mut stats.min,
                &mut stats.max,
                &mut stats.mean,
                &mut stats.std_dev,
            )
        };
        match rv {
            CPLErr::CE_None => Ok(stats),
            CPLErr::CE_Warning => {
                unsafe { gdal_sys::CPLErrorReset() };
                Ok(StatisticsAll::unavailable())
            }
            _ => Err(_last_cpl_err(rv)),
        }
    }

    pub fn compute_min_max(&self, approx_ok: bool) -> Result<(f64, f64)> {
        let mut min_max = [f64::NAN, f64::NAN];
        unsafe {
            gdal_sys::CPLErrorReset();
            gdal_sys::GDALComputeRasterMinMax(
                self.c_rasterband,
                approx_ok as c_int,
                min_max.as_mut_ptr(),
            );
        }
        let err_type = unsafe { gdal_sys::CPLGetLastErrorType() };
        if err_type == CPLErr::CE_Failure || err_type == CPLErr::CE_Fatal {
            return Err(_last_cpl_err(err_type));
        }
        Ok((min_max[0], min_max[1]))
    }

    pub fn histogram(
        &self,
        min: f64,
        max: f64,
        num_buckets: usize,
        include_out_of_range: bool,
        approx_ok: bool,
    ) -> Result<Vec<u64>> {
        if num_buckets < 1 {
            return Err(GdalError::BadArgument(
                "histogram needs at least one bucket".to_string(),
            ));
        }
        let mut counts = vec![0u64; num_buckets];
        let rv = unsafe {
            gdal_sys::GDALGetRasterHistogramEx(
                self.c_rasterband,
                min,
                max,
                num_buckets as c_int,
                counts.as_mut_ptr() as *mut _,
                include_out_of_range as c_int,
                approx_ok as c_int,
                None,
                std::ptr::null_mut(),
            )
        };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok(counts)
    }

    pub fn checksum(
        &self,
        window: (usize, usize),
        window_size: (usize, usize),
    ) -> Result<i32> {
        unsafe { gdal_sys::CPLErrorReset() };
        let checksum = unsafe {
            gdal_sys::GDALChecksumImage(
                self.c_rasterband,
                window.0 as c_int,
                window.1 as c_int,
                window_size.0 as c_int,
                window_size.1 as c_int,
            )
        };
        let err_type = unsafe { gdal_sys::CPLGetLastErrorType() };
        if err_type == CPLErr::CE_Failure {
            return Err(_last_cpl_err(err_type));
        }
        Ok(checksum)
    }

    pub fn fill(&self, real_value: f64, imaginary_value: f64) -> Result<()> {
        let rv =
            unsafe { gdal_sys::GDALFillRaster(self.c_rasterband, real_value, imaginary_value) };
        if rv != CPLErr::CE_None {
            return Err(_last_cpl_err(rv));
        }
        Ok(())
    }
}

impl<'a> MajorObject for RasterBand<'a> {
    fn gdal_object_ptr(&self) -> GDALMajorObjectH {
        self.c_rasterband
    }
}
