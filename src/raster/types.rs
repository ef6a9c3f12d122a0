use std::ffi::CString;

use gdal_sys::{
    GDALDataTypeIsComplex, GDALDataTypeIsFloating, GDALDataTypeIsSigned, GDALGetDataTypeName,
    GDALGetDataTypeSizeBytes,
};

pub use gdal_sys::GDALDataType;

use crate::errors::{GdalError, Result};
use crate::utils::_string;

/// Type-level constraint for limiting which primitive numeric values can be passed
/// to functions needing target data type.
pub trait GdalType: Copy {
    fn gdal_type() -> GDALDataType::Type;
}

impl GdalType for u8 {
    fn gdal_type() -> GDALDataType::Type {
        GDALDataType::GDT_Byte
    }
}

impl GdalType for u16 {
    fn gdal_type() -> GDALDataType::Type {
        GDALDataType::GDT_UInt16
    }
}

impl GdalType for u32 {
    fn gdal_type() -> GDALDataType::Type {
        GDALDataType::GDT_UInt32
    }
}

impl GdalType for i16 {
    fn gdal_type() -> GDALDataType::Type {
        GDALDataType::GDT_Int16
    }
}

impl GdalType for i32 {
    fn gdal_type() -> GDALDataType::Type {
        GDALDataType::GDT_Int32
    }
}

impl GdalType for f32 {
    fn gdal_type() -> GDALDataType::Type {
        GDALDataType::GDT_Float32
    }
}

impl GdalType for f64 {
    fn gdal_type() -> GDALDataType::Type {
        GDALDataType::GDT_Float64
    }
}

/// Parses a GDAL data type name such as `Byte`, `Int16` or `Float64`.
pub fn data_type_by_name(name: &str) -> Result<GDALDataType::Type> {
    let c_name = CString::new(name)?;
    let data_type = unsafe { gdal_sys::GDALGetDataTypeByName(c_name.as_ptr()) };
    if data_type == GDALDataType::GDT_Unknown {
        return Err(GdalError::BadArgument(format!(
            "unknown raster data type '{name}'"
        )));
    }
    Ok(data_type)
}

pub fn data_type_name(data_type: GDALDataType::Type) -> String {
    _string(unsafe { GDALGetDataTypeName(data_type) })
}

pub fn data_type_size_bytes(data_type: GDALDataType::Type) -> usize {
    (unsafe { GDALGetDataTypeSizeBytes(data_type) }).max(0) as usize
}

pub fn data_type_is_floating(data_type: GDALDataType::Type) -> bool {
    (unsafe { GDALDataTypeIsFloating(data_type) }) > 0
}

/// Largest `n` such that every integer in `0..=n` is stored exactly by `data_type`.
///
/// `None` for complex and unknown types.
pub fn data_type_max_exact_int(data_type: GDALDataType::Type) -> Option<u64> {
    let bits = data_type_size_bytes(data_type) * 8;
    if bits == 0 || (unsafe { GDALDataTypeIsComplex(data_type) }) > 0 {
        return None;
    }
    if data_type_is_floating(data_type) {
        // significand bits plus the implicit one
        return match bits {
            16 => Some(1 << 11),
            32 => Some(1 << 24),
            _ => Some(1 << 53),
        };
    }
    let signed = (unsafe { GDALDataTypeIsSigned(data_type) }) > 0;
    let value_bits = if signed { bits - 1 } else { bits };
    Some(u64::MAX >> (64 - value_bits))
}
