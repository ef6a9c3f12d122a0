use std::ffi::c_int;

use gdal_sys::{self, OGRFeatureDefnH, OGRFieldSubType, OGRFieldType, OGRwkbGeometryType};

use crate::errors::*;
use crate::utils::_string;
use crate::vector::geometry::geometry_type_to_name;

/// Schema of one attribute field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefn {
    pub name: String,
    pub field_type: OGRFieldType::Type,
    pub subtype: OGRFieldSubType::Type,
    pub width: i32,
    pub precision: i32,
    pub is_nullable: bool,
    /// This API is new as of GDAL 3.2.
    pub is_unique: bool,
    pub default: Option<String>,
}

impl FieldDefn {
    /// A nullable, non-unique field with no width, precision or default.
    pub fn new(name: &str, field_type: OGRFieldType::Type) -> Self {
        FieldDefn {
            name: name.to_string(),
            field_type,
            subtype: OGRFieldSubType::OFSTNone,
            width: 0,
            precision: 0,
            is_nullable: true,
            is_unique: false,
            default: None,
        }
    }

    /// GDAL type name, e.g. `Integer64` or `String`.
    pub fn type_name(&self) -> String {
        field_type_name(self.field_type)
    }
}

/// Schema of one geometry field.
#[derive(Debug, Clone, PartialEq)]
pub struct GeomFieldDefn {
    pub name: String,
    pub geom_type: OGRwkbGeometryType::Type,
    /// WKT of the field's spatial reference, empty if unknown.
    pub srs: String,
    pub is_nullable: bool,
}

impl GeomFieldDefn {
    pub fn type_name(&self) -> String {
        geometry_type_to_name(self.geom_type)
    }
}

/// Layer definition
///
/// Defines the fields available for features in a layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerDefn {
    pub fields: Vec<FieldDefn>,
    pub geom_fields: Vec<GeomFieldDefn>,
}

impl LayerDefn {
    /// Reads the schema behind a feature definition handle.
    ///
    /// # Safety
    /// `c_defn` must be a valid feature definition.
    pub unsafe fn from_c_defn(c_defn: OGRFeatureDefnH) -> Result<LayerDefn> {
        let field_count = gdal_sys::OGR_FD_GetFieldCount(c_defn);
        let mut fields = Vec::with_capacity(field_count.max(0) as usize);
        for i in 0..field_count {
            let c_field = gdal_sys::OGR_FD_GetFieldDefn(c_defn, i as c_int);
            let c_default = gdal_sys::OGR_Fld_GetDefault(c_field);
            fields.push(FieldDefn {
                name: _string(gdal_sys::OGR_Fld_GetNameRef(c_field)),
                field_type: gdal_sys::OGR_Fld_GetType(c_field),
                subtype: gdal_sys::OGR_Fld_GetSubType(c_field),
                width: gdal_sys::OGR_Fld_GetWidth(c_field),
                precision: gdal_sys::OGR_Fld_GetPrecision(c_field),
                is_nullable: gdal_sys::OGR_Fld_IsNullable(c_field) != 0,
                #[cfg(any(major_ge_4, all(major_is_3, minor_ge_2)))]
                is_unique: gdal_sys::OGR_Fld_IsUnique(c_field) != 0,
                #[cfg(not(any(major_ge_4, all(major_is_3, minor_ge_2))))]
                is_unique: false,
                default: (!c_default.is_null()).then(|| _string(c_default)),
            });
        }

        let geom_count = gdal_sys::OGR_FD_GetGeomFieldCount(c_defn);
        let mut geom_fields = Vec::with_capacity(geom_count.max(0) as usize);
        for i in 0..geom_count {
            let c_geom_field = gdal_sys::OGR_FD_GetGeomFieldDefn(c_defn, i as c_int);
            let c_srs = gdal_sys::OGR_GFld_GetSpatialRef(c_geom_field);
            let srs = if c_srs.is_null() {
                String::new()
            } else {
                crate::spatial_ref::SpatialRef::from_c_obj(c_srs)?.to_wkt()?
            };
            geom_fields.push(GeomFieldDefn {
                name: _string(gdal_sys::OGR_GFld_GetNameRef(c_geom_field)),
                geom_type: gdal_sys::OGR_GFld_GetType(c_geom_field),
                srs,
                is_nullable: gdal_sys::OGR_GFld_IsNullable(c_geom_field) != 0,
            });
        }
        Ok(LayerDefn {
            fields,
            geom_fields,
        })
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefn> {
        self.fields.iter().find(|f| f.name == name)
    }
}

const FIELD_TYPES: [OGRFieldType::Type; 12] = [
    OGRFieldType::OFTInteger,
    OGRFieldType::OFTIntegerList,
    OGRFieldType::OFTReal,
    OGRFieldType::OFTRealList,
    OGRFieldType::OFTString,
    OGRFieldType::OFTStringList,
    OGRFieldType::OFTBinary,
    OGRFieldType::OFTDate,
    OGRFieldType::OFTTime,
    OGRFieldType::OFTDateTime,
    OGRFieldType::OFTInteger64,
    OGRFieldType::OFTInteger64List,
];

pub fn field_type_name(ty: OGRFieldType::Type) -> String {
    _string(unsafe { gdal_sys::OGR_GetFieldTypeName(ty) })
}

/// Parses a field type name, with or without the `OFT` prefix (`Integer64`,
/// `OFTString`, ...).
pub fn field_type_by_name(name: &str) -> Result<OGRFieldType::Type> {
    let bare = name
        .strip_prefix("OFT")
        .unwrap_or(name);
    FIELD_TYPES
        .into_iter()
        .find(|ty| field_type_name(*ty).eq_ignore_ascii_case(bare))
        .ok_or_else(|| GdalError::BadArgument(format!("unknown field type '{name}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_type_names() {
        assert_eq!(
            field_type_by_name("OFTInteger64").unwrap(),
            OGRFieldType::OFTInteger64
        );
        assert_eq!(
            field_type_by_name("real").unwrap(),
            OGRFieldType::OFTReal
        );
        assert_eq!(
            field_type_by_name("DateTime").unwrap(),
            OGRFieldType::OFTDateTime
        );
        assert!(field_type_by_name("Decimal").is_err());
        assert_eq!(field_type_name(OGRFieldType::OFTStringList), "StringList");
    }
}
