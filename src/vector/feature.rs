use std::ffi::{c_int, c_void, CString};
use std::str::FromStr;

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Timelike, Utc,
};
use gdal_sys::{self, OGRFeatureH, OGRFieldType};

use crate::cpl::CslStringList;
use crate::errors::*;
use crate::utils::{_string, _string_array};
use crate::vector::geometry::{Geometry, WkbByteOrder};

/// Value of an attribute field
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    IntegerValue(i32),
    IntegerListValue(Vec<i32>),
    Integer64Value(i64),
    Integer64ListValue(Vec<i64>),
    StringValue(String),
    StringListValue(Vec<String>),
    RealValue(f64),
    RealListValue(Vec<f64>),
    DateValue(NaiveDate),
    TimeValue(NaiveTime),
    DateTimeValue(DateTime<FixedOffset>),
    BinaryValue(Vec<u8>),
}

impl FieldValue {
    /// Interpret the value as `String`. Returns `None` if the value is something else.
    pub fn into_string(self) -> Option<String> {
        match self {
            FieldValue::StringValue(rv) => Some(rv),
            _ => None,
        }
    }

    /// Numeric value as `f64`, for any scalar numeric type.
    pub fn into_real(self) -> Option<f64> {
        match self {
            FieldValue::RealValue(rv) => Some(rv),
            FieldValue::IntegerValue(rv) => Some(rv as f64),
            FieldValue::Integer64Value(rv) => Some(rv as f64),
            _ => None,
        }
    }

    pub fn into_int(self) -> Option<i32> {
        match self {
            FieldValue::IntegerValue(rv) => Some(rv),
            FieldValue::Integer64Value(rv) => i32::try_from(rv).ok(),
            _ => None,
        }
    }

    pub fn into_int64(self) -> Option<i64> {
        match self {
            FieldValue::IntegerValue(rv) => Some(rv as i64),
            FieldValue::Integer64Value(rv) => Some(rv),
            _ => None,
        }
    }

    pub fn into_date(self) -> Option<NaiveDate> {
        match self {
            FieldValue::DateValue(rv) => Some(rv),
            FieldValue::DateTimeValue(rv) => Some(rv.date_naive()),
            _ => None,
        }
    }
}

/// How a feature's geometry is returned when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnGeomAs {
    /// Geometry is not read.
    #[default]
    None,
    Wkt,
    WktIso,
    Wkb,
    WkbIso,
    TypeName,
    Bbox,
}

impl FromStr for ReturnGeomAs {
    type Err = GdalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "NONE" => Ok(ReturnGeomAs::None),
            "WKT" => Ok(ReturnGeomAs::Wkt),
            "WKT_ISO" => Ok(ReturnGeomAs::WktIso),
            "WKB" => Ok(ReturnGeomAs::Wkb),
            "WKB_ISO" => Ok(ReturnGeomAs::WkbIso),
            "TYPE_NAME" => Ok(ReturnGeomAs::TypeName),
            "BBOX" => Ok(ReturnGeomAs::Bbox),
            _ => Err(GdalError::BadArgument(format!(
                "invalid geometry return format '{s}'"
            ))),
        }
    }
}

/// A geometry as read from, or written to, a layer.
#[derive(Clone, Debug, PartialEq)]
pub enum GeomValue {
    Wkt(String),
    Wkb(Vec<u8>),
    TypeName(String),
    Bbox([f64; 4]),
}

impl GeomValue {
    fn from_geometry(
        geom: &Geometry,
        return_as: ReturnGeomAs,
        byte_order: WkbByteOrder,
    ) -> Result<Option<Self>> {
        Ok(Some(match return_as {
            ReturnGeomAs::None => return Ok(None),
            ReturnGeomAs::Wkt => GeomValue::Wkt(geom.wkt()?),
            ReturnGeomAs::WktIso => GeomValue::Wkt(geom.iso_wkt()?),
            ReturnGeomAs::Wkb => GeomValue::Wkb(geom.wkb(byte_order)?),
            ReturnGeomAs::WkbIso => GeomValue::Wkb(geom.iso_wkb(byte_order)?),
            ReturnGeomAs::TypeName => GeomValue::TypeName(geom.geometry_name()),
            ReturnGeomAs::Bbox => GeomValue::Bbox(geom.envelope()),
        }))
    }

    fn to_geometry(&self) -> Result<Geometry> {
        match self {
            GeomValue::Wkt(wkt) => Geometry::from_wkt(wkt),
            GeomValue::Wkb(wkb) => Geometry::from_wkb(wkb),
            GeomValue::Bbox([xmin, ymin, xmax, ymax]) => {
                Geometry::bbox(*xmin, *ymin, *xmax, *ymax)
            }
            GeomValue::TypeName(_) => Err(GdalError::BadArgument(
                "a geometry type name cannot be written as a geometry".to_string(),
            )),
        }
    }
}

/// Options that control how features are read.
#[derive(Debug, Clone)]
pub(crate) struct ReadOptions<'a> {
    pub return_geom_as: ReturnGeomAs,
    pub wkb_byte_order: WkbByteOrder,
    pub default_geom_fld_name: &'a str,
}

/// OGR Feature, copied out of the layer.
///
/// Attribute values are `None` when the field is unset or null.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Feature {
    pub fid: Option<i64>,
    pub fields: Vec<(String, Option<FieldValue>)>,
    pub geometries: Vec<(String, Option<GeomValue>)>,
}

impl Feature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder style setter for an attribute value.
    pub fn with_field(mut self, name: &str, value: Option<FieldValue>) -> Self {
        self.fields.push((name.to_string(), value));
        self
    }

    /// Builder style setter for a geometry value.
    pub fn with_geometry(mut self, name: &str, value: GeomValue) -> Self {
        self.geometries.push((name.to_string(), Some(value)));
        self
    }

    /// Value of the named field. `None` if the field is missing or null.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_ref())
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    pub fn geometry(&self, name: &str) -> Option<&GeomValue> {
        self.geometries
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_ref())
    }

    /// Copies a native feature.
    ///
    /// # Safety
    /// `c_feature` must be a valid feature handle.
    pub(crate) unsafe fn from_c_feature(
        c_feature: OGRFeatureH,
        opts: &ReadOptions,
    ) -> Result<Feature> {
        let fid = gdal_sys::OGR_F_GetFID(c_feature);
        let field_count = gdal_sys::OGR_F_GetFieldCount(c_feature);
        let mut fields = Vec::with_capacity(field_count.max(0) as usize);
        for i in 0..field_count {
            let c_field_defn = gdal_sys::OGR_F_GetFieldDefnRef(c_feature, i);
            let name = _string(gdal_sys::OGR_Fld_GetNameRef(c_field_defn));
            let value = if gdal_sys::OGR_F_IsFieldSetAndNotNull(c_feature, i) != 0 {
                Some(field_value(c_feature, i, gdal_sys::OGR_Fld_GetType(c_field_defn))?)
            } else {
                None
            };
            fields.push((name, value));
        }

        let mut geometries = Vec::new();
        if opts.return_geom_as != ReturnGeomAs::None {
            let geom_count = gdal_sys::OGR_F_GetGeomFieldCount(c_feature);
            for i in 0..geom_count {
                let c_geom_defn = gdal_sys::OGR_F_GetGeomFieldDefnRef(c_feature, i);
                let mut name = _string(gdal_sys::OGR_GFld_GetNameRef(c_geom_defn));
                if name.is_empty() {
                    name = opts.default_geom_fld_name.to_string();
                }
                let c_geom = gdal_sys::OGR_F_GetGeomFieldRef(c_feature, i);
                let value = if c_geom.is_null() {
                    None
                } else {
                    let geom = Geometry::with_c_geometry(c_geom, false);
                    GeomValue::from_geometry(&geom, opts.return_geom_as, opts.wkb_byte_order)?
                };
                geometries.push((name, value));
            }
        }

        Ok(Feature {
            fid: (fid >= 0).then_some(fid),
            fields,
            geometries,
        })
    }

    /// Copies this feature's values onto a native feature created from the layer
    /// definition. Fields unknown to the layer are an error.
    ///
    /// # Safety
    /// `c_feature` must be a valid feature handle.
    pub(crate) unsafe fn write_to_c_feature(
        &self,
        c_feature: OGRFeatureH,
        default_geom_fld_name: &str,
    ) -> Result<()> {
        if let Some(fid) = self.fid {
            gdal_sys::OGR_F_SetFID(c_feature, fid);
        }
        for (name, value) in &self.fields {
            let c_name = CString::new(name.as_str())?;
            let idx = gdal_sys::OGR_F_GetFieldIndex(c_feature, c_name.as_ptr());
            if idx < 0 {
                return Err(GdalError::InvalidFieldName {
                    field_name: name.clone(),
                    method_name: "OGR_F_GetFieldIndex",
                });
            }
            match value {
                None => gdal_sys::OGR_F_SetFieldNull(c_feature, idx),
                Some(v) => set_field_value(c_feature, idx, v)?,
            }
        }
        for (name, value) in &self.geometries {
            let c_name = CString::new(name.as_str())?;
            let mut idx = gdal_sys::OGR_F_GetGeomFieldIndex(c_feature, c_name.as_ptr());
            if idx < 0
                && name == default_geom_fld_name
                && gdal_sys::OGR_F_GetGeomFieldCount(c_feature) > 0
            {
                // unnamed geometry column, as in Shapefile or GeoJSON
                idx = 0;
            }
            if idx < 0 {
                return Err(GdalError::InvalidFieldName {
                    field_name: name.clone(),
                    method_name: "OGR_F_GetGeomFieldIndex",
                });
            }
            let Some(value) = value else { continue };
            let geom = value.to_geometry()?;
            let rv = gdal_sys::OGR_F_SetGeomField(c_feature, idx, geom.c_geometry());
            if rv != gdal_sys::OGRErr::OGRERR_NONE {
                return Err(GdalError::OgrError {
                    err: rv,
                    method_name: "OGR_F_SetGeomField",
                });
            }
        }
        Ok(())
    }
}

unsafe fn field_value(
    c_feature: OGRFeatureH,
    idx: c_int,
    field_type: OGRFieldType::Type,
) -> Result<FieldValue> {
    let value = match field_type {
        OGRFieldType::OFTInteger => {
            FieldValue::IntegerValue(gdal_sys::OGR_F_GetFieldAsInteger(c_feature, idx))
        }
        OGRFieldType::OFTInteger64 => {
            FieldValue::Integer64Value(gdal_sys::OGR_F_GetFieldAsInteger64(c_feature, idx))
        }
        OGRFieldType::OFTReal => {
            FieldValue::RealValue(gdal_sys::OGR_F_GetFieldAsDouble(c_feature, idx))
        }
        OGRFieldType::OFTString => {
            FieldValue::StringValue(_string(gdal_sys::OGR_F_GetFieldAsString(c_feature, idx)))
        }
        OGRFieldType::OFTIntegerList => {
            let mut len: c_int = 0;
            let ptr = gdal_sys::OGR_F_GetFieldAsIntegerList(c_feature, idx, &mut len);
            FieldValue::IntegerListValue(copy_list(ptr, len))
        }
        OGRFieldType::OFTInteger64List => {
            let mut len: c_int = 0;
            let ptr = gdal_sys::OGR_F_GetFieldAsInteger64List(c_feature, idx, &mut len);
            FieldValue::Integer64ListValue(copy_list(ptr, len))
        }
        OGRFieldType::OFTRealList => {
            let mut len: c_int = 0;
            let ptr = gdal_sys::OGR_F_GetFieldAsDoubleList(c_feature, idx, &mut len);
            FieldValue::RealListValue(copy_list(ptr, len))
        }
        OGRFieldType::OFTStringList => {
            let c_list = gdal_sys::OGR_F_GetFieldAsStringList(c_feature, idx);
            FieldValue::StringListValue(_string_array(c_list))
        }
        OGRFieldType::OFTBinary => {
            let mut len: c_int = 0;
            let ptr = gdal_sys::OGR_F_GetFieldAsBinary(c_feature, idx, &mut len);
            FieldValue::BinaryValue(copy_list(ptr as *const u8, len))
        }
        OGRFieldType::OFTDate | OGRFieldType::OFTTime | OGRFieldType::OFTDateTime => {
            date_time_value(c_feature, idx, field_type)?
        }
        _ => {
            return Err(GdalError::UnhandledFieldType {
                field_type,
                method_name: "OGR_Fld_GetType",
            })
        }
    };
    Ok(value)
}

unsafe fn copy_list<T: Copy>(ptr: *const T, len: c_int) -> Vec<T> {
    if ptr.is_null() || len <= 0 {
        return Vec::new();
    }
    std::slice::from_raw_parts(ptr, len as usize).to_vec()
}

unsafe fn date_time_value(
    c_feature: OGRFeatureH,
    idx: c_int,
    field_type: OGRFieldType::Type,
) -> Result<FieldValue> {
    let mut year: c_int = 0;
    let mut month: c_int = 0;
    let mut day: c_int = 0;
    let mut hour: c_int = 0;
    let mut minute: c_int = 0;
    let mut second: f32 = 0.0;
    let mut tzflag: c_int = 0;

    let success = gdal_sys::OGR_F_GetFieldAsDateTimeEx(
        c_feature,
        idx,
        &mut year,
        &mut month,
        &mut day,
        &mut hour,
        &mut minute,
        &mut second,
        &mut tzflag,
    );
    if success == 0 {
        return Err(GdalError::BadArgument(format!(
            "field {idx} does not hold a valid date/time"
        )));
    }

    let invalid = || GdalError::BadArgument(format!("field {idx} holds an invalid date/time"));
    let whole_seconds = second.trunc() as u32;
    let millis = ((second.fract()) * 1000.0).round() as u32;
    let time =
        || NaiveTime::from_hms_milli_opt(hour as u32, minute as u32, whole_seconds, millis);

    match field_type {
        OGRFieldType::OFTTime => Ok(FieldValue::TimeValue(time().ok_or_else(invalid)?)),
        OGRFieldType::OFTDate => Ok(FieldValue::DateValue(
            NaiveDate::from_ymd_opt(year, month as u32, day as u32).ok_or_else(invalid)?,
        )),
        _ => {
            let naive = NaiveDate::from_ymd_opt(year, month as u32, day as u32)
                .and_then(|d| time().map(|t| d.and_time(t)))
                .ok_or_else(invalid)?;
            let dt = tz_offset(tzflag)
                .from_local_datetime(&naive)
                .single()
                .ok_or_else(invalid)?;
            Ok(FieldValue::DateTimeValue(dt))
        }
    }
}

/// Offset for an OGR TZ flag: 0 = unknown, 1 = local time, 100 = GMT, 104 = GMT+1,
/// 80 = GMT-5. Unknown, local and out of range flags are read as UTC.
fn tz_offset(tzflag: c_int) -> FixedOffset {
    let utc = Utc.fix();
    if tzflag <= 1 {
        return utc;
    }
    tzflag
        .checked_sub(100)
        .and_then(|quarters| quarters.checked_mul(15 * 60))
        .and_then(FixedOffset::east_opt)
        .unwrap_or(utc)
}

unsafe fn set_field_value(c_feature: OGRFeatureH, idx: c_int, value: &FieldValue) -> Result<()> {
    match value {
        FieldValue::IntegerValue(v) => gdal_sys::OGR_F_SetFieldInteger(c_feature, idx, *v),
        FieldValue::Integer64Value(v) => gdal_sys::OGR_F_SetFieldInteger64(c_feature, idx, *v),
        FieldValue::RealValue(v) => gdal_sys::OGR_F_SetFieldDouble(c_feature, idx, *v),
        FieldValue::StringValue(v) => {
            let c_value = CString::new(v.as_str())?;
            gdal_sys::OGR_F_SetFieldString(c_feature, idx, c_value.as_ptr())
        }
        FieldValue::IntegerListValue(v) => {
            gdal_sys::OGR_F_SetFieldIntegerList(c_feature, idx, v.len() as c_int, v.as_ptr())
        }
        FieldValue::Integer64ListValue(v) => {
            gdal_sys::OGR_F_SetFieldInteger64List(c_feature, idx, v.len() as c_int, v.as_ptr() as _)
        }
        FieldValue::RealListValue(v) => {
            gdal_sys::OGR_F_SetFieldDoubleList(c_feature, idx, v.len() as c_int, v.as_ptr())
        }
        FieldValue::StringListValue(v) => {
            let list = CslStringList::from_strings(v)?;
            gdal_sys::OGR_F_SetFieldStringList(c_feature, idx, list.as_ptr() as _)
        }
        FieldValue::BinaryValue(v) => gdal_sys::OGR_F_SetFieldBinary(
            c_feature,
            idx,
            v.len() as c_int,
            v.as_ptr() as *const c_void as _,
        ),
        FieldValue::DateValue(d) => gdal_sys::OGR_F_SetFieldDateTimeEx(
            c_feature,
            idx,
            d.year(),
            d.month() as c_int,
            d.day() as c_int,
            0,
            0,
            0.0,
            0,
        ),
        FieldValue::TimeValue(t) => gdal_sys::OGR_F_SetFieldDateTimeEx(
            c_feature,
            idx,
            0,
            0,
            0,
            t.hour() as c_int,
            t.minute() as c_int,
            t.second() as f32 + t.nanosecond() as f32 / 1e9,
            0,
        ),
        FieldValue::DateTimeValue(dt) => {
            let tzflag = 100 + dt.offset().local_minus_utc() / (15 * 60);
            gdal_sys::OGR_F_SetFieldDateTimeEx(
                c_feature,
                idx,
                dt.year(),
                dt.month() as c_int,
                dt.day() as c_int,
                dt.hour() as c_int,
                dt.minute() as c_int,
                dt.second() as f32 + dt.nanosecond() as f32 / 1e9,
                tzflag,
            )
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_geom_as_parsing() {
        assert_eq!("wkt_iso".parse::<ReturnGeomAs>().unwrap(), ReturnGeomAs::WktIso);
        assert_eq!("TYPE_NAME".parse::<ReturnGeomAs>().unwrap(), ReturnGeomAs::TypeName);
        assert_eq!(ReturnGeomAs::default(), ReturnGeomAs::None);
        assert!("GEOJSON".parse::<ReturnGeomAs>().is_err());
    }

    #[test]
    fn field_lookup() {
        let f = Feature::new()
            .with_field("name", Some(FieldValue::StringValue("a".into())))
            .with_field("value", None)
            .with_geometry("geometry", GeomValue::Wkt("POINT (1 2)".into()));
        assert_eq!(
            f.field("name").cloned().and_then(FieldValue::into_string),
            Some("a".to_string())
        );
        assert!(f.has_field("value"));
        assert_eq!(f.field("value"), None);
        assert_eq!(f.field("missing"), None);
        assert_eq!(
            f.geometry("geometry"),
            Some(&GeomValue::Wkt("POINT (1 2)".into()))
        );
    }

    #[test]
    fn value_conversions() {
        assert_eq!(FieldValue::IntegerValue(3).into_real(), Some(3.0));
        assert_eq!(FieldValue::Integer64Value(1 << 40).into_int(), None);
        assert_eq!(FieldValue::IntegerValue(7).into_int64(), Some(7));
        assert_eq!(FieldValue::StringValue("x".into()).into_real(), None);
        let d = NaiveDate::from_ymd_opt(2020, 1, 15).unwrap();
        assert_eq!(FieldValue::DateValue(d).into_date(), Some(d));
    }

    #[test]
    fn tz_flags() {
        assert_eq!(tz_offset(0), Utc.fix());
        assert_eq!(tz_offset(1), Utc.fix());
        assert_eq!(tz_offset(100), Utc.fix());
        assert_eq!(tz_offset(104), FixedOffset::east_opt(3600).unwrap());
        assert_eq!(tz_offset(80), FixedOffset::west_opt(5 * 3600).unwrap());
        // beyond +/- 24 h
        assert_eq!(tz_offset(2), Utc.fix());
        assert_eq!(tz_offset(250), Utc.fix());
    }

    /// A native feature with one field per kind, released on drop.
    struct MemFeature {
        c_defn: gdal_sys::OGRFeatureDefnH,
        c_feature: OGRFeatureH,
    }

    impl MemFeature {
        fn new(fields: &[(&str, OGRFieldType::Type)]) -> Self {
            let name = CString::new("mem").unwrap();
            unsafe {
                let c_defn = gdal_sys::OGR_FD_Create(name.as_ptr());
                gdal_sys::OGR_FD_Reference(c_defn);
                for (fld_name, fld_type) in fields {
                    let fld_name = CString::new(*fld_name).unwrap();
                    let c_fld = gdal_sys::OGR_Fld_Create(fld_name.as_ptr(), *fld_type);
                    gdal_sys::OGR_FD_AddFieldDefn(c_defn, c_fld);
                    gdal_sys::OGR_Fld_Destroy(c_fld);
                }
                let c_feature = gdal_sys::OGR_F_Create(c_defn);
                MemFeature { c_defn, c_feature }
            }
        }

        fn read(&self) -> Feature {
            let opts = ReadOptions {
                return_geom_as: ReturnGeomAs::Wkt,
                wkb_byte_order: WkbByteOrder::Lsb,
                default_geom_fld_name: "geometry",
            };
            unsafe { Feature::from_c_feature(self.c_feature, &opts) }.unwrap()
        }
    }

    impl Drop for MemFeature {
        fn drop(&mut self) {
            unsafe {
                gdal_sys::OGR_F_Destroy(self.c_feature);
                gdal_sys::OGR_FD_Release(self.c_defn);
            }
        }
    }

    #[test]
    fn local_time_date_time_is_read() {
        let mem = MemFeature::new(&[("stamp", OGRFieldType::OFTDateTime)]);
        unsafe {
            // tz flag 1: local time
            gdal_sys::OGR_F_SetFieldDateTimeEx(mem.c_feature, 0, 2020, 1, 15, 10, 30, 0.0, 1);
        }
        let expected = Utc.fix().with_ymd_and_hms(2020, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(
            mem.read().field("stamp"),
            Some(&FieldValue::DateTimeValue(expected))
        );

        unsafe {
            // tz flag 80: GMT-5
            gdal_sys::OGR_F_SetFieldDateTimeEx(mem.c_feature, 0, 2020, 1, 15, 10, 30, 0.0, 80);
        }
        let value = mem.read().field("stamp").cloned();
        match value {
            Some(FieldValue::DateTimeValue(dt)) => {
                assert_eq!(dt.offset().local_minus_utc(), -5 * 3600);
                assert_eq!(dt.hour(), 10);
            }
            other => panic!("unexpected value {other:?}"),
        }
    }

    #[test]
    fn field_kinds_are_read() {
        let mem = MemFeature::new(&[
            ("tm", OGRFieldType::OFTTime),
            ("ints", OGRFieldType::OFTIntegerList),
            ("big", OGRFieldType::OFTInteger64List),
            ("reals", OGRFieldType::OFTRealList),
            ("strs", OGRFieldType::OFTStringList),
            ("blob", OGRFieldType::OFTBinary),
            ("unset", OGRFieldType::OFTString),
        ]);
        let values = [
            FieldValue::TimeValue(NaiveTime::from_hms_opt(12, 30, 15).unwrap()),
            FieldValue::IntegerListValue(vec![1, -2, 3]),
            FieldValue::Integer64ListValue(vec![1 << 40, -1]),
            FieldValue::RealListValue(vec![0.5, 1.25]),
            FieldValue::StringListValue(vec!["a".to_string(), "b c".to_string()]),
            FieldValue::BinaryValue(vec![0, 1, 254, 255]),
        ];
        for (i, value) in values.iter().enumerate() {
            unsafe { set_field_value(mem.c_feature, i as c_int, value) }.unwrap();
        }

        let feat = mem.read();
        assert_eq!(feat.fid, None);
        assert_eq!(feat.fields.len(), 7);
        for (i, value) in values.iter().enumerate() {
            assert_eq!(feat.fields[i].1.as_ref(), Some(value));
        }
        assert!(feat.has_field("unset"));
        assert_eq!(feat.field("unset"), None);
        // the default geometry field is unnamed and unset
        assert_eq!(feat.geometries, vec![("geometry".to_string(), None)]);
    }
}
