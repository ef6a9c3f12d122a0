use std::ffi::{c_int, CString};
use std::ptr;

use gdal_sys::{self, OGREnvelope, OGRErr, OGRFeatureH, OGRLayerH};

use crate::cpl::CslStringList;
use crate::dataset::{Dataset, GdalOpenFlags};
use crate::errors::*;
use crate::utils::{_last_null_pointer_err, _string};
use crate::vector::defn::LayerDefn;
use crate::vector::feature::{Feature, ReadOptions, ReturnGeomAs};
use crate::vector::geometry::{geometry_type_to_name, Geometry, WkbByteOrder};

/// Capabilities of an open layer, see `OGR_L_TestCapability`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayerCapabilities {
    pub random_read: bool,
    pub sequential_write: bool,
    pub random_write: bool,
    pub fast_spatial_filter: bool,
    pub fast_feature_count: bool,
    pub fast_get_extent: bool,
    pub fast_set_next_by_index: bool,
    pub create_field: bool,
    pub create_geom_field: bool,
    pub delete_field: bool,
    pub reorder_fields: bool,
    pub alter_field_defn: bool,
    pub ignore_fields: bool,
    pub delete_feature: bool,
    pub strings_as_utf8: bool,
    pub transactions: bool,
    pub curve_geometries: bool,
}

/// Owned feature handle, destroyed on drop.
struct OwnedFeature(OGRFeatureH);

impl Drop for OwnedFeature {
    fn drop(&mut self) {
        unsafe { gdal_sys::OGR_F_Destroy(self.0) };
    }
}

/// A vector layer of a data source, kept open for reading and, optionally, writing.
///
/// The layer is either a named layer of `dsn` or, when the layer name starts with
/// `SELECT`, the result set of that SQL statement.
///
/// ```rust, no_run
/// # fn main() -> gdalraster::errors::Result<()> {
/// use gdalraster::vector::{GdalVector, ReturnGeomAs};
///
/// let mut lyr = GdalVector::new("parcels.gpkg", "parcels", true, &[] as &[&str], None, None)?;
/// lyr.return_geom_as = ReturnGeomAs::Wkt;
/// lyr.set_attribute_filter("acres > 10")?;
/// for feat in lyr.fetch(-1)? {
///     println!("{:?} {:?}", feat.fid, feat.geometry("geom"));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GdalVector {
    dsn: String,
    layer_name: String,
    open_options: CslStringList,
    spatial_filter: Option<String>,
    dialect: Option<String>,
    attribute_filter: String,
    is_sql: bool,
    dataset: Option<Dataset>,
    c_layer: OGRLayerH,
    /// Name given to geometry columns that have none, as in Shapefile or GeoJSON.
    pub default_geom_fld_name: String,
    pub return_geom_as: ReturnGeomAs,
    pub wkb_byte_order: WkbByteOrder,
}

// the layer handle belongs to the owned dataset
unsafe impl Send for GdalVector {}

impl GdalVector {
    /// Opens `layer` of `dsn`. An empty `layer` is the first layer.
    ///
    /// `spatial_filter` is WKT restricting the features read. `dialect` only applies to
    /// SQL layers (`OGRSQL`, `SQLITE`, ...).
    pub fn new<S: AsRef<str>>(
        dsn: &str,
        layer: &str,
        read_only: bool,
        open_options: &[S],
        spatial_filter: Option<&str>,
        dialect: Option<&str>,
    ) -> Result<GdalVector> {
        let mut lyr = GdalVector {
            dsn: dsn.to_string(),
            layer_name: layer.to_string(),
            open_options: CslStringList::from_strings(open_options)?,
            spatial_filter: spatial_filter.filter(|s| !s.is_empty()).map(str::to_string),
            dialect: dialect.filter(|s| !s.is_empty()).map(str::to_string),
            attribute_filter: String::new(),
            is_sql: is_sql(layer),
            dataset: None,
            c_layer: ptr::null_mut(),
            default_geom_fld_name: "geometry".to_string(),
            return_geom_as: ReturnGeomAs::None,
            wkb_byte_order: WkbByteOrder::Lsb,
        };
        lyr.open(read_only)?;
        Ok(lyr)
    }

    /// (Re-)opens the data source and the layer, closing what is currently open.
    ///
    /// Attribute and spatial filters set after construction are not carried over.
    pub fn open(&mut self, read_only: bool) -> Result<()> {
        self.close();
        let mut flags = GdalOpenFlags::GDAL_OF_VECTOR | GdalOpenFlags::GDAL_OF_VERBOSE_ERROR;
        if !read_only {
            flags |= GdalOpenFlags::GDAL_OF_UPDATE;
        }
        let dataset = Dataset::open_ex(&self.dsn, flags, &self.open_options)?;
        let filter = self
            .spatial_filter
            .as_deref()
            .map(Geometry::from_wkt)
            .transpose()?;

        let c_dataset = unsafe { dataset.c_dataset() };
        let c_layer = if self.is_sql {
            let c_sql = CString::new(self.layer_name.as_str())?;
            let c_dialect = self.dialect.as_deref().map(CString::new).transpose()?;
            let c_layer = unsafe {
                gdal_sys::GDALDatasetExecuteSQL(
                    c_dataset,
                    c_sql.as_ptr(),
                    filter.as_ref().map_or(ptr::null_mut(), |g| g.c_geometry()),
                    c_dialect.as_ref().map_or(ptr::null(), |d| d.as_ptr()),
                )
            };
            if c_layer.is_null() {
                return Err(_last_null_pointer_err("GDALDatasetExecuteSQL"));
            }
            c_layer
        } else {
            let c_layer = if self.layer_name.is_empty() {
                unsafe { gdal_sys::GDALDatasetGetLayer(c_dataset, 0) }
            } else {
                let c_name = CString::new(self.layer_name.as_str())?;
                unsafe { gdal_sys::GDALDatasetGetLayerByName(c_dataset, c_name.as_ptr()) }
            };
            if c_layer.is_null() {
                return Err(_last_null_pointer_err("GDALDatasetGetLayerByName"));
            }
            if let Some(filter) = &filter {
                unsafe { gdal_sys::OGR_L_SetSpatialFilter(c_layer, filter.c_geometry()) };
            }
            c_layer
        };
        self.dataset = Some(dataset);
        self.c_layer = c_layer;
        self.attribute_filter.clear();
        tracing::debug!(dsn = %self.dsn, layer = %self.layer_name, read_only, "opened layer");
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.dataset.is_some()
    }

    /// Closes the layer and data source. An SQL result set is released first.
    pub fn close(&mut self) {
        let Some(dataset) = self.dataset.take() else {
            return;
        };
        if self.is_sql && !self.c_layer.is_null() {
            unsafe { gdal_sys::GDALDatasetReleaseResultSet(dataset.c_dataset(), self.c_layer) };
        }
        self.c_layer = ptr::null_mut();
        drop(dataset);
        tracing::debug!(dsn = %self.dsn, layer = %self.layer_name, "closed layer");
    }

    fn ds(&self, method_name: &'static str) -> Result<&Dataset> {
        self.dataset
            .as_ref()
            .ok_or(GdalError::DatasetClosed { method_name })
    }

    /// The open layer handle.
    pub(crate) fn layer(&self, method_name: &'static str) -> Result<OGRLayerH> {
        self.ds(method_name)?;
        Ok(self.c_layer)
    }

    /// The open layer handle of a data source opened for update.
    pub(crate) fn layer_for_update(&self, method_name: &'static str) -> Result<OGRLayerH> {
        if !self.ds(method_name)?.is_update() {
            return Err(GdalError::ReadOnly { method_name });
        }
        Ok(self.c_layer)
    }

    fn read_options(&self) -> ReadOptions<'_> {
        ReadOptions {
            return_geom_as: self.return_geom_as,
            wkb_byte_order: self.wkb_byte_order,
            default_geom_fld_name: &self.default_geom_fld_name,
        }
    }

    fn ogr_result(rv: OGRErr::Type, method_name: &'static str) -> Result<()> {
        if rv != OGRErr::OGRERR_NONE {
            return Err(GdalError::OgrError {
                err: rv,
                method_name,
            });
        }
        Ok(())
    }

    pub fn get_dsn(&self) -> &str {
        &self.dsn
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

    /// Name of the layer as reported by the driver. For SQL layers this is usually
    /// `SELECT`.
    pub fn get_name(&self) -> Result<String> {
        let c_layer = self.layer("get_name")?;
        Ok(_string(unsafe { gdal_sys::OGR_L_GetName(c_layer) }))
    }

    pub fn test_capability(&self) -> Result<LayerCapabilities> {
        let c_layer = self.layer("test_capability")?;
        let has = |cap: &str| -> Result<bool> {
            let c_cap = CString::new(cap)?;
            Ok(unsafe { gdal_sys::OGR_L_TestCapability(c_layer, c_cap.as_ptr()) } != 0)
        };
        Ok(LayerCapabilities {
            random_read: has("RandomRead")?,
            sequential_write: has("SequentialWrite")?,
            random_write: has("RandomWrite")?,
            fast_spatial_filter: has("FastSpatialFilter")?,
            fast_feature_count: has("FastFeatureCount")?,
            fast_get_extent: has("FastGetExtent")?,
            fast_set_next_by_index: has("FastSetNextByIndex")?,
            create_field: has("CreateField")?,
            create_geom_field: has("CreateGeomField")?,
            delete_field: has("DeleteField")?,
            reorder_fields: has("ReorderFields")?,
            alter_field_defn: has("AlterFieldDefn")?,
            ignore_fields: has("IgnoreFields")?,
            delete_feature: has("DeleteFeature")?,
            strings_as_utf8: has("StringsAsUTF8")?,
            transactions: has("Transactions")?,
            curve_geometries: has("CurveGeometries")?,
        })
    }

    /// Name of the FID column, empty if the format has none.
    pub fn get_fid_column(&self) -> Result<String> {
        let c_layer = self.layer("get_fid_column")?;
        Ok(_string(unsafe { gdal_sys::OGR_L_GetFIDColumn(c_layer) }))
    }

    /// Geometry type name of the layer, e.g. `Polygon` or `Unknown (any)`.
    pub fn get_geom_type(&self) -> Result<String> {
        let c_layer = self.layer("get_geom_type")?;
        Ok(geometry_type_to_name(unsafe { gdal_sys::OGR_L_GetGeomType(c_layer) }))
    }

    /// Name of the geometry column, empty if the format does not name it.
    pub fn get_geometry_column(&self) -> Result<String> {
        let c_layer = self.layer("get_geometry_column")?;
        Ok(_string(unsafe { gdal_sys::OGR_L_GetGeometryColumn(c_layer) }))
    }

    /// WKT of the layer's spatial reference, empty if unknown.
    pub fn get_spatial_ref(&self) -> Result<String> {
        let c_layer = self.layer("get_spatial_ref")?;
        let c_srs = unsafe { gdal_sys::OGR_L_GetSpatialRef(c_layer) };
        if c_srs.is_null() {
            return Ok(String::new());
        }
        unsafe { crate::spatial_ref::SpatialRef::from_c_obj(c_srs) }?.to_wkt()
    }

    /// Extent of the layer as `[xmin, ymin, xmax, ymax]`, computed if the driver does not
    /// know it. Attribute and spatial filters are not taken into account.
    pub fn bbox(&self) -> Result<[f64; 4]> {
        let c_layer = self.layer("bbox")?;
        let mut envelope = OGREnvelope {
            MinX: 0.0,
            MaxX: 0.0,
            MinY: 0.0,
            MaxY: 0.0,
        };
        let rv = unsafe { gdal_sys::OGR_L_GetExtent(c_layer, &mut envelope, 1) };
        Self::ogr_result(rv, "OGR_L_GetExtent")?;
        Ok([envelope.MinX, envelope.MinY, envelope.MaxX, envelope.MaxY])
    }

    pub fn get_layer_defn(&self) -> Result<LayerDefn> {
        let c_layer = self.layer("get_layer_defn")?;
        unsafe { LayerDefn::from_c_defn(gdal_sys::OGR_L_GetLayerDefn(c_layer)) }
    }

    /// Restricts reading to features matching an SQL `WHERE` clause. An empty query
    /// clears the filter.
    pub fn set_attribute_filter(&mut self, query: &str) -> Result<()> {
        let c_layer = self.layer("set_attribute_filter")?;
        let rv = if query.is_empty() {
            unsafe { gdal_sys::OGR_L_SetAttributeFilter(c_layer, ptr::null()) }
        } else {
            let c_query = CString::new(query)?;
            unsafe { gdal_sys::OGR_L_SetAttributeFilter(c_layer, c_query.as_ptr()) }
        };
        Self::ogr_result(rv, "OGR_L_SetAttributeFilter")?;
        self.attribute_filter = query.to_string();
        Ok(())
    }

    pub fn get_attribute_filter(&self) -> &str {
        &self.attribute_filter
    }

    /// Fields not to fetch when reading features. `OGR_GEOMETRY` and `OGR_STYLE` name the
    /// geometry and style. An empty list fetches everything again.
    pub fn set_ignored_fields<S: AsRef<str>>(&self, fields: &[S]) -> Result<()> {
        let c_layer = self.layer("set_ignored_fields")?;
        let rv = if fields.is_empty() {
            unsafe { gdal_sys::OGR_L_SetIgnoredFields(c_layer, ptr::null_mut()) }
        } else {
            let list = CslStringList::from_strings(fields)?;
            unsafe { gdal_sys::OGR_L_SetIgnoredFields(c_layer, list.as_ptr() as _) }
        };
        Self::ogr_result(rv, "OGR_L_SetIgnoredFields")
    }

    /// Restricts reading to features whose geometry intersects the `wkt` geometry's
    /// envelope, and more precisely the geometry when the driver supports it.
    pub fn set_spatial_filter(&self, wkt: &str) -> Result<()> {
        let c_layer = self.layer("set_spatial_filter")?;
        let geom = Geometry::from_wkt(wkt)?;
        unsafe { gdal_sys::OGR_L_SetSpatialFilter(c_layer, geom.c_geometry()) };
        Ok(())
    }

    /// Rectangular spatial filter from `[xmin, ymin, xmax, ymax]`.
    pub fn set_spatial_filter_rect(&self, bbox: &[f64; 4]) -> Result<()> {
        let c_layer = self.layer("set_spatial_filter_rect")?;
        let [xmin, ymin, xmax, ymax] = *bbox;
        unsafe { gdal_sys::OGR_L_SetSpatialFilterRect(c_layer, xmin, ymin, xmax, ymax) };
        Ok(())
    }

    /// WKT of the current spatial filter, empty if none is set.
    pub fn get_spatial_filter(&self) -> Result<String> {
        let c_layer = self.layer("get_spatial_filter")?;
        let c_geom = unsafe { gdal_sys::OGR_L_GetSpatialFilter(c_layer) };
        if c_geom.is_null() {
            return Ok(String::new());
        }
        unsafe { Geometry::with_c_geometry(c_geom, false) }.wkt()
    }

    pub fn clear_spatial_filter(&self) -> Result<()> {
        let c_layer = self.layer("clear_spatial_filter")?;
        unsafe { gdal_sys::OGR_L_SetSpatialFilter(c_layer, ptr::null_mut()) };
        Ok(())
    }

    /// Number of features passing the current filters. May scan the whole layer.
    pub fn get_feature_count(&self) -> Result<u64> {
        let c_layer = self.layer("get_feature_count")?;
        let count = unsafe { gdal_sys::OGR_L_GetFeatureCount(c_layer, 1) };
        if count < 0 {
            return Err(GdalError::OgrError {
                err: OGRErr::OGRERR_FAILURE,
                method_name: "OGR_L_GetFeatureCount",
            });
        }
        Ok(count as u64)
    }

    /// The next feature passing the filters, `None` once reading is exhausted.
    pub fn get_next_feature(&self) -> Result<Option<Feature>> {
        let c_layer = self.layer("get_next_feature")?;
        let c_feature = unsafe { gdal_sys::OGR_L_GetNextFeature(c_layer) };
        self.take_feature(c_feature)
    }

    fn take_feature(&self, c_feature: OGRFeatureH) -> Result<Option<Feature>> {
        if c_feature.is_null() {
            return Ok(None);
        }
        let owned = OwnedFeature(c_feature);
        let feature = unsafe { Feature::from_c_feature(owned.0, &self.read_options()) }?;
        Ok(Some(feature))
    }

    /// Moves the read cursor so the next feature read is the one at index `i`, counting
    /// features that pass the filters from 0.
    pub fn set_next_by_index(&self, i: u64) -> Result<()> {
        let c_layer = self.layer("set_next_by_index")?;
        let rv = unsafe { gdal_sys::OGR_L_SetNextByIndex(c_layer, i as i64) };
        Self::ogr_result(rv, "OGR_L_SetNextByIndex")
    }

    /// The feature with `fid`, ignoring filters. `None` if there is none.
    ///
    /// This may move the read cursor.
    pub fn get_feature(&self, fid: i64) -> Result<Option<Feature>> {
        let c_layer = self.layer("get_feature")?;
        let c_feature = unsafe { gdal_sys::OGR_L_GetFeature(c_layer, fid) };
        self.take_feature(c_feature)
    }

    pub fn reset_reading(&self) -> Result<()> {
        let c_layer = self.layer("reset_reading")?;
        unsafe { gdal_sys::OGR_L_ResetReading(c_layer) };
        Ok(())
    }

    /// Reads up to `n` features from the current cursor position. With a negative `n`
    /// reading is reset and every feature is returned.
    pub fn fetch(&self, n: i64) -> Result<Vec<Feature>> {
        if n < 0 {
            self.reset_reading()?;
        }
        let limit = if n < 0 { usize::MAX } else { n as usize };
        let mut features = Vec::new();
        while features.len() < limit {
            match self.get_next_feature()? {
                Some(feature) => features.push(feature),
                None => break,
            }
        }
        Ok(features)
    }

    /// Writes a new feature and returns its FID.
    ///
    /// Fields and geometry columns are matched by name. A geometry under
    /// [`GdalVector::default_geom_fld_name`] goes to the first geometry column when that
    /// has no name.
    pub fn create_feature(&self, feature: &Feature) -> Result<i64> {
        let c_layer = self.layer_for_update("create_feature")?;
        let c_feature = unsafe { gdal_sys::OGR_F_Create(gdal_sys::OGR_L_GetLayerDefn(c_layer)) };
        if c_feature.is_null() {
            return Err(_last_null_pointer_err("OGR_F_Create"));
        }
        let owned = OwnedFeature(c_feature);
        unsafe { feature.write_to_c_feature(owned.0, &self.default_geom_fld_name) }?;
        let rv = unsafe { gdal_sys::OGR_L_CreateFeature(c_layer, owned.0) };
        Self::ogr_result(rv, "OGR_L_CreateFeature")?;
        Ok(unsafe { gdal_sys::OGR_F_GetFID(owned.0) })
    }

    /// Deletes the feature with `fid`. Returns `false` when the driver refuses or the
    /// feature does not exist.
    pub fn delete_feature(&self, fid: i64) -> Result<bool> {
        let c_layer = self.layer_for_update("delete_feature")?;
        let rv = unsafe { gdal_sys::OGR_L_DeleteFeature(c_layer, fid) };
        if rv != OGRErr::OGRERR_NONE {
            tracing::warn!(fid, err = rv, "OGR_L_DeleteFeature failed");
            return Ok(false);
        }
        Ok(true)
    }

    /// Starts a dataset transaction. With `force`, drivers without native transactions
    /// may emulate one.
    pub fn start_transaction(&self, force: bool) -> Result<bool> {
        let ds = self.ds("start_transaction")?;
        let rv = unsafe { gdal_sys::GDALDatasetStartTransaction(ds.c_dataset(), force as c_int) };
        Ok(Self::transaction_result(rv, "GDALDatasetStartTransaction"))
    }

    pub fn commit_transaction(&self) -> Result<bool> {
        let ds = self.ds("commit_transaction")?;
        let rv = unsafe { gdal_sys::GDALDatasetCommitTransaction(ds.c_dataset()) };
        Ok(Self::transaction_result(rv, "GDALDatasetCommitTransaction"))
    }

    pub fn rollback_transaction(&self) -> Result<bool> {
        let ds = self.ds("rollback_transaction")?;
        let rv = unsafe { gdal_sys::GDALDatasetRollbackTransaction(ds.c_dataset()) };
        Ok(Self::transaction_result(rv, "GDALDatasetRollbackTransaction"))
    }

    fn transaction_result(rv: OGRErr::Type, method_name: &'static str) -> bool {
        if rv != OGRErr::OGRERR_NONE {
            tracing::warn!(err = rv, method_name, "transaction call failed");
            return false;
        }
        true
    }
}

impl Drop for GdalVector {
    fn drop(&mut self) {
        self.close();
    }
}

fn is_sql(layer: &str) -> bool {
    layer
        .split_whitespace()
        .next()
        .is_some_and(|head| head.eq_ignore_ascii_case("SELECT"))
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveDate, TimeZone};

    use super::*;
    use crate::test_utils::{fixture, SuppressGDALErrorLog, TempFixture};
    use crate::vector::feature::{FieldValue, GeomValue};
    use crate::vector::manage::{ogr_ds_create, ogr_field_create};
    use crate::vector::defn::FieldDefn;
    use gdal_sys::OGRFieldType;

    const NO_OPTS: &[&str] = &[];

    fn polygons() -> GdalVector {
        let dsn = fixture("polygons.geojson");
        GdalVector::new(dsn.to_str().unwrap(), "polygons", true, NO_OPTS, None, None).unwrap()
    }

    /// A GeoPackage layer `parcels` with `name` (String), `value` (Real), `day` (Date),
    /// `stamp` (DateTime) and `scan` (Binary).
    fn writable_layer(tmp: &TempFixture) -> GdalVector {
        let dsn = tmp.path().to_str().unwrap();
        ogr_ds_create(
            "GPKG", dsn, "parcels", "POLYGON", "EPSG:26912", "name", "String", NO_OPTS, NO_OPTS,
        )
        .unwrap();
        ogr_field_create(dsn, "parcels", &FieldDefn::new("value", OGRFieldType::OFTReal))
            .unwrap();
        ogr_field_create(dsn, "parcels", &FieldDefn::new("day", OGRFieldType::OFTDate))
            .unwrap();
        ogr_field_create(
            dsn,
            "parcels",
            &FieldDefn::new("stamp", OGRFieldType::OFTDateTime),
        )
        .unwrap();
        ogr_field_create(dsn, "parcels", &FieldDefn::new("scan", OGRFieldType::OFTBinary))
            .unwrap();
        GdalVector::new(dsn, "parcels", false, NO_OPTS, None, None).unwrap()
    }

    #[test]
    fn open_and_describe() {
        let lyr = polygons();
        assert!(lyr.is_open());
        assert_eq!(lyr.get_name().unwrap(), "polygons");
        assert_eq!(lyr.get_driver_short_name().unwrap(), "GeoJSON");
        assert_eq!(lyr.get_geom_type().unwrap(), "Polygon");
        assert_eq!(lyr.get_feature_count().unwrap(), 3);
        assert_eq!(lyr.bbox().unwrap(), [0.0, 0.0, 30.0, 30.0]);
        assert!(!lyr.get_spatial_ref().unwrap().is_empty());
        assert_eq!(lyr.get_file_list().unwrap().len(), 1);

        let defn = lyr.get_layer_defn().unwrap();
        let names: Vec<_> = defn.fields.iter().map(|f| f.name.as_str()).collect();
        assert!(names.contains(&"pid"));
        assert!(names.contains(&"name"));
        assert_eq!(defn.field("value").unwrap().type_name(), "Real");
        assert_eq!(defn.geom_fields.len(), 1);

        let caps = lyr.test_capability().unwrap();
        assert!(caps.random_read);
    }

    #[test]
    fn first_layer_by_default() {
        let dsn = fixture("polygons.geojson");
        let lyr = GdalVector::new(dsn.to_str().unwrap(), "", true, NO_OPTS, None, None).unwrap();
        assert_eq!(lyr.get_name().unwrap(), "polygons");
    }

    #[test]
    fn missing_layer_is_an_error() {
        let _nolog = SuppressGDALErrorLog::new();
        let dsn = fixture("polygons.geojson");
        let res = GdalVector::new(dsn.to_str().unwrap(), "roads", true, NO_OPTS, None, None);
        assert!(res.is_err());
    }

    #[test]
    fn read_features() {
        let mut lyr = polygons();
        lyr.return_geom_as = ReturnGeomAs::Wkt;
        let feat = lyr.get_next_feature().unwrap().unwrap();
        assert_eq!(feat.fid, Some(0));
        assert_eq!(feat.field("pid"), Some(&FieldValue::IntegerValue(1)));
        assert_eq!(
            feat.field("name").cloned().and_then(FieldValue::into_string),
            Some("a".to_string())
        );
        assert_eq!(
            feat.geometry("geometry"),
            Some(&GeomValue::Wkt("POLYGON ((0 0,0 10,10 10,10 0,0 0))".to_string()))
        );

        // zero reads nothing and leaves the cursor in place
        assert!(lyr.fetch(0).unwrap().is_empty());
        assert_eq!(lyr.get_next_feature().unwrap().unwrap().fid, Some(1));
        lyr.set_next_by_index(1).unwrap();

        // the rest, then nothing more
        assert_eq!(lyr.fetch(10).unwrap().len(), 2);
        assert!(lyr.get_next_feature().unwrap().is_none());

        // negative n starts over
        let all = lyr.fetch(-1).unwrap();
        assert_eq!(all.len(), 3);
        // null attribute
        assert!(all[1].has_field("value"));
        assert_eq!(all[1].field("value"), None);

        lyr.set_next_by_index(2).unwrap();
        assert_eq!(lyr.get_next_feature().unwrap().unwrap().fid, Some(2));
        assert_eq!(lyr.get_feature(1).unwrap().unwrap().fid, Some(1));
        assert!(lyr.get_feature(99).unwrap().is_none());
    }

    #[test]
    fn geometry_formats() {
        let mut lyr = polygons();
        lyr.return_geom_as = ReturnGeomAs::Bbox;
        let feat = lyr.get_feature(1).unwrap().unwrap();
        assert_eq!(
            feat.geometry("geometry"),
            Some(&GeomValue::Bbox([20.0, 0.0, 30.0, 10.0]))
        );

        lyr.return_geom_as = ReturnGeomAs::TypeName;
        let feat = lyr.get_feature(1).unwrap().unwrap();
        assert_eq!(
            feat.geometry("geometry"),
            Some(&GeomValue::TypeName("POLYGON".to_string()))
        );

        lyr.return_geom_as = ReturnGeomAs::Wkb;
        lyr.wkb_byte_order = WkbByteOrder::Msb;
        let feat = lyr.get_feature(1).unwrap().unwrap();
        match feat.geometry("geometry") {
            Some(GeomValue::Wkb(wkb)) => assert_eq!(wkb[0], 0),
            other => panic!("unexpected geometry {other:?}"),
        }

        lyr.default_geom_fld_name = "geom".to_string();
        let feat = lyr.get_feature(1).unwrap().unwrap();
        assert!(feat.geometry("geom").is_some());

        lyr.return_geom_as = ReturnGeomAs::None;
        let feat = lyr.get_feature(1).unwrap().unwrap();
        assert!(feat.geometries.is_empty());
    }

    #[test]
    fn filters() {
        let mut lyr = polygons();
        lyr.set_attribute_filter("pid > 1").unwrap();
        assert_eq!(lyr.get_attribute_filter(), "pid > 1");
        assert_eq!(lyr.get_feature_count().unwrap(), 2);
        lyr.set_attribute_filter("").unwrap();
        assert_eq!(lyr.get_feature_count().unwrap(), 3);

        lyr.set_spatial_filter_rect(&[15.0, -5.0, 35.0, 5.0]).unwrap();
        assert_eq!(lyr.get_feature_count().unwrap(), 1);
        assert!(lyr.get_spatial_filter().unwrap().starts_with("POLYGON"));
        lyr.clear_spatial_filter().unwrap();
        assert_eq!(lyr.get_spatial_filter().unwrap(), "");

        lyr.set_spatial_filter("POINT (5 25)").unwrap();
        assert_eq!(lyr.get_feature_count().unwrap(), 1);
        lyr.clear_spatial_filter().unwrap();

        lyr.set_ignored_fields(&["name"]).unwrap();
        assert!(lyr.get_next_feature().unwrap().is_some());
        lyr.set_ignored_fields(NO_OPTS).unwrap();
    }

    #[test]
    fn spatial_filter_at_open() {
        let dsn = fixture("polygons.geojson");
        let lyr = GdalVector::new(
            dsn.to_str().unwrap(),
            "polygons",
            true,
            NO_OPTS,
            Some("POLYGON ((19 1,19 2,21 2,21 1,19 1))"),
            None,
        )
        .unwrap();
        assert_eq!(lyr.get_feature_count().unwrap(), 1);
    }

    #[test]
    fn sql_layer() {
        let dsn = fixture("polygons.geojson");
        let mut lyr = GdalVector::new(
            dsn.to_str().unwrap(),
            "SELECT pid, name FROM polygons WHERE pid <> 2",
            true,
            NO_OPTS,
            None,
            None,
        )
        .unwrap();
        assert_eq!(lyr.get_feature_count().unwrap(), 2);
        let defn = lyr.get_layer_defn().unwrap();
        assert_eq!(defn.fields.len(), 2);
        lyr.close();
        assert!(!lyr.is_open());
        lyr.open(true).unwrap();
        assert_eq!(lyr.fetch(-1).unwrap().len(), 2);
    }

    #[test]
    fn closed_layer() {
        let mut lyr = polygons();
        lyr.close();
        assert!(matches!(
            lyr.get_feature_count(),
            Err(GdalError::DatasetClosed { .. })
        ));
        assert_eq!(lyr.get_dsn(), fixture("polygons.geojson").to_str().unwrap());
    }

    #[test]
    fn read_only_layer_refuses_writes() {
        let lyr = polygons();
        assert!(matches!(
            lyr.create_feature(&Feature::new()),
            Err(GdalError::ReadOnly { .. })
        ));
        assert!(matches!(
            lyr.delete_feature(0),
            Err(GdalError::ReadOnly { .. })
        ));
    }

    #[test]
    fn write_and_delete_features() {
        let tmp = TempFixture::empty("write.gpkg");
        let mut lyr = writable_layer(&tmp);
        assert_eq!(lyr.get_fid_column().unwrap(), "fid");
        assert_eq!(lyr.get_geometry_column().unwrap(), "geom");

        let day = NaiveDate::from_ymd_opt(2021, 6, 30).unwrap();
        let feat = Feature::new()
            .with_field("name", Some(FieldValue::StringValue("lot 1".into())))
            .with_field("value", None)
            .with_field("day", Some(FieldValue::DateValue(day)))
            .with_geometry("geom", GeomValue::Wkt("POLYGON ((0 0,0 1,1 1,1 0,0 0))".into()));
        let fid = lyr.create_feature(&feat).unwrap();
        assert!(fid > 0);
        let fid2 = lyr
            .create_feature(
                &Feature::new()
                    .with_field("name", Some(FieldValue::StringValue("lot 2".into())))
                    .with_field("value", Some(FieldValue::RealValue(2.5)))
                    .with_geometry("geom", GeomValue::Bbox([1.0, 0.0, 2.0, 1.0])),
            )
            .unwrap();
        assert_eq!(lyr.get_feature_count().unwrap(), 2);

        lyr.return_geom_as = ReturnGeomAs::Wkt;
        let back = lyr.get_feature(fid).unwrap().unwrap();
        assert_eq!(back.field("day"), Some(&FieldValue::DateValue(day)));
        assert_eq!(back.field("value"), None);
        assert_eq!(
            back.geometry("geom"),
            Some(&GeomValue::Wkt("POLYGON ((0 0,0 1,1 1,1 0,0 0))".into()))
        );
        let back2 = lyr.get_feature(fid2).unwrap().unwrap();
        assert_eq!(back2.field("value"), Some(&FieldValue::RealValue(2.5)));

        assert!(lyr.delete_feature(fid).unwrap());
        assert_eq!(lyr.get_feature_count().unwrap(), 1);

        let stamp = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2021, 6, 30, 8, 15, 0)
            .unwrap();
        let fid3 = lyr
            .create_feature(
                &Feature::new()
                    .with_field("stamp", Some(FieldValue::DateTimeValue(stamp)))
                    .with_field("scan", Some(FieldValue::BinaryValue(vec![0, 7, 255]))),
            )
            .unwrap();
        let back3 = lyr.get_feature(fid3).unwrap().unwrap();
        assert_eq!(back3.field("stamp"), Some(&FieldValue::DateTimeValue(stamp)));
        assert_eq!(
            back3.field("scan"),
            Some(&FieldValue::BinaryValue(vec![0, 7, 255]))
        );
        assert_eq!(back3.field("name"), None);
        assert_eq!(back3.geometry("geom"), None);

        let unknown = Feature::new().with_field("nope", None);
        assert!(matches!(
            lyr.create_feature(&unknown),
            Err(GdalError::InvalidFieldName { .. })
        ));
    }

    #[test]
    fn transactions() {
        let tmp = TempFixture::empty("tx.gpkg");
        let lyr = writable_layer(&tmp);
        let feat = Feature::new().with_field("name", Some(FieldValue::StringValue("x".into())));

        assert!(lyr.start_transaction(false).unwrap());
        lyr.create_feature(&feat).unwrap();
        assert!(lyr.rollback_transaction().unwrap());
        assert_eq!(lyr.get_feature_count().unwrap(), 0);

        assert!(lyr.start_transaction(false).unwrap());
        lyr.create_feature(&feat).unwrap();
        assert!(lyr.commit_transaction().unwrap());
        assert_eq!(lyr.get_feature_count().unwrap(), 1);

        // nothing to commit
        let _nolog = SuppressGDALErrorLog::new();
        assert!(!lyr.commit_transaction().unwrap());
    }

    #[test]
    fn sql_detection() {
        assert!(is_sql("SELECT * FROM t"));
        assert!(is_sql("  select 1"));
        assert!(!is_sql("selection_set"));
        assert!(!is_sql("parcels"));
        assert!(!is_sql(""));
    }
}
