use std::path::{Path, PathBuf};

use gdalraster::raster::{combine, create, CombineOutput};
use gdalraster::spatial_ref::{srs_is_projected, transform_xy};
use gdalraster::vector::{
    g_area, g_intersection, ogr_ds_create, ogr_layer_exists, Feature, FieldValue, GeomValue,
    ReturnGeomAs,
};
use gdalraster::{GdalRaster, GdalVector, RunningStats};

const NO_OPTS: &[&str] = &[];

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

#[test]
fn raster_stats_and_combine() {
    let dir = tempfile::tempdir().unwrap();
    let src = fixture("int_grid.asc");

    // a second layer: 10 * column index
    let cols = dir.path().join("cols.tif");
    create("GTiff", &cols, 5, 4, 1, "Int16", NO_OPTS).unwrap();
    let ds = GdalRaster::new(&cols, false, NO_OPTS).unwrap();
    let row: Vec<i16> = (0..5).map(|x| x * 10).collect();
    for y in 0..4 {
        ds.write(1, 0, y, 5, 1, &row).unwrap();
    }
    drop(ds);

    let mut stats = RunningStats::new(true);
    let grid = GdalRaster::new(&src, true, NO_OPTS).unwrap();
    for y in 0..4 {
        stats.update(&grid.read(1, 0, y, 5, 1, 5, 1).unwrap());
    }
    assert_eq!(stats.get_count(), 19);
    assert_eq!(stats.get_sum(), 49.0);
    assert_eq!((stats.get_min(), stats.get_max()), (1.0, 4.0));
    assert!(srs_is_projected(&grid.get_projection_ref().unwrap()).unwrap());

    let out = dir.path().join("cmb.tif");
    let table = combine(
        &[src.clone(), cols.clone()],
        &["grid", "col"],
        &[1, 1],
        Some(&CombineOutput {
            dst_filename: &out,
            format: "GTiff",
            data_type: "UInt32",
            options: &[],
        }),
        true,
    )
    .unwrap();
    assert_eq!(table.total_count(), 19);

    // every combination id in the output has the count recorded in the table
    let ids = GdalRaster::new(&out, true, NO_OPTS).unwrap();
    let mut seen = vec![0u64; table.len() + 1];
    for y in 0..4 {
        for v in ids.read(1, 0, y, 5, 1, 5, 1).unwrap() {
            if !v.is_nan() {
                seen[v as usize] += 1;
            }
        }
    }
    for row in table.as_rows() {
        assert_eq!(seen[row.cmbid as usize], row.count);
    }
    // the nodata cell in the top right corner
    assert!(ids.read(1, 4, 0, 1, 1, 1, 1).unwrap()[0].is_nan());
}

#[test]
fn vector_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let dsn = dir.path().join("out.gpkg");
    let dsn = dsn.to_str().unwrap();

    let src = fixture("polygons.geojson");
    let mut input = GdalVector::new(src.to_str().unwrap(), "", true, NO_OPTS, None, None).unwrap();
    input.return_geom_as = ReturnGeomAs::Wkt;

    ogr_ds_create(
        "GPKG", dsn, "copy", "POLYGON", "EPSG:4326", "pid", "Integer", NO_OPTS, NO_OPTS,
    )
    .unwrap();
    assert!(ogr_layer_exists(dsn, "copy"));
    let mut output = GdalVector::new(dsn, "copy", false, NO_OPTS, None, None).unwrap();

    let clip = "POLYGON ((5 5,5 25,25 25,25 5,5 5))";
    for feat in input.fetch(-1).unwrap() {
        let Some(GeomValue::Wkt(wkt)) = feat.geometry("geometry") else {
            panic!("feature without geometry");
        };
        let clipped = g_intersection(wkt, clip).unwrap();
        let out = Feature::new()
            .with_field("pid", feat.field("pid").cloned())
            .with_geometry("geom", GeomValue::Wkt(clipped));
        output.create_feature(&out).unwrap();
    }
    assert_eq!(output.get_feature_count().unwrap(), 3);

    output.return_geom_as = ReturnGeomAs::Wkt;
    output.set_attribute_filter("pid >= 2").unwrap();
    let feats = output.fetch(-1).unwrap();
    assert_eq!(feats.len(), 2);
    for f in &feats {
        assert!(matches!(f.field("pid"), Some(FieldValue::IntegerValue(p)) if *p >= 2));
        match f.geometry("geom") {
            Some(GeomValue::Wkt(wkt)) => assert_eq!(g_area(wkt).unwrap(), 25.0),
            other => panic!("unexpected geometry {other:?}"),
        }
    }
}

#[test]
fn transform_points() {
    let pts = [geo_types::Coord { x: -111.0, y: 0.0 }];
    let utm = transform_xy(&pts, "EPSG:4326", "EPSG:32612").unwrap();
    assert!((utm[0].x - 500000.0).abs() < 1e-6);
    assert!(utm[0].y.abs() < 1e-6);
}
