use semver::Version;

fn main() {
    // gdal-sys exports the linked GDAL_VERSION_NUM, e.g. 3080400 for 3.8.4
    let gdal_version_string = std::env::var("DEP_GDAL_VERSION_NUMBER")
        .expect("DEP_GDAL_VERSION_NUMBER not set, check gdal-sys's build.rs");
    let gdal_version = gdal_version_string
        .parse::<i64>()
        .expect("Could not convert gdal version string into number");
    let major = gdal_version / 1_000_000;
    let minor = (gdal_version - major * 1_000_000) / 10_000;
    let patch = (gdal_version - major * 1_000_000 - minor * 10_000) / 100;
    let detected_version = Version::new(major as u64, minor as u64, patch as u64);

    if detected_version.major < 3 {
        panic!("gdalraster requires GDAL >= 3.0, found {detected_version}");
    }

    println!("cargo:rustc-cfg=major_is_{}", detected_version.major);

    for major in 3..=detected_version.major {
        println!("cargo:rustc-cfg=major_ge_{major}");
    }

    for minor in 0..=detected_version.minor {
        println!("cargo:rustc-cfg=minor_ge_{minor}");
    }
}
