use std::path::Path;

use crate::cmb_table::CmbTable;
use crate::errors::*;
use crate::progress::TermProgress;
use crate::raster::{create, data_type_by_name, data_type_max_exact_int, GdalRaster};

/// Output settings for [`combine`].
#[derive(Debug, Clone)]
pub struct CombineOutput<'a> {
    pub dst_filename: &'a Path,
    pub format: &'a str,
    pub data_type: &'a str,
    pub options: &'a [&'a str],
}

/// Overlays integer rasters and counts each distinct combination of their pixel values.
///
/// `bands` selects the band to read from each file in `src_files`. When `output` is given,
/// a single-band raster of combination ids is written. Pixels where any input is nodata
/// are skipped and get id `0`, the output's nodata value.
///
/// The output `data_type` must hold every id exactly. A combination whose id does not
/// fit (256 distinct combinations in a `Byte` output, for example) is an error.
pub fn combine<P: AsRef<Path>, S: AsRef<str>>(
    src_files: &[P],
    var_names: &[S],
    bands: &[usize],
    output: Option<&CombineOutput>,
    quiet: bool,
) -> Result<CmbTable> {
    if src_files.is_empty() {
        return Err(GdalError::BadArgument(
            "combine needs at least one source raster".to_string(),
        ));
    }
    if bands.len() != src_files.len() {
        return Err(GdalError::BadArgument(format!(
            "{} bands given for {} source rasters",
            bands.len(),
            src_files.len()
        )));
    }

    let sources = src_files
        .iter()
        .map(|f| GdalRaster::new(f, true, &[] as &[&str]))
        .collect::<Result<Vec<_>>>()?;
    let xsize = sources[0].get_raster_x_size()?;
    let ysize = sources[0].get_raster_y_size()?;
    for src in &sources[1..] {
        if src.get_raster_x_size()? != xsize || src.get_raster_y_size()? != ysize {
            return Err(GdalError::BadArgument(format!(
                "{} does not match the {xsize} x {ysize} size of {}",
                src.get_filename().display(),
                sources[0].get_filename().display()
            )));
        }
    }

    let mut table = CmbTable::new(src_files.len(), var_names)?;

    let mut max_id = u64::MAX;
    let dst = match output {
        Some(out) => {
            let data_type = data_type_by_name(out.data_type)?;
            max_id = data_type_max_exact_int(data_type).ok_or_else(|| {
                GdalError::BadArgument(format!(
                    "combination ids cannot be written as {}",
                    out.data_type
                ))
            })?;
            create(
                out.format,
                out.dst_filename,
                xsize,
                ysize,
                1,
                out.data_type,
                out.options,
            )?;
            let dst = GdalRaster::new(out.dst_filename, false, &[] as &[&str])?;
            dst.set_geo_transform(&sources[0].get_geo_transform()?)?;
            dst.set_projection(&sources[0].get_projection_ref()?)?;
            dst.set_no_data_value(1, 0.0)?;
            Some(dst)
        }
        None => None,
    };

    let mut progress = (!quiet).then(TermProgress::new);
    if let Some(bar) = progress.as_mut() {
        bar.update(0.0);
    }

    let mut key = vec![0i32; sources.len()];
    let mut ids = vec![0f64; xsize];
    for y in 0..ysize {
        let rows = sources
            .iter()
            .zip(bands)
            .map(|(src, &band)| src.read(band, 0, y, xsize, 1, xsize, 1))
            .collect::<Result<Vec<_>>>()?;
        for (x, id) in ids.iter_mut().enumerate() {
            if rows.iter().any(|r| r[x].is_nan()) {
                *id = 0.0;
                continue;
            }
            for (k, r) in key.iter_mut().zip(&rows) {
                *k = r[x] as i32;
            }
            let cmbid = table.update(&key, 1)?;
            if cmbid > max_id {
                return Err(GdalError::BadArgument(format!(
                    "combination id {cmbid} does not fit the output data type"
                )));
            }
            *id = cmbid as f64;
        }
        if let Some(dst) = &dst {
            dst.write(1, 0, y, xsize, 1, &ids)?;
        }
        if let Some(bar) = progress.as_mut() {
            bar.update((y + 1) as f64 / ysize as f64);
        }
    }

    if let Some(dst) = &dst {
        dst.flush_cache()?;
    }
    tracing::debug!(
        inputs = sources.len(),
        combinations = table.len(),
        "combined rasters"
    );
    Ok(table)
}
