//! GeoTIFF band reading.
//!
//! Opens a georeferenced TIFF, reads one band of samples as `f32`, and
//! recovers the affine transform and CRS from the GeoTIFF tags:
//!
//! - ModelPixelScale (33550) + ModelTiepoint (33922), or the full
//!   ModelTransformation (34264) matrix
//! - GeoKeyDirectory (34735) for the EPSG code
//!
//! The whole band is read into memory and the file handle is released when
//! [`read_band`] returns, so batch drivers hold at most one open raster at
//! a time.

pub mod error;
mod geotags;

pub use error::RasterReadError;

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;
use tracing::debug;

use parcel_common::{Crs, GeoTransform, Grid};

/// Read band 1 of a GeoTIFF file into a [`Grid`].
pub fn read_band(path: impl AsRef<Path>) -> Result<Grid, RasterReadError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let grid = read_band_from(BufReader::new(file))?;
    debug!(
        path = %path.display(),
        width = grid.width,
        height = grid.height,
        crs = %grid.crs,
        "read GeoTIFF band"
    );
    Ok(grid)
}

/// Read band 1 of a GeoTIFF from any seekable reader.
pub fn read_band_from<R: Read + Seek>(reader: R) -> Result<Grid, RasterReadError> {
    let mut decoder = Decoder::new(reader)?;

    let (width, height) = decoder.dimensions()?;
    let (width, height) = (width as usize, height as usize);

    let transform = geotags::read_transform(&mut decoder)?;
    let crs = geotags::read_crs(&mut decoder)?;

    let samples_per_pixel = match decoder.find_tag(Tag::SamplesPerPixel)? {
        Some(value) => value.into_u16()? as usize,
        None => 1,
    };
    if samples_per_pixel == 0 {
        return Err(RasterReadError::UnsupportedLayout(
            "SamplesPerPixel is zero".to_string(),
        ));
    }

    let samples = decode_to_f32(decoder.read_image()?);
    if samples.len() != width * height * samples_per_pixel {
        return Err(RasterReadError::UnsupportedLayout(format!(
            "expected {} samples for {}x{}x{}, got {}",
            width * height * samples_per_pixel,
            width,
            height,
            samples_per_pixel,
            samples.len()
        )));
    }

    // Band 1 only: first sample of each pixel in chunky layout.
    let data: Vec<f32> = if samples_per_pixel == 1 {
        samples
    } else {
        samples.into_iter().step_by(samples_per_pixel).collect()
    };

    Grid::new(data, width, height, transform, crs).ok_or_else(|| {
        RasterReadError::UnsupportedLayout("sample count does not match dimensions".to_string())
    })
}

fn decode_to_f32(result: DecodingResult) -> Vec<f32> {
    match result {
        DecodingResult::U8(v) => v.into_iter().map(f32::from).collect(),
        DecodingResult::U16(v) => v.into_iter().map(f32::from).collect(),
        DecodingResult::U32(v) => v.into_iter().map(|s| s as f32).collect(),
        DecodingResult::U64(v) => v.into_iter().map(|s| s as f32).collect(),
        DecodingResult::I8(v) => v.into_iter().map(f32::from).collect(),
        DecodingResult::I16(v) => v.into_iter().map(f32::from).collect(),
        DecodingResult::I32(v) => v.into_iter().map(|s| s as f32).collect(),
        DecodingResult::I64(v) => v.into_iter().map(|s| s as f32).collect(),
        DecodingResult::F32(v) => v,
        DecodingResult::F64(v) => v.into_iter().map(|s| s as f32).collect(),
    }
}
