//! GeoTIFF tag extraction.
//!
//! Tag IDs and GeoKey layout follow the GeoTIFF 1.1 specification. Only the
//! keys needed for georeferencing are read; everything else in the key
//! directory is ignored.

use std::io::{Read, Seek};

use tiff::decoder::Decoder;
use tiff::tags::Tag;

use parcel_common::{Crs, GeoTransform};

use crate::RasterReadError;

const MODEL_PIXEL_SCALE: Tag = Tag::ModelPixelScaleTag;
const MODEL_TIEPOINT: Tag = Tag::ModelTiepointTag;
const MODEL_TRANSFORMATION: Tag = Tag::ModelTransformationTag;
const GEO_KEY_DIRECTORY: Tag = Tag::GeoKeyDirectoryTag;

// GeoKey IDs carrying the EPSG code.
const GEOGRAPHIC_TYPE_GEO_KEY: u16 = 2048;
const PROJECTED_CS_TYPE_GEO_KEY: u16 = 3072;

fn read_f64_tag<R: Read + Seek>(
    decoder: &mut Decoder<R>,
    tag: Tag,
) -> Result<Option<Vec<f64>>, RasterReadError> {
    match decoder.find_tag(tag)? {
        Some(value) => Ok(Some(value.into_f64_vec()?)),
        None => Ok(None),
    }
}

/// Recover the pixel-to-geographic affine transform.
///
/// Prefers a full ModelTransformation matrix; otherwise combines
/// ModelPixelScale with the first ModelTiepoint. North-up rasters store a
/// positive Y scale, which becomes a negative row coefficient.
pub fn read_transform<R: Read + Seek>(
    decoder: &mut Decoder<R>,
) -> Result<GeoTransform, RasterReadError> {
    if let Some(m) = read_f64_tag(decoder, MODEL_TRANSFORMATION)? {
        if m.len() < 8 {
            return Err(RasterReadError::MissingGeoTag("ModelTransformation"));
        }
        // Row-major 4x4; only the 2D terms apply.
        return Ok(GeoTransform::new(m[0], m[1], m[3], m[4], m[5], m[7]));
    }

    let scale = read_f64_tag(decoder, MODEL_PIXEL_SCALE)?
        .ok_or(RasterReadError::MissingGeoTag("ModelPixelScale"))?;
    let tiepoint = read_f64_tag(decoder, MODEL_TIEPOINT)?
        .ok_or(RasterReadError::MissingGeoTag("ModelTiepoint"))?;

    if scale.len() < 2 {
        return Err(RasterReadError::MissingGeoTag("ModelPixelScale"));
    }
    if tiepoint.len() < 6 {
        return Err(RasterReadError::MissingGeoTag("ModelTiepoint"));
    }

    let (sx, sy) = (scale[0], scale[1]);
    // Ties raster pixel (i, j) to geographic (x, y).
    let (i, j, x, y) = (tiepoint[0], tiepoint[1], tiepoint[3], tiepoint[4]);

    Ok(GeoTransform::new(
        sx,
        0.0,
        x - i * sx,
        0.0,
        -sy,
        y + j * sy,
    ))
}

/// Recover the CRS from the GeoKeyDirectory.
///
/// A projected CRS key wins over a geographic one when both are present,
/// because the projected code is the one the raster's coordinates are in.
pub fn read_crs<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<Crs, RasterReadError> {
    let directory = match decoder.find_tag(GEO_KEY_DIRECTORY)? {
        Some(value) => value.into_u16_vec()?,
        None => return Err(RasterReadError::MissingGeoTag("GeoKeyDirectory")),
    };

    if directory.len() < 4 {
        return Err(RasterReadError::MissingGeoTag("GeoKeyDirectory"));
    }

    let mut geographic = None;
    let mut projected = None;

    // Header is 4 shorts, then one 4-short entry per key:
    // [key_id, tag_location, count, value].
    for entry in directory[4..].chunks_exact(4) {
        let (key_id, tag_location, value) = (entry[0], entry[1], entry[3]);
        // tag_location 0 means the value is stored inline.
        if tag_location != 0 {
            continue;
        }
        match key_id {
            GEOGRAPHIC_TYPE_GEO_KEY => geographic = Some(value),
            PROJECTED_CS_TYPE_GEO_KEY => projected = Some(value),
            _ => {}
        }
    }

    projected
        .or(geographic)
        .map(Crs::from_epsg)
        .ok_or(RasterReadError::MissingGeoTag(
            "GeoKeyDirectory has no CRS key",
        ))
}
