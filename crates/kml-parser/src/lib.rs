//! KML boundary extraction.
//!
//! Parcel boundaries arrive as KML documents, one per parcel-number folder,
//! each holding one or more `<Placemark>/<Polygon>` elements whose
//! `<coordinates>` text node is a whitespace-separated list of
//! `lon,lat[,elevation]` tuples. This crate extracts one [`Polygon`] per
//! `<Polygon>` element, in the document's native WGS84 lon/lat coordinates.
//!
//! Only the outer ring of each polygon is taken (the first `<coordinates>`
//! element inside it); elevation values are discarded. Rings with fewer than
//! 3 distinct points are dropped silently, which mirrors how hand-drawn
//! boundary files degrade in practice: a stray two-point "polygon" is noise,
//! not an error.

use std::fs;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use tracing::debug;

use parcel_common::{Crs, Polygon};

/// Errors raised while extracting boundaries from a KML document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The document could not be read from disk.
    #[error("failed to read KML file: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not well-formed XML.
    #[error("malformed KML at byte {position}: {message}")]
    Xml { position: u64, message: String },

    /// A coordinate token did not yield two numeric values.
    #[error("invalid coordinate token '{0}': expected 'lon,lat[,elevation]'")]
    BadCoordinate(String),
}

/// Extract all polygon boundaries from a KML file.
pub fn parse_kml_file(path: impl AsRef<Path>) -> Result<Vec<Polygon>, ParseError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let polygons = parse_kml_str(&text)?;
    debug!(
        path = %path.display(),
        polygons = polygons.len(),
        "parsed KML boundary file"
    );
    Ok(polygons)
}

/// Extract all polygon boundaries from KML text.
///
/// Element names are matched by local name, so documents with or without
/// a namespace prefix parse identically.
pub fn parse_kml_str(xml: &str) -> Result<Vec<Polygon>, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut polygons = Vec::new();

    let mut polygon_depth = 0usize;
    let mut in_coordinates = false;
    // First <coordinates> inside the current <Polygon>; inner rings ignored.
    let mut ring_text: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"Polygon" => {
                    polygon_depth += 1;
                    ring_text = None;
                }
                b"coordinates" if polygon_depth > 0 && ring_text.is_none() => {
                    in_coordinates = true;
                    ring_text = Some(String::new());
                }
                _ => {}
            },
            Ok(Event::Text(t)) if in_coordinates => {
                let text = t.unescape().map_err(|e| ParseError::Xml {
                    position: reader.buffer_position() as u64,
                    message: e.to_string(),
                })?;
                if let Some(ring) = ring_text.as_mut() {
                    ring.push_str(&text);
                    ring.push(' ');
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"coordinates" if in_coordinates => {
                    in_coordinates = false;
                }
                b"Polygon" if polygon_depth > 0 => {
                    polygon_depth -= 1;
                    if let Some(ring) = ring_text.take() {
                        if let Some(polygon) = parse_ring(&ring)? {
                            polygons.push(polygon.with_crs(Crs::WGS84));
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ParseError::Xml {
                    position: reader.buffer_position() as u64,
                    message: e.to_string(),
                })
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(polygons)
}

/// Parse a coordinate-list text node into a ring.
///
/// Returns `Ok(None)` when the ring has fewer than 3 distinct points.
fn parse_ring(text: &str) -> Result<Option<Polygon>, ParseError> {
    let mut points = Vec::new();
    for token in text.split_whitespace() {
        let mut parts = token.split(',');
        let lon = parts.next().and_then(|s| s.parse::<f64>().ok());
        let lat = parts.next().and_then(|s| s.parse::<f64>().ok());
        match (lon, lat) {
            (Some(lon), Some(lat)) => points.push((lon, lat)),
            _ => return Err(ParseError::BadCoordinate(token.to_string())),
        }
    }
    Ok(Polygon::new(points))
}
