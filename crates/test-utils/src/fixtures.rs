//! In-memory KML and GeoTIFF fixtures.

use std::io::Cursor;

use tiff::encoder::colortype::Gray32Float;
use tiff::encoder::TiffEncoder;
use tiff::tags::Tag;

const MODEL_PIXEL_SCALE: u16 = 33550;
const MODEL_TIEPOINT: u16 = 33922;
const GEO_KEY_DIRECTORY: u16 = 34735;
const GT_MODEL_TYPE: u16 = 1024;
const GEOGRAPHIC_TYPE: u16 = 2048;
const PROJECTED_CS_TYPE: u16 = 3072;

/// Build a KML document with one placemark polygon per coordinate ring.
///
/// Rings are in lon/lat; a third elevation component of `0` is written for
/// each vertex, as real exports do.
pub fn kml_document(rings: &[&[(f64, f64)]]) -> String {
    let mut out = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <kml xmlns=\"http://www.opengis.net/kml/2.2\">\n<Document>\n",
    );
    for ring in rings {
        out.push_str("<Placemark><Polygon><outerBoundaryIs><LinearRing><coordinates>\n");
        for (lon, lat) in ring.iter() {
            out.push_str(&format!("{lon},{lat},0 "));
        }
        out.push_str("\n</coordinates></LinearRing></outerBoundaryIs></Polygon></Placemark>\n");
    }
    out.push_str("</Document>\n</kml>\n");
    out
}

/// Encode a single-band float GeoTIFF in memory.
///
/// `origin` is the geographic position of the top-left pixel corner and
/// `resolution` the positive pixel size; the row axis points south, the
/// standard north-up layout.
pub fn encode_geotiff(
    data: &[f32],
    width: u32,
    height: u32,
    origin: (f64, f64),
    resolution: (f64, f64),
    epsg: u16,
) -> Vec<u8> {
    assert_eq!(data.len(), (width * height) as usize);

    // EPSG geographic codes live in the 4000 range; everything else in the
    // fixture set is projected.
    let (crs_key, model_type) = if (4000..5000).contains(&epsg) {
        (GEOGRAPHIC_TYPE, 2u16)
    } else {
        (PROJECTED_CS_TYPE, 1u16)
    };

    let mut bytes = Cursor::new(Vec::new());
    {
        let mut encoder = TiffEncoder::new(&mut bytes).expect("in-memory encoder");
        let mut image = encoder
            .new_image::<Gray32Float>(width, height)
            .expect("image directory");

        let scale = [resolution.0, resolution.1, 0.0];
        image
            .encoder()
            .write_tag(Tag::Unknown(MODEL_PIXEL_SCALE), scale.as_slice())
            .expect("pixel scale tag");

        let tiepoint = [0.0, 0.0, 0.0, origin.0, origin.1, 0.0];
        image
            .encoder()
            .write_tag(Tag::Unknown(MODEL_TIEPOINT), tiepoint.as_slice())
            .expect("tiepoint tag");

        let keys: [u16; 12] = [
            1, 1, 0, 2, //
            GT_MODEL_TYPE, 0, 1, model_type, //
            crs_key, 0, 1, epsg,
        ];
        image
            .encoder()
            .write_tag(Tag::Unknown(GEO_KEY_DIRECTORY), keys.as_slice())
            .expect("geokey directory tag");

        image.write_data(data).expect("sample data");
    }
    bytes.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kml_document_shape() {
        let kml = kml_document(&[&[(30.0, 60.0), (30.1, 60.0), (30.1, 60.1)]]);
        assert!(kml.contains("<coordinates>"));
        assert!(kml.contains("30.1,60.1,0"));
        assert_eq!(kml.matches("<Placemark>").count(), 1);
    }

    #[test]
    fn test_encode_geotiff_produces_bytes() {
        let bytes = encode_geotiff(&[0.0; 16], 4, 4, (0.0, 4.0), (1.0, 1.0), 32633);
        // TIFF magic: little-endian "II*\0".
        assert_eq!(&bytes[..4], b"II*\0");
    }
}
