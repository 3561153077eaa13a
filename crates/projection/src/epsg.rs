//! EPSG code resolution against the crs-definitions database.

use parcel_common::Crs;

/// Get the PROJ4 definition string for a CRS.
///
/// Returns `None` when the EPSG code is not in the crs-definitions database.
#[inline]
pub fn proj_string(crs: Crs) -> Option<&'static str> {
    crs_definitions::from_code(crs.epsg()).map(|def| def.proj4)
}

/// Check whether a CRS is geographic (lon/lat in degrees).
///
/// proj4rs expects geographic coordinates in radians, so callers need to
/// know whether degree conversion applies on either side of a transform.
#[inline]
pub fn is_geographic(crs: Crs) -> bool {
    match proj_string(crs) {
        Some(proj) => proj.contains("+proj=longlat"),
        // Codes in the 4000 range are geographic in the EPSG registry.
        None => (4000..5000).contains(&crs.epsg()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_resolve() {
        assert!(proj_string(Crs::WGS84).is_some());
        assert!(proj_string(Crs::from_epsg(3857)).is_some());
        assert!(proj_string(Crs::from_epsg(32633)).is_some());
    }

    #[test]
    fn test_unknown_code() {
        assert!(proj_string(Crs::from_epsg(1)).is_none());
    }

    #[test]
    fn test_is_geographic() {
        assert!(is_geographic(Crs::WGS84));
        assert!(!is_geographic(Crs::from_epsg(3857)));
        assert!(!is_geographic(Crs::from_epsg(32633)));
    }
}
