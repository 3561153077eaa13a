//! Coordinate Reference System identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// An EPSG coordinate reference system code.
///
/// The workspace identifies every coordinate space by its EPSG code; the
/// `projection` crate resolves codes against the crs-definitions database
/// when a transform is actually needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Crs(u16);

impl Crs {
    /// Geographic WGS84 (lon/lat in degrees), the default for KML input.
    pub const WGS84: Crs = Crs(4326);

    /// Create a CRS from a raw EPSG code.
    pub fn from_epsg(code: u16) -> Self {
        Crs(code)
    }

    /// The EPSG code.
    pub fn epsg(&self) -> u16 {
        self.0
    }

    /// Parse a CRS string such as `"EPSG:4326"` or `"epsg:32633"`.
    ///
    /// A bare numeric code is also accepted.
    pub fn parse(s: &str) -> Result<Self, CrsParseError> {
        let code_part = match s.split_once(':') {
            Some((authority, code)) if authority.eq_ignore_ascii_case("epsg") => code,
            Some(_) => return Err(CrsParseError::UnsupportedAuthority(s.to_string())),
            None => s,
        };

        code_part
            .trim()
            .parse::<u16>()
            .map(Crs)
            .map_err(|_| CrsParseError::InvalidCode(s.to_string()))
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum CrsParseError {
    #[error("Unsupported CRS authority: {0}. Expected 'EPSG:<code>'")]
    UnsupportedAuthority(String),

    #[error("Invalid EPSG code: {0}")]
    InvalidCode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_epsg_string() {
        assert_eq!(Crs::parse("EPSG:4326").unwrap(), Crs::WGS84);
        assert_eq!(Crs::parse("epsg:32633").unwrap().epsg(), 32633);
        assert_eq!(Crs::parse("3857").unwrap().epsg(), 3857);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Crs::parse("CRS:84").is_err());
        assert!(Crs::parse("EPSG:not-a-code").is_err());
        assert!(Crs::parse("").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Crs::WGS84.to_string(), "EPSG:4326");
    }
}
