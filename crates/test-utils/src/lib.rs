//! Shared test utilities for the parcel-align workspace.
//!
//! Provides synthetic grid generators and in-memory KML/GeoTIFF fixtures so
//! that crates can test the alignment pipeline without external data files.
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::*;
pub use generators::*;
