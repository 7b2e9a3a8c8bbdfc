#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! In-memory ward store.
//!
//! Loads the ward `GeoJSON` `FeatureCollection` once at startup, builds an
//! R-tree over ward bounding boxes, and answers "which wards does this
//! shape touch" queries. The store is read-only after construction and is
//! shared across request handlers without locking.

pub mod geometry;
pub mod store;

pub use store::WardCollection;

use thiserror::Error;

/// Errors that can occur while loading wards or parsing caller geometry.
#[derive(Debug, Error)]
pub enum WardError {
    /// Reading the dataset file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The dataset is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The dataset is valid `GeoJSON` but not a ward feature collection.
    #[error("Invalid ward dataset: {message}")]
    Dataset {
        /// Description of what went wrong.
        message: String,
    },

    /// A caller-supplied geometry could not be converted.
    #[error("{message}")]
    InvalidGeometry {
        /// Description of what went wrong.
        message: String,
    },
}
