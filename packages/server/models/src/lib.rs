#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the Urban Insight server.
//!
//! Simulation and suggestion payloads live in
//! `urban_insight_simulation_models`; this crate only holds the shapes
//! that exist for the HTTP surface itself.

use serde::{Deserialize, Serialize};

/// Body of the root liveness check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStatus {
    /// Always `"ok"` while the process is serving.
    pub status: String,
}

impl ApiStatus {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Health detail response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// `"ok"`, or `"degraded"` when the ward dataset failed to load.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Number of wards held in memory.
    pub wards_loaded: usize,
    /// Whether a narrative provider credential is configured.
    pub narrative_configured: bool,
}

/// Error body shared by every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable reason.
    pub detail: String,
}

impl ApiError {
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Body of `POST /api/simulate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulateRequest {
    /// Infrastructure type, e.g. `road_flyover` or `park`.
    pub infrastructure_type: String,
    /// GeoJSON geometry object of the proposed footprint. Kept raw so that
    /// geometry errors can be reported as a 400 with a specific reason.
    pub geometry: serde_json::Value,
}
