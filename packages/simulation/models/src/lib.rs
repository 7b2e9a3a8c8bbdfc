#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Simulation data contracts.
//!
//! [`NumericPrediction`] is the fixed-shape output of the prediction table.
//! [`SimulationReport`] is the narrative report the language model fills
//! in; its JSON schema is embedded in the prompt via
//! [`report_json_schema`]. [`SimulationOutcome`] is what the simulate
//! endpoint returns, discriminated by its `status` field.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Predicted deltas for a piece of infrastructure.
///
/// Every field is always populated; zero means "no predicted change".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericPrediction {
    pub predicted_aqi_change: f64,
    pub predicted_heat_index_change: f64,
    pub predicted_urban_vegetation_change_percent: f64,
    pub predicted_traffic_density_change_percent: f64,
    pub predicted_light_vehicle_change_percent: f64,
    pub predicted_medium_vehicle_change_percent: f64,
    pub predicted_heavy_vehicle_change_percent: f64,
    pub predicted_total_population_change: i64,
    pub predicted_gdp_change_crore: f64,
}

/// A single predicted value, as either a fractional delta or a head count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    Delta(f64),
    Count(i64),
}

impl Metric {
    #[must_use]
    pub fn is_zero(self) -> bool {
        match self {
            Self::Delta(v) => v == 0.0,
            Self::Count(v) => v == 0,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Debug keeps the trailing `.0` on whole numbers.
            Self::Delta(v) => write!(f, "{v:?}"),
            Self::Count(v) => write!(f, "{v}"),
        }
    }
}

impl NumericPrediction {
    /// All predictions as `(field name, value)` pairs in declaration order.
    #[must_use]
    pub const fn metrics(&self) -> [(&'static str, Metric); 9] {
        [
            ("predicted_aqi_change", Metric::Delta(self.predicted_aqi_change)),
            (
                "predicted_heat_index_change",
                Metric::Delta(self.predicted_heat_index_change),
            ),
            (
                "predicted_urban_vegetation_change_percent",
                Metric::Delta(self.predicted_urban_vegetation_change_percent),
            ),
            (
                "predicted_traffic_density_change_percent",
                Metric::Delta(self.predicted_traffic_density_change_percent),
            ),
            (
                "predicted_light_vehicle_change_percent",
                Metric::Delta(self.predicted_light_vehicle_change_percent),
            ),
            (
                "predicted_medium_vehicle_change_percent",
                Metric::Delta(self.predicted_medium_vehicle_change_percent),
            ),
            (
                "predicted_heavy_vehicle_change_percent",
                Metric::Delta(self.predicted_heavy_vehicle_change_percent),
            ),
            (
                "predicted_total_population_change",
                Metric::Count(self.predicted_total_population_change),
            ),
            (
                "predicted_gdp_change_crore",
                Metric::Delta(self.predicted_gdp_change_crore),
            ),
        ]
    }
}

/// Keys the model sent beyond the known fields, kept so the report is
/// served back as received.
pub type ExtraFields = serde_json::Map<String, serde_json::Value>;

/// Environmental section of a [`SimulationReport`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalImpactReport {
    #[serde(default)]
    pub predicted_aqi_change: Option<f64>,
    #[serde(default)]
    pub predicted_heat_index_change: Option<f64>,
    #[serde(default)]
    pub predicted_urban_vegetation_change_percent: Option<f64>,
    pub narrative: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Traffic section of a [`SimulationReport`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrafficImpactReport {
    #[serde(default)]
    pub predicted_traffic_density_change_percent: Option<f64>,
    #[serde(default)]
    pub predicted_light_vehicle_change_percent: Option<f64>,
    #[serde(default)]
    pub predicted_medium_vehicle_change_percent: Option<f64>,
    #[serde(default)]
    pub predicted_heavy_vehicle_change_percent: Option<f64>,
    pub narrative: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Population section of a [`SimulationReport`].
///
/// The population delta is any JSON number: models often write counts as
/// `500.0`, and the value is passed through exactly as written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationImpactReport {
    #[serde(default)]
    pub predicted_total_population_change: Option<serde_json::Number>,
    #[serde(default)]
    pub predicted_age_group_most_affected: Option<String>,
    pub narrative: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Economic section of a [`SimulationReport`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EconomicImpactReport {
    #[serde(default)]
    pub predicted_gdp_change_crore: Option<f64>,
    pub narrative: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Narrative impact report for one proposed piece of infrastructure.
///
/// The `status` discriminant lives on [`SimulationOutcome`], not here.
/// Unknown keys from the model land in `extra` and serialize back inline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Display label, e.g. `"Road Flyover"`.
    #[serde(default)]
    pub infrastructure_type: String,
    pub summary_narrative: String,
    #[serde(default)]
    pub environmental_impact: Option<EnvironmentalImpactReport>,
    #[serde(default)]
    pub traffic_impact: Option<TrafficImpactReport>,
    #[serde(default)]
    pub population_impact: Option<PopulationImpactReport>,
    #[serde(default)]
    pub economic_impact: Option<EconomicImpactReport>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Result of a simulation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SimulationOutcome {
    /// A complete narrative report.
    Success(SimulationReport),
    /// The drawn shape touches no ward.
    NoImpact {
        message: String,
    },
    /// Report generation failed; `message` says why.
    Error {
        message: String,
    },
}

impl SimulationOutcome {
    #[must_use]
    pub fn no_impact() -> Self {
        Self::NoImpact {
            message: "The new infrastructure is outside of any known ward.".to_string(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// Suggested ward for a new piece of infrastructure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResult {
    pub ward_name: String,
    pub reason: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// JSON schema of a [`SimulationReport`] as the language model must
/// produce it, including the `status` field.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn report_json_schema() -> serde_json::Value {
    let number = || serde_json::json!({ "anyOf": [{ "type": "number" }, { "type": "null" }], "default": null });
    let narrative = serde_json::json!({ "type": "string", "title": "Narrative" });

    serde_json::json!({
        "title": "SimulationReport",
        "type": "object",
        "properties": {
            "status": { "type": "string", "title": "Status", "default": "success" },
            "infrastructure_type": { "type": "string", "title": "Infrastructure Type" },
            "summary_narrative": { "type": "string", "title": "Summary Narrative" },
            "environmental_impact": {
                "anyOf": [{ "$ref": "#/$defs/EnvironmentalImpactReport" }, { "type": "null" }],
                "default": null
            },
            "traffic_impact": {
                "anyOf": [{ "$ref": "#/$defs/TrafficImpactReport" }, { "type": "null" }],
                "default": null
            },
            "population_impact": {
                "anyOf": [{ "$ref": "#/$defs/PopulationImpactReport" }, { "type": "null" }],
                "default": null
            },
            "economic_impact": {
                "anyOf": [{ "$ref": "#/$defs/EconomicImpactReport" }, { "type": "null" }],
                "default": null
            }
        },
        "required": ["infrastructure_type", "summary_narrative"],
        "$defs": {
            "EnvironmentalImpactReport": {
                "title": "EnvironmentalImpactReport",
                "type": "object",
                "properties": {
                    "predicted_aqi_change": number(),
                    "predicted_heat_index_change": number(),
                    "predicted_urban_vegetation_change_percent": number(),
                    "narrative": narrative
                },
                "required": ["narrative"]
            },
            "TrafficImpactReport": {
                "title": "TrafficImpactReport",
                "type": "object",
                "properties": {
                    "predicted_traffic_density_change_percent": number(),
                    "predicted_light_vehicle_change_percent": number(),
                    "predicted_medium_vehicle_change_percent": number(),
                    "predicted_heavy_vehicle_change_percent": number(),
                    "narrative": narrative
                },
                "required": ["narrative"]
            },
            "PopulationImpactReport": {
                "title": "PopulationImpactReport",
                "type": "object",
                "properties": {
                    "predicted_total_population_change": {
                        "anyOf": [{ "type": "integer" }, { "type": "null" }],
                        "default": null
                    },
                    "predicted_age_group_most_affected": {
                        "anyOf": [{ "type": "string" }, { "type": "null" }],
                        "default": null
                    },
                    "narrative": narrative
                },
                "required": ["narrative"]
            },
            "EconomicImpactReport": {
                "title": "EconomicImpactReport",
                "type": "object",
                "properties": {
                    "predicted_gdp_change_crore": number(),
                    "narrative": narrative
                },
                "required": ["narrative"]
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_render_like_their_source_values() {
        assert_eq!(Metric::Delta(55.0).to_string(), "55.0");
        assert_eq!(Metric::Delta(-2.5).to_string(), "-2.5");
        assert_eq!(Metric::Count(500).to_string(), "500");
        assert!(Metric::Delta(0.0).is_zero());
        assert!(!Metric::Count(1).is_zero());
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(SimulationOutcome::no_impact()).unwrap();
        assert_eq!(json["status"], "no_impact");
        assert_eq!(
            json["message"],
            "The new infrastructure is outside of any known ward."
        );

        let json = serde_json::to_value(SimulationOutcome::error("boom")).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "error", "message": "boom" }));
    }

    #[test]
    fn success_outcome_flattens_report() {
        let outcome = SimulationOutcome::Success(SimulationReport {
            infrastructure_type: "Park".to_string(),
            summary_narrative: "Greener.".to_string(),
            economic_impact: Some(EconomicImpactReport {
                predicted_gdp_change_crore: Some(1.5),
                narrative: "Small uplift.".to_string(),
                ..EconomicImpactReport::default()
            }),
            ..SimulationReport::default()
        });

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["infrastructure_type"], "Park");
        assert_eq!(json["economic_impact"]["predicted_gdp_change_crore"], 1.5);
        assert!(json["traffic_impact"].is_null());

        let back: SimulationOutcome = serde_json::from_value(json).unwrap();
        assert_eq!(back, outcome);
    }

    #[test]
    fn report_tolerates_missing_optional_sections() {
        let report: SimulationReport = serde_json::from_value(serde_json::json!({
            "status": "success",
            "summary_narrative": "Fine.",
            "traffic_impact": { "narrative": "Busier roads." }
        }))
        .unwrap();

        assert_eq!(report.infrastructure_type, "");
        assert_eq!(report.traffic_impact.unwrap().narrative, "Busier roads.");
        assert!(report.environmental_impact.is_none());
    }

    #[test]
    fn population_change_accepts_any_number() {
        let section: PopulationImpactReport = serde_json::from_value(serde_json::json!({
            "predicted_total_population_change": 500.0,
            "narrative": "More families."
        }))
        .unwrap();
        assert_eq!(
            serde_json::to_value(&section).unwrap()["predicted_total_population_change"],
            500.0
        );

        let section: PopulationImpactReport = serde_json::from_value(serde_json::json!({
            "predicted_total_population_change": -120,
            "narrative": "Some relocation."
        }))
        .unwrap();
        assert_eq!(
            section.predicted_total_population_change,
            Some(serde_json::Number::from(-120))
        );
    }

    #[test]
    fn unknown_keys_serialize_back_inline() {
        let payload = serde_json::json!({
            "infrastructure_type": "Mall",
            "summary_narrative": "Busy.",
            "recommendations": ["Add a bus stop"],
            "economic_impact": {
                "predicted_gdp_change_crore": 12,
                "narrative": "Retail jobs.",
                "confidence": "medium"
            }
        });
        let report: SimulationReport = serde_json::from_value(payload.clone()).unwrap();
        assert_eq!(report.extra["recommendations"], serde_json::json!(["Add a bus stop"]));

        let json = serde_json::to_value(SimulationOutcome::Success(report)).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["recommendations"], payload["recommendations"]);
        assert_eq!(json["economic_impact"]["confidence"], "medium");
        assert_eq!(json["economic_impact"]["predicted_gdp_change_crore"], 12.0);
    }

    #[test]
    fn schema_lists_every_narrative_field() {
        let schema = report_json_schema();
        for section in [
            "EnvironmentalImpactReport",
            "TrafficImpactReport",
            "PopulationImpactReport",
            "EconomicImpactReport",
        ] {
            assert_eq!(
                schema["$defs"][section]["required"],
                serde_json::json!(["narrative"])
            );
        }
        assert!(schema["properties"]["summary_narrative"].is_object());
        assert!(schema["properties"]["status"].is_object());
    }
}
