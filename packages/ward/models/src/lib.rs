#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Ward record types.
//!
//! A ward is an administrative boundary polygon with demographic,
//! economic, and environmental attributes. Attribute values in the source
//! dataset are loosely typed: the same column can hold numbers, numeric
//! strings, percent strings (`"12%"`), or nulls. [`AttributeValue`] keeps
//! the original value for serving it back unchanged and exposes explicit
//! coercion helpers for the places that need a number.

use std::fmt;

use geo::MultiPolygon;
use serde::{Deserialize, Serialize};

/// A single loosely typed ward attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A JSON number, kept as-is so integers serialize back as integers.
    Number(serde_json::Number),
    /// A string, possibly numeric (`"1234"`) or a percentage (`"12.5%"`).
    Text(String),
    /// Anything else the dataset contains (booleans, arrays, ...).
    Other(serde_json::Value),
}

impl AttributeValue {
    /// Coerces the value to a finite number.
    ///
    /// Numeric strings are parsed after trimming whitespace. Returns `None`
    /// for non-numeric text, non-finite values, and non-scalar values.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => n.as_f64()?,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
            Self::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Coerces a percentage value to a number on the 0-100 scale.
    ///
    /// Trailing `%` signs are stripped from strings before parsing, so
    /// `"12.5%"` and `12.5` both yield `12.5`.
    #[must_use]
    pub fn as_percent(&self) -> Option<f64> {
        match self {
            Self::Text(s) => {
                let value = s.trim().trim_end_matches('%').trim_end().parse::<f64>().ok()?;
                value.is_finite().then_some(value)
            }
            _ => self.as_f64(),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Other(v) => write!(f, "{v}"),
        }
    }
}

/// Attribute table of a ward, keyed by the column names of the source
/// dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WardProperties {
    #[serde(rename = "wardcode", default)]
    pub ward_code: Option<AttributeValue>,
    #[serde(rename = "totaldata_Ward Name", default)]
    pub ward_name: Option<AttributeValue>,
    #[serde(rename = "totaldata_#Population (Age 1-12)", default)]
    pub population_age_1_12: Option<AttributeValue>,
    #[serde(rename = "totaldata_#Population (Age 13-17)", default)]
    pub population_age_13_17: Option<AttributeValue>,
    #[serde(rename = "totaldata_#Population (Age 18-24)", default)]
    pub population_age_18_24: Option<AttributeValue>,
    #[serde(rename = "totaldata_#Population (Age 25-34)", default)]
    pub population_age_25_34: Option<AttributeValue>,
    #[serde(rename = "totaldata_Population (Age 35-44)", default)]
    pub population_age_35_44: Option<AttributeValue>,
    #[serde(rename = "totaldata_#Population (Age 45-59)", default)]
    pub population_age_45_59: Option<AttributeValue>,
    #[serde(rename = "totaldata_#Population (Age 60+)", default)]
    pub population_age_60_plus: Option<AttributeValue>,
    #[serde(rename = "totaldata_Air Quality Index (AQI)", default)]
    pub air_quality_index: Option<AttributeValue>,
    #[serde(rename = "totaldata_% Traffic Density", default)]
    pub traffic_density_percent: Option<AttributeValue>,
    #[serde(rename = "totaldata_% Green Space", default)]
    pub green_space_percent: Option<AttributeValue>,
    #[serde(rename = "totaldata_% Infrastructure", default)]
    pub infrastructure_percent: Option<AttributeValue>,
    #[serde(rename = "totaldata_Heatmap Index (Relative)", default)]
    pub heatmap_index: Option<AttributeValue>,
    #[serde(rename = "totaldata_Estimated Ward GDP (₹ Crore)", default)]
    pub estimated_gdp_crore: Option<AttributeValue>,
    #[serde(rename = "totaldata_Light Weight Vehicles (2-wheelers, autos)", default)]
    pub light_vehicles: Option<AttributeValue>,
    #[serde(rename = "totaldata_Medium Weight Vehicles (cars, pickups)", default)]
    pub medium_vehicles: Option<AttributeValue>,
    #[serde(rename = "totaldata_Heavy Weight Vehicles (buses, trucks)", default)]
    pub heavy_vehicles: Option<AttributeValue>,
    #[serde(rename = "totaldata_Total Ward Population", default)]
    pub total_population: Option<AttributeValue>,
    #[serde(rename = "totaldata_Estimated Male Population", default)]
    pub male_population: Option<AttributeValue>,
    #[serde(rename = "totaldata_Estimated Female Population", default)]
    pub female_population: Option<AttributeValue>,
}

impl WardProperties {
    /// Total ward population, if present and numeric.
    #[must_use]
    pub fn total_population(&self) -> Option<f64> {
        self.total_population.as_ref().and_then(AttributeValue::as_f64)
    }

    /// Estimated ward GDP in ₹ crore, if present and numeric.
    #[must_use]
    pub fn estimated_gdp_crore(&self) -> Option<f64> {
        self.estimated_gdp_crore
            .as_ref()
            .and_then(AttributeValue::as_f64)
    }

    /// Green space coverage on the 0-100 scale, if present and parseable.
    #[must_use]
    pub fn green_space_percent(&self) -> Option<f64> {
        self.green_space_percent
            .as_ref()
            .and_then(AttributeValue::as_percent)
    }
}

/// An administrative ward with its boundary and attributes.
///
/// Wards are built once when the dataset is loaded and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Ward {
    /// Ward code from the dataset (falls back to the feature position).
    pub code: String,
    /// Human-readable ward name (empty if the dataset has none).
    pub name: String,
    /// Boundary in EPSG:4326 longitude/latitude.
    pub boundary: MultiPolygon<f64>,
    /// Raw attribute table.
    pub properties: WardProperties,
}

impl Ward {
    /// Builds a ward, deriving the code and name from its properties.
    ///
    /// `index` is the position of the feature in the source collection and
    /// is used as the code when the dataset has none.
    #[must_use]
    pub fn new(index: usize, boundary: MultiPolygon<f64>, properties: WardProperties) -> Self {
        let code = properties
            .ward_code
            .as_ref()
            .map_or_else(|| index.to_string(), ToString::to_string);
        let name = properties
            .ward_name
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();

        Self {
            code,
            name,
            boundary,
            properties,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> AttributeValue {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn coerces_numbers_and_numeric_strings() {
        assert_eq!(parse("1234").as_f64(), Some(1234.0));
        assert_eq!(parse("\" 56.5 \"").as_f64(), Some(56.5));
        assert_eq!(parse("\"n/a\"").as_f64(), None);
        assert_eq!(parse("\"NaN\"").as_f64(), None);
        assert_eq!(parse("true").as_f64(), None);
    }

    #[test]
    fn strips_trailing_percent_sign() {
        assert_eq!(parse("\"12.5%\"").as_percent(), Some(12.5));
        assert_eq!(parse("\"7 %\"").as_percent(), Some(7.0));
        assert_eq!(parse("30").as_percent(), Some(30.0));
        assert_eq!(parse("\"%\"").as_percent(), None);
    }

    #[test]
    fn integers_serialize_back_unchanged() {
        let value = parse("4200");
        assert_eq!(serde_json::to_string(&value).unwrap(), "4200");
        assert_eq!(value.to_string(), "4200");
    }

    #[test]
    fn deserializes_dataset_property_names() {
        let props: WardProperties = serde_json::from_value(serde_json::json!({
            "wardcode": "W-01",
            "totaldata_Ward Name": "Gajuwaka",
            "totaldata_Total Ward Population": 51234,
            "totaldata_% Green Space": "8%",
            "totaldata_Estimated Ward GDP (₹ Crore)": "412.5",
            "unrelated_column": 1
        }))
        .unwrap();

        assert_eq!(props.total_population(), Some(51234.0));
        assert_eq!(props.green_space_percent(), Some(8.0));
        assert_eq!(props.estimated_gdp_crore(), Some(412.5));
        assert!(props.air_quality_index.is_none());
    }

    #[test]
    fn ward_code_falls_back_to_index() {
        let ward = Ward::new(3, MultiPolygon(vec![]), WardProperties::default());
        assert_eq!(ward.code, "3");
        assert_eq!(ward.name, "");
    }
}
