//! Proxy-metric placement suggestions.
//!
//! Each supported infrastructure type maps to one ranking rule over a
//! single ward attribute. Ties go to the ward that comes first in the
//! collection.

use geo::Centroid;
use thiserror::Error;
use urban_insight_simulation_models::SuggestionResult;
use urban_insight_ward_models::Ward;

use crate::format_thousands;

/// Coordinate reported when no ward is selected (Visakhapatnam city
/// centre).
pub const DEFAULT_LATITUDE: f64 = 17.6868;
/// See [`DEFAULT_LATITUDE`].
pub const DEFAULT_LONGITUDE: f64 = 83.2185;

/// Green space assumed for wards without a parseable value.
const MISSING_GREEN_SPACE_PERCENT: f64 = 100.0;

/// Why no suggestion could be made.
#[derive(Debug, Error)]
pub enum SuggestionError {
    /// The infrastructure type has no ranking rule.
    #[error("AI suggestions are not available for this infrastructure type.")]
    NotApplicable,

    /// Ranking failed (no wards, degenerate geometry).
    #[error("An error occurred while generating the suggestion: {message}")]
    Failed {
        /// Description of what went wrong.
        message: String,
    },
}

impl SuggestionError {
    /// The sentinel result describing this error: ward name `"N/A"` for
    /// [`Self::NotApplicable`], `"Error"` for [`Self::Failed`], at the
    /// default coordinate.
    #[must_use]
    pub fn sentinel(&self) -> SuggestionResult {
        let ward_name = match self {
            Self::NotApplicable => "N/A",
            Self::Failed { .. } => "Error",
        };
        SuggestionResult {
            ward_name: ward_name.to_string(),
            reason: self.to_string(),
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
        }
    }
}

/// Ranking rule for a supported infrastructure type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementRule {
    /// Highest total population (schools, hospitals).
    MostPopulous,
    /// Lowest green-space percentage (parks).
    LeastGreen,
    /// Highest estimated GDP (malls).
    Wealthiest,
}

impl PlacementRule {
    /// Case-sensitive lookup of the rule for `infra_type`.
    #[must_use]
    pub fn for_infra_type(infra_type: &str) -> Option<Self> {
        match infra_type {
            "school" | "hospital" => Some(Self::MostPopulous),
            "park" => Some(Self::LeastGreen),
            "mall" => Some(Self::Wealthiest),
            _ => None,
        }
    }

    fn score(self, ward: &Ward) -> f64 {
        match self {
            Self::MostPopulous => ward.properties.total_population().unwrap_or(0.0),
            Self::LeastGreen => ward
                .properties
                .green_space_percent()
                .unwrap_or(MISSING_GREEN_SPACE_PERCENT),
            Self::Wealthiest => ward.properties.estimated_gdp_crore().unwrap_or(0.0),
        }
    }

    /// First ward with the best score.
    fn select(self, wards: &[Ward]) -> Option<&Ward> {
        let mut best: Option<(&Ward, f64)> = None;
        for ward in wards {
            let score = self.score(ward);
            let better = match best {
                None => true,
                Some((_, current)) => match self {
                    Self::LeastGreen => score < current,
                    Self::MostPopulous | Self::Wealthiest => score > current,
                },
            };
            if better {
                best = Some((ward, score));
            }
        }
        best.map(|(ward, _)| ward)
    }

    fn reason(self, ward: &Ward) -> String {
        match self {
            #[allow(clippy::cast_possible_truncation)]
            Self::MostPopulous => format!(
                "This ward has the highest population density ({}), indicating a strong need for public services.",
                format_thousands(self.score(ward) as i64)
            ),
            Self::LeastGreen => format!(
                "This ward has the lowest percentage of green space ({}), making it an ideal candidate for a new park.",
                ward.properties
                    .green_space_percent
                    .as_ref()
                    .map_or_else(|| "unknown".to_string(), ToString::to_string)
            ),
            Self::Wealthiest => format!(
                "This ward has the highest estimated economy (₹{:?} Crore), making it a prime location for a new commercial center.",
                self.score(ward)
            ),
        }
    }
}

/// Picks the best ward for `infra_type` using its proxy metric.
///
/// # Errors
///
/// * [`SuggestionError::NotApplicable`] if `infra_type` has no rule
/// * [`SuggestionError::Failed`] if there are no wards or the chosen
///   ward's centroid cannot be computed
pub fn suggest_placement(
    wards: &[Ward],
    infra_type: &str,
) -> Result<SuggestionResult, SuggestionError> {
    log::info!("Generating placement suggestion for: {infra_type}");

    let rule = PlacementRule::for_infra_type(infra_type).ok_or(SuggestionError::NotApplicable)?;

    let ward = rule.select(wards).ok_or_else(|| SuggestionError::Failed {
        message: "no wards are available to rank".to_string(),
    })?;

    let centroid = ward.boundary.centroid().ok_or_else(|| SuggestionError::Failed {
        message: format!("ward '{}' has no computable centroid", ward.name),
    })?;

    Ok(SuggestionResult {
        ward_name: ward.name.clone(),
        reason: rule.reason(ward),
        latitude: centroid.y(),
        longitude: centroid.x(),
    })
}
