//! Data briefing handed to the language model.

use std::fmt::Write as _;

use urban_insight_simulation_models::NumericPrediction;
use urban_insight_ward_models::Ward;

use crate::{format_thousands, title_case};

/// Renders the briefing for the affected wards and the predicted deltas.
///
/// Population sums treat missing or non-numeric values as zero. Average
/// GDP only counts wards with a numeric value and reads `N/A` when none
/// has one. Zero-valued predictions are omitted.
#[must_use]
pub fn build_context(wards: &[&Ward], prediction: &NumericPrediction, infra_type: &str) -> String {
    let total_population: f64 = wards
        .iter()
        .map(|w| w.properties.total_population().unwrap_or(0.0))
        .sum();

    let gdps: Vec<f64> = wards
        .iter()
        .filter_map(|w| w.properties.estimated_gdp_crore())
        .collect();
    #[allow(clippy::cast_precision_loss)]
    let average_gdp = if gdps.is_empty() {
        "N/A".to_string()
    } else {
        format!("{:.2}", gdps.iter().sum::<f64>() / gdps.len() as f64)
    };

    #[allow(clippy::cast_possible_truncation)]
    let population = format_thousands(total_population as i64);

    let mut context = format!(
        "CONTEXT OF THE AFFECTED URBAN AREA:\n\
         - Geographic Area: Consists of {} ward(s).\n\
         - Total Population: Approximately {population} people.\n\
         - Average Ward Economy: Estimated GDP of ₹{average_gdp} Crore per ward.",
        wards.len(),
    );

    let lines: Vec<String> = prediction
        .metrics()
        .into_iter()
        .filter(|(_, metric)| !metric.is_zero())
        .map(|(name, metric)| format!("- {}: {metric}", metric_title(name)))
        .collect();

    if !lines.is_empty() {
        context.push_str("\n\nPRELIMINARY AI ANALYSIS (NUMERIC PREDICTION MODEL):");
        for line in lines {
            let _ = write!(context, "\n{line}");
        }
    }

    match infra_type {
        "road_flyover" => {
            context.push_str(
                "\n\nANALYTICAL NOTE: This is a flyover, designed to bypass local traffic.",
            );
        }
        "road_tunnel" => {
            context.push_str("\n\nANALYTICAL NOTE: This is a tunnel, with minimal surface impact.");
        }
        _ => {}
    }

    context
}

/// `predicted_urban_vegetation_change_percent` →
/// `Predicted Urban Vegetation Change %`.
fn metric_title(name: &str) -> String {
    title_case(&name.replace('_', " ").replace("percent", "%"))
}
