#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Impact simulation pipeline.
//!
//! For the wards touched by a proposed piece of infrastructure:
//! prediction table → context briefing → prompt → narrative client →
//! report assembly. Placement suggestions are a separate, purely local
//! path over the whole ward collection (see [`recommend`]).

pub mod context;
pub mod predictions;
pub mod prompt;
pub mod recommend;
pub mod report;

use urban_insight_ai::NarrativeClient;
use urban_insight_simulation_models::SimulationOutcome;
use urban_insight_ward_models::Ward;

/// Runs the impact simulation for `infra_type` over the intersecting
/// `wards`.
///
/// An empty ward list short-circuits to [`SimulationOutcome::NoImpact`]
/// without contacting the narrative service. Narrative failures become
/// [`SimulationOutcome::Error`]; this function never fails.
pub async fn run_simulation(
    wards: &[&Ward],
    infra_type: &str,
    narrator: &NarrativeClient,
) -> SimulationOutcome {
    if wards.is_empty() {
        return SimulationOutcome::no_impact();
    }

    let normalized = infra_type.to_lowercase();
    let prediction = predictions::predict(&normalized);
    let context = context::build_context(wards, &prediction, &normalized);
    let prompt = prompt::build_prompt(&context, &normalized);

    match narrator.generate(&prompt).await {
        Ok(payload) => report::assemble_report(payload, infra_type),
        Err(e) => SimulationOutcome::error(e.to_string()),
    }
}

/// Title-cases `s`: letters that follow a non-letter are upper-cased and
/// every other letter lower-cased (`"road-ground"` → `"Road-Ground"`).
pub(crate) fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut after_letter = false;
    for c in s.chars() {
        if after_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        after_letter = c.is_alphabetic();
    }
    out
}

/// Formats an integer with `,` thousands separators.
pub(crate) fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
