//! Final report assembly.

use urban_insight_simulation_models::{SimulationOutcome, SimulationReport};

use crate::title_case;

/// Display label for an infrastructure type (`road_flyover` →
/// `Road Flyover`).
#[must_use]
pub fn display_label(infra_type: &str) -> String {
    title_case(&infra_type.replace('_', " "))
}

/// Turns the narrative payload into the simulation outcome.
///
/// A payload without `status`, or with `status: "success"`, must fit the
/// report shape; its `infrastructure_type` is replaced by the display
/// label of `infra_type` and every other key is kept as received. Any
/// other status is reported as an error, using the payload's `message`
/// when it has one.
#[must_use]
pub fn assemble_report(mut payload: serde_json::Value, infra_type: &str) -> SimulationOutcome {
    match payload.get("status") {
        None => {}
        Some(serde_json::Value::String(status)) if status == "success" => {}
        Some(status) => {
            let message = payload
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map_or_else(
                    || format!("The narrative service reported status {status}"),
                    str::to_string,
                );
            return SimulationOutcome::error(message);
        }
    }

    // The outcome carries its own status tag.
    if let Some(object) = payload.as_object_mut() {
        object.remove("status");
    }

    match serde_json::from_value::<SimulationReport>(payload) {
        Ok(mut report) => {
            report.infrastructure_type = display_label(infra_type);
            SimulationOutcome::Success(report)
        }
        Err(e) => {
            log::error!("Narrative payload does not match the report schema: {e}");
            SimulationOutcome::error(format!(
                "The narrative response did not match the report schema: {e}"
            ))
        }
    }
}
