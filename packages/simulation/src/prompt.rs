//! Instruction prompt for the narrative model.

use urban_insight_simulation_models::report_json_schema;

/// Builds the full instruction: persona, area briefing, proposed action,
/// output contract, and the report JSON schema.
///
/// The model must answer with a bare JSON object matching the schema; the
/// narrative client treats anything else as a malformed response.
#[must_use]
pub fn build_prompt(context: &str, infra_type: &str) -> String {
    let schema = serde_json::to_string_pretty(&report_json_schema()).unwrap_or_default();
    let action = infra_type.to_uppercase();

    format!(
        r"ROLE: You are a world-class urban planning AI assistant named 'UrbanInsight'. Your analysis is sharp, data-driven, and generative.

CONTEXT: I am analyzing a specific urban area with the following characteristics:
{context}

USER ACTION: A new '{action}' is being proposed for this area.

YOUR TASK: Based on all the provided context, including the preliminary AI analysis, perform a detailed generative analysis. Your response must be a valid JSON object that strictly adheres to the following JSON schema. For every single 'narrative' field in the schema, you MUST provide a detailed, data-driven analysis in a sentence or two, explaining the reasoning behind the predicted changes. Do not include any text, explanations, or markdown formatting outside of the JSON object itself.

JSON SCHEMA:
{schema}"
    )
}
