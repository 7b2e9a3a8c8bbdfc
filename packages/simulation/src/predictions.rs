//! Placeholder numeric prediction table.
//!
//! Deltas depend only on the infrastructure type, never on the wards it
//! touches. Unknown types get the all-zero baseline.

use urban_insight_simulation_models::NumericPrediction;

/// Looks up the predicted deltas for a lower-cased infrastructure type.
#[must_use]
pub fn predict(infra_type: &str) -> NumericPrediction {
    let base = NumericPrediction::default();

    match infra_type {
        "road_ground" => NumericPrediction {
            predicted_aqi_change: 15.2,
            predicted_heat_index_change: 1.8,
            predicted_urban_vegetation_change_percent: -18.0,
            predicted_traffic_density_change_percent: 55.0,
            predicted_medium_vehicle_change_percent: 40.0,
            predicted_heavy_vehicle_change_percent: 15.0,
            ..base
        },
        "road_flyover" | "road_tunnel" => NumericPrediction {
            predicted_aqi_change: 8.5,
            predicted_heat_index_change: 0.5,
            predicted_urban_vegetation_change_percent: -5.0,
            predicted_traffic_density_change_percent: 30.0,
            predicted_medium_vehicle_change_percent: 25.0,
            ..base
        },
        "mall" => NumericPrediction {
            predicted_aqi_change: 5.7,
            predicted_heat_index_change: 2.5,
            predicted_urban_vegetation_change_percent: -5.0,
            predicted_traffic_density_change_percent: 42.5,
            predicted_medium_vehicle_change_percent: 50.0,
            predicted_gdp_change_crore: 12.5,
            ..base
        },
        "school" => NumericPrediction {
            predicted_aqi_change: 1.5,
            predicted_heat_index_change: 0.5,
            predicted_urban_vegetation_change_percent: -2.0,
            predicted_traffic_density_change_percent: 18.0,
            predicted_medium_vehicle_change_percent: 20.0,
            predicted_total_population_change: 500,
            ..base
        },
        "hospital" => NumericPrediction {
            predicted_aqi_change: 2.1,
            predicted_heat_index_change: 0.8,
            predicted_urban_vegetation_change_percent: -3.0,
            predicted_traffic_density_change_percent: 15.0,
            predicted_medium_vehicle_change_percent: 15.0,
            predicted_heavy_vehicle_change_percent: 5.0,
            ..base
        },
        "park" => NumericPrediction {
            predicted_aqi_change: -12.0,
            predicted_heat_index_change: -2.5,
            predicted_urban_vegetation_change_percent: 25.0,
            predicted_traffic_density_change_percent: -8.0,
            predicted_total_population_change: 50,
            ..base
        },
        _ => base,
    }
}
