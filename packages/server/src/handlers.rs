//! HTTP handler functions for the Urban Insight API.

use actix_web::{HttpResponse, web};
use urban_insight_server_models::{ApiError, ApiHealth, ApiStatus, SimulateRequest};
use urban_insight_simulation::recommend;
use urban_insight_ward::geometry::parse_geometry;

use crate::AppState;

const WARDS_UNAVAILABLE: &str = "GeoJSON data is not available or failed to load.";
const MAP_DATA_UNAVAILABLE: &str = "Map data is not available.";

fn service_unavailable(detail: &str) -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(ApiError::new(detail))
}

/// `GET /`
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(ApiStatus::ok())
}

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    let (status, wards_loaded) = state
        .wards
        .as_ref()
        .map_or(("degraded", 0), |wards| ("ok", wards.len()));

    HttpResponse::Ok().json(ApiHealth {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        wards_loaded,
        narrative_configured: state.narrator.is_configured(),
    })
}

/// `GET /api/wards`
///
/// Returns the ward dataset as the loaded `GeoJSON` `FeatureCollection`.
pub async fn wards(state: web::Data<AppState>) -> HttpResponse {
    state.wards.as_ref().map_or_else(
        || service_unavailable(WARDS_UNAVAILABLE),
        |wards| HttpResponse::Ok().json(wards.feature_collection()),
    )
}

/// `POST /api/simulate`
///
/// Runs the impact simulation for the wards the submitted geometry
/// touches. Narrative failures come back as a 200 with an `error` status.
pub async fn simulate(
    state: web::Data<AppState>,
    body: web::Json<SimulateRequest>,
) -> HttpResponse {
    let Some(wards) = state.wards.as_ref() else {
        return service_unavailable(MAP_DATA_UNAVAILABLE);
    };

    let SimulateRequest {
        infrastructure_type,
        geometry,
    } = body.into_inner();

    let shape = match parse_geometry(geometry) {
        Ok(shape) => shape,
        Err(e) => {
            log::warn!("Rejected simulation geometry: {e}");
            return HttpResponse::BadRequest()
                .json(ApiError::new(format!("Invalid geometry provided: {e}")));
        }
    };

    let affected = wards.intersecting(&shape);
    log::info!(
        "Found {} intersecting wards for {infrastructure_type}",
        affected.len()
    );

    let outcome =
        urban_insight_simulation::run_simulation(&affected, &infrastructure_type, &state.narrator)
            .await;

    HttpResponse::Ok().json(outcome)
}

/// `GET /api/suggest-placement/{infra_type}`
///
/// Suggests the best ward for the infrastructure type. Unsupported types
/// and ranking failures answer 404 with the reason.
pub async fn suggest_placement(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let Some(wards) = state.wards.as_ref() else {
        return service_unavailable(MAP_DATA_UNAVAILABLE);
    };

    match recommend::suggest_placement(wards.wards(), &path) {
        Ok(suggestion) => HttpResponse::Ok().json(suggestion),
        Err(e) => {
            let sentinel = e.sentinel();
            log::warn!("No placement suggestion ({}): {e}", sentinel.ward_name);
            HttpResponse::NotFound().json(ApiError::new(sentinel.reason))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use actix_web::{App, http::StatusCode, test};
    use urban_insight_ai::providers::LlmProvider;
    use urban_insight_ai::{AiError, NarrativeClient};
    use urban_insight_ward::WardCollection;

    use super::*;

    const FIXTURE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {
                    "wardcode": "W1",
                    "totaldata_Ward Name": "Harbour",
                    "totaldata_Total Ward Population": 40000,
                    "totaldata_Estimated Ward GDP (₹ Crore)": 120.5,
                    "totaldata_% Green Space": "12%"
                },
                "geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,1],[0,0]]]}
            },
            {
                "type": "Feature",
                "properties": {
                    "wardcode": "W2",
                    "totaldata_Ward Name": "Hillside",
                    "totaldata_Total Ward Population": "25000",
                    "totaldata_Estimated Ward GDP (₹ Crore)": 300,
                    "totaldata_% Green Space": "4%"
                },
                "geometry": {"type": "Polygon", "coordinates": [[[1,0],[2,0],[2,1],[1,1],[1,0]]]}
            }
        ]
    }"#;

    const REPORT: &str = r#"{
        "status": "success",
        "infrastructure_type": "ignored",
        "summary_narrative": "Greener streets.",
        "environmental_impact": {"predicted_aqi_change": -12.0, "narrative": "Cleaner air."}
    }"#;

    struct CountingProvider {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl LlmProvider for CountingProvider {
        async fn complete_json(&self, _prompt: &str) -> Result<String, AiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(REPORT.to_string())
        }
    }

    fn app_state(loaded: bool) -> (web::Data<AppState>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let narrator = NarrativeClient::new(Box::new(CountingProvider {
            calls: calls.clone(),
        }));
        let wards = loaded.then(|| WardCollection::from_geojson_str(FIXTURE).unwrap());
        (web::Data::new(AppState { wards, narrator }), calls)
    }

    fn simulate_request(geometry: &serde_json::Value) -> actix_web::test::TestRequest {
        test::TestRequest::post()
            .uri("/api/simulate")
            .set_json(serde_json::json!({
                "infrastructure_type": "park",
                "geometry": geometry
            }))
    }

    #[actix_web::test]
    async fn root_health_is_always_ok() {
        let (state, _) = app_state(false);
        let app = test::init_service(App::new().app_data(state).configure(crate::configure)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({ "status": "ok" }));
    }

    #[actix_web::test]
    async fn health_detail_reports_ward_count() {
        let (state, _) = app_state(true);
        let app = test::init_service(App::new().app_data(state).configure(crate::configure)).await;

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request())
                .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: ApiHealth = test::read_body_json(resp).await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.wards_loaded, 2);
        assert!(body.narrative_configured);
    }

    #[actix_web::test]
    async fn health_detail_is_degraded_without_data() {
        let (state, _) = app_state(false);
        let app = test::init_service(App::new().app_data(state).configure(crate::configure)).await;

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request())
                .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: ApiHealth = test::read_body_json(resp).await;
        assert_eq!(body.status, "degraded");
        assert_eq!(body.wards_loaded, 0);
        assert!(body.narrative_configured);
    }

    #[actix_web::test]
    async fn wards_are_served_as_feature_collection() {
        let (state, _) = app_state(true);
        let app = test::init_service(App::new().app_data(state).configure(crate::configure)).await;

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/api/wards").to_request())
                .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["type"], "FeatureCollection");
        assert_eq!(body["features"].as_array().map(Vec::len), Some(2));
        assert_eq!(
            body["features"][1]["properties"]["totaldata_Ward Name"],
            "Hillside"
        );
        assert_eq!(body["features"][0]["geometry"]["type"], "Polygon");
        assert!(
            body["features"][0]["properties"]
                .get("totaldata_Air Quality Index (AQI)")
                .is_none()
        );
    }

    #[actix_web::test]
    async fn data_endpoints_are_unavailable_without_data() {
        let (state, calls) = app_state(false);
        let app = test::init_service(App::new().app_data(state).configure(crate::configure)).await;

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/api/wards").to_request())
                .await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: ApiError = test::read_body_json(resp).await;
        assert_eq!(body.detail, WARDS_UNAVAILABLE);

        let square = serde_json::json!({
            "type": "Polygon",
            "coordinates": [[[0.2, 0.2], [0.4, 0.2], [0.4, 0.4], [0.2, 0.2]]]
        });
        let resp = test::call_service(&app, simulate_request(&square).to_request()).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: ApiError = test::read_body_json(resp).await;
        assert_eq!(body.detail, MAP_DATA_UNAVAILABLE);

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/suggest-placement/school")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn malformed_geometry_is_rejected_without_narrative_call() {
        let (state, calls) = app_state(true);
        let app = test::init_service(App::new().app_data(state).configure(crate::configure)).await;

        let resp = test::call_service(
            &app,
            simulate_request(&serde_json::json!({ "type": "Polygon", "coordinates": "oops" }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ApiError = test::read_body_json(resp).await;
        assert!(body.detail.starts_with("Invalid geometry provided: "));

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn malformed_body_is_a_bad_request() {
        let (state, calls) = app_state(true);
        let app = test::init_service(App::new().app_data(state).configure(crate::configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/simulate")
            .set_json(serde_json::json!({ "geometry": { "type": "Point", "coordinates": [0.5, 0.5] } }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ApiError = test::read_body_json(resp).await;
        assert!(body.detail.starts_with("Invalid request body"));

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn disjoint_geometry_has_no_impact() {
        let (state, calls) = app_state(true);
        let app = test::init_service(App::new().app_data(state).configure(crate::configure)).await;

        let far_away = serde_json::json!({ "type": "Point", "coordinates": [50.0, 50.0] });
        let resp = test::call_service(&app, simulate_request(&far_away).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "no_impact");
        assert_eq!(
            body["message"],
            "The new infrastructure is outside of any known ward."
        );

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn polygon_without_rings_has_no_impact() {
        let (state, calls) = app_state(true);
        let app = test::init_service(App::new().app_data(state).configure(crate::configure)).await;

        let empty = serde_json::json!({ "type": "Polygon", "coordinates": [] });
        let resp = test::call_service(&app, simulate_request(&empty).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "no_impact");

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn unclosed_ring_is_closed_and_simulated() {
        let (state, calls) = app_state(true);
        let app = test::init_service(App::new().app_data(state).configure(crate::configure)).await;

        let triangle = serde_json::json!({
            "type": "Polygon",
            "coordinates": [[[0.2, 0.2], [0.8, 0.2], [0.5, 0.8]]]
        });
        let resp = test::call_service(&app, simulate_request(&triangle).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "success");

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn intersecting_geometry_runs_simulation() {
        let (state, calls) = app_state(true);
        let app = test::init_service(App::new().app_data(state).configure(crate::configure)).await;

        let line = serde_json::json!({
            "type": "LineString",
            "coordinates": [[0.5, 0.5], [1.5, 0.5]]
        });
        let resp = test::call_service(&app, simulate_request(&line).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["infrastructure_type"], "Park");
        assert_eq!(body["summary_narrative"], "Greener streets.");

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn suggestion_picks_ward_by_proxy_metric() {
        let (state, _) = app_state(true);
        let app = test::init_service(App::new().app_data(state).configure(crate::configure)).await;

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/suggest-placement/park")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["ward_name"], "Hillside");
        assert!((body["longitude"].as_f64().unwrap() - 1.5).abs() < 1e-9);
        assert!((body["latitude"].as_f64().unwrap() - 0.5).abs() < 1e-9);
    }

    #[actix_web::test]
    async fn unsupported_suggestion_type_is_not_found() {
        let (state, _) = app_state(true);
        let app = test::init_service(App::new().app_data(state).configure(crate::configure)).await;

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/suggest-placement/airport")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: ApiError = test::read_body_json(resp).await;
        assert_eq!(
            body.detail,
            "AI suggestions are not available for this infrastructure type."
        );
    }
}
