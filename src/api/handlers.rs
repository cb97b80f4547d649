//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

use super::AppState;
use super::types::{ApplianceRecord, ErrorResponse, ProductRecord};
use crate::engine::{Prescription, PrescriptionEngine};
use crate::io::request::PrescriptionInput;

fn bad_request(error: String) -> (StatusCode, Json<ErrorResponse>) {
    tracing::warn!(%error, "rejected prescription request");
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}

/// Runs one prescription.
///
/// `POST /prescribe` with a [`PrescriptionInput`] body → 200 + prescription JSON
/// Malformed or invalid input → 400 + `ErrorResponse`
pub async fn prescribe(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PrescriptionInput>, JsonRejection>,
) -> Result<Json<Prescription>, (StatusCode, Json<ErrorResponse>)> {
    let Json(input) = body.map_err(|e| bad_request(e.body_text()))?;
    let resolved = input
        .resolve(&state.defaults)
        .map_err(|e| bad_request(e.to_string()))?;

    let engine = PrescriptionEngine::new(&state.catalog);
    let prescription = engine.prescribe_resolving(
        &resolved.request,
        &resolved.production,
        resolved.modeled_kit_watts,
    );
    Ok(Json(prescription))
}

/// `GET /appliances` → 200 + `Vec<ApplianceRecord>` JSON, in table order
pub async fn list_appliances(State(state): State<Arc<AppState>>) -> Json<Vec<ApplianceRecord>> {
    Json(state.catalog.appliances.iter().map(ApplianceRecord::from).collect())
}

/// `GET /products` → 200 + `Vec<ProductRecord>` JSON, ascending by kit size
pub async fn list_products(State(state): State<Arc<AppState>>) -> Json<Vec<ProductRecord>> {
    Json(
        state
            .catalog
            .products
            .iter()
            .map(|(watts, spec)| ProductRecord::new(watts, spec))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::catalog::Catalog;
    use crate::config::DefaultsConfig;

    fn make_test_state() -> Arc<AppState> {
        Arc::new(AppState {
            catalog: Catalog::default(),
            defaults: DefaultsConfig::default(),
        })
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    const NAIROBI: &str = r#"{
        "location": {"name": "Nairobi, Kenya", "latitude": -1.2921, "longitude": 36.8219},
        "kit_watts": 300,
        "appliances": [
            {"id": "led_bulb", "quantity": 3},
            {"id": "phone_charger", "quantity": 2},
            {"id": "small_tv", "quantity": 1}
        ],
        "production": {
            "annual_kwh": 438.0,
            "monthly_kwh": [35.8, 36.4, 38.9, 36.1, 33.2, 31.8, 30.6, 32.1, 34.3, 36.7, 35.9, 36.2]
        }
    }"#;

    #[tokio::test]
    async fn prescribe_returns_200() {
        let app = router(make_test_state());
        let resp = app.oneshot(post_json("/prescribe", NAIROBI)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["verdict"]["verdict"], "excellent");
        assert_eq!(json["energy_need"]["daily_wh"], 390.0);
    }

    #[tokio::test]
    async fn prescribe_rejects_short_series() {
        let app = router(make_test_state());
        let body = NAIROBI.replace("35.8, ", "");
        let resp = app.oneshot(post_json("/prescribe", &body)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"].as_str().is_some_and(|e| e.contains("12")));
    }

    #[tokio::test]
    async fn prescribe_rejects_malformed_json() {
        let app = router(make_test_state());
        let resp = app.oneshot(post_json("/prescribe", "{")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn appliances_lists_builtin_table() {
        let app = router(make_test_state());
        let req = Request::builder()
            .uri("/appliances")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.len(), 13);
        assert_eq!(json[0]["id"], "led_bulb");
    }
}
