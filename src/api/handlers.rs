//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, RecordsQuery, StateResponse};
use crate::sim::types::{Outcome, SlotRecord};

/// Returns the seed, room layout and usage report.
///
/// `GET /state` → 200 + `StateResponse` JSON
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    Json(StateResponse {
        seed: state.seed,
        rooms: state.rooms.clone(),
        report: state.report.clone(),
    })
}

/// Returns recorded snapshots, optionally filtered by room and timestamp.
///
/// `GET /records` → 200 + `Vec<SlotRecord>` JSON
/// `GET /records?room=Kitchen&from=8&to=12` → filtered (inclusive)
/// `GET /records?from=12&to=8` → 400 + `ErrorResponse`
pub async fn get_records(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecordsQuery>,
) -> impl IntoResponse {
    let from = query.from.unwrap_or(f64::NEG_INFINITY);
    let to = query.to.unwrap_or(f64::INFINITY);

    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from` ({from}) must be <= `to` ({to})"),
            }),
        ));
    }

    let records: Vec<SlotRecord> = state
        .outcomes
        .iter()
        .filter_map(Outcome::record)
        .filter(|r| query.room.as_deref().is_none_or(|room| r.room == room))
        .filter(|r| r.timestamp >= from && r.timestamp <= to)
        .cloned()
        .collect();

    Ok(Json(records))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::building::Building;
    use crate::config::BuildingConfig;
    use crate::sim::engine::Simulator;
    use crate::sim::event::EventLog;

    fn make_test_state() -> Arc<AppState> {
        let building = Building::from_config(&BuildingConfig::demo());
        let log = EventLog::parse("8 Kitchen Occupy\n9 Kitchen Activate Toaster\n")
            .expect("log should parse");
        let mut sim = Simulator::seeded(building, 42);
        let outcomes = sim.run(&log).expect("run should succeed");
        Arc::new(AppState::new(42, sim.building(), outcomes))
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = router(make_test_state());
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn state_returns_200() {
        let (status, json) = get_json("/state").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["seed"], 42);
        assert_eq!(json["rooms"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["report"]["rejected_lines"], 1);
    }

    #[tokio::test]
    async fn records_returns_every_record() {
        let (status, json) = get_json("/records").await;
        assert_eq!(status, StatusCode::OK);
        // 41 slots x 3 rooms, minus the rejected line's slot entry for Kitchen
        // being replaced by the rejection itself.
        assert_eq!(json.as_array().map(Vec::len), Some(41 * 3 - 1));
    }

    #[tokio::test]
    async fn records_filter_by_room_and_range() {
        let (status, json) = get_json("/records?room=Kitchen&from=8&to=9").await;
        assert_eq!(status, StatusCode::OK);
        let rows = json.as_array().cloned().unwrap_or_default();
        // slot 8.0 (triggered), 8.5 (carried); slot 9.0 was rejected
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r["room"] == "Kitchen"));
        assert_eq!(rows[0]["occupied"], true);
    }

    #[tokio::test]
    async fn records_invalid_range_returns_400() {
        let (status, json) = get_json("/records?from=12&to=8").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json.get("error").is_some());
    }
}
