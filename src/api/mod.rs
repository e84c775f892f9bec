//! REST API over a finished simulation run.
//!
//! Provides two GET endpoints:
//! - `/state`: seed, room layout and usage report
//! - `/records`: recorded snapshots with optional room and time filtering

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::building::Building;
use crate::sim::report::UsageReport;
use crate::sim::types::Outcome;

pub use types::RoomLayout;

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the simulation run completes and wrapped in
/// `Arc`; no locks are needed since all data is read-only.
pub struct AppState {
    /// Seed the run was started with.
    pub seed: u64,
    /// Room names with their fixed appliance order.
    pub rooms: Vec<RoomLayout>,
    /// Aggregate usage report.
    pub report: UsageReport,
    /// Full outcome sequence of the run.
    pub outcomes: Vec<Outcome>,
}

impl AppState {
    /// Captures everything the API serves from a finished run.
    pub fn new(seed: u64, building: &Building, outcomes: Vec<Outcome>) -> Self {
        Self {
            seed,
            rooms: building.rooms().iter().map(RoomLayout::from).collect(),
            report: UsageReport::from_outcomes(&outcomes, building),
            outcomes,
        }
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/state", get(handlers::get_state))
        .route("/records", get(handlers::get_records))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
