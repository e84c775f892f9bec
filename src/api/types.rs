//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::building::Room;
use crate::sim::report::UsageReport;

/// A room and its appliance names, in output column order.
#[derive(Debug, Clone, Serialize)]
pub struct RoomLayout {
    pub name: String,
    pub appliances: Vec<String>,
}

impl From<&Room> for RoomLayout {
    fn from(room: &Room) -> Self {
        Self {
            name: room.name().to_string(),
            appliances: room.appliances().iter().map(|a| a.name.clone()).collect(),
        }
    }
}

/// Response for `GET /state`.
#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub seed: u64,
    pub rooms: Vec<RoomLayout>,
    pub report: UsageReport,
}

/// Optional filters for the records endpoint.
#[derive(Debug, Deserialize)]
pub struct RecordsQuery {
    /// Only records for this room.
    pub room: Option<String>,
    /// Earliest timestamp (inclusive).
    pub from: Option<f64>,
    /// Latest timestamp (inclusive).
    pub to: Option<f64>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
