//! Output types: per-slot room snapshots and rejected log lines.

use std::fmt;

use serde::Serialize;

use crate::building::Room;

/// Snapshot of one room at one timestamp.
///
/// `values` holds one power value per appliance in the room's fixed order:
/// the appliance's `value` while on, otherwise `0.0`.
///
/// # Examples
///
/// ```
/// use occupancy_sim::building::{Appliance, Room};
/// use occupancy_sim::sim::types::SlotRecord;
///
/// let mut room = Room::new("Kitchen", vec![Appliance::new("Oven", 3, 10.0, vec![8.0])], 0.0);
/// room.occupy(8.0);
///
/// let record = SlotRecord::capture(&room, 8.0);
/// assert_eq!(record.to_row(), vec![8.0, 10.0, 1.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotRecord {
    pub room: String,
    /// Slot value, or the literal log timestamp for a triggered room.
    pub timestamp: f64,
    pub values: Vec<f64>,
    pub occupied: bool,
}

impl SlotRecord {
    /// Captures the current state of `room`.
    pub fn capture(room: &Room, timestamp: f64) -> Self {
        Self {
            room: room.name().to_string(),
            timestamp,
            values: room.power_values(),
            occupied: room.is_occupied(),
        }
    }

    /// Sum of the appliance power values.
    pub fn total_power(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Flat form `[timestamp, v1, …, vn, occupied]` with `occupied` as `0.0`/`1.0`.
    pub fn to_row(&self) -> Vec<f64> {
        let mut row = Vec::with_capacity(self.values.len() + 2);
        row.push(self.timestamp);
        row.extend_from_slice(&self.values);
        row.push(if self.occupied { 1.0 } else { 0.0 });
        row
    }
}

impl fmt::Display for SlotRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.values.iter().map(|v| format!("{v:.2}")).collect();
        write!(
            f,
            "t={:>5.1} | {:<12} | [{}] occupied={}",
            self.timestamp,
            self.room,
            values.join(", "),
            self.occupied,
        )
    }
}

/// Why a log line produced no record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum RejectReason {
    /// `Activate` named an appliance the room does not own.
    UnknownAppliance(String),
    /// The action keyword was not recognised.
    InvalidOperation(String),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownAppliance(name) => write!(f, "undeclared appliance \"{name}\""),
            Self::InvalidOperation(token) => write!(f, "invalid operation \"{token}\""),
        }
    }
}

/// Placeholder for a log line that could not be applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    pub room: String,
    pub timestamp: f64,
    /// 1-based line number in the event log.
    pub line: usize,
    pub reason: RejectReason,
}

/// One entry of the output sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Recorded(SlotRecord),
    Rejected(Rejection),
}

impl Outcome {
    pub fn record(&self) -> Option<&SlotRecord> {
        match self {
            Self::Recorded(record) => Some(record),
            Self::Rejected(_) => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recorded(record) => fmt::Display::fmt(record, f),
            Self::Rejected(r) => write!(
                f,
                "t={:>5.1} | {:<12} | rejected line {}: {}",
                r.timestamp, r.room, r.line, r.reason
            ),
        }
    }
}
