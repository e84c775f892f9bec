//! Post-hoc usage report computed from a finished run.

use std::fmt;

use serde::Serialize;

use super::clock::SLOT_HOURS;
use super::types::Outcome;
use crate::building::Building;

/// Per-room usage derived from the recorded snapshots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomUsage {
    pub room: String,
    /// Number of records emitted for this room.
    pub records: usize,
    /// Records in which the room was occupied.
    pub occupied_records: usize,
    /// Records in which at least one appliance was drawing power while the
    /// room was empty.
    pub unattended_records: usize,
    /// Mean total appliance power across records.
    pub mean_power: f64,
    /// Highest total appliance power in any record.
    pub peak_power: f64,
    /// Power summed over records, each weighted by the slot length.
    pub energy: f64,
}

/// Aggregate report over the whole outcome sequence.
///
/// Computed after the run so that reported figures always agree with the
/// emitted records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageReport {
    /// One entry per room, in configuration order.
    pub rooms: Vec<RoomUsage>,
    /// Log lines that produced a rejection instead of a record.
    pub rejected_lines: usize,
}

impl UsageReport {
    /// Builds the report for every room of `building`.
    pub fn from_outcomes(outcomes: &[Outcome], building: &Building) -> Self {
        let rooms = building
            .rooms()
            .iter()
            .map(|room| {
                let mut usage = RoomUsage {
                    room: room.name().to_string(),
                    records: 0,
                    occupied_records: 0,
                    unattended_records: 0,
                    mean_power: 0.0,
                    peak_power: 0.0,
                    energy: 0.0,
                };
                let mut power_sum = 0.0;

                for record in outcomes
                    .iter()
                    .filter_map(Outcome::record)
                    .filter(|r| r.room == room.name())
                {
                    let power = record.total_power();
                    usage.records += 1;
                    if record.occupied {
                        usage.occupied_records += 1;
                    } else if power > 0.0 {
                        usage.unattended_records += 1;
                    }
                    power_sum += power;
                    usage.peak_power = usage.peak_power.max(power);
                }

                usage.energy = power_sum * SLOT_HOURS;
                if usage.records > 0 {
                    usage.mean_power = power_sum / usage.records as f64;
                }
                usage
            })
            .collect();

        Self {
            rooms,
            rejected_lines: outcomes.iter().filter(|o| o.is_rejected()).count(),
        }
    }
}

impl fmt::Display for UsageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Usage Report ===")?;
        for r in &self.rooms {
            writeln!(
                f,
                "{:<12} records={:>3}  occupied={:>3}  unattended={:>3}  mean={:.2}  peak={:.2}  energy={:.2}",
                r.room,
                r.records,
                r.occupied_records,
                r.unattended_records,
                r.mean_power,
                r.peak_power,
                r.energy,
            )?;
        }
        write!(f, "Rejected lines: {}", self.rejected_lines)
    }
}
