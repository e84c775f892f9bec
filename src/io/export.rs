//! CSV export for simulation outcomes.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::building::Building;
use crate::sim::types::Outcome;

/// Column header for the long-format CSV export.
const HEADER: &str = "timestamp,room,appliance,power,occupied";

/// Exports recorded outcomes to a CSV file at the given path.
///
/// Writes one row per appliance per record, in each room's fixed appliance
/// order. A room with no appliances still gets one row with an empty
/// appliance name and zero power. Rejected lines produce no rows.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(outcomes: &[Outcome], building: &Building, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(outcomes, building, buf)
}

/// Writes recorded outcomes as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(outcomes: &[Outcome], building: &Building, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for record in outcomes.iter().filter_map(Outcome::record) {
        let timestamp = format!("{:.1}", record.timestamp);
        let occupied = record.occupied.to_string();
        let names: Vec<&str> = building
            .room(&record.room)
            .map(|room| room.appliances().iter().map(|a| a.name.as_str()).collect())
            .unwrap_or_default();

        if record.values.is_empty() {
            wtr.write_record([
                timestamp.as_str(),
                record.room.as_str(),
                "",
                "0.0000",
                occupied.as_str(),
            ])?;
            continue;
        }

        for (i, value) in record.values.iter().enumerate() {
            let name = names.get(i).copied().unwrap_or_default();
            let power = format!("{value:.4}");
            wtr.write_record([
                timestamp.as_str(),
                record.room.as_str(),
                name,
                power.as_str(),
                occupied.as_str(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
