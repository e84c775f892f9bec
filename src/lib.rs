//! Building occupancy and appliance power-draw simulator.

#[cfg(feature = "api")]
pub mod api;
pub mod building;
pub mod config;
pub mod error;
pub mod io;
/// Slot axis, event interpretation, sampling and reporting.
pub mod sim;
