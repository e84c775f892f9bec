//! Schedule processor that walks the slot axis and applies the event log.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use super::clock::Clock;
use super::event::EventLog;
use super::interpreter::interpret;
use super::types::{Outcome, SlotRecord};
use crate::building::Building;
use crate::error::{Result, SimError};

/// Simulation engine owning the building state and the random source.
///
/// Generic over `R: Rng` so tests can inject any generator; use
/// [`Simulator::seeded`] for the standard reproducible setup.
pub struct Simulator<R: Rng> {
    building: Building,
    rng: R,
}

impl Simulator<StdRng> {
    /// Creates a simulator whose random source is `StdRng` seeded with `seed`.
    pub fn seeded(building: Building, seed: u64) -> Self {
        Self::new(building, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulator<R> {
    /// Creates a simulator over `building` drawing from `rng`.
    ///
    /// # Arguments
    ///
    /// * `building` - Rooms in configuration order, all unoccupied
    /// * `rng` - Random source for every leave draw and sampler draw
    pub fn new(building: Building, rng: R) -> Self {
        Self { building, rng }
    }

    /// Processes one slot and returns its outcomes.
    ///
    /// Every log line whose truncated timestamp equals `slot` is interpreted
    /// in log order and its outcome appended; each such room counts as
    /// triggered. Every untriggered room then contributes its unchanged state
    /// at `slot`, in configuration order.
    ///
    /// # Arguments
    ///
    /// * `slot` - Slot value in hours, e.g. `8.0` or `8.5`
    /// * `log` - The parsed event log
    ///
    /// # Returns
    ///
    /// * `Ok(outcomes)` - Triggered rooms' outcomes in log order, then one
    ///   record per untriggered room
    /// * `Err(_)` - The slot hit a fatal condition
    ///
    /// # Errors
    ///
    /// Returns `SimError::UnknownRoom` if a line names a room the building
    /// does not have, or propagates a sampler failure.
    pub fn step(&mut self, slot: f64, log: &EventLog) -> Result<Vec<Outcome>> {
        let mut triggered = vec![false; self.building.rooms().len()];
        let mut outcomes = Vec::with_capacity(triggered.len());

        for event in log.events_in_slot(slot) {
            let (index, room) =
                self.building
                    .room_by_name_mut(&event.room)
                    .ok_or_else(|| SimError::UnknownRoom {
                        room: event.room.clone(),
                        line: event.line,
                    })?;
            outcomes.push(interpret(event, room, &mut self.rng)?);
            triggered[index] = true;
        }

        for (room, _) in self
            .building
            .rooms()
            .iter()
            .zip(&triggered)
            .filter(|(_, hit)| !**hit)
        {
            outcomes.push(Outcome::Recorded(SlotRecord::capture(room, slot)));
        }

        Ok(outcomes)
    }

    /// Runs every slot of the day and returns the full outcome sequence.
    ///
    /// # Errors
    ///
    /// Stops at the first fatal condition; no partial output is returned.
    pub fn run(&mut self, log: &EventLog) -> Result<Vec<Outcome>> {
        let mut clock = Clock::day();
        let mut outcomes = Vec::with_capacity(clock.remaining() * self.building.rooms().len());
        while let Some(slot) = clock.tick() {
            outcomes.extend(self.step(slot, log)?);
        }

        let rejected = outcomes.iter().filter(|o| o.is_rejected()).count();
        info!(
            rooms = self.building.rooms().len(),
            events = log.len(),
            outcomes = outcomes.len(),
            rejected,
            "simulation finished"
        );
        Ok(outcomes)
    }

    /// Returns a reference to the simulated building.
    pub fn building(&self) -> &Building {
        &self.building
    }
}
