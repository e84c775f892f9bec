use rand::Rng;
use tracing::debug;

use super::Appliance;
use crate::config::RoomConfig;
use crate::error::Result;
use crate::sim::sampler;

/// A room and the appliances it exclusively owns.
///
/// Appliances are sorted once, at construction, by descending rank (ties keep
/// their configuration order). Every later operation and every output column
/// relies on that order.
#[derive(Debug, Clone)]
pub struct Room {
    name: String,
    appliances: Vec<Appliance>,
    /// Chance (0.0–1.0) that leaving goes through the weighted shutoff sampler.
    pub probability: f64,
    occupied: bool,
}

impl Room {
    /// Creates an unoccupied room, sorting `appliances` by descending rank.
    ///
    /// # Arguments
    ///
    /// * `name` - Room name, unique within the building
    /// * `appliances` - Owned appliances; ties in rank keep this order
    /// * `probability` - Chance that leaving goes through the weighted sampler
    pub fn new(name: impl Into<String>, mut appliances: Vec<Appliance>, probability: f64) -> Self {
        appliances.sort_by(|a, b| b.rank.cmp(&a.rank));
        Self {
            name: name.into(),
            appliances,
            probability,
            occupied: false,
        }
    }

    /// Builds a room from its configuration entry.
    pub fn from_config(name: &str, cfg: &RoomConfig) -> Self {
        let appliances = cfg
            .appliances
            .iter()
            .map(|(appliance_name, a)| Appliance::from_config(appliance_name, a))
            .collect();
        Self::new(name, appliances, cfg.probability)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn appliances(&self) -> &[Appliance] {
        &self.appliances
    }

    /// First appliance with the given name, in the room's fixed order.
    pub fn appliance_mut(&mut self, name: &str) -> Option<&mut Appliance> {
        self.appliances.iter_mut().find(|a| a.name == name)
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    /// Marks the room occupied and switches on every appliance whose usage
    /// set contains the truncated timestamp. Other appliances keep their state.
    pub fn occupy(&mut self, timestamp: f64) {
        self.occupied = true;
        let slot = timestamp.trunc();
        for appliance in self.appliances.iter_mut().filter(|a| a.is_used_at(slot)) {
            appliance.activate();
        }
    }

    /// Vacates the room.
    ///
    /// Draws `v` uniformly from `[0, 1)`. When `v <= probability` the weighted
    /// shutoff sampler decides which running appliances stay on; otherwise
    /// everything is switched off. The room always ends unoccupied.
    ///
    /// # Errors
    ///
    /// Propagates `SimError::SamplingExhausted` or `SimError::RankOverflow`
    /// from the sampler.
    pub fn leave<R: Rng>(&mut self, timestamp: f64, rng: &mut R) -> Result<()> {
        let v: f64 = rng.random();
        if v <= self.probability {
            let turned_off = sampler::shut_off_weighted(&self.name, &mut self.appliances, rng)?;
            debug!(
                room = %self.name,
                timestamp,
                draw = v,
                turned_off = turned_off.len(),
                "occupants left some appliances running"
            );
        } else {
            for appliance in &mut self.appliances {
                appliance.deactivate();
            }
        }
        self.occupied = false;
        Ok(())
    }

    /// Current draw of every appliance, in the room's fixed order.
    pub fn power_values(&self) -> Vec<f64> {
        self.appliances.iter().map(Appliance::power).collect()
    }
}
