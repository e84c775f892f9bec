use crate::config::ApplianceConfig;

/// A switchable load owned by exactly one room.
///
/// The on/off flag is private: it only changes through [`Appliance::activate`]
/// and [`Appliance::deactivate`].
///
/// # Examples
///
/// ```
/// use occupancy_sim::building::Appliance;
///
/// let mut oven = Appliance::new("Oven", 3, 10.0, vec![8.0]);
/// assert_eq!(oven.power(), 0.0);
/// oven.activate();
/// assert_eq!(oven.power(), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Appliance {
    /// Name, unique within the owning room.
    pub name: String,
    /// Priority; higher ranks sort first and resist the shutoff sampler.
    pub rank: i64,
    pub present: bool,
    /// Power draw while on.
    pub value: f64,
    /// Slot values at which occupying the room switches this appliance on.
    pub usage: Vec<f64>,
    /// Carried from configuration; not used by the simulation.
    pub duration: Option<f64>,
    on: bool,
}

impl Appliance {
    /// Creates an appliance that starts switched off.
    pub fn new(name: impl Into<String>, rank: i64, value: f64, usage: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            rank,
            present: true,
            value,
            usage,
            duration: None,
            on: false,
        }
    }

    /// Builds an appliance from its configuration entry.
    pub fn from_config(name: &str, cfg: &ApplianceConfig) -> Self {
        Self {
            name: name.to_string(),
            rank: cfg.rank,
            present: cfg.present,
            value: cfg.value,
            usage: cfg.usage.clone(),
            duration: cfg.duration,
            on: false,
        }
    }

    pub fn activate(&mut self) {
        self.on = true;
    }

    pub fn deactivate(&mut self) {
        self.on = false;
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Current draw: `value` while on, otherwise zero.
    pub fn power(&self) -> f64 {
        if self.on { self.value } else { 0.0 }
    }

    /// Returns `true` if `slot` appears in the usage set.
    pub fn is_used_at(&self, slot: f64) -> bool {
        self.usage.iter().any(|&u| u == slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_is_idempotent() {
        let mut a = Appliance::new("Lamp", 1, 0.5, vec![]);
        a.activate();
        a.activate();
        assert!(a.is_on());
        a.deactivate();
        a.deactivate();
        assert!(!a.is_on());
        assert_eq!(a.power(), 0.0);
    }

    #[test]
    fn usage_match_is_numeric() {
        let a = Appliance::new("Oven", 3, 10.0, vec![8.0, 18.0]);
        assert!(a.is_used_at(8.0));
        assert!(!a.is_used_at(8.5));
        assert!(!a.is_used_at(9.0));
    }

    #[test]
    fn from_config_copies_fields_and_starts_off() {
        let cfg = ApplianceConfig {
            rank: 4,
            present: false,
            value: 1.5,
            usage: vec![21.0],
            duration: Some(3.0),
        };
        let a = Appliance::from_config("Heater", &cfg);
        assert_eq!(a.name, "Heater");
        assert_eq!(a.rank, 4);
        assert!(!a.present);
        assert_eq!(a.duration, Some(3.0));
        assert!(!a.is_on());
    }
}
