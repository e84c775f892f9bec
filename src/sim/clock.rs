/// Index of the first slot, in half-hours since midnight (03:30).
pub const FIRST_HALF_HOUR: usize = 7;
/// Index of the last slot, in half-hours since midnight (23:30).
pub const LAST_HALF_HOUR: usize = 47;
/// Length of one slot in hours.
pub const SLOT_HOURS: f64 = 0.5;

/// A simulation clock that walks the fixed half-hour slot axis.
///
/// Each tick yields the slot value in hours (`3.5, 4.0, …, 23.5`).
///
/// # Examples
///
/// ```
/// use occupancy_sim::sim::clock::Clock;
///
/// let mut clock = Clock::new(7, 9);
/// let mut slots = Vec::new();
///
/// clock.run(|slot| slots.push(slot));
/// assert_eq!(slots, vec![3.5, 4.0, 4.5]);
/// ```
pub struct Clock {
    /// Next half-hour index to yield
    current: usize,
    /// Last half-hour index (inclusive)
    last: usize,
}

impl Clock {
    /// Creates a clock over the half-hour indices `first..=last`.
    pub fn new(first: usize, last: usize) -> Self {
        Self {
            current: first,
            last,
        }
    }

    /// The standard day: 41 slots from 3.5 h to 23.5 h.
    pub fn day() -> Self {
        Self::new(FIRST_HALF_HOUR, LAST_HALF_HOUR)
    }

    /// Advances the clock by one slot.
    ///
    /// # Returns
    ///
    /// * `Some(slot)` - The slot value in hours before advancing
    /// * `None` - If every slot has been yielded
    pub fn tick(&mut self) -> Option<f64> {
        if self.current <= self.last {
            let slot = self.current as f64 * SLOT_HOURS;
            self.current += 1;
            Some(slot)
        } else {
            None
        }
    }

    /// Runs a function for each remaining slot.
    pub fn run(&mut self, mut f: impl FnMut(f64)) {
        while let Some(slot) = self.tick() {
            f(slot);
        }
    }

    /// Number of slots not yet yielded.
    pub fn remaining(&self) -> usize {
        (self.last + 1).saturating_sub(self.current)
    }
}
