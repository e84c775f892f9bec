//! Domain model: appliances, rooms and the building that owns them.

/// Switchable appliance with rank, power value and usage set.
pub mod appliance;
/// Room state and the occupy/leave transitions.
pub mod room;

pub use appliance::Appliance;
pub use room::Room;

use crate::config::BuildingConfig;

/// Simulation context holding every room.
///
/// Rooms keep their configuration order, which is also the order in which
/// untriggered rooms are reported each slot.
#[derive(Debug, Clone, Default)]
pub struct Building {
    rooms: Vec<Room>,
}

impl Building {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    /// Builds every room described by `config`, in document order.
    pub fn from_config(config: &BuildingConfig) -> Self {
        let rooms = config
            .rooms
            .iter()
            .map(|(name, room)| Room::from_config(name, room))
            .collect();
        Self { rooms }
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Index of the first room called `name`.
    pub fn room_index(&self, name: &str) -> Option<usize> {
        self.rooms.iter().position(|r| r.name() == name)
    }

    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.name() == name)
    }

    /// First room called `name`, with its index.
    pub(crate) fn room_by_name_mut(&mut self, name: &str) -> Option<(usize, &mut Room)> {
        self.rooms
            .iter_mut()
            .enumerate()
            .find(|(_, r)| r.name() == name)
    }
}
