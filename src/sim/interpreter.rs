//! Applies one parsed log line to its room.

use rand::Rng;
use tracing::{debug, warn};

use super::event::{Action, LogEvent};
use super::types::{Outcome, RejectReason, Rejection, SlotRecord};
use crate::building::Room;
use crate::error::Result;

/// Interprets `event` against `room`, which the caller has already resolved
/// by name.
///
/// The main action runs first, then the action chained after `Occupy`, if
/// any. A successful line yields the room's record at the event's literal
/// timestamp. An unknown appliance or action keyword yields a rejection;
/// whatever the line changed before that point stays changed.
///
/// # Errors
///
/// Propagates sampler failures from a `Leave`.
pub fn interpret<R: Rng>(event: &LogEvent, room: &mut Room, rng: &mut R) -> Result<Outcome> {
    debug!(
        line = event.line,
        timestamp = event.timestamp,
        room = %event.room,
        action = %event.action,
        "interpreting event"
    );

    for action in std::iter::once(&event.action).chain(event.chained.as_ref()) {
        if let Some(reason) = apply(action, room, event.timestamp, rng)? {
            warn!(line = event.line, room = %event.room, %reason, "rejected event");
            return Ok(Outcome::Rejected(Rejection {
                room: event.room.clone(),
                timestamp: event.timestamp,
                line: event.line,
                reason,
            }));
        }
    }

    Ok(Outcome::Recorded(SlotRecord::capture(room, event.timestamp)))
}

/// Applies a single action, returning the rejection reason if it cannot be applied.
fn apply<R: Rng>(
    action: &Action,
    room: &mut Room,
    timestamp: f64,
    rng: &mut R,
) -> Result<Option<RejectReason>> {
    match action {
        Action::Occupy => room.occupy(timestamp),
        Action::Activate(name) => match room.appliance_mut(name) {
            Some(appliance) => appliance.activate(),
            None => return Ok(Some(RejectReason::UnknownAppliance(name.clone()))),
        },
        Action::Leave => room.leave(timestamp, rng)?,
        Action::Invalid(token) => return Ok(Some(RejectReason::InvalidOperation(token.clone()))),
    }
    Ok(None)
}
