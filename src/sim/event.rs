//! Event-log parsing.
//!
//! Each non-blank line is `<timestamp> <room> <action...>`, where the action is
//! one of:
//!
//! ```text
//! Occupy [<chained action>]
//! Activate <appliance>
//! Leave
//! ```

use std::fmt;

use crate::error::{Result, SimError};

/// State transition requested by a log line.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Occupy,
    Activate(String),
    Leave,
    /// Unrecognised action keyword, kept for reporting.
    Invalid(String),
}

impl Action {
    /// Parses the action keyword at `tokens[0]`, taking an appliance name
    /// from `tokens[1]` for `Activate`.
    fn parse(tokens: &[&str], line: usize) -> Result<Self> {
        match tokens {
            ["Occupy", ..] => Ok(Self::Occupy),
            ["Leave", ..] => Ok(Self::Leave),
            ["Activate", name, ..] => Ok(Self::Activate((*name).to_string())),
            ["Activate"] => Err(SimError::malformed(line, "`Activate` needs an appliance name")),
            [other, ..] => Ok(Self::Invalid((*other).to_string())),
            [] => Err(SimError::malformed(line, "missing action")),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Occupy => f.write_str("Occupy"),
            Self::Activate(name) => write!(f, "Activate {name}"),
            Self::Leave => f.write_str("Leave"),
            Self::Invalid(token) => f.write_str(token),
        }
    }
}

/// One parsed log line.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    /// 1-based line number in the source text.
    pub line: usize,
    /// Literal timestamp from the line, in hours.
    pub timestamp: f64,
    pub room: String,
    pub action: Action,
    /// Action that follows `Occupy` on the same line.
    pub chained: Option<Action>,
}

impl LogEvent {
    /// Parses a single whitespace-delimited log line.
    ///
    /// # Errors
    ///
    /// Returns `SimError::MalformedEvent` when the timestamp is not a number,
    /// the room or action is missing, or `Activate` has no appliance name.
    pub fn parse(line: usize, text: &str) -> Result<Self> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let (timestamp, room, rest) = match tokens.as_slice() {
            [timestamp, room, rest @ ..] if !rest.is_empty() => (*timestamp, *room, rest),
            _ => {
                return Err(SimError::malformed(
                    line,
                    "expected `<timestamp> <room> <action>`",
                ));
            }
        };

        let timestamp: f64 = timestamp
            .parse()
            .map_err(|_| SimError::malformed(line, format!("invalid timestamp \"{timestamp}\"")))?;

        let action = Action::parse(rest, line)?;
        let chained = match action {
            Action::Occupy if rest.len() > 1 => Some(Action::parse(&rest[1..], line)?),
            _ => None,
        };

        Ok(Self {
            line,
            timestamp,
            room: room.to_string(),
            action,
            chained,
        })
    }

    /// Returns `true` if this event belongs to `slot`.
    ///
    /// The timestamp is truncated to an integer before comparing, so half-hour
    /// slots never match and a line stamped `8.5` lands in slot `8.0`.
    pub fn matches_slot(&self, slot: f64) -> bool {
        self.timestamp.trunc() == slot
    }
}

/// Parsed event log, in source order.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<LogEvent>,
}

impl EventLog {
    /// Parses newline-separated log text, skipping blank lines.
    ///
    /// # Errors
    ///
    /// Returns the first `SimError::MalformedEvent` encountered.
    pub fn parse(text: &str) -> Result<Self> {
        let events = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| LogEvent::parse(idx + 1, line))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { events })
    }

    pub fn events(&self) -> &[LogEvent] {
        &self.events
    }

    /// Events that belong to `slot`, in log order.
    pub fn events_in_slot(&self, slot: f64) -> impl Iterator<Item = &LogEvent> {
        self.events.iter().filter(move |e| e.matches_slot(slot))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_action_form() {
        let e = LogEvent::parse(1, "8 Kitchen Occupy").expect("should parse");
        assert_eq!(e.timestamp, 8.0);
        assert_eq!(e.room, "Kitchen");
        assert_eq!(e.action, Action::Occupy);
        assert_eq!(e.chained, None);

        let e = LogEvent::parse(2, "9.5 Kitchen Activate Oven").expect("should parse");
        assert_eq!(e.action, Action::Activate("Oven".to_string()));

        let e = LogEvent::parse(3, "10 Kitchen Leave").expect("should parse");
        assert_eq!(e.action, Action::Leave);

        let e = LogEvent::parse(4, "10 Kitchen Dance").expect("should parse");
        assert_eq!(e.action, Action::Invalid("Dance".to_string()));
    }

    #[test]
    fn occupy_chains_following_action() {
        let e = LogEvent::parse(1, "7 Kitchen Occupy Activate Light").expect("should parse");
        assert_eq!(e.action, Action::Occupy);
        assert_eq!(e.chained, Some(Action::Activate("Light".to_string())));

        let e = LogEvent::parse(2, "7 Kitchen Occupy Leave").expect("should parse");
        assert_eq!(e.chained, Some(Action::Leave));

        let e = LogEvent::parse(3, "7 Kitchen Occupy Sing").expect("should parse");
        assert_eq!(e.chained, Some(Action::Invalid("Sing".to_string())));
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert!(matches!(
            LogEvent::parse(5, "soon Kitchen Occupy"),
            Err(SimError::MalformedEvent { line: 5, .. })
        ));
        assert!(LogEvent::parse(1, "8 Kitchen").is_err());
        assert!(LogEvent::parse(1, "8 Kitchen Activate").is_err());
        assert!(LogEvent::parse(1, "8 Kitchen Occupy Activate").is_err());
    }

    #[test]
    fn slot_match_truncates_timestamp() {
        let e = LogEvent::parse(1, "8.5 Kitchen Leave").expect("should parse");
        assert!(e.matches_slot(8.0));
        assert!(!e.matches_slot(8.5));

        let e = LogEvent::parse(1, "8 Kitchen Leave").expect("should parse");
        assert!(e.matches_slot(8.0));
        assert!(!e.matches_slot(8.5));
    }

    #[test]
    fn log_skips_blank_lines_and_keeps_line_numbers() {
        let log = EventLog::parse("8 Kitchen Occupy\n\n8.5 Kitchen Leave\n").expect("should parse");
        assert_eq!(log.len(), 2);
        assert_eq!(log.events()[1].line, 3);

        let in_slot: Vec<usize> = log.events_in_slot(8.0).map(|e| e.line).collect();
        assert_eq!(in_slot, vec![1, 3]);
        assert_eq!(log.events_in_slot(8.5).count(), 0);
    }
}
