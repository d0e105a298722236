//! Typed events of the club day, input and derived alike.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::time::ClockTime;

/// Validation errors for event payload types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The client name was empty.
    #[error("client name cannot be empty")]
    EmptyClientName,

    /// The client name contained whitespace or control characters.
    #[error("client name must be a single printable token, got {value:?}")]
    InvalidClientName { value: String },

    /// Table numbering starts at 1.
    #[error("table number must be positive")]
    ZeroTableId,
}

/// A validated client name.
///
/// Names are single whitespace-free tokens; the log format separates fields
/// with spaces, so anything else could not round-trip through a transcript.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientName(String);

impl ClientName {
    /// Creates a client name after validation.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyClientName);
        }
        if !name.chars().all(|c| c.is_ascii_graphic()) {
            return Err(ValidationError::InvalidClientName { value: name });
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ClientName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClientName> for String {
    fn from(name: ClientName) -> Self {
        name.0
    }
}

impl fmt::Display for ClientName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClientName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A 1-based table number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TableId(u32);

impl TableId {
    /// Creates a table id; zero is reserved as "no table" in the source
    /// format and is never a valid id.
    pub const fn new(raw: u32) -> Result<Self, ValidationError> {
        if raw == 0 {
            return Err(ValidationError::ZeroTableId);
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Zero-based index into a ledger vector of `table_count` entries.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl TryFrom<u32> for TableId {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TableId> for u32 {
    fn from(id: TableId) -> Self {
        id.0
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a client request was turned down.
///
/// Rejections are ordinary output events, not failures: processing records
/// them and carries on. Queue overflow is deliberately absent — it
/// synthesizes a [`EventKind::ForcedOut`] instead of an error line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    /// Arrival outside opening hours.
    NotOpenYet,
    /// Arrival of a client who is already inside.
    YouShallNotPass,
    /// A request from a client who never (successfully) arrived.
    ClientUnknown,
    /// The requested table is occupied.
    PlaceIsBusy,
    /// Queueing while a free table exists.
    #[serde(rename = "ICanWaitNoLonger!")]
    ICanWaitNoLonger,
}

impl Rejection {
    /// The transcript token for this rejection.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotOpenYet => "NotOpenYet",
            Self::YouShallNotPass => "YouShallNotPass",
            Self::ClientUnknown => "ClientUnknown",
            Self::PlaceIsBusy => "PlaceIsBusy",
            Self::ICanWaitNoLonger => "ICanWaitNoLonger!",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened, with the payload each kind carries.
///
/// The first four kinds come from the input log; the rest are synthesized
/// during processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// A client walked in.
    Arrived { client: ClientName },
    /// A client asked to sit at (or move to) a specific table.
    TookTable { client: ClientName, table: TableId },
    /// A client asked to join the wait queue.
    Waits { client: ClientName },
    /// A client left on their own.
    Left { client: ClientName },
    /// The club sent a client away (queue overflow or closing time).
    ForcedOut { client: ClientName },
    /// The queue head was seated at a table that just freed up.
    SeatedFromQueue { client: ClientName, table: TableId },
    /// A request was turned down.
    Rejected { reason: Rejection },
}

impl EventKind {
    /// The numeric kind code used by the log format.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Arrived { .. } => 1,
            Self::TookTable { .. } => 2,
            Self::Waits { .. } => 3,
            Self::Left { .. } => 4,
            Self::ForcedOut { .. } => 11,
            Self::SeatedFromQueue { .. } => 12,
            Self::Rejected { .. } => 13,
        }
    }
}

/// A moment in the day paired with what happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// When the event occurred.
    pub time: ClockTime,
    /// The kind and its payload.
    #[serde(flatten)]
    pub kind: EventKind,
}

impl Event {
    #[must_use]
    pub const fn new(time: ClockTime, kind: EventKind) -> Self {
        Self { time, kind }
    }
}

impl fmt::Display for Event {
    /// Renders the canonical transcript line: `HH:MM <code> <payload>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.time, self.kind.code())?;
        match &self.kind {
            EventKind::Arrived { client }
            | EventKind::Waits { client }
            | EventKind::Left { client }
            | EventKind::ForcedOut { client } => write!(f, "{client}"),
            EventKind::TookTable { client, table }
            | EventKind::SeatedFromQueue { client, table } => write!(f, "{client} {table}"),
            EventKind::Rejected { reason } => write!(f, "{reason}"),
        }
    }
}
