//! Core domain logic for the computer club day simulator.
//!
//! This crate contains the fundamental types and logic for:
//! - Time: bounded wall-clock values with failing subtraction
//! - Events: the typed input and derived event stream
//! - Tables: per-table occupancy and billing ledgers
//! - Replay: the state machine that turns an input log into the day's
//!   derived stream and final ledgers

pub mod club;
pub mod event;
pub mod table;
pub mod time;

pub use club::{ClubConfig, ConfigError, DayOutcome, ReplayError, process};
pub use event::{ClientName, Event, EventKind, Rejection, TableId, ValidationError};
pub use table::TableLedger;
pub use time::{ClockTime, TimeError};
