//! The club state machine: replays one day of events and synthesizes the
//! derived stream.
//!
//! `process` consumes the input log in order, appends each triggering event
//! to the output verbatim, and follows it with whatever the rules synthesize
//! (rejections, forced departures, queue-driven seatings). After the log is
//! exhausted, the end-of-day pass forces everyone still inside out at
//! closing time.

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::{ClientName, Event, EventKind, Rejection, TableId};
use crate::table::TableLedger;
use crate::time::{ClockTime, TimeError};

/// Errors from constructing a club configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("table count must be positive")]
    NoTables,
    #[error("hourly rate must be positive")]
    ZeroRate,
}

/// Structural errors that abort a replay.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// The log referenced a table the club does not have.
    #[error("table {table} does not exist, the club has {table_count}")]
    UnknownTable { table: TableId, table_count: u32 },

    /// The log was out of chronological order.
    #[error(transparent)]
    Time(#[from] TimeError),
}

/// The fixed parameters of the simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubConfig {
    opens: ClockTime,
    closes: ClockTime,
    table_count: u32,
    hourly_rate: u32,
}

impl ClubConfig {
    /// Creates a configuration after validation.
    pub const fn new(
        opens: ClockTime,
        closes: ClockTime,
        table_count: u32,
        hourly_rate: u32,
    ) -> Result<Self, ConfigError> {
        if table_count == 0 {
            return Err(ConfigError::NoTables);
        }
        if hourly_rate == 0 {
            return Err(ConfigError::ZeroRate);
        }
        Ok(Self {
            opens,
            closes,
            table_count,
            hourly_rate,
        })
    }

    #[must_use]
    pub const fn opens(&self) -> ClockTime {
        self.opens
    }

    #[must_use]
    pub const fn closes(&self) -> ClockTime {
        self.closes
    }

    #[must_use]
    pub const fn table_count(&self) -> u32 {
        self.table_count
    }

    #[must_use]
    pub const fn hourly_rate(&self) -> u32 {
        self.hourly_rate
    }
}

/// The result of replaying a day: the derived event stream and the final
/// per-table ledgers, in table-id order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayOutcome {
    pub events: Vec<Event>,
    pub tables: Vec<TableLedger>,
}

/// Replays the ordered input log and returns the derived stream plus the
/// final table ledgers.
///
/// A pure function of its input: no state survives between calls. Domain
/// rejections become output events; the only failure modes are structural —
/// an out-of-order log, or a table id beyond the club's table count.
pub fn process(config: &ClubConfig, input: &[Event]) -> Result<DayOutcome, ReplayError> {
    let mut state = ClubState::new(config);
    let mut events = Vec::with_capacity(input.len());
    for event in input {
        // The triggering event is always retained; synthesized events
        // follow it rather than replacing it.
        events.push(event.clone());
        state.apply(event, &mut events)?;
    }
    state.close(&mut events)?;
    Ok(DayOutcome {
        events,
        tables: state.tables,
    })
}

/// Mutable state of the replay.
struct ClubState {
    opens: ClockTime,
    closes: ClockTime,
    /// Present clients and the table each occupies (`None` = unseated).
    /// A `BTreeMap` makes the end-of-day iteration ascending by client
    /// name, which fixes the output order.
    present: BTreeMap<ClientName, Option<TableId>>,
    /// FIFO of unseated clients waiting for a table; never longer than the
    /// table count.
    queue: VecDeque<ClientName>,
    tables: Vec<TableLedger>,
    free_tables: u32,
}

impl ClubState {
    fn new(config: &ClubConfig) -> Self {
        Self {
            opens: config.opens,
            closes: config.closes,
            present: BTreeMap::new(),
            queue: VecDeque::new(),
            tables: vec![TableLedger::default(); config.table_count as usize],
            free_tables: config.table_count,
        }
    }

    fn apply(&mut self, event: &Event, out: &mut Vec<Event>) -> Result<(), ReplayError> {
        match &event.kind {
            EventKind::Arrived { client } => self.client_arrived(event.time, client, out),
            EventKind::TookTable { client, table } => {
                self.client_took_table(event.time, client, *table, out)?;
            }
            EventKind::Waits { client } => self.client_waits(event.time, client, out),
            EventKind::Left { client } => self.client_left(event.time, client, out)?,
            // Synthesized kinds never appear in the input stream.
            EventKind::ForcedOut { .. }
            | EventKind::SeatedFromQueue { .. }
            | EventKind::Rejected { .. } => {
                tracing::warn!(code = event.kind.code(), "ignoring derived kind in input");
            }
        }
        Ok(())
    }

    fn client_arrived(&mut self, time: ClockTime, client: &ClientName, out: &mut Vec<Event>) {
        if self.present.contains_key(client) {
            out.push(rejected(time, Rejection::YouShallNotPass));
        } else if time < self.opens || time > self.closes {
            out.push(rejected(time, Rejection::NotOpenYet));
        } else {
            tracing::debug!(client = %client, "client admitted");
            self.present.insert(client.clone(), None);
        }
    }

    fn client_took_table(
        &mut self,
        time: ClockTime,
        client: &ClientName,
        table: TableId,
        out: &mut Vec<Event>,
    ) -> Result<(), ReplayError> {
        // The parser bounds table ids already; a library caller gets a
        // structural error rather than a panic.
        let Some(ledger) = self.tables.get(table.index()) else {
            return Err(ReplayError::UnknownTable {
                table,
                table_count: self.tables.len() as u32,
            });
        };
        let Some(&seated_at) = self.present.get(client) else {
            out.push(rejected(time, Rejection::ClientUnknown));
            return Ok(());
        };
        if ledger.is_occupied() {
            out.push(rejected(time, Rejection::PlaceIsBusy));
            return Ok(());
        }
        if let Some(previous) = seated_at {
            // A move: the old table is billed and freed first.
            self.release_table(previous, time)?;
        }
        self.occupy_table(table, time);
        self.present.insert(client.clone(), Some(table));
        tracing::debug!(client = %client, table = %table, "client seated");
        Ok(())
    }

    fn client_waits(&mut self, time: ClockTime, client: &ClientName, out: &mut Vec<Event>) {
        if self.free_tables > 0 {
            out.push(rejected(time, Rejection::ICanWaitNoLonger));
        } else if self.queue.len() >= self.tables.len() {
            // One waiting client per table is the maximum sensible depth;
            // past that the club sends the newcomer away.
            tracing::debug!(client = %client, "queue full, turning client away");
            out.push(Event::new(
                time,
                EventKind::ForcedOut {
                    client: client.clone(),
                },
            ));
            self.present.remove(client);
        } else {
            self.queue.push_back(client.clone());
        }
    }

    fn client_left(
        &mut self,
        time: ClockTime,
        client: &ClientName,
        out: &mut Vec<Event>,
    ) -> Result<(), ReplayError> {
        let Some(seated_at) = self.present.remove(client) else {
            out.push(rejected(time, Rejection::ClientUnknown));
            return Ok(());
        };
        let Some(table) = seated_at else {
            // Never seated: nothing to free, nobody to promote. Drop any
            // queue entry so the queue only ever holds present clients.
            self.queue.retain(|name| name != client);
            return Ok(());
        };
        self.release_table(table, time)?;
        if let Some(next) = self.queue.pop_front() {
            self.occupy_table(table, time);
            self.present.insert(next.clone(), Some(table));
            tracing::debug!(client = %next, table = %table, "seated from queue");
            out.push(Event::new(
                time,
                EventKind::SeatedFromQueue {
                    client: next,
                    table,
                },
            ));
        }
        Ok(())
    }

    /// Forces every remaining client out at closing time, in ascending
    /// name order, releasing the tables of those seated.
    fn close(&mut self, out: &mut Vec<Event>) -> Result<(), ReplayError> {
        let closes = self.closes;
        for (client, seated_at) in std::mem::take(&mut self.present) {
            if let Some(table) = seated_at {
                self.release_table(table, closes)?;
            }
            out.push(Event::new(closes, EventKind::ForcedOut { client }));
        }
        self.queue.clear();
        Ok(())
    }

    fn occupy_table(&mut self, table: TableId, time: ClockTime) {
        self.tables[table.index()].occupy(time);
        self.free_tables -= 1;
    }

    fn release_table(&mut self, table: TableId, time: ClockTime) -> Result<(), TimeError> {
        self.tables[table.index()].release(time)?;
        self.free_tables += 1;
        Ok(())
    }
}

fn rejected(time: ClockTime, reason: Rejection) -> Event {
    Event::new(time, EventKind::Rejected { reason })
}
