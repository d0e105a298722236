//! Report Builder: renders the processed day as text or JSON.
//!
//! The text transcript is the reference output shape: opening time, every
//! event line, closing time, then one summary line per table.

use std::fmt::Write;

use serde::Serialize;

use club_core::{ClockTime, ClubConfig, DayOutcome, Event};

/// Renders the plain-text transcript, one line per event plus the
/// per-table `<id> <revenue> <HH:MM occupied>` summary.
#[must_use]
pub fn format_transcript(config: &ClubConfig, outcome: &DayOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", config.opens());
    for event in &outcome.events {
        let _ = writeln!(out, "{event}");
    }
    let _ = writeln!(out, "{}", config.closes());
    for (id, table) in (1..).zip(&outcome.tables) {
        let _ = writeln!(
            out,
            "{id} {} {}",
            table.revenue(config.hourly_rate()),
            table.total_occupied()
        );
    }
    out
}

/// JSON report document.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    opens: ClockTime,
    closes: ClockTime,
    hourly_rate: u32,
    events: &'a [Event],
    tables: Vec<JsonTable>,
}

/// Per-table summary entry of the JSON report.
#[derive(Debug, Serialize)]
struct JsonTable {
    id: usize,
    revenue: u32,
    billable_hours: u32,
    occupied: ClockTime,
}

/// Renders the day as a pretty-printed JSON document.
pub fn format_json(config: &ClubConfig, outcome: &DayOutcome) -> serde_json::Result<String> {
    let tables = (1..)
        .zip(&outcome.tables)
        .map(|(id, table)| JsonTable {
            id,
            revenue: table.revenue(config.hourly_rate()),
            billable_hours: table.billable_hours(),
            occupied: table.total_occupied(),
        })
        .collect();
    serde_json::to_string_pretty(&JsonReport {
        opens: config.opens(),
        closes: config.closes(),
        hourly_rate: config.hourly_rate(),
        events: &outcome.events,
        tables,
    })
}
