//! Input-file adapter: turns raw log text into a config and event list.
//!
//! The format is fixed: a table count, the opening hours, an hourly rate,
//! then one event per line. Any malformed line fails the whole run; the
//! error carries the raw line because the reference behavior is to echo it
//! and produce nothing else.

use thiserror::Error;

use club_core::{ClientName, ClockTime, ClubConfig, Event, EventKind, TableId};

/// A malformed input file, pointing at the offending raw line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("malformed input line: {line:?}")]
pub struct ParseError {
    /// The raw text of the line that failed to parse. Empty when the file
    /// ended before the header was complete.
    pub line: String,
}

impl ParseError {
    fn at(line: &str) -> Self {
        Self {
            line: line.to_string(),
        }
    }
}

/// Parses the full input file.
pub fn parse_input(text: &str) -> Result<(ClubConfig, Vec<Event>), ParseError> {
    let mut lines = text.lines();

    let raw = lines.next().unwrap_or("");
    let table_count = parse_positive(raw)?;

    let raw = lines.next().unwrap_or("");
    let (opens, closes) = parse_hours(raw)?;

    let raw = lines.next().unwrap_or("");
    let hourly_rate = parse_positive(raw)?;

    // Positivity is already enforced above, but the constructor owns the
    // invariant.
    let config = ClubConfig::new(opens, closes, table_count, hourly_rate)
        .map_err(|_| ParseError::at(raw))?;

    let mut events = Vec::new();
    for raw in lines {
        if raw.is_empty() {
            continue;
        }
        events.push(parse_event_line(raw, table_count)?);
    }
    tracing::debug!(count = events.len(), "parsed input events");
    Ok((config, events))
}

/// Parses a positive decimal integer occupying the whole line.
fn parse_positive(raw: &str) -> Result<u32, ParseError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::at(raw));
    }
    match raw.parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ParseError::at(raw)),
    }
}

/// Parses the `"HH:MM HH:MM"` opening-hours line.
fn parse_hours(raw: &str) -> Result<(ClockTime, ClockTime), ParseError> {
    let fail = || ParseError::at(raw);
    let (opens, closes) = raw.split_once(' ').ok_or_else(fail)?;
    let opens: ClockTime = opens.parse().map_err(|_| fail())?;
    let closes: ClockTime = closes.parse().map_err(|_| fail())?;
    Ok((opens, closes))
}

/// Parses one `"HH:MM <kind> <client> [<table>]"` event line.
///
/// Only the four request kinds (1–4) are legal in input; a table number is
/// required for kind 2 and must be within `1..=table_count`.
fn parse_event_line(raw: &str, table_count: u32) -> Result<Event, ParseError> {
    let fail = || ParseError::at(raw);
    let mut parts = raw.split(' ');

    let time: ClockTime = parts.next().ok_or_else(fail)?.parse().map_err(|_| fail())?;
    let code = parts.next().ok_or_else(fail)?;
    let client = ClientName::new(parts.next().ok_or_else(fail)?).map_err(|_| fail())?;

    let kind = match code {
        "1" => EventKind::Arrived { client },
        "3" => EventKind::Waits { client },
        "4" => EventKind::Left { client },
        "2" => {
            let raw_table = parts.next().ok_or_else(fail)?;
            if raw_table.is_empty() || !raw_table.bytes().all(|b| b.is_ascii_digit()) {
                return Err(fail());
            }
            let number: u32 = raw_table.parse().map_err(|_| fail())?;
            if number == 0 || number > table_count {
                return Err(fail());
            }
            EventKind::TookTable {
                client,
                table: TableId::new(number).map_err(|_| fail())?,
            }
        }
        _ => return Err(fail()),
    };

    if parts.next().is_some() {
        return Err(fail());
    }
    Ok(Event::new(time, kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "3\n09:00 19:00\n10\n";

    fn with_header(events: &str) -> String {
        format!("{HEADER}{events}")
    }

    #[test]
    fn parses_the_header() {
        let (config, events) = parse_input(HEADER).unwrap();
        assert_eq!(config.table_count(), 3);
        assert_eq!(config.hourly_rate(), 10);
        assert_eq!(config.opens().to_string(), "09:00");
        assert_eq!(config.closes().to_string(), "19:00");
        assert!(events.is_empty());
    }

    #[test]
    fn parses_each_request_kind() {
        let input = with_header(
            "08:48 1 client1\n09:54 2 client1 1\n09:52 3 client1\n12:33 4 client1\n",
        );
        let (_, events) = parse_input(&input).unwrap();
        let codes: Vec<u8> = events.iter().map(|e| e.kind.code()).collect();
        assert_eq!(codes, [1, 2, 3, 4]);
    }

    #[test]
    fn skips_blank_event_lines() {
        let input = with_header("08:48 1 client1\n\n09:52 3 client1\n");
        let (_, events) = parse_input(&input).unwrap();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn rejects_malformed_table_count() {
        let err = parse_input("three\n09:00 19:00\n10\n").unwrap_err();
        assert_eq!(err.line, "three");
        let err = parse_input("0\n09:00 19:00\n10\n").unwrap_err();
        assert_eq!(err.line, "0");
        let err = parse_input("-2\n09:00 19:00\n10\n").unwrap_err();
        assert_eq!(err.line, "-2");
    }

    #[test]
    fn rejects_malformed_hours_line() {
        for bad in ["09:00", "9:00 19:00", "09:00  19:00", "09:00 19:60"] {
            let err = parse_input(&format!("3\n{bad}\n10\n")).unwrap_err();
            assert_eq!(err.line, bad);
        }
    }

    #[test]
    fn rejects_zero_rate() {
        let err = parse_input("3\n09:00 19:00\n0\n").unwrap_err();
        assert_eq!(err.line, "0");
    }

    #[test]
    fn rejects_truncated_file_with_an_empty_echo() {
        let err = parse_input("3\n09:00 19:00\n").unwrap_err();
        assert_eq!(err.line, "");
    }

    #[test]
    fn rejects_malformed_event_lines() {
        let cases = [
            "24:00 1 client1",      // impossible time
            "09:00 5 client1",      // unknown kind
            "09:00 13 NotOpenYet",  // derived kinds are output-only
            "09:00 1",              // missing client
            "09:00 1 two words",    // extra token
            "09:00 2 client1",      // kind 2 needs a table
            "09:00 2 client1 0",    // tables are 1-based
            "09:00 2 client1 4",    // beyond the table count
            "09:00 2 client1 -1",   // not a number
            "09:00 1 client1 1",    // table on a kind that has none
        ];
        for bad in cases {
            let err = parse_input(&with_header(bad)).unwrap_err();
            assert_eq!(err.line, bad, "expected {bad:?} to be rejected");
        }
    }
}
