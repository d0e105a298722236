//! Per-table occupancy and billing ledger.

use serde::{Deserialize, Serialize};

use crate::time::{ClockTime, TimeError};

/// Mutable per-table state plus its end-of-day accounting.
///
/// A ledger is occupied by at most one client at a time; the club state
/// machine holds the client-to-table mapping and calls [`occupy`] and
/// [`release`] in strict pairs.
///
/// [`occupy`]: TableLedger::occupy
/// [`release`]: TableLedger::release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLedger {
    /// Whether a client currently sits here.
    occupied: bool,

    /// Completed occupation spans, rounded up to whole hours each.
    billable_hours: u32,

    /// Exact accumulated occupied duration.
    total_occupied: ClockTime,

    /// Start of the current occupation; meaningless while free.
    occupied_since: ClockTime,
}

impl Default for TableLedger {
    fn default() -> Self {
        Self {
            occupied: false,
            billable_hours: 0,
            total_occupied: ClockTime::MIDNIGHT,
            occupied_since: ClockTime::MIDNIGHT,
        }
    }
}

impl TableLedger {
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        self.occupied
    }

    #[must_use]
    pub const fn billable_hours(&self) -> u32 {
        self.billable_hours
    }

    #[must_use]
    pub const fn total_occupied(&self) -> ClockTime {
        self.total_occupied
    }

    /// Revenue at the given hourly rate.
    #[must_use]
    pub const fn revenue(&self, hourly_rate: u32) -> u32 {
        self.billable_hours * hourly_rate
    }

    /// Seats a client at `time`. The caller guarantees the table is free.
    pub(crate) fn occupy(&mut self, time: ClockTime) {
        debug_assert!(!self.occupied, "occupy() on an occupied table");
        self.occupied = true;
        self.occupied_since = time;
    }

    /// Ends the current occupation at `time`, folding the span into the
    /// ledger. Fails when `time` precedes the occupation start, which the
    /// non-decreasing input guarantee makes unreachable.
    pub(crate) fn release(&mut self, time: ClockTime) -> Result<(), TimeError> {
        debug_assert!(self.occupied, "release() on a free table");
        let span = time.span_since(self.occupied_since)?;
        self.total_occupied = self.total_occupied.wrapping_add(span);
        self.billable_hours += span.billable_hours();
        self.occupied = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u8, minute: u8) -> ClockTime {
        ClockTime::new(hour, minute).unwrap()
    }

    #[test]
    fn release_accumulates_span_and_rounds_up() {
        let mut table = TableLedger::default();
        table.occupy(at(9, 54));
        table.release(at(12, 33)).unwrap();
        assert!(!table.is_occupied());
        assert_eq!(table.total_occupied(), at(2, 39));
        assert_eq!(table.billable_hours(), 3);

        table.occupy(at(12, 33));
        table.release(at(15, 52)).unwrap();
        assert_eq!(table.total_occupied(), at(5, 58));
        assert_eq!(table.billable_hours(), 7);
    }

    #[test]
    fn exact_hours_do_not_round_up() {
        let mut table = TableLedger::default();
        table.occupy(at(10, 0));
        table.release(at(11, 0)).unwrap();
        assert_eq!(table.billable_hours(), 1);

        table.occupy(at(11, 0));
        table.release(at(11, 0)).unwrap();
        assert_eq!(table.billable_hours(), 1, "zero-length span bills nothing");
    }

    #[test]
    fn release_before_start_is_a_structural_error() {
        let mut table = TableLedger::default();
        table.occupy(at(10, 30));
        assert!(table.release(at(10, 0)).is_err());
    }

    #[test]
    fn revenue_scales_with_rate() {
        let mut table = TableLedger::default();
        table.occupy(at(10, 59));
        table.release(at(19, 0)).unwrap();
        assert_eq!(table.billable_hours(), 9);
        assert_eq!(table.revenue(10), 90);
    }
}
