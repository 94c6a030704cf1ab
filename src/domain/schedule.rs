//! Half-hour scheduling grid for agency visits.
//!
//! Slots are kept in the 12-hour string form the site has always stored
//! (`08:00 am` … `05:30 pm`); conversions to a decimal hour back the
//! range checks in the validators.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// First bookable hour of the day.
pub const OPENING_HOUR: f64 = 8.0;
/// End of the business day; visits start strictly before it.
pub const CLOSING_HOUR: f64 = 18.0;
/// Midday window during which the office is closed, as [start, end).
pub const MIDDAY_CLOSURE: (f64, f64) = (12.0, 14.0);

static CANONICAL_SLOTS: Lazy<Vec<TimeSlot>> = Lazy::new(|| {
    let first = (OPENING_HOUR * 2.0) as u32;
    let last = (CLOSING_HOUR * 2.0) as u32;
    (first..last)
        .map(|half| TimeSlot(format_slot(half / 2, (half % 2) * 30)))
        .collect()
});

/// A half-hour visit slot, stored in its canonical 12-hour form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct TimeSlot(String);

impl TimeSlot {
    /// Parses user input into a canonical slot. Accepts any half-hour
    /// time within business hours, normalizing case and spacing.
    pub fn parse(value: &str) -> Option<TimeSlot> {
        let (hour, minute) = parse_12h(value)?;
        if minute % 30 != 0 {
            return None;
        }
        let decimal = f64::from(hour) + f64::from(minute) / 60.0;
        if !(OPENING_HOUR..=CLOSING_HOUR).contains(&decimal) {
            return None;
        }
        Some(TimeSlot(format_slot(hour, minute)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Position on the half-hour grid, used to order a day's visits.
    pub fn half_hour_index(&self) -> u32 {
        parse_12h(&self.0)
            .map(|(hour, minute)| hour * 2 + minute / 30)
            .unwrap_or(0)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The full canonical grid, `08:00 am` through `05:30 pm`.
pub fn all_slots() -> &'static [TimeSlot] {
    &CANONICAL_SLOTS
}

/// The grid offered by the booking flow, with the midday closure removed.
pub fn booking_slots() -> Vec<TimeSlot> {
    all_slots()
        .iter()
        .filter(|slot| {
            let decimal = decimal_hour(slot.as_str()).unwrap_or_default();
            !(MIDDAY_CLOSURE.0..MIDDAY_CLOSURE.1).contains(&decimal)
        })
        .cloned()
        .collect()
}

/// Parses a `hh:mm am/pm` string into a 24-hour `(hour, minute)` pair.
pub fn parse_12h(value: &str) -> Option<(u32, u32)> {
    let normalized = value.trim().to_ascii_lowercase();
    let mut parts = normalized.split_whitespace();
    let clock = parts.next()?;
    let suffix = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let (raw_hour, raw_minute) = clock.split_once(':')?;
    let hour12: u32 = raw_hour.parse().ok()?;
    let minute: u32 = raw_minute.parse().ok()?;
    if !(1..=12).contains(&hour12) || minute > 59 {
        return None;
    }
    let hour = match (hour12, suffix) {
        (12, "am") => 0,
        (h, "am") => h,
        (12, "pm") => 12,
        (h, "pm") => h + 12,
        _ => return None,
    };
    Some((hour, minute))
}

/// Decimal-hour form of a 12-hour string (`09:30 am` → 9.5).
pub fn decimal_hour(value: &str) -> Option<f64> {
    parse_12h(value).map(|(hour, minute)| f64::from(hour) + f64::from(minute) / 60.0)
}

fn format_slot(hour: u32, minute: u32) -> String {
    let suffix = if hour < 12 { "am" } else { "pm" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{:02}:{:02} {}", display, minute, suffix)
}
