// Rust guideline compliant 2026-10-19

//! Availability engine.
//!
//! Computes bookable start times for a barber on a date from the weekly
//! working-hours row for that weekday, its lunch break, and the intervals
//! already taken by confirmed appointments. Slots are generated back to back
//! from the start of each open window, stepping by the service duration.
//!
//! Pending requests never hide a slot; two clients may request the same
//! start time and the conflict is resolved when the barber confirms.

use crate::interval::Interval;
use crate::models::{BookedInterval, TimeSlot, WorkingHoursConfig};
use crate::{Error, Result};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

/// Read access to barbers' weekly working hours.
pub trait WorkingHoursSource {
    /// Returns the row for `(barber_id, weekday)`, or `None` when the barber
    /// has not configured that weekday.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store fails.
    fn working_hours(&self, barber_id: &str, weekday: Weekday) -> Result<Option<WorkingHoursConfig>>;
}

/// Read access to confirmed bookings.
pub trait BookingSource {
    /// Returns the intervals of all confirmed appointments of `barber_id`
    /// scheduled on `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store fails.
    fn confirmed_appointments(&self, barber_id: &str, date: NaiveDate) -> Result<Vec<BookedInterval>>;
}

/// Generates every candidate slot on `date` from a working-hours row,
/// ignoring bookings.
///
/// Each open window (working hours minus lunch) is walked in steps of
/// `duration_minutes`, emitting a slot whenever the whole duration fits.
pub fn candidate_slots(config: &WorkingHoursConfig, date: NaiveDate, duration_minutes: u32) -> Vec<TimeSlot> {
    if duration_minutes == 0 {
        return Vec::new();
    }

    let step = Duration::minutes(i64::from(duration_minutes));
    let mut slots = Vec::new();

    for window in config.open_windows(date) {
        let mut start = window.start;
        while start + step <= window.end {
            slots.push(TimeSlot {
                start: start.time(),
                duration_minutes,
            });
            start += step;
        }
    }

    slots
}

/// Returns true if `[scheduled_at, scheduled_at + duration)` lies entirely
/// inside one of the row's open windows.
pub fn within_open_hours(config: &WorkingHoursConfig, scheduled_at: NaiveDateTime, duration_minutes: u32) -> bool {
    let Some(requested) = Interval::from_duration(scheduled_at, duration_minutes) else {
        return false;
    };
    config
        .open_windows(scheduled_at.date())
        .iter()
        .any(|window| window.contains(&requested))
}

/// Computes the bookable slots for a barber on a date.
///
/// # Arguments
///
/// * `hours` - Working-hours source
/// * `bookings` - Confirmed-booking source
/// * `barber_id` - Barber to query
/// * `date` - Day to query
/// * `duration_minutes` - Length of the requested service
/// * `now` - Shop-local current time; `date` may not precede it, and on the
///   current day slots that already started are dropped
///
/// # Returns
///
/// Slots in ascending start order. A missing or inactive working-hours row
/// yields an empty list.
///
/// # Errors
///
/// Returns an error if:
/// - `duration_minutes` is zero, `barber_id` is empty, or `date` is in the past
/// - The stored working-hours row is malformed
/// - Either source fails
pub fn compute_available_slots<H, B>(
    hours: &H,
    bookings: &B,
    barber_id: &str,
    date: NaiveDate,
    duration_minutes: u32,
    now: NaiveDateTime,
) -> Result<Vec<TimeSlot>>
where
    H: WorkingHoursSource + ?Sized,
    B: BookingSource + ?Sized,
{
    if duration_minutes == 0 {
        return Err(Error::Validation(
            "Duration must be greater than 0".to_string(),
        ));
    }
    if barber_id.trim().is_empty() {
        return Err(Error::Validation("barber_id is required".to_string()));
    }
    if date < now.date() {
        return Err(Error::Validation(format!(
            "Date {} is in the past",
            date
        )));
    }

    let Some(config) = hours.working_hours(barber_id, date.weekday())? else {
        return Ok(Vec::new());
    };
    config.validate()?;
    if !config.active {
        return Ok(Vec::new());
    }

    let mut slots = candidate_slots(&config, date, duration_minutes);
    if slots.is_empty() {
        return Ok(slots);
    }

    let booked: Vec<Interval> = bookings
        .confirmed_appointments(barber_id, date)?
        .iter()
        .filter_map(BookedInterval::interval)
        .collect();

    slots.retain(|slot| {
        let Some(candidate) = slot.interval_on(date) else {
            return false;
        };
        candidate.start >= now && !booked.iter().any(|taken| taken.overlaps(&candidate))
    });
    slots.sort();

    Ok(slots)
}
