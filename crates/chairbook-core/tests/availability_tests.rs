// Rust guideline compliant 2026-10-19

//! Unit tests for the availability engine.
//!
//! These tests cover slot generation from working hours, lunch exclusion,
//! filtering against confirmed bookings, and input validation.

use chairbook_core::availability::{candidate_slots, within_open_hours};
use chairbook_core::{
    compute_available_slots, Appointment, AppointmentStore, Error, MemoryStore, NewAppointment,
    ScheduleStore, Status, TimeSlot, WorkingHoursConfig,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 1)
        .unwrap()
        .and_time(time(8, 0))
}

fn monday_hours(barber_id: &str) -> WorkingHoursConfig {
    WorkingHoursConfig {
        barber_id: barber_id.to_string(),
        weekday: Weekday::Mon,
        start_time: time(9, 0),
        end_time: time(17, 0),
        lunch_start: Some(time(12, 0)),
        lunch_end: Some(time(13, 0)),
        active: true,
    }
}

fn store_with_hours() -> MemoryStore {
    let store = MemoryStore::new();
    store
        .upsert_working_hours(&monday_hours("barber-1"))
        .expect("Failed to save working hours");
    store
}

fn booking(
    store: &MemoryStore,
    client_id: &str,
    barber_id: &str,
    start: NaiveTime,
    minutes: u32,
    status: Status,
) -> Appointment {
    let mut appointment = Appointment::new(
        NewAppointment {
            client_id: client_id.to_string(),
            barber_id: barber_id.to_string(),
            service_id: "svc-000001".to_string(),
            scheduled_at: monday().and_time(start),
        },
        minutes,
        now(),
        0,
    );
    appointment.status = status;
    store
        .insert_appointment(&appointment)
        .expect("Failed to insert appointment");
    appointment
}

fn confirmed(store: &MemoryStore, barber_id: &str, start: NaiveTime, minutes: u32) -> Appointment {
    booking(store, "client-x", barber_id, start, minutes, Status::Confirmed)
}

fn starts(slots: &[TimeSlot]) -> Vec<NaiveTime> {
    slots.iter().map(|slot| slot.start).collect()
}

#[test]
fn test_workday_with_lunch_yields_fourteen_half_hour_slots() {
    let store = store_with_hours();
    let slots = compute_available_slots(&store, &store, "barber-1", monday(), 30, now())
        .expect("Failed to compute slots");

    let mut expected = Vec::new();
    for (hour, minute) in [(9, 0), (9, 30), (10, 0), (10, 30), (11, 0), (11, 30)] {
        expected.push(time(hour, minute));
    }
    for hour in 13..17 {
        expected.push(time(hour, 0));
        expected.push(time(hour, 30));
    }

    assert_eq!(slots.len(), 14);
    assert_eq!(starts(&slots), expected);
    assert!(slots.iter().all(|slot| slot.duration_minutes == 30));
    assert!(
        slots
            .iter()
            .all(|slot| slot.start < time(12, 0) || slot.start >= time(13, 0)),
        "No slot should start during lunch"
    );
}

#[test]
fn test_morning_window_yields_its_half_hour_slots() {
    let slots = candidate_slots(&monday_hours("barber-1"), monday(), 30);
    let morning: Vec<NaiveTime> = starts(&slots)
        .into_iter()
        .filter(|start| *start < time(12, 0))
        .collect();
    assert_eq!(
        morning,
        vec![
            time(9, 0),
            time(9, 30),
            time(10, 0),
            time(10, 30),
            time(11, 0),
            time(11, 30)
        ]
    );
}

#[test]
fn test_slots_step_by_service_duration() {
    let slots = candidate_slots(&monday_hours("barber-1"), monday(), 45);
    assert_eq!(
        starts(&slots),
        vec![
            time(9, 0),
            time(9, 45),
            time(10, 30),
            time(11, 15),
            time(13, 0),
            time(13, 45),
            time(14, 30),
            time(15, 15),
            time(16, 0),
        ]
    );
}

#[test]
fn test_missing_configuration_yields_no_slots() {
    let store = store_with_hours();
    let tuesday = monday().succ_opt().unwrap();
    let slots = compute_available_slots(&store, &store, "barber-1", tuesday, 30, now())
        .expect("Missing configuration is not an error");
    assert!(slots.is_empty());
}

#[test]
fn test_inactive_day_yields_no_slots() {
    let store = MemoryStore::new();
    let mut hours = monday_hours("barber-1");
    hours.active = false;
    store.upsert_working_hours(&hours).unwrap();

    let slots = compute_available_slots(&store, &store, "barber-1", monday(), 30, now()).unwrap();
    assert!(slots.is_empty());
}

#[test]
fn test_duration_longer_than_any_window_yields_no_slots() {
    let store = store_with_hours();
    let slots = compute_available_slots(&store, &store, "barber-1", monday(), 5 * 60, now()).unwrap();
    assert!(slots.is_empty());
}

#[test]
fn test_confirmed_booking_removes_overlapping_slots() {
    let store = store_with_hours();
    confirmed(&store, "barber-1", time(10, 15), 30);

    let slots = compute_available_slots(&store, &store, "barber-1", monday(), 30, now()).unwrap();
    let starts = starts(&slots);
    assert_eq!(slots.len(), 12);
    assert!(!starts.contains(&time(10, 0)));
    assert!(!starts.contains(&time(10, 30)));
    assert!(starts.contains(&time(9, 30)));
    assert!(starts.contains(&time(11, 0)));
}

#[test]
fn test_touching_booking_does_not_remove_neighbours() {
    let store = store_with_hours();
    confirmed(&store, "barber-1", time(10, 0), 30);

    let slots = compute_available_slots(&store, &store, "barber-1", monday(), 30, now()).unwrap();
    let starts = starts(&slots);
    assert_eq!(slots.len(), 13);
    assert!(starts.contains(&time(9, 30)));
    assert!(!starts.contains(&time(10, 0)));
    assert!(starts.contains(&time(10, 30)));
}

#[test]
fn test_other_barbers_bookings_are_ignored() {
    let store = store_with_hours();
    confirmed(&store, "barber-2", time(9, 0), 60);

    let slots = compute_available_slots(&store, &store, "barber-1", monday(), 30, now()).unwrap();
    assert_eq!(slots.len(), 14);
}

#[test]
fn test_pending_and_cancelled_bookings_do_not_hide_slots() {
    let store = store_with_hours();
    booking(&store, "client-a", "barber-1", time(9, 0), 30, Status::Pending);
    booking(&store, "client-b", "barber-1", time(9, 0), 30, Status::Pending);
    booking(&store, "client-c", "barber-1", time(14, 0), 30, Status::Cancelled);

    let slots = compute_available_slots(&store, &store, "barber-1", monday(), 30, now()).unwrap();
    assert_eq!(slots.len(), 14, "Only confirmed bookings block slots");
}

#[test]
fn test_today_drops_slots_that_already_started() {
    let store = store_with_hours();
    let mid_morning = monday().and_time(time(10, 10));
    let slots = compute_available_slots(&store, &store, "barber-1", monday(), 30, mid_morning).unwrap();
    assert_eq!(slots.first().map(|slot| slot.start), Some(time(10, 30)));
    assert_eq!(slots.len(), 11);
}

#[test]
fn test_past_date_is_rejected() {
    let store = store_with_hours();
    let later = monday().succ_opt().unwrap().and_time(time(8, 0));
    let result = compute_available_slots(&store, &store, "barber-1", monday(), 30, later);
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[test]
fn test_zero_duration_is_rejected() {
    let store = store_with_hours();
    let result = compute_available_slots(&store, &store, "barber-1", monday(), 0, now());
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[test]
fn test_within_open_hours() {
    let hours = monday_hours("barber-1");
    assert!(within_open_hours(&hours, monday().and_time(time(9, 0)), 30));
    assert!(within_open_hours(&hours, monday().and_time(time(11, 30)), 30));
    assert!(within_open_hours(&hours, monday().and_time(time(9, 10)), 30));
    assert!(!within_open_hours(&hours, monday().and_time(time(11, 45)), 30));
    assert!(!within_open_hours(&hours, monday().and_time(time(16, 45)), 30));
    assert!(!within_open_hours(&hours, monday().and_time(time(8, 30)), 30));
}
