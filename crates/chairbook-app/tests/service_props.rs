// Rust guideline compliant 2026-10-19

//! Property-based tests for the booking service.

use chairbook_app::{BookingService, ConfirmOutcome, FixedClock};
use chairbook_core::{AppointmentFilter, Config, MemoryStore, Status, WorkingHoursConfig};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use proptest::prelude::*;

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

fn service() -> BookingService<MemoryStore, FixedClock> {
    let now: NaiveDateTime = monday().and_hms_opt(0, 0, 0).unwrap() - Duration::days(1);
    let service = BookingService::new(MemoryStore::new(), FixedClock::new(now), Config::default());
    service
        .set_working_hours(&WorkingHoursConfig {
            barber_id: "barber-1".to_string(),
            weekday: Weekday::Mon,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            lunch_start: None,
            lunch_end: None,
            active: true,
        })
        .unwrap();
    service
}

/// Requests as (quarter-hour offset from 09:00, duration index).
fn arb_requests() -> impl Strategy<Value = Vec<(u32, usize)>> {
    prop::collection::vec((0u32..28, 0usize..3), 1..12)
}

proptest! {
    /// Whatever the confirmation order, confirmed appointments never overlap
    /// and every refused confirmation leaves the request pending.
    #[test]
    fn prop_confirmed_never_overlap(requests in arb_requests(), order in prop::collection::vec(any::<prop::sample::Index>(), 1..12)) {
        let service = service();
        let durations = [
            service.add_service("Cut", 3000, 30).unwrap(),
            service.add_service("Cut and beard", 4500, 45).unwrap(),
            service.add_service("Full", 6000, 60).unwrap(),
        ];

        let mut ids = Vec::new();
        for (i, (offset, kind)) in requests.iter().enumerate() {
            let start = monday().and_hms_opt(9, 0, 0).unwrap() + Duration::minutes(i64::from(offset * 15));
            let appointment = service
                .request_appointment(&format!("client-{i}"), "barber-1", &durations[*kind].id, start)
                .unwrap();
            ids.push(appointment.id);
        }

        for index in order {
            let id = index.get(&ids);
            match service.confirm_appointment(id, "barber-1") {
                Ok(ConfirmOutcome::Confirmed(a)) => prop_assert_eq!(a.status, Status::Confirmed),
                Ok(ConfirmOutcome::Conflict { .. }) => {
                    prop_assert_eq!(service.get_appointment(id).unwrap().status, Status::Pending);
                }
                Err(_) => {
                    prop_assert_eq!(service.get_appointment(id).unwrap().status, Status::Confirmed);
                }
            }
        }

        let filter = AppointmentFilter {
            status: Some(Status::Confirmed),
            ..AppointmentFilter::default()
        };
        let confirmed = service.list_appointments(&filter).unwrap();
        prop_assert!(!confirmed.is_empty());
        for (i, a) in confirmed.iter().enumerate() {
            for b in &confirmed[i + 1..] {
                prop_assert!(!a.interval().unwrap().overlaps(&b.interval().unwrap()));
            }
        }
    }
}
