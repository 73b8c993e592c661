// Rust guideline compliant 2026-10-19

//! Property-based tests for the FSM module.

use chairbook_core::{authorize, Actor, Appointment, NewAppointment, Status};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;

fn arb_status() -> impl Strategy<Value = Status> {
    prop_oneof![
        Just(Status::Pending),
        Just(Status::Confirmed),
        Just(Status::Cancelled),
        Just(Status::Completed),
        Just(Status::NoShow),
    ]
}

fn arb_actor() -> impl Strategy<Value = Actor> {
    prop_oneof![
        Just(Actor::Barber("barber-1".to_string())),
        Just(Actor::Barber("barber-2".to_string())),
        Just(Actor::Client("client-1".to_string())),
        Just(Actor::Client("client-2".to_string())),
        Just(Actor::System),
    ]
}

fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 2)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

fn appointment(status: Status) -> Appointment {
    let mut appointment = Appointment::new(
        NewAppointment {
            client_id: "client-1".to_string(),
            barber_id: "barber-1".to_string(),
            service_id: "svc-aaaaaa".to_string(),
            scheduled_at: base_time(),
        },
        30,
        base_time() - Duration::days(1),
        0,
    );
    appointment.status = status;
    appointment
}

proptest! {
    /// No actor, at any time, can move an appointment out of a terminal state.
    #[test]
    fn prop_terminal_states_are_final(
        current in arb_status(),
        target in arb_status(),
        actor in arb_actor(),
        offset_minutes in -10_000i64..10_000,
    ) {
        let now = base_time() + Duration::minutes(offset_minutes);
        if current.is_terminal() {
            prop_assert!(authorize(&appointment(current), target, &actor, now).is_err());
        }
    }

    /// Authorization never accepts a transition outside the status table.
    #[test]
    fn prop_authorize_respects_table(
        current in arb_status(),
        target in arb_status(),
        actor in arb_actor(),
        offset_minutes in -10_000i64..10_000,
    ) {
        let now = base_time() + Duration::minutes(offset_minutes);
        if authorize(&appointment(current), target, &actor, now).is_ok() {
            prop_assert!(current.valid_transitions().contains(&target));
        }
    }

    /// Cancellation from a non-terminal state always succeeds for the owners.
    #[test]
    fn prop_owners_can_always_cancel(
        current in prop_oneof![Just(Status::Pending), Just(Status::Confirmed)],
        offset_minutes in -10_000i64..10_000,
    ) {
        let now = base_time() + Duration::minutes(offset_minutes);
        let current = appointment(current);
        prop_assert!(authorize(&current, Status::Cancelled, &Actor::Barber("barber-1".to_string()), now).is_ok());
        prop_assert!(authorize(&current, Status::Cancelled, &Actor::Client("client-1".to_string()), now).is_ok());
    }

    /// Nothing ever transitions back to pending.
    #[test]
    fn prop_pending_is_never_a_target(current in arb_status(), actor in arb_actor()) {
        prop_assert!(authorize(&appointment(current), Status::Pending, &actor, base_time()).is_err());
    }
}
