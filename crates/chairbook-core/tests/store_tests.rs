// Rust guideline compliant 2026-10-19

//! Tests for the store implementations.
//!
//! The same behavioural checks run against the in-memory store and the
//! JSONL storage, including racing confirmations from several threads.

use chairbook_core::{
    Actor, Appointment, AppointmentFilter, AppointmentStore, BookingSource, Error, MemoryStore,
    NewAppointment, ScheduleStore, Service, Status, StatusUpdate, Storage, WorkingHoursConfig,
    WorkingHoursSource,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 2)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn created() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

fn request(client_id: &str, start: NaiveDateTime) -> Appointment {
    Appointment::new(
        NewAppointment {
            client_id: client_id.to_string(),
            barber_id: "barber-1".to_string(),
            service_id: "svc-aaaaaa".to_string(),
            scheduled_at: start,
        },
        30,
        created(),
        0,
    )
}

fn barber() -> Actor {
    Actor::Barber("barber-1".to_string())
}

fn temp_storage() -> (TempDir, Storage) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let storage = Storage::init(temp_dir.path().join("data")).expect("Failed to init storage");
    (temp_dir, storage)
}

fn check_confirm_conflict<S: AppointmentStore + BookingSource>(store: &S) {
    let first = request("client-a", at(10, 0));
    let second = request("client-b", at(10, 0));
    let overlapping = request("client-c", at(10, 15));
    let adjacent = request("client-d", at(10, 30));
    for appointment in [&first, &second, &overlapping, &adjacent] {
        store.insert_appointment(appointment).unwrap();
    }

    let update = store
        .update_appointment_status(&first.id, Status::Pending, Status::Confirmed, &barber(), created())
        .unwrap();
    assert!(matches!(update, StatusUpdate::Applied(ref a) if a.status == Status::Confirmed));

    for loser in [&second, &overlapping] {
        let update = store
            .update_appointment_status(&loser.id, Status::Pending, Status::Confirmed, &barber(), created())
            .unwrap();
        assert_eq!(
            update,
            StatusUpdate::Conflict {
                conflicting_id: first.id.clone()
            }
        );
        assert_eq!(store.get_appointment(&loser.id).unwrap().status, Status::Pending);
    }
    assert_eq!(store.get_appointment(&first.id).unwrap().status, Status::Confirmed);

    let update = store
        .update_appointment_status(&adjacent.id, Status::Pending, Status::Confirmed, &barber(), created())
        .unwrap();
    assert!(matches!(update, StatusUpdate::Applied(_)));

    let booked = store.confirmed_appointments("barber-1", at(0, 0).date()).unwrap();
    assert_eq!(booked.len(), 2);
}

fn check_stale_and_invalid<S: AppointmentStore>(store: &S) {
    let appointment = request("client-a", at(11, 0));
    store.insert_appointment(&appointment).unwrap();

    let stale = store
        .update_appointment_status(&appointment.id, Status::Confirmed, Status::Completed, &barber(), created())
        .unwrap();
    assert_eq!(stale, StatusUpdate::StaleStatus { actual: Status::Pending });

    let invalid = store.update_appointment_status(
        &appointment.id,
        Status::Pending,
        Status::Completed,
        &barber(),
        created(),
    );
    assert!(matches!(invalid, Err(Error::InvalidTransition(_))));

    let missing = store.update_appointment_status(
        "apt-000000",
        Status::Pending,
        Status::Cancelled,
        &barber(),
        created(),
    );
    assert!(matches!(missing, Err(Error::NotFound(_))));

    let update = store
        .update_appointment_status(&appointment.id, Status::Pending, Status::Cancelled, &barber(), created())
        .unwrap();
    let StatusUpdate::Applied(cancelled) = update else {
        panic!("Expected cancellation to apply, got {:?}", update);
    };
    assert_eq!(cancelled.history.len(), 1);
    assert_eq!(cancelled.history[0].from, Status::Pending);
    assert_eq!(cancelled.history[0].to, Status::Cancelled);
    assert_eq!(store.get_appointment(&appointment.id).unwrap(), cancelled);
}

fn check_duplicate_and_listing<S: AppointmentStore>(store: &S) {
    let late = request("client-a", at(15, 0));
    let early = request("client-b", at(9, 0));
    store.insert_appointment(&late).unwrap();
    store.insert_appointment(&early).unwrap();

    assert!(matches!(
        store.insert_appointment(&late),
        Err(Error::DuplicateId(_))
    ));

    let all = store.list_appointments(&AppointmentFilter::default()).unwrap();
    assert_eq!(all.iter().map(|a| a.id.clone()).collect::<Vec<_>>(), vec![early.id.clone(), late.id.clone()]);

    let filter = AppointmentFilter {
        client_id: Some("client-a".to_string()),
        ..AppointmentFilter::default()
    };
    assert_eq!(store.list_appointments(&filter).unwrap(), vec![late]);

    let filter = AppointmentFilter {
        status: Some(Status::Confirmed),
        ..AppointmentFilter::default()
    };
    assert!(store.list_appointments(&filter).unwrap().is_empty());
}

fn check_schedule<S: ScheduleStore + WorkingHoursSource>(store: &S) {
    let mut hours = WorkingHoursConfig {
        barber_id: "barber-1".to_string(),
        weekday: Weekday::Tue,
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        lunch_start: None,
        lunch_end: None,
        active: true,
    };
    store.upsert_working_hours(&hours).unwrap();
    hours.end_time = NaiveTime::from_hms_opt(18, 0, 0).unwrap();
    store.upsert_working_hours(&hours).unwrap();
    let mut monday = hours.clone();
    monday.weekday = Weekday::Mon;
    store.upsert_working_hours(&monday).unwrap();

    let rows = store.list_working_hours("barber-1").unwrap();
    assert_eq!(rows.len(), 2, "Upsert should replace the Tuesday row");
    assert_eq!(rows[0].weekday, Weekday::Mon);
    assert_eq!(
        store.working_hours("barber-1", Weekday::Tue).unwrap().unwrap().end_time,
        NaiveTime::from_hms_opt(18, 0, 0).unwrap()
    );
    assert!(store.working_hours("barber-1", Weekday::Sun).unwrap().is_none());

    let mut invalid = hours.clone();
    invalid.start_time = NaiveTime::from_hms_opt(19, 0, 0).unwrap();
    assert!(matches!(
        store.upsert_working_hours(&invalid),
        Err(Error::Validation(_))
    ));

    let beard = Service::new("Beard".to_string(), 2500, 20, created(), 0);
    let cut = Service::new("Cut".to_string(), 4000, 30, created(), 0);
    store.insert_service(&cut).unwrap();
    store.insert_service(&beard).unwrap();
    assert!(matches!(store.insert_service(&cut), Err(Error::DuplicateId(_))));

    let mut disabled = cut.clone();
    disabled.active = false;
    store.upsert_service(&disabled).unwrap();
    assert!(!store.get_service(&cut.id).unwrap().active);
    store.upsert_service(&cut).unwrap();
    let names: Vec<String> = store.list_services().unwrap().into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["Beard".to_string(), "Cut".to_string()]);
    assert_eq!(store.get_service(&cut.id).unwrap(), cut);
    assert!(matches!(store.get_service("svc-ffffff"), Err(Error::NotFound(_))));
}

fn race_confirmations<S>(store: Arc<S>)
where
    S: AppointmentStore + Send + Sync + 'static,
{
    let mut ids = Vec::new();
    for i in 0..8 {
        let appointment = request(&format!("client-{i}"), at(14, 0));
        store.insert_appointment(&appointment).unwrap();
        ids.push(appointment.id);
    }

    let handles: Vec<_> = ids
        .into_iter()
        .map(|id| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                store
                    .update_appointment_status(&id, Status::Pending, Status::Confirmed, &barber(), created())
                    .unwrap()
            })
        })
        .collect();

    let outcomes: Vec<StatusUpdate> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let applied = outcomes
        .iter()
        .filter(|o| matches!(o, StatusUpdate::Applied(_)))
        .count();
    let conflicts = outcomes
        .iter()
        .filter(|o| matches!(o, StatusUpdate::Conflict { .. }))
        .count();
    assert_eq!(applied, 1, "Exactly one racing confirmation must win");
    assert_eq!(conflicts, 7);

    let filter = AppointmentFilter {
        status: Some(Status::Confirmed),
        ..AppointmentFilter::default()
    };
    assert_eq!(store.list_appointments(&filter).unwrap().len(), 1);
}

#[test]
fn test_memory_confirm_conflict() {
    check_confirm_conflict(&MemoryStore::new());
}

#[test]
fn test_storage_confirm_conflict() {
    let (_temp_dir, storage) = temp_storage();
    check_confirm_conflict(&storage);
}

#[test]
fn test_memory_stale_and_invalid() {
    check_stale_and_invalid(&MemoryStore::new());
}

#[test]
fn test_storage_stale_and_invalid() {
    let (_temp_dir, storage) = temp_storage();
    check_stale_and_invalid(&storage);
}

#[test]
fn test_memory_duplicate_and_listing() {
    check_duplicate_and_listing(&MemoryStore::new());
}

#[test]
fn test_storage_duplicate_and_listing() {
    let (_temp_dir, storage) = temp_storage();
    check_duplicate_and_listing(&storage);
}

#[test]
fn test_memory_schedule() {
    check_schedule(&MemoryStore::new());
}

#[test]
fn test_storage_schedule() {
    let (_temp_dir, storage) = temp_storage();
    check_schedule(&storage);
}

#[test]
fn test_memory_racing_confirmations() {
    race_confirmations(Arc::new(MemoryStore::new()));
}

#[test]
fn test_storage_racing_confirmations() {
    let (_temp_dir, storage) = temp_storage();
    race_confirmations(Arc::new(storage));
}

#[test]
fn test_storage_persists_across_instances() {
    let (temp_dir, storage) = temp_storage();
    let appointment = request("client-a", at(10, 0));
    storage.insert_appointment(&appointment).unwrap();

    let reopened = Storage::new(temp_dir.path().join("data")).unwrap();
    assert_eq!(reopened.get_appointment(&appointment.id).unwrap(), appointment);
}

#[test]
fn test_storage_rejects_malformed_lines() {
    let (_temp_dir, storage) = temp_storage();
    std::fs::write(
        storage.dir().join(chairbook_core::storage::APPOINTMENTS_FILE),
        "{not json}\n",
    )
    .unwrap();
    assert!(matches!(
        storage.list_appointments(&AppointmentFilter::default()),
        Err(Error::Json(_))
    ));
}

#[test]
fn test_storage_rejects_invalid_records() {
    let (_temp_dir, storage) = temp_storage();
    let mut appointment = request("client-a", at(10, 0));
    appointment.duration_minutes = 0;
    let line = serde_json::to_string(&appointment).unwrap();
    std::fs::write(
        storage.dir().join(chairbook_core::storage::APPOINTMENTS_FILE),
        format!("{line}\n"),
    )
    .unwrap();
    assert!(matches!(
        storage.get_appointment(&appointment.id),
        Err(Error::Validation(_))
    ));
}

#[test]
fn test_storage_missing_files_are_empty() {
    let temp_dir = TempDir::new().unwrap();
    let storage = Storage::new(temp_dir.path().to_path_buf()).unwrap();
    assert!(storage
        .list_appointments(&AppointmentFilter::default())
        .unwrap()
        .is_empty());
    assert!(storage.list_services().unwrap().is_empty());
}

#[test]
fn test_storage_empty_path_is_rejected() {
    assert!(Storage::new(std::path::PathBuf::new()).is_err());
}
