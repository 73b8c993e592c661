// Rust guideline compliant 2026-10-19

//! Chairbook Core Library
//!
//! This crate provides the foundational components for barbershop booking:
//! - Data models (Appointment, Service, WorkingHoursConfig, Status)
//! - Interval utilities for half-open time ranges
//! - Availability engine (slot generation and conflict filtering)
//! - FSM logic (status transitions and actor authorization)
//! - Data-store traits with in-memory and JSONL implementations
//! - Hash ID generation and resolution
//! - Error types and result handling

pub mod availability;
pub mod config;
pub mod error;
pub mod fsm;
pub mod identity;
pub mod interval;
pub mod memory;
pub mod models;
pub mod storage;
pub mod store;

pub use availability::{compute_available_slots, BookingSource, WorkingHoursSource};
pub use config::{Config, OutputFormat};
pub use error::{Error, Result};
pub use fsm::authorize;
pub use interval::Interval;
pub use memory::MemoryStore;
pub use models::{
    Actor, Appointment, BookedInterval, NewAppointment, Service, Status, StatusChange, TimeSlot,
    WorkingHoursConfig,
};
pub use storage::Storage;
pub use store::{AppointmentFilter, AppointmentStore, ScheduleStore, StatusUpdate};
