// Rust guideline compliant 2026-10-19

//! Output formatting module for the Chairbook CLI.
//!
//! This module provides functionality for formatting appointments, slots,
//! services and working hours in various output formats (JSON, table, plain
//! text).

use chairbook_app::{AppError, ErrorEnvelope, PayloadKind, SuccessEnvelope};
use chairbook_core::{Appointment, OutputFormat, Service, TimeSlot, WorkingHoursConfig};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;
use tabled::{builder::Builder, settings::Style};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Output formatter trait.
///
/// Defines the interface for formatting Chairbook data in different output
/// formats.
pub trait OutputFormatter {
    /// Formats a single appointment, including its status history.
    fn format_appointment(&self, appointment: &Appointment) -> String;

    /// Formats a list of appointments.
    fn format_appointments(&self, appointments: &[Appointment]) -> String;

    /// Formats the bookable slots of a barber on a date.
    fn format_slots(&self, barber_id: &str, date: NaiveDate, slots: &[TimeSlot]) -> String;

    /// Formats a single service.
    fn format_service(&self, service: &Service) -> String;

    /// Formats the service catalog.
    fn format_services(&self, services: &[Service]) -> String;

    /// Formats a barber's working hours.
    fn format_hours(&self, hours: &[WorkingHoursConfig]) -> String;

    /// Formats a confirmation message.
    fn format_message(&self, message: &str) -> String;

    /// Formats an error for display.
    fn format_error(&self, error: &anyhow::Error) -> String;
}

fn price(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

fn lunch(hours: &WorkingHoursConfig) -> String {
    match (hours.lunch_start, hours.lunch_end) {
        (Some(start), Some(end)) => format!("{}-{}", start.format("%H:%M"), end.format("%H:%M")),
        _ => "-".to_string(),
    }
}

fn slot_end(slot: &TimeSlot, date: NaiveDate) -> String {
    slot.interval_on(date)
        .map(|interval| interval.end.format("%H:%M").to_string())
        .unwrap_or_else(|| "?".to_string())
}

/// JSON output formatter.
///
/// Wraps every payload in the standard success or error envelope.
pub struct JsonFormatter;

impl JsonFormatter {
    fn envelope<T: Serialize>(kind: PayloadKind, result: T) -> String {
        serde_json::to_string_pretty(&SuccessEnvelope::new(kind, result))
            .unwrap_or_else(|_| json!({ "error": "Failed to serialize result" }).to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_appointment(&self, appointment: &Appointment) -> String {
        Self::envelope(PayloadKind::Appointment, appointment)
    }

    fn format_appointments(&self, appointments: &[Appointment]) -> String {
        Self::envelope(PayloadKind::Appointments, json!({
            "appointments": appointments,
            "total": appointments.len(),
        }))
    }

    fn format_slots(&self, barber_id: &str, date: NaiveDate, slots: &[TimeSlot]) -> String {
        Self::envelope(PayloadKind::Slots, json!({
            "barber_id": barber_id,
            "date": date,
            "slots": slots,
            "total": slots.len(),
        }))
    }

    fn format_service(&self, service: &Service) -> String {
        Self::envelope(PayloadKind::Service, service)
    }

    fn format_services(&self, services: &[Service]) -> String {
        Self::envelope(PayloadKind::Services, json!({
            "services": services,
            "total": services.len(),
        }))
    }

    fn format_hours(&self, hours: &[WorkingHoursConfig]) -> String {
        Self::envelope(PayloadKind::WorkingHours, json!({ "working_hours": hours }))
    }

    fn format_message(&self, message: &str) -> String {
        Self::envelope(PayloadKind::Message, json!({ "message": message }))
    }

    fn format_error(&self, error: &anyhow::Error) -> String {
        match error.downcast_ref::<AppError>() {
            Some(app_error) => serde_json::to_string_pretty(&ErrorEnvelope::from_error(app_error))
                .unwrap_or_else(|_| json!({ "error": app_error.to_string() }).to_string()),
            None => json!({ "error": error.to_string() }).to_string(),
        }
    }
}

/// Table output formatter.
///
/// Formats data as human-readable tables.
pub struct TableFormatter;

impl OutputFormatter for TableFormatter {
    fn format_appointment(&self, appointment: &Appointment) -> String {
        let mut output = String::new();

        output.push_str(&format!("ID:        {}\n", appointment.id));
        output.push_str(&format!("Status:    {}\n", appointment.status));
        output.push_str(&format!("Client:    {}\n", appointment.client_id));
        output.push_str(&format!("Barber:    {}\n", appointment.barber_id));
        output.push_str(&format!("Service:   {}\n", appointment.service_id));
        output.push_str(&format!(
            "Scheduled: {} ({} min)\n",
            appointment.scheduled_at.format(TIME_FORMAT),
            appointment.duration_minutes
        ));
        output.push_str(&format!("Created:   {}\n", appointment.created_at.format(TIME_FORMAT)));
        output.push_str(&format!("Updated:   {}\n", appointment.updated_at.format(TIME_FORMAT)));

        if !appointment.history.is_empty() {
            output.push_str("History:\n");
            for change in &appointment.history {
                output.push_str(&format!(
                    "  {}  {} -> {} by {}\n",
                    change.at.format(TIME_FORMAT),
                    change.from,
                    change.to,
                    change.actor
                ));
            }
        }

        output
    }

    fn format_appointments(&self, appointments: &[Appointment]) -> String {
        if appointments.is_empty() {
            return "No appointments found.".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(vec!["ID", "Status", "Scheduled", "Min", "Client", "Barber", "Service"]);

        for appointment in appointments {
            builder.push_record(vec![
                appointment.id.clone(),
                appointment.status.to_string(),
                appointment.scheduled_at.format(TIME_FORMAT).to_string(),
                appointment.duration_minutes.to_string(),
                appointment.client_id.clone(),
                appointment.barber_id.clone(),
                appointment.service_id.clone(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern());
        table.to_string()
    }

    fn format_slots(&self, barber_id: &str, date: NaiveDate, slots: &[TimeSlot]) -> String {
        if slots.is_empty() {
            return format!("No available slots for {} on {}.", barber_id, date);
        }

        let mut builder = Builder::default();
        builder.push_record(vec!["Start", "End", "Minutes"]);
        for slot in slots {
            builder.push_record(vec![
                slot.start.format("%H:%M").to_string(),
                slot_end(slot, date),
                slot.duration_minutes.to_string(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern());
        format!("Available slots for {} on {}\n{}", barber_id, date, table)
    }

    fn format_service(&self, service: &Service) -> String {
        format!(
            "ID:       {}\nName:     {}\nPrice:    {}\nDuration: {} min\nActive:   {}\n",
            service.id,
            service.name,
            price(service.price_cents),
            service.duration_minutes,
            if service.active { "yes" } else { "no" }
        )
    }

    fn format_services(&self, services: &[Service]) -> String {
        if services.is_empty() {
            return "No services found.".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(vec!["ID", "Name", "Price", "Minutes", "Active"]);
        for service in services {
            builder.push_record(vec![
                service.id.clone(),
                service.name.clone(),
                price(service.price_cents),
                service.duration_minutes.to_string(),
                if service.active { "yes" } else { "no" }.to_string(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern());
        table.to_string()
    }

    fn format_hours(&self, hours: &[WorkingHoursConfig]) -> String {
        if hours.is_empty() {
            return "No working hours configured.".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(vec!["Weekday", "Open", "Close", "Lunch", "Active"]);
        for row in hours {
            builder.push_record(vec![
                row.weekday.to_string(),
                row.start_time.format("%H:%M").to_string(),
                row.end_time.format("%H:%M").to_string(),
                lunch(row),
                if row.active { "yes" } else { "no" }.to_string(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern());
        table.to_string()
    }

    fn format_message(&self, message: &str) -> String {
        format!("✓ {}", message)
    }

    fn format_error(&self, error: &anyhow::Error) -> String {
        format!("Error: {}", error)
    }
}

/// Plain text output formatter.
///
/// One record per line, space separated, for shell pipelines.
pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn format_appointment(&self, appointment: &Appointment) -> String {
        format!(
            "{} {} {} {} {} {} {}",
            appointment.id,
            appointment.status,
            appointment.scheduled_at.format("%Y-%m-%dT%H:%M"),
            appointment.duration_minutes,
            appointment.client_id,
            appointment.barber_id,
            appointment.service_id
        )
    }

    fn format_appointments(&self, appointments: &[Appointment]) -> String {
        appointments
            .iter()
            .map(|appointment| self.format_appointment(appointment))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_slots(&self, _barber_id: &str, _date: NaiveDate, slots: &[TimeSlot]) -> String {
        slots
            .iter()
            .map(|slot| slot.start.format("%H:%M").to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_service(&self, service: &Service) -> String {
        format!(
            "{} {} {} {} {}",
            service.id,
            price(service.price_cents),
            service.duration_minutes,
            if service.active { "active" } else { "inactive" },
            service.name
        )
    }

    fn format_services(&self, services: &[Service]) -> String {
        services
            .iter()
            .map(|service| self.format_service(service))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_hours(&self, hours: &[WorkingHoursConfig]) -> String {
        hours
            .iter()
            .map(|row| {
                format!(
                    "{} {} {} {} {}",
                    row.weekday,
                    row.start_time.format("%H:%M"),
                    row.end_time.format("%H:%M"),
                    lunch(row),
                    if row.active { "active" } else { "inactive" }
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }

    fn format_error(&self, error: &anyhow::Error) -> String {
        format!("Error: {}", error)
    }
}

/// Factory function to create an appropriate formatter.
pub fn create_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Plain => Box::new(PlainFormatter),
    }
}
