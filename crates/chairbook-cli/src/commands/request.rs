// Rust guideline compliant 2026-10-19

//! Implementation of the `chb request` command.
//!
//! Creates a pending appointment. Overlapping requests are accepted here and
//! settled when the barber confirms one of them.

use super::Context;
use anyhow::Result;
use chairbook_app::{parse_datetime, resolve_service_id};

/// Requests an appointment on behalf of a client.
///
/// # Arguments
///
/// * `client` - Requesting client
/// * `barber` - Chosen barber
/// * `service_id` - Service ID (full or partial)
/// * `start` - Start time, `YYYY-MM-DDTHH:MM`
///
/// # Errors
///
/// Returns an error if:
/// - The start time cannot be parsed, is in the past, or falls outside the
///   barber's working hours
/// - The service does not resolve or is inactive
pub fn execute(ctx: &Context<'_>, client: &str, barber: &str, service_id: &str, start: &str) -> Result<()> {
    let scheduled_at = parse_datetime(start)?;
    let service = ctx.open_service()?;
    let full_service_id = resolve_service_id(service_id, &service.list_services()?)?;

    let appointment = service.request_appointment(client, barber, &full_service_id, scheduled_at)?;
    ctx.print(ctx.formatter().format_appointment(&appointment));
    Ok(())
}
