// Rust guideline compliant 2026-10-19

//! Implementation of the `chb slots` command.

use super::Context;
use anyhow::Result;
use chairbook_app::{parse_date, resolve_service_id, AppError};

/// Lists the bookable slots of a barber on a date.
///
/// The slot length comes from `--service` or from an explicit
/// `--duration`.
///
/// # Errors
///
/// Returns an error if:
/// - Neither a service nor a duration is given
/// - The date cannot be parsed or lies in the past
/// - The service ID does not resolve
pub fn execute(
    ctx: &Context<'_>,
    barber: &str,
    date: &str,
    service_id: Option<&str>,
    duration: Option<u32>,
) -> Result<()> {
    let date = parse_date(date)?;
    let service = ctx.open_service()?;

    let duration = match (service_id, duration) {
        (_, Some(minutes)) => minutes,
        (Some(id), None) => {
            let full_id = resolve_service_id(id, &service.list_services()?)?;
            service.get_service(&full_id)?.duration_minutes
        }
        (None, None) => {
            return Err(AppError::InvalidInput(
                "Either --service or --duration is required".to_string(),
            )
            .into())
        }
    };

    let slots = service.get_available_slots(barber, date, duration)?;
    ctx.print(ctx.formatter().format_slots(barber, date, &slots));
    Ok(())
}
