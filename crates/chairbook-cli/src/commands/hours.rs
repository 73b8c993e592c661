// Rust guideline compliant 2026-10-19

//! Implementation of the `chb hours` commands.

use super::Context;
use anyhow::Result;
use chairbook_app::{parse_time, parse_weekday, AppError};
use chairbook_core::WorkingHoursConfig;

/// Arguments of `chb hours set`.
#[derive(Debug, Clone)]
pub struct SetHours {
    /// Barber the hours belong to.
    pub barber: String,
    /// Weekday name.
    pub weekday: String,
    /// Opening time, `HH:MM`.
    pub open: String,
    /// Closing time, `HH:MM`.
    pub close: String,
    /// Lunch start, `HH:MM`.
    pub lunch_start: Option<String>,
    /// Lunch end, `HH:MM`.
    pub lunch_end: Option<String>,
    /// Mark the day as closed.
    pub closed: bool,
}

/// Saves a barber's working hours for one weekday.
///
/// # Errors
///
/// Returns an error if:
/// - A time or weekday cannot be parsed
/// - Only one lunch bound is given
/// - The hours fail validation
pub fn set(ctx: &Context<'_>, args: SetHours) -> Result<()> {
    let (lunch_start, lunch_end) = match (args.lunch_start, args.lunch_end) {
        (Some(start), Some(end)) => (Some(parse_time(&start)?), Some(parse_time(&end)?)),
        (None, None) => (None, None),
        _ => {
            return Err(AppError::InvalidInput(
                "--lunch-start and --lunch-end must be given together".to_string(),
            )
            .into())
        }
    };

    let config = WorkingHoursConfig {
        barber_id: args.barber,
        weekday: parse_weekday(&args.weekday)?,
        start_time: parse_time(&args.open)?,
        end_time: parse_time(&args.close)?,
        lunch_start,
        lunch_end,
        active: !args.closed,
    };

    let service = ctx.open_service()?;
    service.set_working_hours(&config)?;
    ctx.print(ctx.formatter().format_hours(&[config]));
    Ok(())
}

/// Shows a barber's working hours for the week.
///
/// # Errors
///
/// Returns an error if the data directory cannot be read.
pub fn show(ctx: &Context<'_>, barber: &str) -> Result<()> {
    let service = ctx.open_service()?;
    let hours = service.working_hours(barber)?;
    ctx.print(ctx.formatter().format_hours(&hours));
    Ok(())
}
