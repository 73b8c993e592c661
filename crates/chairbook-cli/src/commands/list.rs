// Rust guideline compliant 2026-10-19

//! Implementation of the `chb list` command.

use super::Context;
use anyhow::Result;
use chairbook_app::{parse_date, parse_status};
use chairbook_core::AppointmentFilter;

/// Filters accepted by `chb list`.
#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    /// Only this barber's appointments.
    pub barber: Option<String>,
    /// Only this client's appointments.
    pub client: Option<String>,
    /// Only appointments in this status.
    pub status: Option<String>,
    /// Only appointments starting on this date.
    pub date: Option<String>,
}

/// Lists appointments ordered by start time.
///
/// # Errors
///
/// Returns an error if a filter cannot be parsed or the data cannot be read.
pub fn execute(ctx: &Context<'_>, args: ListArgs) -> Result<()> {
    let filter = AppointmentFilter {
        barber_id: args.barber,
        client_id: args.client,
        status: args.status.as_deref().map(parse_status).transpose()?,
        date: args.date.as_deref().map(parse_date).transpose()?,
    };

    let service = ctx.open_service()?;
    let appointments = service.list_appointments(&filter)?;
    ctx.print(ctx.formatter().format_appointments(&appointments));
    Ok(())
}
