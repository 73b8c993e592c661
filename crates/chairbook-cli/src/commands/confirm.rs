// Rust guideline compliant 2026-10-19

//! Implementation of the `chb confirm` command.

use super::Context;
use anyhow::Result;

/// Confirms a pending appointment as its barber.
///
/// A conflict with an already confirmed appointment is reported as an
/// error; the appointment stays pending and can be rejected.
///
/// # Errors
///
/// Returns an error if:
/// - The ID does not resolve
/// - The appointment is not pending or belongs to another barber
/// - The interval is already taken by a confirmed appointment
pub fn execute(ctx: &Context<'_>, id: &str, barber: &str) -> Result<()> {
    let service = ctx.open_service()?;
    let full_id = service.resolve_appointment_id(id)?;

    let appointment = service.confirm_appointment(&full_id, barber)?.into_result()?;
    ctx.print(ctx.formatter().format_appointment(&appointment));
    Ok(())
}
