// Rust guideline compliant 2026-10-19

//! Implementation of the `chb cancel` and `chb reject` commands.

use super::Context;
use anyhow::Result;
use chairbook_app::parse_actor;

/// Cancels an appointment on behalf of its client or barber.
///
/// # Errors
///
/// Returns an error if:
/// - The ID or actor does not parse
/// - The appointment is already finished or `by` does not own it
/// - The notice window is enforced and has already started
pub fn execute(ctx: &Context<'_>, id: &str, by: &str) -> Result<()> {
    let actor = parse_actor(by)?;
    let service = ctx.open_service()?;
    let full_id = service.resolve_appointment_id(id)?;

    let appointment = service.cancel_appointment(&full_id, &actor)?;
    ctx.print(ctx.formatter().format_appointment(&appointment));
    Ok(())
}

/// Rejects an appointment as its barber.
///
/// # Errors
///
/// Returns an error if the ID does not resolve or the appointment cannot be
/// cancelled by `barber`.
pub fn reject(ctx: &Context<'_>, id: &str, barber: &str) -> Result<()> {
    let service = ctx.open_service()?;
    let full_id = service.resolve_appointment_id(id)?;

    let appointment = service.reject_appointment(&full_id, barber)?;
    ctx.print(ctx.formatter().format_appointment(&appointment));
    Ok(())
}
