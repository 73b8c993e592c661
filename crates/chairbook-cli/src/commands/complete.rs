// Rust guideline compliant 2026-10-19

//! Implementation of the `chb complete` and `chb no-show` commands.

use super::Context;
use anyhow::Result;
use chairbook_app::parse_actor;

/// Marks a confirmed appointment as completed once it has started.
///
/// # Errors
///
/// Returns an error if the appointment is not confirmed, has not started,
/// or `by` is neither its barber nor the system.
pub fn execute(ctx: &Context<'_>, id: &str, by: &str) -> Result<()> {
    let actor = parse_actor(by)?;
    let service = ctx.open_service()?;
    let full_id = service.resolve_appointment_id(id)?;

    let appointment = service.mark_completed(&full_id, &actor)?;
    ctx.print(ctx.formatter().format_appointment(&appointment));
    Ok(())
}

/// Marks a confirmed appointment as a no-show once it has started.
///
/// # Errors
///
/// Same as [`execute`].
pub fn no_show(ctx: &Context<'_>, id: &str, by: &str) -> Result<()> {
    let actor = parse_actor(by)?;
    let service = ctx.open_service()?;
    let full_id = service.resolve_appointment_id(id)?;

    let appointment = service.mark_no_show(&full_id, &actor)?;
    ctx.print(ctx.formatter().format_appointment(&appointment));
    Ok(())
}
