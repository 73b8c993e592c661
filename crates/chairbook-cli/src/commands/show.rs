// Rust guideline compliant 2026-10-19

//! Implementation of the `chb show` command.

use super::Context;
use anyhow::Result;

/// Shows one appointment with its status history.
///
/// Supports partial ID resolution (minimum 3 characters).
///
/// # Errors
///
/// Returns an error if the ID is not found or is ambiguous.
pub fn execute(ctx: &Context<'_>, id: &str) -> Result<()> {
    let service = ctx.open_service()?;
    let full_id = service.resolve_appointment_id(id)?;

    let appointment = service.get_appointment(&full_id)?;
    ctx.print(ctx.formatter().format_appointment(&appointment));
    Ok(())
}
