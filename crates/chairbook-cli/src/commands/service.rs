// Rust guideline compliant 2026-10-19

//! Implementation of the `chb service` commands.

use super::Context;
use anyhow::Result;
use chairbook_app::resolve_service_id;

/// Adds a service to the catalog.
///
/// # Errors
///
/// Returns an error if the service fails validation or cannot be saved.
pub fn add(ctx: &Context<'_>, name: &str, price_cents: u64, duration_minutes: u32) -> Result<()> {
    let service = ctx.open_service()?;
    let added = service.add_service(name, price_cents, duration_minutes)?;
    ctx.print(ctx.formatter().format_service(&added));
    Ok(())
}

/// Lists the service catalog.
///
/// # Errors
///
/// Returns an error if the data directory cannot be read.
pub fn list(ctx: &Context<'_>) -> Result<()> {
    let service = ctx.open_service()?;
    let services = service.list_services()?;
    ctx.print(ctx.formatter().format_services(&services));
    Ok(())
}

/// Enables or disables booking of a service.
///
/// # Errors
///
/// Returns an error if the ID does not resolve or the catalog cannot be
/// written.
pub fn set_active(ctx: &Context<'_>, id: &str, active: bool) -> Result<()> {
    let service = ctx.open_service()?;
    let full_id = resolve_service_id(id, &service.list_services()?)?;
    let updated = service.set_service_active(&full_id, active)?;
    ctx.print(ctx.formatter().format_service(&updated));
    Ok(())
}
