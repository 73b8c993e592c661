// Rust guideline compliant 2026-10-19

//! Implementation of the `chb init` command.
//!
//! Creates the data directory with empty JSONL files and a default
//! `config.toml`. Running it again leaves existing data untouched.

use super::Context;
use anyhow::Result;
use chairbook_app::DataDir;

/// Initializes a Chairbook data directory.
///
/// # Errors
///
/// Returns an error if the directory or its files cannot be created.
pub fn execute(ctx: &Context<'_>) -> Result<()> {
    let data_dir = DataDir::init(ctx.data_dir())?;
    ctx.print(ctx.formatter().format_message(&format!(
        "Chairbook data directory initialized at {}",
        data_dir.root().display()
    )));
    Ok(())
}
