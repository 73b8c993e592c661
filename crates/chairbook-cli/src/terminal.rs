// Rust guideline compliant 2026-10-19

//! Terminal UI utilities for the Chairbook CLI.

use std::env;
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Determines if colored output should be used.
///
/// Respects the NO_COLOR environment variable and terminal capabilities.
pub fn should_use_color() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    atty::is(atty::Stream::Stderr)
}

/// Writes an error message to stderr, with a red `Error:` prefix when
/// color is enabled.
///
/// Messages that already carry their own prefix (JSON envelopes) are
/// written verbatim.
pub fn print_error(message: &str, use_color: bool) {
    let choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stderr = StandardStream::stderr(choice);

    match message.strip_prefix("Error: ") {
        Some(rest) => {
            let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
            let _ = write!(stderr, "Error:");
            let _ = stderr.reset();
            let _ = writeln!(stderr, " {}", rest);
        }
        None => {
            let _ = writeln!(stderr, "{}", message);
        }
    }
}
