//! Output formatting for CLI commands.

pub mod diagnostic;
pub mod table;

use owo_colors::{OwoColorize, Stream};
use swse::EvalWarning;

pub use diagnostic::SheetDiagnostic;

/// Print evaluation warnings to stderr.
pub fn print_warnings(warnings: &[EvalWarning]) {
    for warning in warnings {
        eprintln!(
            "{}: {}",
            "warning".if_supports_color(Stream::Stderr, |text| text.yellow()),
            warning
        );
    }
}
