//! Human-readable run summary.

use std::fmt::Write;

use crate::report::ProcessingReport;

/// Render the end-of-run summary for a report.
///
/// Per-file errors are listed after the totals; they are informational and
/// do not affect the exit code.
pub fn render(report: &ProcessingReport) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "📊 Processing Summary:");
    let _ = writeln!(out, "   Files processed: {}", report.total_files);
    let _ = writeln!(out, "   Animations exported: {}", report.total_animations);
    let _ = writeln!(out, "   Naming scheme: {}", report.naming_scheme);

    let mut errors = report.errors().peekable();
    if errors.peek().is_some() {
        let _ = writeln!(out, "\n⚠️  Errors encountered:");
        for (file, error) in errors {
            let name = file.file_name().map_or_else(
                || file.display().to_string(),
                |n| n.to_string_lossy().into_owned(),
            );
            let _ = writeln!(out, "   • {name}: {error}");
        }
    }

    out
}
