//! Run reporting and statistics

use std::fmt::Write;

use super::RunReport;

/// Run summary reporter
pub struct RunReporter;

impl RunReporter {
    /// Generate a summary report
    #[must_use]
    pub fn generate_summary(report: &RunReport) -> String {
        let mut output = String::new();
        let totals = report.totals();

        output.push_str("\n=== Configuration Summary ===\n");
        for installation in &report.installations {
            let state = match (installation.modified(), report.dry_run) {
                (false, _) => "unchanged",
                (true, true) => "would update",
                (true, false) => "updated",
            };
            let _ = writeln!(
                output,
                "  {} (PHP {}): {state}",
                installation.path.display(),
                installation.version
            );
        }

        let _ = writeln!(output, "\nInstallations:   {}", report.installations.len());
        if report.dry_run {
            let _ = writeln!(output, "Would bootstrap: {}", report.seeded_count());
        } else {
            let _ = writeln!(output, "Bootstrapped:    {}", report.seeded_count());
        }
        let _ = writeln!(output, "Files written:   {}", report.written_count());
        let _ = writeln!(
            output,
            "Extensions:      {} enabled, {} already enabled, {} not found",
            totals.extensions_enabled, totals.extensions_present, totals.extensions_missing
        );
        let _ = writeln!(
            output,
            "Settings:        {} updated, {} inserted, {} unchanged, {} not found",
            totals.settings_updated,
            totals.settings_inserted,
            totals.settings_unchanged,
            totals.settings_missing
        );

        if report.dry_run {
            output.push_str("\nStatus: ✓ Dry run, no files were changed\n");
        } else {
            output.push_str("\nStatus: ✓ Success\n");
        }

        output
    }
}
