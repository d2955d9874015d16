use colored::*;
use dirdoc_core::ScanSummary;
use std::path::Path;

pub fn print_saved(output_path: &Path) {
    println!(
        "Document saved as: {}",
        output_path.display().to_string().blue()
    );
}

pub fn print_summary(summary: &ScanSummary, quiet: bool) {
    if quiet {
        return;
    }
    eprintln!(
        "{} {} files recorded ({}), {} excluded, {} directories pruned",
        "✅".green(),
        summary.files_recorded,
        summary.bytes_read_readable(),
        summary.files_excluded,
        summary.dirs_pruned
    );
    if summary.read_failures > 0 {
        eprintln!(
            "{} {} files could not be read and were noted in the document",
            "⚠️".yellow(),
            summary.read_failures
        );
    }
}
