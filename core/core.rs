pub mod config;
pub mod document;
pub mod docx;
pub mod error;
pub mod exclusions;
pub mod output_formats;
pub mod walker;

pub use config::{
    BinaryPolicy, DEFAULT_OUTPUT_STEM, DOCUMENT_TITLE, ExclusionConfig, OutputFormat, ScanConfig,
};
pub use document::{Block, Document, DocumentSink};
pub use error::{AppError, Result};
pub use exclusions::{ExclusionKind, ExclusionSet, collect_exclusion_config, collect_exclusions, prompt_line};
pub use walker::{ScanSummary, record_tree};

use std::path::PathBuf;

/// Runs one full scan: title, walk, save. Returns the saved path with the
/// walk summary. Nothing is written unless the whole walk completes.
pub fn generate_document(config: &ScanConfig) -> Result<(PathBuf, ScanSummary)> {
    let exclusions = ExclusionSet::new(&config.exclusions);
    let mut doc = Document::with_title();
    let summary = record_tree(
        &config.target_directory,
        &mut doc,
        &exclusions,
        config.binary_policy,
    );

    let output_path = config.output_path();
    doc.save(&output_path, config.format)?;
    Ok((output_path, summary))
}
