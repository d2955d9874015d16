use crate::config::{BINARY_PLACEHOLDER, BinaryPolicy};
use crate::document::DocumentSink;
use crate::error::AppError;
use crate::exclusions::ExclusionSet;
use byte_unit::{Byte, UnitType};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Counters collected while recording a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub files_recorded: usize,
    pub files_excluded: usize,
    pub dirs_pruned: usize,
    pub read_failures: usize,
    pub binary_files: usize,
    pub bytes_read: u64,
}

impl ScanSummary {
    pub fn bytes_read_readable(&self) -> String {
        Byte::from_u128(self.bytes_read as u128)
            .unwrap_or_default()
            .get_appropriate_unit(UnitType::Binary)
            .to_string()
    }
}

struct Listing {
    dirs: Vec<PathBuf>,
    files: Vec<PathBuf>,
}

/// Walks `base_directory` top-down and records every file that survives the
/// exclusions into `sink`.
///
/// Excluded directories are pruned before descent, so nothing beneath them is
/// visited. Files of a directory are recorded before its subdirectories are
/// entered. Read failures become an inline note and never stop the walk.
pub fn record_tree<S: DocumentSink + ?Sized>(
    base_directory: &Path,
    sink: &mut S,
    exclusions: &ExclusionSet,
    binary_policy: BinaryPolicy,
) -> ScanSummary {
    log::info!("Walking directory: {}", base_directory.display());
    let mut summary = ScanSummary::default();
    let mut pending = vec![base_directory.to_path_buf()];

    while let Some(current) = pending.pop() {
        let Listing { mut dirs, files } = list_directory(&current);
        log::debug!(
            "{}: {} subdirectories, {} files",
            current.display(),
            dirs.len(),
            files.len()
        );

        dirs.retain(|dir| {
            let excluded = exclusions.is_dir_excluded(dir);
            if excluded {
                log::trace!("Pruning excluded directory: {}", dir.display());
                summary.dirs_pruned += 1;
            }
            !excluded
        });

        for file_path in files {
            let Some(file_name) = file_path.file_name() else {
                continue;
            };
            if exclusions.is_file_excluded(&file_path, file_name) {
                log::trace!("Skipping excluded file: {}", file_path.display());
                summary.files_excluded += 1;
                continue;
            }
            record_file(base_directory, &file_path, sink, binary_policy, &mut summary);
        }

        // Reversed so the stack pops siblings in listing order.
        pending.extend(dirs.into_iter().rev());
    }

    log::info!(
        "Walk complete: {} files recorded, {} excluded, {} directories pruned, {} unreadable.",
        summary.files_recorded,
        summary.files_excluded,
        summary.dirs_pruned,
        summary.read_failures
    );
    summary
}

fn list_directory(dir: &Path) -> Listing {
    let mut listing = Listing {
        dirs: Vec::new(),
        files: Vec::new(),
    };

    for entry_result in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("{}", AppError::from(e));
                continue;
            }
        };
        let file_type = entry.file_type();
        if file_type.is_dir() {
            listing.dirs.push(entry.into_path());
        } else if file_type.is_symlink() && entry.path().is_dir() {
            log::trace!("Not following directory link: {}", entry.path().display());
        } else {
            listing.files.push(entry.into_path());
        }
    }
    listing
}

fn record_file<S: DocumentSink + ?Sized>(
    base_directory: &Path,
    file_path: &Path,
    sink: &mut S,
    binary_policy: BinaryPolicy,
    summary: &mut ScanSummary,
) {
    let display_path = file_path.display().to_string();
    if log::log_enabled!(log::Level::Trace) {
        let relative = pathdiff::diff_paths(file_path, base_directory)
            .unwrap_or_else(|| file_path.to_path_buf());
        log::trace!("Recording file: {}", relative.display());
    }

    match fs::read_to_string(file_path) {
        Ok(content) => {
            sink.add_paragraph(&format!("File Path: {}", display_path));
            sink.add_paragraph("Content:");
            sink.add_paragraph(&content);
            summary.bytes_read += content.len() as u64;
        }
        Err(e) if e.kind() == io::ErrorKind::InvalidData && binary_policy != BinaryPolicy::Report => {
            summary.binary_files += 1;
            if binary_policy == BinaryPolicy::Skip {
                log::debug!("Skipping non-UTF-8 file: {}", display_path);
                return;
            }
            sink.add_paragraph(&format!("File Path: {}", display_path));
            sink.add_paragraph("Content:");
            sink.add_paragraph(BINARY_PLACEHOLDER);
        }
        Err(e) => {
            log::debug!("Could not read {}: {}", display_path, e);
            if e.kind() == io::ErrorKind::InvalidData {
                summary.binary_files += 1;
            }
            summary.read_failures += 1;
            sink.add_paragraph(&format!("File Path: {}", display_path));
            sink.add_paragraph(&format!("Could not read file {}: {}", display_path, e));
        }
    }
    summary.files_recorded += 1;
    sink.add_page_break();
}
