use crate::config::ExclusionConfig;
use crate::error::{AppError, Result};
use std::collections::HashSet;
use std::ffi::OsStr;
use std::fmt;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionKind {
    Directories,
    Files,
}

impl fmt::Display for ExclusionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionKind::Directories => f.write_str("directories"),
            ExclusionKind::Files => f.write_str("files"),
        }
    }
}

/// Writes `prompt`, flushes, and reads one line with its terminator removed.
///
/// End of input is an error: a pending prompt cannot be answered.
pub fn prompt_line<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    if read == 0 {
        return Err(AppError::Input(format!(
            "Input ended while waiting for: {}",
            prompt.trim_end()
        )));
    }
    let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed_len);
    Ok(line)
}

/// Interactively collects exclusion entries of one kind.
///
/// A count that is not an integer prints a notice and yields no exclusions.
pub fn collect_exclusions<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    base_directory: &Path,
    kind: ExclusionKind,
) -> Result<Vec<PathBuf>> {
    let answer = prompt_line(
        input,
        output,
        &format!("Enter number of {} to ignore (0 for none): ", kind),
    )?;

    let count = match answer.trim().parse::<i64>() {
        Ok(n) => n.max(0),
        Err(e) => {
            log::warn!("Exclusion count '{}' is not a number: {}", answer, e);
            writeln!(output, "Invalid number, ignoring {}.", kind)?;
            return Ok(Vec::new());
        }
    };
    log::debug!("Collecting {} {} to ignore", count, kind);

    let mut items = Vec::new();
    for i in 1..=count {
        let name = prompt_line(input, output, &format!("Enter {} name {}: ", kind, i))?;
        match kind {
            ExclusionKind::Directories => items.push(base_directory.join(&name)),
            ExclusionKind::Files => {
                items.push(base_directory.join(&name));
                items.push(PathBuf::from(name));
            }
        }
    }
    Ok(items)
}

/// Prompts for directories, then files, and assembles the exclusion config.
pub fn collect_exclusion_config<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    base_directory: &Path,
) -> Result<ExclusionConfig> {
    let excluded_dirs = collect_exclusions(input, output, base_directory, ExclusionKind::Directories)?;
    let excluded_files = collect_exclusions(input, output, base_directory, ExclusionKind::Files)?;
    Ok(ExclusionConfig {
        excluded_dirs,
        excluded_files,
    })
}

/// Lookup view over an [`ExclusionConfig`].
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    dirs: HashSet<PathBuf>,
    files: HashSet<PathBuf>,
}

impl ExclusionSet {
    pub fn new(config: &ExclusionConfig) -> Self {
        Self {
            dirs: config.excluded_dirs.iter().cloned().collect(),
            files: config.excluded_files.iter().cloned().collect(),
        }
    }

    pub fn is_dir_excluded(&self, dir_path: &Path) -> bool {
        self.dirs.contains(dir_path)
    }

    pub fn is_file_excluded(&self, file_path: &Path, file_name: &OsStr) -> bool {
        self.files.contains(file_path) || self.files.contains(Path::new(file_name))
    }
}
