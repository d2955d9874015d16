use crate::error::{AppError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_OUTPUT_STEM: &str = "file_contents";
pub const DOCUMENT_TITLE: &str = "File Paths and Contents";
pub const BINARY_PLACEHOLDER: &str = "[binary file, not shown]";

/// Paths and names to leave out of the walk.
///
/// Directory entries are full paths (target joined with the entered name).
/// File entries hold both the joined path and the bare name for every
/// excluded file, so a bare name matches at any depth.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExclusionConfig {
    pub excluded_dirs: Vec<PathBuf>,
    pub excluded_files: Vec<PathBuf>,
}

impl ExclusionConfig {
    pub fn from_names<D, F>(base_directory: &Path, dir_names: D, file_names: F) -> Self
    where
        D: IntoIterator,
        D::Item: AsRef<str>,
        F: IntoIterator,
        F::Item: AsRef<str>,
    {
        let excluded_dirs = dir_names
            .into_iter()
            .map(|name| base_directory.join(name.as_ref()))
            .collect();
        let excluded_files = file_names
            .into_iter()
            .flat_map(|name| {
                let name = name.as_ref();
                [base_directory.join(name), PathBuf::from(name)]
            })
            .collect();
        Self {
            excluded_dirs,
            excluded_files,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.excluded_dirs.is_empty() && self.excluded_files.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Docx,
    Text,
    Html,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Docx => "docx",
            OutputFormat::Text => "txt",
            OutputFormat::Html => "html",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "docx" | "word" => Ok(OutputFormat::Docx),
            "text" | "txt" => Ok(OutputFormat::Text),
            "html" | "htm" => Ok(OutputFormat::Html),
            other => Err(AppError::InvalidArgument(format!(
                "Unknown output format '{}'. Use docx, text or html.",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Docx => "docx",
            OutputFormat::Text => "text",
            OutputFormat::Html => "html",
        };
        f.write_str(name)
    }
}

/// What to do with files that are not valid UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinaryPolicy {
    /// Record the decode failure like any other read error.
    #[default]
    Report,
    /// Record the path with a placeholder instead of content.
    Placeholder,
    /// Leave the file out of the document entirely.
    Skip,
}

impl FromStr for BinaryPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "report" | "error" => Ok(BinaryPolicy::Report),
            "placeholder" => Ok(BinaryPolicy::Placeholder),
            "skip" => Ok(BinaryPolicy::Skip),
            other => Err(AppError::InvalidArgument(format!(
                "Unknown binary policy '{}'. Use report, placeholder or skip.",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub target_directory: PathBuf,
    pub exclusions: ExclusionConfig,
    pub format: OutputFormat,
    pub binary_policy: BinaryPolicy,
    pub output: Option<PathBuf>,
}

impl ScanConfig {
    pub fn new(target_directory: impl Into<PathBuf>) -> Self {
        Self {
            target_directory: target_directory.into(),
            exclusions: ExclusionConfig::default(),
            format: OutputFormat::default(),
            binary_policy: BinaryPolicy::default(),
            output: None,
        }
    }

    /// Explicit output path if one was given, else
    /// `<target>/file_contents.<ext>`.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => self.target_directory.join(format!(
                "{}.{}",
                DEFAULT_OUTPUT_STEM,
                self.format.extension()
            )),
        }
    }
}
