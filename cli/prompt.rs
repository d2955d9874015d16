use crate::cli_args::Cli;
use anyhow::{Context, Result};
use dirdoc_core::{ExclusionConfig, ScanConfig, collect_exclusion_config, prompt_line};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Builds the scan configuration from the command line, prompting on
/// `input`/`output` for anything a bare invocation leaves open.
pub fn resolve_scan_config<R: BufRead, W: Write>(
    cli: &Cli,
    input: &mut R,
    output: &mut W,
) -> Result<ScanConfig> {
    let (target_directory, exclusions) = match &cli.directory {
        Some(dir) => {
            log::debug!("Using directory from command line: {}", dir.display());
            let exclusions = ExclusionConfig::from_names(dir, &cli.exclude_dirs, &cli.exclude_files);
            (dir.clone(), exclusions)
        }
        None => {
            let answer = prompt_line(input, output, "Enter the directory path: ")
                .context("Failed to read the directory path")?;
            let dir = PathBuf::from(answer);
            let exclusions = collect_exclusion_config(input, output, &dir)
                .context("Failed to read exclusions")?;
            (dir, exclusions)
        }
    };
    log::debug!("Exclusions: {:?}", exclusions);

    let mut config = ScanConfig::new(target_directory);
    config.exclusions = exclusions;
    config.format = cli.format;
    config.binary_policy = cli.binary;
    config.output = cli.output.clone();
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use dirdoc_core::{BinaryPolicy, OutputFormat};
    use std::io::Cursor;

    fn resolve(args: &[&str], script: &str) -> (Result<ScanConfig>, String) {
        let cli = Cli::parse_from(args);
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut output = Vec::new();
        let config = resolve_scan_config(&cli, &mut input, &mut output);
        (config, String::from_utf8(output).unwrap())
    }

    #[test]
    fn bare_invocation_prompts_in_order() {
        let (config, transcript) = resolve(&["dirdoc"], "proj\n1\nnode_modules\n1\n.env\n");
        let config = config.unwrap();

        assert_eq!(config.target_directory, PathBuf::from("proj"));
        assert_eq!(config.exclusions.excluded_dirs, vec![PathBuf::from("proj/node_modules")]);
        assert_eq!(
            config.exclusions.excluded_files,
            vec![PathBuf::from("proj/.env"), PathBuf::from(".env")]
        );
        assert_eq!(config.output_path(), PathBuf::from("proj/file_contents.docx"));
        assert_eq!(
            transcript,
            "Enter the directory path: \
             Enter number of directories to ignore (0 for none): \
             Enter directories name 1: \
             Enter number of files to ignore (0 for none): \
             Enter files name 1: "
        );
    }

    #[test]
    fn invalid_count_continues_with_no_exclusions() {
        let (config, transcript) = resolve(&["dirdoc"], "proj\nabc\n0\n");
        let config = config.unwrap();
        assert!(config.exclusions.is_empty());
        assert!(transcript.contains("Invalid number, ignoring directories.\n"));
    }

    #[test]
    fn interrupted_input_is_an_error() {
        let (config, _) = resolve(&["dirdoc"], "proj\n");
        assert!(config.is_err());
    }

    #[test]
    fn directory_argument_skips_prompts() {
        let (config, transcript) = resolve(
            &["dirdoc", "proj", "-d", "target", "-x", "Cargo.lock", "-f", "text", "--binary", "skip"],
            "",
        );
        let config = config.unwrap();

        assert!(transcript.is_empty());
        assert_eq!(config.exclusions.excluded_dirs, vec![PathBuf::from("proj/target")]);
        assert_eq!(config.exclusions.excluded_files.len(), 2);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.binary_policy, BinaryPolicy::Skip);
        assert_eq!(config.output_path(), PathBuf::from("proj/file_contents.txt"));
    }

    #[test]
    fn end_to_end_writes_the_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "hello").unwrap();
        let script = format!("{}\n0\n0\n", dir.path().display());

        let (config, _) = resolve(&["dirdoc"], &script);
        let (saved, summary) = dirdoc_core::generate_document(&config.unwrap()).unwrap();

        assert_eq!(saved, dir.path().join("file_contents.docx"));
        assert!(saved.is_file());
        assert_eq!(summary.files_recorded, 1);
    }
}
