use clap::Parser;
use dirdoc_core::{BinaryPolicy, OutputFormat};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Write the paths and contents of every file in a directory tree into one document.",
    long_about = "dirdoc walks a directory top-down and records each file's path and text content \ninto a single document, with a page break after every file. \nRun without arguments to be prompted for the directory and exclusions.",
    help_template = "{about-section}\nUsage: {usage}\n\n{all-args}{after-help}",
    after_help = "EXAMPLES:\n  dirdoc\n  dirdoc ./project -d node_modules -d .git -x package-lock.json\n  dirdoc ./project -f text -o snapshot.txt --binary skip"
)]
pub struct Cli {
    #[arg(
        value_name = "DIRECTORY",
        help = "Directory to scan. When omitted, the directory and exclusions are prompted for."
    )]
    pub directory: Option<PathBuf>,

    #[arg(
        short = 'd',
        long = "exclude-dir",
        value_name = "NAME",
        requires = "directory",
        help = "Directory (relative to DIRECTORY) whose whole subtree is skipped. Repeatable.",
        help_heading = "Exclusions"
    )]
    pub exclude_dirs: Vec<String>,

    #[arg(
        short = 'x',
        long = "exclude-file",
        value_name = "NAME",
        requires = "directory",
        help = "File to skip, matched by path under DIRECTORY or by bare name anywhere. Repeatable.",
        help_heading = "Exclusions"
    )]
    pub exclude_files: Vec<String>,

    #[arg(
        short = 'o',
        long,
        value_name = "PATH",
        help = "Output file (default: DIRECTORY/file_contents.<ext>).",
        help_heading = "Output Control"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_name = "FORMAT",
        default_value = "docx",
        help = "Output document format: docx, text or html.",
        help_heading = "Output Control"
    )]
    pub format: OutputFormat,

    #[arg(
        long,
        value_name = "POLICY",
        default_value = "report",
        help = "How to record files that are not valid UTF-8: report, placeholder or skip.",
        help_heading = "Output Control"
    )]
    pub binary: BinaryPolicy,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase message verbosity (-v, -vv).")]
    pub verbose: u8,

    #[arg(short, long, help = "Silence informational messages and warnings.")]
    pub quiet: bool,
}
