use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Bundle text files into a single Markdown document.",
    long_about = "mdbundle walks the given paths, filters out binary, hidden and \nignored files, and concatenates the rest into one Markdown document with \nper-file headers and language-tagged code fences. It also ships small text \nutilities: a Markdown table generator and a punctuation style converter.",
    after_help = "EXAMPLES:\n  mdbundle bundle src docs -o bundle.md\n  mdbundle bundle --config mdbundle.json\n  mdbundle table Name Age City\n  mdbundle punct --to en notes.md",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Increase message verbosity (-v, -vv).")]
    pub verbose: u8,

    #[arg(
        short,
        long,
        global = true,
        help = "Silence informational messages and warnings."
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    #[command(
        visible_alias = "b",
        about = "Collect text files and concatenate them into one Markdown file."
    )]
    Bundle(BundleArgs),

    #[command(about = "Write a default bundle config file into a directory.")]
    Init(InitArgs),

    #[command(visible_alias = "t", about = "Generate a Markdown table skeleton.")]
    Table(TableArgs),

    #[command(
        visible_alias = "p",
        about = "Convert punctuation style between full-width and ASCII."
    )]
    Punct(PunctArgs),

    #[command(about = "Generate shell completion scripts.")]
    Completion(CompletionArgs),
}

#[derive(Args, Debug, Clone)]
pub struct BundleArgs {
    #[arg(
        value_name = "PATH",
        help = "Root files or directories to collect from.",
        help_heading = "Inputs"
    )]
    pub paths: Vec<PathBuf>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        required_unless_present = "config",
        help = "Path of the Markdown file to write.",
        help_heading = "Inputs"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        long,
        value_name = "FILE",
        help = "Drive the bundle from a JSON config document. Positional paths are appended.",
        help_heading = "Inputs"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        help = "Bypass on-disk .gitignore files (custom --ignore patterns still apply).",
        help_heading = "Filtering"
    )]
    pub ignore_git: bool,

    #[arg(
        long,
        help = "Include entries whose name starts with a dot.",
        help_heading = "Filtering"
    )]
    pub include_hidden: bool,

    #[arg(long = "ignore", value_name = "PATTERN", action = clap::ArgAction::Append, help = "Extra gitignore-syntax exclude pattern (repeatable).", help_heading = "Filtering")]
    pub ignores: Vec<String>,

    #[arg(long = "prefix", value_name = "LINE", action = clap::ArgAction::Append, help = "Line prepended to the output (repeatable).", help_heading = "Output Formatting")]
    pub prefix: Vec<String>,

    #[arg(
        long,
        value_name = "DIR",
        help = "Base directory used to compute relative section titles.",
        help_heading = "Output Formatting"
    )]
    pub base_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    #[arg(
        value_name = "DIR",
        default_value = ".",
        help = "Directory the config file is written into."
    )]
    pub dir: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    #[arg(
        value_name = "COLUMN",
        help = "Column names; entries are also split on commas and whitespace."
    )]
    pub columns: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct PunctArgs {
    #[arg(
        long,
        value_name = "STYLE",
        value_parser = ["en", "zh"],
        help = "Target punctuation style: 'en' (ASCII) or 'zh' (full-width)."
    )]
    pub to: String,

    #[arg(
        value_name = "FILE",
        help = "File to convert in place. Reads stdin and writes stdout when omitted."
    )]
    pub file: Option<PathBuf>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        requires = "file",
        help = "Write the converted text here instead of back into FILE."
    )]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionArgs {
    #[arg(
        long,
        value_name = "SHELL",
        help = "Shell to generate completions for (fish, bash, zsh) [default: fish]"
    )]
    pub shell: Option<String>,
}
