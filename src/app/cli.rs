use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Archive a project tree into a clean zip file"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify every entry under a project directory and write the kept
    /// files into a zip archive
    Archive(ArchiveArgs),
}

#[derive(Args, Debug)]
pub struct ArchiveArgs {
    /// Project directory to archive (defaults to the current directory)
    pub source: Option<PathBuf>,

    /// Path of the zip file to write (defaults to <source dir name>.zip)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Use a predefined set of patterns from presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// Keep dotfiles and dot-directories
    #[arg(long)]
    pub include_hidden: bool,

    /// Keep files classified as binary
    #[arg(long)]
    pub include_binary: bool,

    /// Regex patterns for paths to exclude (e.g. '\.txt$')
    #[arg(long, short = 'e', num_args = 1..)]
    pub exclude: Option<Vec<String>>,

    /// Regex patterns for paths to keep regardless of other rules
    #[arg(long, short = 'i', num_args = 1..)]
    pub include: Option<Vec<String>>,

    /// Plain-text rules file extending the built-in exclusion catalog
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Log every skip decision and its reason
    #[arg(long, short)]
    pub verbose: bool,

    /// Classify and count without writing anything
    #[arg(long)]
    pub dry_run: bool,
}
