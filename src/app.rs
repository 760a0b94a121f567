// Declare modules
pub mod archiver;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod matcher;
pub mod models;
pub mod rules;
pub mod walker;

use anyhow::Result;
use clap::Parser;
use humansize::{format_size, BINARY};

use self::archiver::ArchiveWriter;
use self::classifier::Classifier;
use self::cli::{Cli, Command};
use self::config::resolve_config;
use self::models::{Config, WalkResult};
use self::rules::RuleSet;
use self::walker::Walker;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let cli = Cli::parse();
    let Command::Archive(args) = cli.command;

    let level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    // 2. Resolve Configuration (presets + CLI)
    let config = resolve_config(args)?;

    // 3. Build the rule catalog and classifier once
    let mut rules = RuleSet::built_in();
    if let Some(path) = &config.override_file {
        rules.merge_override_file(path)?;
    }
    let classifier = Classifier::new(rules, &config)?;
    let walker = Walker::new(config.source_path.clone(), &classifier);

    // 4. Walk. On dry runs no writer exists and nothing touches the disk.
    let result = if config.dry_run {
        walker.walk(None)?
    } else {
        let mut writer = ArchiveWriter::create(&config.output_file)?;
        let mut result = walker.walk(Some(&mut writer))?;
        result.compressed_size = writer.finish()?;
        result
    };

    // 5. Report
    print_summary(&config, &result);

    Ok(())
}

fn print_summary(config: &Config, result: &WalkResult) {
    if config.dry_run {
        println!("Dry run: no archive written.");
    } else {
        println!("Archive written to {}", config.output_file.display());
    }
    println!("  files included:  {}", result.file_count);
    println!("  dirs included:   {}", result.dir_count);
    println!("  entries skipped: {}", result.skipped_count);
    println!(
        "  original size:   {}",
        format_size(result.original_size, BINARY)
    );
    if !config.dry_run {
        println!(
            "  archive size:    {}",
            format_size(result.compressed_size, BINARY)
        );
    }
    if config.verbose && !result.skipped_files.is_empty() {
        println!("  skipped entries:");
        for line in &result.skipped_files {
            println!("    {}", line);
        }
    }
}
