use std::path::{Path, PathBuf};

/// Represents the final configuration after merging presets and CLI args.
/// Built once per invocation, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub source_path: PathBuf,
    pub output_file: PathBuf,
    pub include_hidden: bool,
    pub include_binary: bool,
    pub override_file: Option<PathBuf>,
    pub exclude_patterns: Vec<String>,
    pub include_patterns: Vec<String>,
    pub verbose: bool,
    pub dry_run: bool,
}

/// Decision for a single visited entry, produced by the classifier and
/// consumed by the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Include,
    /// Skip this entry; siblings are still visited.
    Skip(String),
    /// Skip this directory and everything beneath it.
    PruneSubtree(String),
}

/// A single entry handed to the classifier: root-relative path with `/`
/// separators, bare name, and the metadata the decision needs.
#[derive(Debug)]
pub struct Entry<'a> {
    pub abs_path: &'a Path,
    pub rel_path: &'a str,
    pub name: &'a str,
    pub is_dir: bool,
    pub size: u64,
}

/// Statistics accumulated over one walk. Zeroed at run start, read-only once
/// the run ends. `compressed_size` stays zero on dry runs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WalkResult {
    pub file_count: u64,
    pub dir_count: u64,
    pub skipped_count: u64,
    pub original_size: u64,
    pub compressed_size: u64,
    pub skipped_files: Vec<String>,
}

impl WalkResult {
    pub fn record_skip(&mut self, rel_path: &str, reason: &str) {
        self.skipped_count += 1;
        self.skipped_files.push(format!("{} ({})", rel_path, reason));
    }

    /// Total non-root entries this walk resolved one way or the other.
    pub fn visited_entries(&self) -> u64 {
        self.file_count + self.dir_count + self.skipped_count
    }
}
