use anyhow::Result;
use std::fs::File;
use std::io::{self, Read};

use crate::app::matcher::{compile_patterns, Matcher, PatternOrigin};
use crate::app::models::{Config, Entry, Outcome};
use crate::app::rules::RuleSet;

/// Files larger than this with an unrecognized extension are never
/// content-sniffed and default to text.
pub const SNIFF_MAX_FILE_SIZE: u64 = 8192;
/// How many leading bytes the sniffer reads when it does run.
pub const SNIFF_READ_LEN: usize = 512;

/// Decides, per entry, whether to include it, skip it, or prune the whole
/// subtree. Built once per run from the rule catalog and the user's patterns;
/// pure apart from the bounded sniff read.
pub struct Classifier {
    rules: RuleSet,
    file_glob_matchers: Vec<Matcher>,
    include_matchers: Vec<Matcher>,
    exclude_matchers: Vec<Matcher>,
    include_hidden: bool,
    include_binary: bool,
}

impl Classifier {
    pub fn new(rules: RuleSet, config: &Config) -> Result<Self> {
        let include_matchers = compile_patterns(&config.include_patterns, PatternOrigin::Include)?;
        let exclude_matchers = compile_patterns(&config.exclude_patterns, PatternOrigin::Exclude)?;

        // Catalog globs match file names. Malformed globs from an override
        // file fall under the same tolerant policy as malformed lines.
        let mut file_glob_matchers = Vec::new();
        for glob in rules.exclude_file_globs() {
            match Matcher::glob(glob, PatternOrigin::Exclude) {
                Ok(matcher) => file_glob_matchers.push(matcher),
                Err(err) => log::debug!("Ignoring malformed file glob `{}`: {:#}", glob, err),
            }
        }

        Ok(Self {
            rules,
            file_glob_matchers,
            include_matchers,
            exclude_matchers,
            include_hidden: config.include_hidden,
            include_binary: config.include_binary,
        })
    }

    /// Evaluates the precedence chain: include patterns override everything,
    /// then the hidden check, then directory exclusion (pruning), then file
    /// exclusion, then the binary check.
    pub fn classify(&self, entry: &Entry) -> Outcome {
        if self
            .include_matchers
            .iter()
            .any(|m| m.is_match(entry.rel_path))
        {
            return Outcome::Include;
        }

        if !self.include_hidden && entry.name.starts_with('.') {
            return Outcome::Skip("hidden".to_string());
        }

        if entry.is_dir {
            if self.rules.is_excluded_dir(entry.name)
                || self
                    .exclude_matchers
                    .iter()
                    .any(|m| m.is_match(entry.rel_path))
            {
                return Outcome::PruneSubtree("excluded directory".to_string());
            }
            return Outcome::Include;
        }

        if self
            .file_glob_matchers
            .iter()
            .any(|m| m.is_match(entry.name))
            || self
                .exclude_matchers
                .iter()
                .any(|m| m.is_match(entry.rel_path))
        {
            return Outcome::Skip("excluded file pattern".to_string());
        }

        if !self.include_binary {
            match self.is_binary(entry) {
                Ok(true) => return Outcome::Skip("binary".to_string()),
                Ok(false) => {}
                Err(err) => return Outcome::Skip(format!("read error: {}", err)),
            }
        }

        Outcome::Include
    }

    /// Extension lookup first; unknown extensions on small files get a
    /// bounded NUL-byte sniff. Larger unknown files default to text.
    fn is_binary(&self, entry: &Entry) -> io::Result<bool> {
        if let Some((_, ext)) = entry.name.rsplit_once('.') {
            if !ext.is_empty()
                && self
                    .rules
                    .is_binary_extension(&format!(".{}", ext.to_lowercase()))
            {
                return Ok(true);
            }
        }

        if entry.size == 0 || entry.size > SNIFF_MAX_FILE_SIZE {
            return Ok(false);
        }

        let file = File::open(entry.abs_path)?;
        let mut prefix = Vec::with_capacity(SNIFF_READ_LEN);
        file.take(SNIFF_READ_LEN as u64).read_to_end(&mut prefix)?;
        Ok(prefix.contains(&0))
    }
}
