use anyhow::{Context, Result};
use globset::Glob;
use regex::Regex;

/// Whether a matcher rescues entries or rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternOrigin {
    Include,
    Exclude,
}

#[derive(Debug, Clone)]
enum MatcherKind {
    Glob(globset::GlobMatcher),
    Regex(Regex),
}

/// A compiled pattern. Compilation is the only point of failure; matching is
/// pure and side-effect-free.
#[derive(Debug, Clone)]
pub struct Matcher {
    kind: MatcherKind,
    pub origin: PatternOrigin,
}

impl Matcher {
    pub fn regex(pattern: &str, origin: PatternOrigin) -> Result<Self> {
        let compiled =
            Regex::new(pattern).context(format!("Invalid regex pattern: {}", pattern))?;
        Ok(Self {
            kind: MatcherKind::Regex(compiled),
            origin,
        })
    }

    pub fn glob(pattern: &str, origin: PatternOrigin) -> Result<Self> {
        let compiled = Glob::new(pattern)
            .context(format!("Invalid glob pattern: {}", pattern))?
            .compile_matcher();
        Ok(Self {
            kind: MatcherKind::Glob(compiled),
            origin,
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        match &self.kind {
            MatcherKind::Glob(glob) => glob.is_match(text),
            MatcherKind::Regex(regex) => regex.is_match(text),
        }
    }
}

/// Compiles user-supplied regex patterns, failing on the first invalid one
/// with the offending pattern and its position. Nothing is partially applied.
pub fn compile_patterns(patterns: &[String], origin: PatternOrigin) -> Result<Vec<Matcher>> {
    patterns
        .iter()
        .enumerate()
        .map(|(index, pattern)| {
            Matcher::regex(pattern, origin)
                .context(format!("pattern {} (`{}`) failed to compile", index, pattern))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regex_matcher_matches_paths() {
        let m = Matcher::regex(r"\.txt$", PatternOrigin::Exclude).unwrap();
        assert!(m.is_match("notes/a.txt"));
        assert!(!m.is_match("notes/a.txtx"));
    }

    #[test]
    fn glob_matcher_matches_names() {
        let m = Matcher::glob("*.log", PatternOrigin::Exclude).unwrap();
        assert!(m.is_match("build.log"));
        assert!(!m.is_match("build.log.txt"));
    }

    #[test]
    fn compile_reports_offending_pattern_and_index() {
        let patterns = vec![String::from("ok.*"), String::from("(unclosed")];
        let err = compile_patterns(&patterns, PatternOrigin::Exclude).unwrap_err();
        let text = format!("{:#}", err);
        assert!(text.contains("pattern 1"));
        assert!(text.contains("(unclosed"));
    }

    #[test]
    fn compile_is_all_or_nothing() {
        let good = vec![String::from("a"), String::from("b")];
        assert_eq!(
            compile_patterns(&good, PatternOrigin::Include).unwrap().len(),
            2
        );
    }
}
