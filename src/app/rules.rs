use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Directories that never belong in a source archive.
const DEFAULT_EXCLUDE_DIRS: &[&str] = &[
    // Version control
    ".git",
    ".svn",
    ".hg",
    ".bzr",
    // Dependencies
    "node_modules",
    "bower_components",
    "vendor",
    ".venv",
    "venv",
    "env",
    ".bundle",
    // Build output
    "target",
    "build",
    "dist",
    "out",
    "bin",
    "obj",
    "_build",
    "coverage",
    // IDE / editor metadata
    ".idea",
    ".vscode",
    ".vs",
    ".fleet",
    // Caches
    "__pycache__",
    ".cache",
    ".pytest_cache",
    ".mypy_cache",
    ".ruff_cache",
    ".tox",
    ".gradle",
    ".sass-cache",
    ".parcel-cache",
    ".turbo",
];

/// Junk files matched against the bare file name.
const DEFAULT_EXCLUDE_FILES: &[&str] = &[
    // OS metadata
    ".DS_Store",
    "Thumbs.db",
    "desktop.ini",
    // Lock files
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "Cargo.lock",
    "poetry.lock",
    "Gemfile.lock",
    "composer.lock",
    // Editor swap files
    "*.swp",
    "*.swo",
    "*~",
    // Logs and temporaries
    "*.log",
    "*.tmp",
    "*.temp",
    "*.bak",
    "*.orig",
];

/// Extensions treated as binary without looking at content. Lowercase, with
/// the leading dot.
const DEFAULT_BINARY_EXTENSIONS: &[&str] = &[
    // Executables and libraries
    ".exe", ".dll", ".so", ".dylib", ".bin", ".msi", ".app",
    // Archives
    ".zip", ".tar", ".gz", ".tgz", ".bz2", ".xz", ".7z", ".rar", ".jar", ".war",
    // Images
    ".png", ".jpg", ".jpeg", ".gif", ".bmp", ".ico", ".tif", ".tiff", ".webp", ".heic",
    // Audio
    ".mp3", ".wav", ".flac", ".ogg", ".m4a", ".aac", ".wma",
    // Video
    ".mp4", ".avi", ".mkv", ".mov", ".wmv", ".webm", ".flv", ".m4v",
    // Fonts
    ".ttf", ".otf", ".woff", ".woff2", ".eot",
    // Office documents
    ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".odt", ".ods",
    // Compiled bytecode and objects
    ".pyc", ".pyo", ".class", ".o", ".a", ".obj", ".lib", ".wasm",
    // Databases
    ".db", ".sqlite", ".sqlite3",
];

/// The authoritative exclusion catalog: built-in defaults optionally extended
/// (never replaced) by a user override file. Immutable once construction ends.
#[derive(Debug, Clone)]
pub struct RuleSet {
    exclude_dir_names: BTreeSet<String>,
    exclude_file_globs: BTreeSet<String>,
    binary_extensions: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    ExcludeDirs,
    ExcludeFiles,
    BinaryExtensions,
    Unknown,
}

impl RuleSet {
    pub fn built_in() -> Self {
        Self {
            exclude_dir_names: DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect(),
            exclude_file_globs: DEFAULT_EXCLUDE_FILES.iter().map(|s| s.to_string()).collect(),
            binary_extensions: DEFAULT_BINARY_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Merges a section-delimited override file into the defaults. Parsing is
    /// deliberately tolerant: unknown sections and malformed lines are
    /// ignored; only failing to read the file is fatal.
    pub fn merge_override_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read override file {:?}", path))?;
        self.merge_override_text(&content);
        Ok(())
    }

    fn merge_override_text(&mut self, content: &str) {
        let mut section = Section::Unknown;
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                section = match name.trim() {
                    "exclude_dirs" => Section::ExcludeDirs,
                    "exclude_files" => Section::ExcludeFiles,
                    "binary_extensions" => Section::BinaryExtensions,
                    other => {
                        log::debug!("Ignoring unknown override section [{}]", other);
                        Section::Unknown
                    }
                };
                continue;
            }
            match section {
                Section::ExcludeDirs => {
                    self.exclude_dir_names.insert(line.to_string());
                }
                Section::ExcludeFiles => {
                    self.exclude_file_globs.insert(line.to_string());
                }
                Section::BinaryExtensions => {
                    self.binary_extensions.insert(normalize_extension(line));
                }
                Section::Unknown => {
                    log::debug!("Ignoring override line outside known section: {}", line);
                }
            }
        }
    }

    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.exclude_dir_names.contains(name)
    }

    pub fn is_binary_extension(&self, dotted_lowercase: &str) -> bool {
        self.binary_extensions.contains(dotted_lowercase)
    }

    pub fn exclude_file_globs(&self) -> impl Iterator<Item = &str> {
        self.exclude_file_globs.iter().map(|s| s.as_str())
    }
}

/// `png` and `.PNG` both normalize to `.png`.
fn normalize_extension(raw: &str) -> String {
    let lower = raw.to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{}", lower)
    }
}
