use anyhow::Result;
use pathdiff::diff_paths;
use std::fs::File;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::app::archiver::ArchiveWriter;
use crate::app::classifier::Classifier;
use crate::app::models::{Entry, Outcome, WalkResult};

/// One depth-first pre-order traversal of the source root. Every non-root
/// entry goes through the classifier exactly once; pruned subtrees are never
/// descended into. Per-entry failures are recorded and the walk continues;
/// only output-side failures abort.
pub struct Walker<'a> {
    root: PathBuf,
    classifier: &'a Classifier,
}

impl<'a> Walker<'a> {
    pub fn new(root: PathBuf, classifier: &'a Classifier) -> Self {
        Self { root, classifier }
    }

    /// `archive` is `None` on dry runs; classification and counting run
    /// either way.
    pub fn walk(&self, mut archive: Option<&mut ArchiveWriter>) -> Result<WalkResult> {
        let mut result = WalkResult::default();
        let mut iter = WalkDir::new(&self.root).follow_links(false).into_iter();

        while let Some(next) = iter.next() {
            let entry = match next {
                Ok(entry) => entry,
                Err(err) => {
                    let rel = err
                        .path()
                        .map(|p| self.relative(p))
                        .unwrap_or_else(|| String::from("<unknown>"));
                    log::warn!("Error walking entry {}: {}", rel, err);
                    result.record_skip(&rel, &err.to_string());
                    continue;
                }
            };
            if entry.path() == self.root {
                continue;
            }

            let rel = self.relative(entry.path());
            let name = entry.file_name().to_string_lossy().to_string();
            let is_dir = entry.file_type().is_dir();

            let meta = match entry.metadata() {
                Ok(meta) => meta,
                Err(err) => {
                    log::warn!("Failed to stat {}: {}", rel, err);
                    result.record_skip(&rel, &format!("stat failed: {}", err));
                    if is_dir {
                        iter.skip_current_dir();
                    }
                    continue;
                }
            };
            let size = if is_dir { 0 } else { meta.len() };

            let outcome = self.classifier.classify(&Entry {
                abs_path: entry.path(),
                rel_path: &rel,
                name: &name,
                is_dir,
                size,
            });

            match outcome {
                Outcome::Include if is_dir => {
                    result.dir_count += 1;
                    if let Some(writer) = archive.as_deref_mut() {
                        writer.add_dir(&rel, &meta)?;
                    }
                }
                Outcome::Include => {
                    if let Some(writer) = archive.as_deref_mut() {
                        let mut src = match File::open(entry.path()) {
                            Ok(file) => file,
                            Err(err) => {
                                log::warn!("Failed to open {}: {}", rel, err);
                                result.record_skip(&rel, &format!("read error: {}", err));
                                continue;
                            }
                        };
                        writer.add_file(&rel, &mut src, &meta)?;
                    }
                    result.file_count += 1;
                    result.original_size += size;
                }
                Outcome::Skip(reason) => {
                    log::info!("Skipping {}: {}", rel, reason);
                    result.record_skip(&rel, &reason);
                    // A skipped directory (e.g. hidden) is not descended into.
                    if is_dir {
                        iter.skip_current_dir();
                    }
                }
                Outcome::PruneSubtree(reason) => {
                    log::info!("Pruning {}: {}", rel, reason);
                    result.record_skip(&rel, &reason);
                    iter.skip_current_dir();
                }
            }
        }

        Ok(result)
    }

    fn relative(&self, path: &Path) -> String {
        diff_paths(path, &self.root)
            .unwrap_or_else(|| path.to_path_buf())
            .to_string_lossy()
            .replace('\\', "/")
    }
}
