use anyhow::{Context, Result};
use std::fs::{self, File, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Streams included entries into one zip container. Expects `/`-separated
/// entry paths from the walker. Dropping the writer on a failed run still
/// closes the underlying file handle.
pub struct ArchiveWriter {
    writer: ZipWriter<File>,
    output_path: PathBuf,
}

impl ArchiveWriter {
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .context(format!("Failed to create output directory {:?}", parent))?;
            }
        }
        let file =
            File::create(path).context(format!("Failed to create archive file {:?}", path))?;
        Ok(Self {
            writer: ZipWriter::new(file),
            output_path: path.to_path_buf(),
        })
    }

    pub fn add_dir(&mut self, rel_path: &str, meta: &Metadata) -> Result<()> {
        self.writer
            .add_directory(format!("{}/", rel_path), options_for(meta))
            .context(format!("Failed to add directory {} to archive", rel_path))?;
        Ok(())
    }

    /// The caller opens the source file so that open failures stay per-entry
    /// recoverable; errors from here on are treated as fatal output errors.
    pub fn add_file(&mut self, rel_path: &str, src: &mut File, meta: &Metadata) -> Result<()> {
        self.writer
            .start_file(rel_path, options_for(meta))
            .context(format!("Failed to start archive entry {}", rel_path))?;
        io::copy(src, &mut self.writer)
            .context(format!("Failed to write archive entry {}", rel_path))?;
        Ok(())
    }

    /// Flushes the central directory, closes the file, and reports the final
    /// archive size on disk.
    pub fn finish(mut self) -> Result<u64> {
        let file = self
            .writer
            .finish()
            .context("Failed to finalize archive")?;
        drop(file);
        let meta = fs::metadata(&self.output_path)
            .context(format!("Failed to stat archive {:?}", self.output_path))?;
        Ok(meta.len())
    }
}

/// Deflate for everything; entry mtime taken from the filesystem when the
/// platform reports one.
fn options_for(meta: &Metadata) -> SimpleFileOptions {
    let mut options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    if let Ok(modified) = meta.modified() {
        if let Ok(mtime) = zip::DateTime::try_from(time::OffsetDateTime::from(modified)) {
            options = options.last_modified_time(mtime);
        }
    }
    options
}
