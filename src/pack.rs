use anyhow::{Context, Result};
use chrono::{Datelike, Local, Timelike};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::path::sanitize_entry_name;
use crate::vfs::StagedArchive;

/// Collects files and writes them out as a fresh archive
pub struct ArchivePacker {
    /// Entry name -> content, kept sorted so output is deterministic
    files: BTreeMap<String, Vec<u8>>,
    compression: CompressionMethod,
}

impl ArchivePacker {
    /// Create an empty packer that deflates its entries
    pub fn new() -> Self {
        Self {
            files: BTreeMap::new(),
            compression: CompressionMethod::Deflated,
        }
    }

    /// Set the compression method used for every entry
    pub fn compression(mut self, method: CompressionMethod) -> Self {
        self.compression = method;
        self
    }

    /// Add a file under a sanitized entry name. A repeated name replaces the
    /// earlier content.
    pub fn add_file(&mut self, raw_name: &str, data: &[u8]) -> Result<()> {
        let name = sanitize_entry_name(raw_name)
            .with_context(|| format!("Refusing to pack entry: {}", raw_name))?;
        self.files.insert(name, data.to_vec());
        Ok(())
    }

    /// Add every regular file below `root`, named by its path relative to
    /// `root`. Returns how many files were added.
    pub fn add_dir(&mut self, root: &Path) -> Result<usize> {
        let mut added = 0;
        for entry in WalkDir::new(root).follow_links(false) {
            let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(root)
                .context("Walked outside the source directory")?;
            let data = fs::read(entry.path())
                .with_context(|| format!("Failed to read {}", entry.path().display()))?;
            self.add_file(&relative.to_string_lossy(), &data)?;
            added += 1;
        }

        debug!(root = %root.display(), added, "directory packed");
        Ok(added)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Write the archive to `output_path`.
    ///
    /// The archive is assembled in a temp file beside the target and renamed
    /// into place, so an existing file at `output_path` is only replaced by a
    /// complete archive.
    pub fn write_to_file(&self, output_path: &Path) -> Result<usize> {
        let staged = StagedArchive::beside(output_path);
        let file = File::create(staged.path())
            .with_context(|| format!("Failed to create {}", staged.path().display()))?;
        let mut zip = ZipWriter::new(file);

        let now = Local::now();
        let options = SimpleFileOptions::default()
            .compression_method(self.compression)
            .unix_permissions(0o644)
            .last_modified_time(
                zip::DateTime::from_date_and_time(
                    now.year() as u16,
                    now.month() as u8,
                    now.day() as u8,
                    now.hour() as u8,
                    now.minute() as u8,
                    now.second() as u8,
                )
                .unwrap_or_default(),
            );

        for (name, data) in &self.files {
            zip.start_file(name.as_str(), options)
                .with_context(|| format!("Failed to start entry {}", name))?;
            zip.write_all(data)
                .with_context(|| format!("Failed to write entry {}", name))?;
        }

        let file = zip.finish().context("Failed to finalize ZIP file")?;
        file.sync_all().context("Failed to flush archive to disk")?;
        drop(file);

        staged
            .commit(output_path)
            .with_context(|| format!("Failed to move archive into {}", output_path.display()))?;

        info!(output = %output_path.display(), entries = self.files.len(), "archive written");
        Ok(self.files.len())
    }
}

impl Default for ArchivePacker {
    fn default() -> Self {
        Self::new()
    }
}
