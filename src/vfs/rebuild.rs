//! Copy-on-write rewrite of the container.
//!
//! Zip has no in-place delete, so removal builds a fresh container beside
//! the original and swaps it in with a single rename. Until that rename
//! the original file is never opened for writing.

use std::fs::{self, File};
use std::io::{self, Read, Seek};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;
use zip::{ZipArchive, ZipWriter};

use super::VfsError;
use crate::path::normalize_entry_name;

/// Temporary container that is deleted unless committed
pub(crate) struct StagedArchive {
    path: PathBuf,
    armed: bool,
}

impl StagedArchive {
    /// Reserve a temp path in the same directory as `target`, so the final
    /// rename never crosses filesystems
    pub(crate) fn beside(target: &Path) -> Self {
        let file_name = target
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "archive.zip".to_string());
        let parent = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let path = parent.join(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));
        Self { path, armed: true }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Atomically replace `target` with the staged container
    pub(crate) fn commit(mut self, target: &Path) -> io::Result<()> {
        fs::rename(&self.path, target)?;
        self.armed = false;
        debug!(target = %target.display(), "staged archive committed");
        Ok(())
    }
}

impl Drop for StagedArchive {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), error = %e, "failed to clean up staged archive");
            }
        }
    }
}

/// Copy every entry whose normalized name does not start with `prefix`
/// into the staged container, byte-for-byte.
///
/// Compressed data, compression method, CRC and timestamps are carried over
/// untouched. Returns how many entries were left out.
pub(crate) fn copy_without<R: Read + Seek>(
    source: &mut ZipArchive<R>,
    staged: &StagedArchive,
    prefix: &str,
) -> Result<usize, VfsError> {
    let file = File::create(staged.path())?;
    let mut writer = ZipWriter::new(file);
    let mut removed = 0;

    for index in 0..source.len() {
        let entry = source.by_index_raw(index)?;
        if normalize_entry_name(entry.name()).starts_with(prefix) {
            removed += 1;
            continue;
        }
        writer.raw_copy_file(entry)?;
    }

    let file = writer.finish()?;
    file.sync_all()?;

    debug!(
        staged = %staged.path().display(),
        kept = source.len() - removed,
        removed,
        "staged archive written"
    );
    Ok(removed)
}
