mod entry;
mod error;
pub mod index;
mod listing;
mod rebuild;


pub use entry::ArchiveEntry;
pub use error::VfsError;
pub use index::Listing;
pub use listing::{EntryKind, ListingRow};

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use zip::ZipArchive;

use crate::path::{self, normalize_entry_name, CanonicalPath};
pub(crate) use rebuild::StagedArchive;

/// Filesystem view over a single zip container.
///
/// Owns the open archive handle and the current directory. Directories are
/// never stored; they are inferred from entry names on every call.
pub struct ArchiveFilesystem {
    /// Location of the container on disk
    path: PathBuf,
    /// Exclusive read handle to the container
    archive: ZipArchive<File>,
    /// Snapshot of the central directory, refreshed whenever the handle is reopened
    entries: Vec<ArchiveEntry>,
    /// Current working directory
    cwd: CanonicalPath,
}

impl ArchiveFilesystem {
    /// Open the container at `path` with the cursor at the root
    pub fn open(path: impl AsRef<Path>) -> Result<Self, VfsError> {
        let path = path.as_ref().to_path_buf();
        let mut archive = open_archive(&path)?;
        let entries = snapshot(&mut archive)?;

        info!(path = %path.display(), entries = entries.len(), "archive opened");

        Ok(Self {
            path,
            archive,
            entries,
            cwd: CanonicalPath::root(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current working directory
    pub fn cwd(&self) -> &CanonicalPath {
        &self.cwd
    }

    /// All entries in container order
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Resolve user input against the cursor.
    ///
    /// Every path-bearing operation goes through here so traversal rules
    /// stay identical across commands.
    pub fn resolve(&self, input: &str) -> Result<CanonicalPath, VfsError> {
        path::resolve(&self.cwd, input)
    }

    /// Immediate children of the current directory
    pub fn children(&self) -> Listing {
        index::list_children(&self.entries, &self.cwd)
    }

    /// Long-listing rows for the current directory
    pub fn detailed_children(&self) -> Vec<ListingRow> {
        listing::detailed_rows(&self.entries, &self.cwd)
    }

    /// Render the current directory, one child per line
    pub fn list(&self, detailed: bool) -> String {
        if detailed {
            listing::render_long(&self.detailed_children())
        } else {
            listing::render_short(&self.children())
        }
    }

    /// Move the cursor. Leaves it untouched on failure.
    pub fn change_directory(&mut self, input: &str) -> Result<(), VfsError> {
        let target = self.resolve(input)?;
        if !index::is_directory(&self.entries, &target) {
            return Err(VfsError::NoSuchDirectory(target.to_string()));
        }
        debug!(from = %self.cwd, to = %target, "cd");
        self.cwd = target;
        Ok(())
    }

    /// Raw content of a file relative to the cursor
    pub fn read_bytes(&mut self, name: &str) -> Result<Vec<u8>, VfsError> {
        let target = self.resolve(name)?;
        let entry = index::find_file(&self.entries, &target)
            .ok_or_else(|| VfsError::FileNotFound(target.to_string()))?;
        let (position, size) = (entry.index, entry.size);

        let mut file = self.archive.by_index(position)?;
        let mut contents = Vec::with_capacity(size as usize);
        file.read_to_end(&mut contents)?;
        Ok(contents)
    }

    /// File content as UTF-8 text
    pub fn read_file(&mut self, name: &str) -> Result<String, VfsError> {
        let contents = self.read_bytes(name)?;
        String::from_utf8(contents).map_err(|_| VfsError::Decode(name.to_string()))
    }

    /// First `line_count` lines of a file, terminators kept
    pub fn read_head(&mut self, name: &str, line_count: usize) -> Result<String, VfsError> {
        let text = self.read_file(name)?;
        Ok(text.split_inclusive('\n').take(line_count).collect())
    }

    /// Delete a directory and everything below it.
    ///
    /// The container is rebuilt into a temp file and renamed over the
    /// original; any failure before the rename leaves the original intact.
    /// Returns the number of entries removed.
    pub fn remove_subtree(&mut self, name: &str) -> Result<usize, VfsError> {
        let target = self.resolve(name)?;
        if target.is_root() {
            return Err(VfsError::RootRemoval);
        }
        if index::subtree(&self.entries, &target).is_empty() {
            return Err(VfsError::DirectoryNotFound(target.to_string()));
        }

        let prefix = target.entry_prefix();
        let staged = StagedArchive::beside(&self.path);
        let removed = rebuild::copy_without(&mut self.archive, &staged, &prefix)?;

        // Close the original handle before the swap
        let staged_handle = open_archive(staged.path())?;
        drop(std::mem::replace(&mut self.archive, staged_handle));

        if let Err(e) = staged.commit(&self.path) {
            self.archive = open_archive(&self.path)?;
            return Err(e.into());
        }
        self.reopen()?;

        while !index::is_directory(&self.entries, &self.cwd) {
            self.cwd = self.cwd.parent().unwrap_or_default();
        }

        info!(
            target = %target,
            removed,
            remaining = self.entries.len(),
            "subtree removed"
        );
        Ok(removed)
    }

    /// Reopen the handle on the original path and refresh the snapshot
    fn reopen(&mut self) -> Result<(), VfsError> {
        let mut archive = open_archive(&self.path)?;
        self.entries = snapshot(&mut archive)?;
        self.archive = archive;
        Ok(())
    }
}

fn open_archive(path: &Path) -> Result<ZipArchive<File>, VfsError> {
    let file = File::open(path)?;
    Ok(ZipArchive::new(file)?)
}

fn snapshot(archive: &mut ZipArchive<File>) -> Result<Vec<ArchiveEntry>, VfsError> {
    let mut entries = Vec::with_capacity(archive.len());
    for position in 0..archive.len() {
        let file = archive.by_index_raw(position)?;
        entries.push(ArchiveEntry {
            name: normalize_entry_name(file.name()),
            size: file.size(),
            compressed_size: file.compressed_size(),
            modified: file.last_modified().and_then(entry::to_naive),
            index: position,
        });
    }
    Ok(entries)
}
