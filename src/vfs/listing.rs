use std::fmt;

use chrono::NaiveDateTime;

use super::index::{self, Listing};
use super::ArchiveEntry;
use crate::path::CanonicalPath;

const DIR_PERMISSIONS: &str = "drwxr-xr-x";
const FILE_PERMISSIONS: &str = "-rw-r--r--";
const NO_TIMESTAMP: &str = "---------- -----";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// One line of a long listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub kind: EntryKind,
    pub name: String,
    /// Uncompressed size; always 0 for directories
    pub size: u64,
    /// For directories, the newest timestamp among their descendants
    pub modified: Option<NaiveDateTime>,
}

impl fmt::Display for ListingRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let permissions = match self.kind {
            EntryKind::Directory => DIR_PERMISSIONS,
            EntryKind::File => FILE_PERMISSIONS,
        };
        let modified = self
            .modified
            .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| NO_TIMESTAMP.to_string());
        write!(
            f,
            "{} {:>10} {} {}",
            permissions, self.size, modified, self.name
        )
    }
}

/// Rows for every child of `dir`, directories first, each group sorted
pub fn detailed_rows(entries: &[ArchiveEntry], dir: &CanonicalPath) -> Vec<ListingRow> {
    let Listing { dirs, files } = index::list_children(entries, dir);
    let prefix = dir.entry_prefix();
    let mut rows = Vec::with_capacity(dirs.len() + files.len());

    for name in dirs {
        let child_prefix = format!("{prefix}{name}/");
        let modified = entries
            .iter()
            .filter(|entry| entry.name.starts_with(&child_prefix))
            .filter_map(|entry| entry.modified)
            .max();
        rows.push(ListingRow {
            kind: EntryKind::Directory,
            name,
            size: 0,
            modified,
        });
    }

    for name in files {
        let full_name = format!("{prefix}{name}");
        let entry = entries.iter().find(|entry| entry.name == full_name);
        rows.push(ListingRow {
            kind: EntryKind::File,
            size: entry.map(|e| e.size).unwrap_or(0),
            modified: entry.and_then(|e| e.modified),
            name,
        });
    }

    rows
}

/// One name per line, directories first
pub fn render_short(listing: &Listing) -> String {
    listing
        .dirs
        .iter()
        .chain(listing.files.iter())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_long(rows: &[ListingRow]) -> String {
    rows.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
