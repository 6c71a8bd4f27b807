//! Directory inference over flat entry names.
//!
//! The container has no directory records, so everything here is a pure
//! prefix scan over the entry list. Nothing is cached; callers re-derive
//! after every mutation.

use std::collections::BTreeSet;

use super::ArchiveEntry;
use crate::path::{CanonicalPath, SEPARATOR};

/// Immediate children of one directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub dirs: BTreeSet<String>,
    pub files: BTreeSet<String>,
}

impl Listing {
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty() && self.files.is_empty()
    }
}

/// Split the entries under `dir` into child directory and file names.
///
/// A name that shows up both as a file and as a directory prefix is
/// reported once, as a directory.
pub fn list_children<'a, I>(entries: I, dir: &CanonicalPath) -> Listing
where
    I: IntoIterator<Item = &'a ArchiveEntry>,
{
    let prefix = dir.entry_prefix();
    let mut listing = Listing::default();

    for entry in entries {
        let Some(rest) = entry.name.strip_prefix(prefix.as_str()) else {
            continue;
        };
        match rest.split_once(SEPARATOR) {
            Some((child, _)) if !child.is_empty() => {
                listing.dirs.insert(child.to_string());
            }
            Some(_) => {}
            None if !rest.is_empty() => {
                listing.files.insert(rest.to_string());
            }
            None => {}
        }
    }

    listing.files.retain(|name| !listing.dirs.contains(name));
    listing
}

/// Every entry stored below `dir`, directory markers included
pub fn subtree<'a, I>(entries: I, dir: &CanonicalPath) -> Vec<&'a ArchiveEntry>
where
    I: IntoIterator<Item = &'a ArchiveEntry>,
{
    let prefix = dir.entry_prefix();
    entries
        .into_iter()
        .filter(|entry| entry.name.starts_with(&prefix))
        .collect()
}

/// Whether `dir` exists, i.e. at least one entry lives below it.
///
/// The root always exists, even in an empty archive.
pub fn is_directory<'a, I>(entries: I, dir: &CanonicalPath) -> bool
where
    I: IntoIterator<Item = &'a ArchiveEntry>,
{
    if dir.is_root() {
        return true;
    }
    let prefix = dir.entry_prefix();
    entries
        .into_iter()
        .any(|entry| entry.name.starts_with(&prefix))
}

/// Exact-name lookup of a file entry
pub fn find_file<'a, I>(entries: I, path: &CanonicalPath) -> Option<&'a ArchiveEntry>
where
    I: IntoIterator<Item = &'a ArchiveEntry>,
{
    let name = path.entry_name();
    if name.is_empty() {
        return None;
    }
    entries
        .into_iter()
        .find(|entry| entry.name == name && !entry.is_dir_marker())
}
