use chrono::{NaiveDate, NaiveDateTime};

/// Metadata for a single item stored in the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Normalized slash-separated name (e.g., "dir1/file2.txt")
    pub name: String,
    /// Uncompressed length in bytes
    pub size: u64,
    /// Stored length in bytes
    pub compressed_size: u64,
    /// Timestamp recorded in the container, if it is a valid date
    pub modified: Option<NaiveDateTime>,
    /// Position in the container's central directory
    pub index: usize,
}

impl ArchiveEntry {
    /// Explicit directory entries (`dir/`) carry no content
    pub fn is_dir_marker(&self) -> bool {
        self.name.ends_with('/')
    }
}

/// Convert a zip DOS timestamp, rejecting impossible dates
pub(crate) fn to_naive(dt: zip::DateTime) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(dt.year().into(), dt.month().into(), dt.day().into())?.and_hms_opt(
        dt.hour().into(),
        dt.minute().into(),
        dt.second().into(),
    )
}
