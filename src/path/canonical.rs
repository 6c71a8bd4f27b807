use std::fmt;

/// Separator used by canonical paths and archive entry names
pub const SEPARATOR: char = '/';

/// Absolute, normalized location inside the archive.
///
/// Always starts with `/`, never holds `.` or `..` segments, and only the
/// root itself ends with a separator. Two values are equal exactly when they
/// name the same location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalPath(String);

impl CanonicalPath {
    /// The archive root, `/`
    pub fn root() -> Self {
        Self(SEPARATOR.to_string())
    }

    /// Build a path from already-validated segments
    pub(crate) fn from_segments(segments: &[&str]) -> Self {
        if segments.is_empty() {
            return Self::root();
        }
        let mut path = String::new();
        for segment in segments {
            path.push(SEPARATOR);
            path.push_str(segment);
        }
        Self(path)
    }

    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments from the root down, excluding the root itself
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR).filter(|s| !s.is_empty())
    }

    /// Last segment, `None` for the root
    pub fn file_name(&self) -> Option<&str> {
        self.segments().last()
    }

    /// Enclosing directory, `None` for the root
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind(SEPARATOR) {
            Some(0) | None => Some(Self::root()),
            Some(idx) => Some(Self(self.0[..idx].to_string())),
        }
    }

    /// Whether `other` equals this path or lies below it
    pub fn contains(&self, other: &CanonicalPath) -> bool {
        self.is_root()
            || other == self
            || (other.0.starts_with(&self.0) && other.0[self.0.len()..].starts_with(SEPARATOR))
    }

    /// Archive entry name this path denotes when it is a file.
    ///
    /// `/a/b.txt` becomes `a/b.txt`; the root maps to the empty string.
    pub fn entry_name(&self) -> &str {
        &self.0[1..]
    }

    /// Name prefix shared by every entry below this directory.
    ///
    /// `/a` becomes `a/`; the root maps to the empty string, which every
    /// entry name starts with.
    pub fn entry_prefix(&self) -> String {
        if self.is_root() {
            String::new()
        } else {
            format!("{}{}", self.entry_name(), SEPARATOR)
        }
    }
}

impl Default for CanonicalPath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
