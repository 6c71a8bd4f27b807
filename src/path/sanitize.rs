use super::SEPARATOR;
use crate::vfs::VfsError;

/// Normalize an entry name as stored in the container.
///
/// Backslashes become `/`, and leading `/` or `./` segments are dropped so
/// names written by sloppy tools still line up with canonical paths.
pub fn normalize_entry_name(raw: &str) -> String {
    let mut name = raw.replace('\\', "/");
    loop {
        if let Some(rest) = name.strip_prefix("./") {
            name = rest.to_string();
        } else if let Some(rest) = name.strip_prefix(SEPARATOR) {
            name = rest.to_string();
        } else {
            return name;
        }
    }
}

/// Sanitize a path before it is written into an archive.
///
/// Rejects:
/// - empty names
/// - absolute paths (`/etc/passwd`)
/// - parent traversal (`../x`, `a/../../x`)
///
/// `.` segments and doubled separators are dropped. Returns the entry name
/// joined with `/`.
pub fn sanitize_entry_name(raw: &str) -> Result<String, VfsError> {
    if raw.is_empty() {
        return Err(VfsError::malformed(raw, "empty path"));
    }

    let unified = raw.replace('\\', "/");
    if unified.starts_with(SEPARATOR) {
        return Err(VfsError::malformed(raw, "absolute path not allowed"));
    }

    let mut components = Vec::new();
    for part in unified.split(SEPARATOR) {
        match part {
            "" | "." => continue,
            ".." => {
                return Err(VfsError::malformed(
                    raw,
                    "parent directory traversal not allowed",
                ));
            }
            part => components.push(part),
        }
    }

    if components.is_empty() {
        return Err(VfsError::malformed(raw, "no valid components"));
    }

    Ok(components.join("/"))
}
