mod canonical;
mod sanitize;

#[cfg(test)]
mod tests;

pub use canonical::{CanonicalPath, SEPARATOR};
pub use sanitize::{normalize_entry_name, sanitize_entry_name};

use crate::vfs::VfsError;

/// Resolve user input against the current directory.
///
/// - `""` and `"/"` name the root
/// - `".."` names the parent of `current`, failing with [`VfsError::AtRoot`]
///   when `current` is the root
/// - input starting with `/` is absolute, anything else is relative to
///   `current`; `.`/`..` segments and repeated separators collapse, and
///   backslashes count as separators
///
/// Input holding three or more consecutive dots is rejected before any
/// normalization happens.
pub fn resolve(current: &CanonicalPath, input: &str) -> Result<CanonicalPath, VfsError> {
    if input.contains("...") {
        return Err(VfsError::malformed(
            input,
            "more than two consecutive dots are not allowed",
        ));
    }

    let normalized = input.trim().replace('\\', "/");
    if normalized.is_empty() || normalized == "/" {
        return Ok(CanonicalPath::root());
    }
    if normalized == ".." {
        return current.parent().ok_or(VfsError::AtRoot);
    }

    let mut stack: Vec<&str> = if normalized.starts_with(SEPARATOR) {
        Vec::new()
    } else {
        current.segments().collect()
    };

    for segment in normalized.split(SEPARATOR) {
        match segment {
            "" | "." => continue,
            ".." => {
                // The cursor may never climb above the root
                if stack.pop().is_none() {
                    return Err(VfsError::AtRoot);
                }
            }
            name => stack.push(name),
        }
    }

    Ok(CanonicalPath::from_segments(&stack))
}
