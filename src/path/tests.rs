use super::*;

fn path(p: &str) -> CanonicalPath {
    resolve(&CanonicalPath::root(), p).unwrap()
}

// ============================================================================
// resolve
// ============================================================================

#[test]
fn test_empty_and_separator_resolve_to_root() {
    let cwd = path("/a/b");
    assert_eq!(resolve(&cwd, "").unwrap(), CanonicalPath::root());
    assert_eq!(resolve(&cwd, "/").unwrap(), CanonicalPath::root());
    assert_eq!(resolve(&cwd, "   ").unwrap(), CanonicalPath::root());
}

#[test]
fn test_relative_is_joined_to_current() {
    let cwd = path("/dir1");
    assert_eq!(resolve(&cwd, "sub").unwrap().as_str(), "/dir1/sub");
    assert_eq!(resolve(&cwd, "sub/deeper").unwrap().as_str(), "/dir1/sub/deeper");
}

#[test]
fn test_absolute_ignores_current() {
    let cwd = path("/dir1/sub");
    assert_eq!(resolve(&cwd, "/dir2").unwrap().as_str(), "/dir2");
}

#[test]
fn test_parent_of_nested_dir() {
    let cwd = path("/a/b");
    assert_eq!(resolve(&cwd, "..").unwrap().as_str(), "/a");
    assert_eq!(resolve(&path("/a"), "..").unwrap(), CanonicalPath::root());
}

#[test]
fn test_parent_at_root_fails() {
    let result = resolve(&CanonicalPath::root(), "..");
    assert!(matches!(result, Err(VfsError::AtRoot)));
}

#[test]
fn test_repeated_parent_stops_exactly_at_root() {
    let mut cwd = path("/a/b/c/d");
    let mut steps = 0;
    loop {
        match resolve(&cwd, "..") {
            Ok(parent) => {
                assert!(parent.contains(&cwd));
                cwd = parent;
                steps += 1;
            }
            Err(VfsError::AtRoot) => break,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(steps, 4);
    assert!(cwd.is_root());
}

#[test]
fn test_compound_traversal_above_root_fails() {
    let result = resolve(&path("/a"), "../../b");
    assert!(matches!(result, Err(VfsError::AtRoot)));

    let result = resolve(&CanonicalPath::root(), "/..");
    assert!(matches!(result, Err(VfsError::AtRoot)));
}

#[test]
fn test_dot_segments_and_doubled_separators_collapse() {
    let cwd = path("/a");
    assert_eq!(resolve(&cwd, "./b//c/./").unwrap().as_str(), "/a/b/c");
    assert_eq!(resolve(&cwd, "b/../c").unwrap().as_str(), "/a/c");
    assert_eq!(resolve(&cwd, ".").unwrap().as_str(), "/a");
}

#[test]
fn test_backslash_is_a_separator() {
    let cwd = CanonicalPath::root();
    assert_eq!(resolve(&cwd, "dir1\\sub").unwrap().as_str(), "/dir1/sub");
}

#[test]
fn test_triple_dots_rejected() {
    for input in ["...", "a/.../b", "....", "dir1/..."] {
        let result = resolve(&CanonicalPath::root(), input);
        assert!(
            matches!(result, Err(VfsError::MalformedPath { .. })),
            "expected rejection for {input}"
        );
    }
}

#[test]
fn test_triple_dots_checked_before_normalization() {
    // Would collapse harmlessly if normalized first
    let result = resolve(&path("/a/b"), "x/../...");
    assert!(matches!(result, Err(VfsError::MalformedPath { .. })));
}

#[test]
fn test_dotted_file_names_allowed() {
    let cwd = CanonicalPath::root();
    assert_eq!(resolve(&cwd, ".hidden").unwrap().as_str(), "/.hidden");
    assert_eq!(resolve(&cwd, "archive..old").unwrap().as_str(), "/archive..old");
}

// ============================================================================
// CanonicalPath
// ============================================================================

#[test]
fn test_root_representation() {
    let root = CanonicalPath::root();
    assert_eq!(root.as_str(), "/");
    assert!(root.is_root());
    assert_eq!(root.entry_prefix(), "");
    assert_eq!(root.entry_name(), "");
    assert!(root.parent().is_none());
    assert!(root.file_name().is_none());
}

#[test]
fn test_entry_mapping() {
    let p = path("/dir1/file2.txt");
    assert_eq!(p.entry_name(), "dir1/file2.txt");
    assert_eq!(p.entry_prefix(), "dir1/file2.txt/");
    assert_eq!(p.file_name(), Some("file2.txt"));
}

#[test]
fn test_contains_respects_segment_boundaries() {
    let dir = path("/dir1");
    assert!(dir.contains(&path("/dir1")));
    assert!(dir.contains(&path("/dir1/sub")));
    assert!(!dir.contains(&path("/dir10")));
    assert!(CanonicalPath::root().contains(&dir));
}

// ============================================================================
// entry names
// ============================================================================

#[test]
fn test_normalize_entry_name() {
    assert_eq!(normalize_entry_name("dir1/file2.txt"), "dir1/file2.txt");
    assert_eq!(normalize_entry_name("/abs/name"), "abs/name");
    assert_eq!(normalize_entry_name("./rel/name"), "rel/name");
    assert_eq!(normalize_entry_name("win\\style\\name"), "win/style/name");
    assert_eq!(normalize_entry_name("dir/"), "dir/");
}

#[test]
fn test_sanitize_valid_nested_path() {
    let result = sanitize_entry_name("src/parser/mod.rs");
    assert_eq!(result.unwrap(), "src/parser/mod.rs");
}

#[test]
fn test_sanitize_drops_current_dir_markers() {
    let result = sanitize_entry_name("./src/./main.rs");
    assert_eq!(result.unwrap(), "src/main.rs");
}

#[test]
fn test_sanitize_rejects_parent_traversal() {
    let result = sanitize_entry_name("src/../../etc/passwd");
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("parent directory traversal"));
}

#[test]
fn test_sanitize_rejects_absolute() {
    let result = sanitize_entry_name("/etc/passwd");
    assert!(result.unwrap_err().to_string().contains("absolute path"));
}

#[test]
fn test_sanitize_rejects_empty_and_dot_only() {
    assert!(sanitize_entry_name("")
        .unwrap_err()
        .to_string()
        .contains("empty path"));
    assert!(sanitize_entry_name("./.")
        .unwrap_err()
        .to_string()
        .contains("no valid components"));
}

#[test]
fn test_sanitize_unicode_and_spaces() {
    assert_eq!(
        sanitize_entry_name("My Documents/文档/readme.md").unwrap(),
        "My Documents/文档/readme.md"
    );
}
