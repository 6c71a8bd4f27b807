//! End-to-end sessions against real archives on disk.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zipsh::repl;
use zipsh::{
    ArchiveFilesystem, ArchivePacker, CommandInterpreter, JsonlJournal, Outcome, ShellConfig,
    VfsError,
};

fn build_archive(dir: &Path, files: &[(&str, &str)]) -> PathBuf {
    let path = dir.join("vfs.zip");
    let mut packer = ArchivePacker::new();
    for (name, content) in files {
        packer.add_file(name, content.as_bytes()).unwrap();
    }
    packer.write_to_file(&path).unwrap();
    path
}

fn scenario(dir: &Path) -> PathBuf {
    build_archive(
        dir,
        &[
            ("file1.txt", "Hello, World!"),
            ("dir1/file2.txt", "Another file"),
            ("dir2/file3.log", "Log file content"),
        ],
    )
}

#[test]
fn config_driven_session_with_journal() {
    let tmp = TempDir::new().unwrap();
    scenario(tmp.path());
    let config_path = tmp.path().join("config.json");
    fs::write(
        &config_path,
        r#"{"hostname": "test-host", "vfs_path": "vfs.zip", "log_path": "actions.jsonl"}"#,
    )
    .unwrap();

    let config = ShellConfig::load(&config_path).unwrap();
    let mut vfs = ArchiveFilesystem::open(&config.vfs_path).unwrap();
    let mut journal = JsonlJournal::new(&config.log_path);
    let mut shell = CommandInterpreter::new(&mut vfs, &mut journal);

    let mut out = Vec::new();
    let exited = repl::run_lines(
        &mut shell,
        ["ls", "cd dir1", "cat file2.txt", "cd ..", "rmdir dir1", "ls", "exit"],
        &mut out,
    )
    .unwrap();
    assert!(exited);

    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "dir1\ndir2\nfile1.txt\n\
         Changed directory to /dir1\n\
         Another file\n\
         Changed directory to /\n\
         Directory removed: dir1 (1 entry)\n\
         dir2\nfile1.txt\n"
    );

    let events = JsonlJournal::read_events(&config.log_path).unwrap();
    assert_eq!(events.len(), 7);
    assert_eq!(events[4].action, "rmdir dir1");
}

#[test]
fn removal_persists_across_sessions() {
    let tmp = TempDir::new().unwrap();
    let path = scenario(tmp.path());

    {
        let mut vfs = ArchiveFilesystem::open(&path).unwrap();
        assert_eq!(vfs.entry_count(), 3);
        assert_eq!(vfs.remove_subtree("dir2").unwrap(), 1);
    }

    let mut vfs = ArchiveFilesystem::open(&path).unwrap();
    assert_eq!(vfs.entry_count(), 2);
    assert!(matches!(
        vfs.change_directory("dir2"),
        Err(VfsError::NoSuchDirectory(_))
    ));
    assert_eq!(vfs.read_file("dir1/file2.txt").unwrap(), "Another file");
}

#[test]
fn cd_into_every_directory_and_back() {
    let tmp = TempDir::new().unwrap();
    let path = build_archive(
        tmp.path(),
        &[
            ("a/b/c/one.txt", "1"),
            ("a/two.txt", "2"),
            ("x/y/three.txt", "3"),
            ("top.txt", "t"),
        ],
    );
    let mut vfs = ArchiveFilesystem::open(&path).unwrap();

    for start in ["/", "/a", "/a/b", "/x"] {
        vfs.change_directory(start).unwrap();
        let children: Vec<String> = vfs.children().dirs.into_iter().collect();
        for child in children {
            let before = vfs.cwd().clone();
            vfs.change_directory(&child).unwrap();
            vfs.change_directory("..").unwrap();
            assert_eq!(vfs.cwd(), &before);
        }
    }
}

#[test]
fn scripted_session_through_interpreter_handles_failures() {
    let tmp = TempDir::new().unwrap();
    let path = scenario(tmp.path());
    let mut vfs = ArchiveFilesystem::open(&path).unwrap();
    let mut journal = zipsh::NullJournal;
    let mut shell = CommandInterpreter::new(&mut vfs, &mut journal);

    let script = "\
# failures never end the session
cd nonexistent
cat missing.txt
rmdir nowhere
frobnicate
head file1.txt 1
";
    let mut out = Vec::new();
    let exited = repl::run_script(&mut shell, script.as_bytes(), &mut out).unwrap();
    assert!(!exited);

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "cd: No such directory: /nonexistent",
            "cat: File not found: /missing.txt",
            "rmdir: Directory not found: /nowhere",
            "frobnicate: command not found",
            "Hello, World!",
        ]
    );
    assert_eq!(shell.execute("exit"), Outcome::Exit);
}
