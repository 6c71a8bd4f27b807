// Public API exports
pub mod config;
pub mod journal;
pub mod pack;
pub mod path;
pub mod repl;
pub mod shell;
pub mod vfs;

// Re-export main types for convenience
pub use config::ShellConfig;
pub use journal::{ActionLog, JsonlJournal, LogEvent, MemoryJournal, NullJournal};
pub use pack::ArchivePacker;
pub use path::{resolve, CanonicalPath};
pub use shell::{Command, CommandInterpreter, Outcome};
pub use vfs::{ArchiveEntry, ArchiveFilesystem, EntryKind, Listing, ListingRow, VfsError};
