use thiserror::Error;

#[derive(Error, Debug)]
pub enum VfsError {
    #[error("malformed path '{path}': {reason}")]
    MalformedPath { path: String, reason: &'static str },

    #[error("already at the root directory")]
    AtRoot,

    #[error("No such directory: {0}")]
    NoSuchDirectory(String),

    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("cannot display '{0}': content is not valid UTF-8 text")]
    Decode(String),

    #[error("refusing to remove the archive root")]
    RootRemoval,

    #[error("archive I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive is unreadable: {0}")]
    Archive(#[from] zip::result::ZipError),
}

impl VfsError {
    pub(crate) fn malformed(path: &str, reason: &'static str) -> Self {
        VfsError::MalformedPath {
            path: path.to_string(),
            reason,
        }
    }
}
