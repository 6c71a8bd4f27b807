mod command;


pub use command::{Command, ParseError, DEFAULT_HEAD_LINES};

use tracing::debug;

use crate::journal::ActionLog;
use crate::vfs::{ArchiveFilesystem, VfsError};

/// Result of one command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text to show the user; may be empty
    Output(String),
    /// The session should end
    Exit,
}

impl Outcome {
    pub fn text(&self) -> Option<&str> {
        match self {
            Outcome::Output(text) => Some(text),
            Outcome::Exit => None,
        }
    }
}

/// Turns command lines into filesystem calls and their results into text.
///
/// Borrows the filesystem rather than owning it, so the cursor outlives any
/// single interpreter and sessions stay independent.
pub struct CommandInterpreter<'a> {
    fs: &'a mut ArchiveFilesystem,
    log: &'a mut dyn ActionLog,
}

impl<'a> CommandInterpreter<'a> {
    pub fn new(fs: &'a mut ArchiveFilesystem, log: &'a mut dyn ActionLog) -> Self {
        Self { fs, log }
    }

    pub fn filesystem(&self) -> &ArchiveFilesystem {
        &*self.fs
    }

    /// Run one command line.
    ///
    /// Non-blank lines are logged before dispatch, whatever their outcome.
    /// Every failure comes back as a single line of text.
    pub fn execute(&mut self, line: &str) -> Outcome {
        let line = line.trim();
        if line.is_empty() {
            return Outcome::Output(String::new());
        }
        self.log.record(line);

        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Outcome::Output(String::new()),
            Err(e) => return Outcome::Output(e.to_string()),
        };

        debug!(?command, "dispatch");
        match self.dispatch(&command) {
            Ok(outcome) => outcome,
            Err(e) => Outcome::Output(render_error(command.verb(), &e)),
        }
    }

    fn dispatch(&mut self, command: &Command) -> Result<Outcome, VfsError> {
        let text = match command {
            Command::Ls { detailed } => self.fs.list(*detailed),
            Command::Cd { path } => {
                self.fs.change_directory(path.as_deref().unwrap_or("/"))?;
                format!("Changed directory to {}", self.fs.cwd())
            }
            Command::Cat { file } => self.fs.read_file(file)?,
            Command::Head { file, lines } => self.fs.read_head(file, *lines)?,
            Command::Rmdir { dir } => {
                let removed = self.fs.remove_subtree(dir)?;
                let noun = if removed == 1 { "entry" } else { "entries" };
                format!("Directory removed: {} ({} {})", dir, removed, noun)
            }
            Command::Exit => return Ok(Outcome::Exit),
        };
        Ok(Outcome::Output(text))
    }
}

fn render_error(verb: &str, err: &VfsError) -> String {
    let message = format!("{}: {}", verb, err);
    message.lines().collect::<Vec<_>>().join(" ")
}
