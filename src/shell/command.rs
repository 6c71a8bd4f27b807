use thiserror::Error;

/// Lines shown by `head` when no count is given
pub const DEFAULT_HEAD_LINES: usize = 10;

const LS_USAGE: &str = "ls [-l]";
const CD_USAGE: &str = "cd [dir]";
const CAT_USAGE: &str = "cat <file>";
const RMDIR_USAGE: &str = "rmdir <dir>";
const HEAD_USAGE: &str = "head <file> [lines]";
const EXIT_USAGE: &str = "exit";

/// One parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ls { detailed: bool },
    /// `None` means the root
    Cd { path: Option<String> },
    Cat { file: String },
    Rmdir { dir: String },
    Head { file: String, lines: usize },
    Exit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("{0}: command not found")]
    UnknownVerb(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

impl Command {
    /// Parse a whitespace-separated command line.
    ///
    /// Blank lines parse to `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let mut tokens = line.split_whitespace();
        let Some(verb) = tokens.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = tokens.collect();

        let command = match verb {
            "ls" => match args.as_slice() {
                [] => Command::Ls { detailed: false },
                ["-l"] => Command::Ls { detailed: true },
                _ => return Err(ParseError::Usage(LS_USAGE)),
            },
            "cd" => match args.as_slice() {
                [] => Command::Cd { path: None },
                [path] => Command::Cd {
                    path: Some(path.to_string()),
                },
                _ => return Err(ParseError::Usage(CD_USAGE)),
            },
            "cat" => match args.as_slice() {
                [file] => Command::Cat {
                    file: file.to_string(),
                },
                _ => return Err(ParseError::Usage(CAT_USAGE)),
            },
            "rmdir" => match args.as_slice() {
                [dir] => Command::Rmdir {
                    dir: dir.to_string(),
                },
                _ => return Err(ParseError::Usage(RMDIR_USAGE)),
            },
            "head" => match args.as_slice() {
                [file] => Command::Head {
                    file: file.to_string(),
                    lines: DEFAULT_HEAD_LINES,
                },
                [file, count] => Command::Head {
                    file: file.to_string(),
                    lines: count
                        .parse()
                        .map_err(|_| ParseError::Usage(HEAD_USAGE))?,
                },
                _ => return Err(ParseError::Usage(HEAD_USAGE)),
            },
            "exit" => match args.as_slice() {
                [] => Command::Exit,
                _ => return Err(ParseError::Usage(EXIT_USAGE)),
            },
            other => return Err(ParseError::UnknownVerb(other.to_string())),
        };

        Ok(Some(command))
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Command::Ls { .. } => "ls",
            Command::Cd { .. } => "cd",
            Command::Cat { .. } => "cat",
            Command::Rmdir { .. } => "rmdir",
            Command::Head { .. } => "head",
            Command::Exit => "exit",
        }
    }
}
