//! Front-ends that feed command lines to a [`CommandInterpreter`].

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

use crate::path::CanonicalPath;
use crate::shell::{CommandInterpreter, Outcome};

/// Prompt text, e.g. `PS localhost/dir1> `
pub fn prompt(hostname: &str, cwd: &CanonicalPath) -> String {
    format!("PS {}{}> ", hostname, cwd)
}

/// Interactive session on the terminal.
///
/// Ctrl-C drops the current line, Ctrl-D or `exit` ends the session.
pub fn run_interactive(shell: &mut CommandInterpreter<'_>, hostname: &str) -> Result<()> {
    let mut rl = DefaultEditor::new().context("Failed to create line editor")?;

    loop {
        let line_prompt = prompt(hostname, shell.filesystem().cwd());
        match rl.readline(&line_prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(e) = rl.add_history_entry(line.as_str()) {
                        warn!("Failed to add history entry: {}", e);
                    }
                }
                match shell.execute(&line) {
                    Outcome::Output(text) => print_output(&text),
                    Outcome::Exit => break,
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(e) => return Err(e).context("Failed to read command line"),
        }
    }

    debug!("interactive session ended");
    Ok(())
}

/// Run command lines in order, writing each result to `out`.
///
/// Stops early at `exit`. Returns `true` when `exit` was reached.
pub fn run_lines<I, S, W>(shell: &mut CommandInterpreter<'_>, lines: I, out: &mut W) -> Result<bool>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    W: Write,
{
    for line in lines {
        match shell.execute(line.as_ref()) {
            Outcome::Output(text) => write_output(out, &text)?,
            Outcome::Exit => return Ok(true),
        }
    }
    Ok(false)
}

/// Run a script: one command per line, blank lines and `#` comments
/// ignored
pub fn run_script<R, W>(shell: &mut CommandInterpreter<'_>, reader: R, out: &mut W) -> Result<bool>
where
    R: BufRead,
    W: Write,
{
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line.context("Failed to read script")?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        lines.push(trimmed.to_string());
    }
    run_lines(shell, lines, out)
}

fn print_output(text: &str) {
    let text = text.trim_end_matches('\n');
    if !text.is_empty() {
        println!("{}", text);
    }
}

fn write_output<W: Write>(out: &mut W, text: &str) -> Result<()> {
    let text = text.trim_end_matches('\n');
    if !text.is_empty() {
        writeln!(out, "{}", text).context("Failed to write output")?;
    }
    Ok(())
}
