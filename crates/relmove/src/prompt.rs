//! Interactive selection over a line-based terminal

use crate::messages::Messages;
use crate::render::render_selection;
use async_trait::async_trait;
use relmove_batch::{SelectionPrompt, SelectionState};
use relmove_core::prelude::*;
use std::collections::BTreeSet;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tokio::sync::Mutex;

/// A line typed at the selection prompt. Entry numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Toggle(usize),
    Check(usize),
    Uncheck(usize),
    SelectAll,
    DeselectAll,
    ToggleRelated,
    ToggleCascade,
    Confirm,
    Cancel,
}

/// Parse one input line, `None` when it is not a command
pub fn parse_command(input: &str) -> Option<Command> {
    let input = input.trim();
    match input {
        "a" => return Some(Command::SelectAll),
        "n" => return Some(Command::DeselectAll),
        "r" => return Some(Command::ToggleRelated),
        "c" => return Some(Command::ToggleCascade),
        "y" => return Some(Command::Confirm),
        "q" => return Some(Command::Cancel),
        _ => {}
    }

    if let Some(rest) = input.strip_prefix('+') {
        return rest.parse().ok().map(Command::Check);
    }
    if let Some(rest) = input.strip_prefix('-') {
        return rest.parse().ok().map(Command::Uncheck);
    }
    input.parse().ok().map(Command::Toggle)
}

fn entry(state: &SelectionState, index: usize, messages: &Messages) -> Result<DocumentId> {
    index
        .checked_sub(1)
        .and_then(|i| state.file_infos().get(i))
        .map(|info| info.file.clone())
        .ok_or_else(|| {
            Error::selection_error(messages.no_such_entry.replace("{index}", &index.to_string()))
        })
}

/// Apply a non-terminal command to the selection
pub fn apply(state: &mut SelectionState, command: Command, messages: &Messages) -> Result<()> {
    match command {
        Command::Toggle(index) => {
            let file = entry(state, index, messages)?;
            let checked = !state.is_selected(&file);
            state.toggle(&file, checked)
        }
        Command::Check(index) => {
            let file = entry(state, index, messages)?;
            state.toggle(&file, true)
        }
        Command::Uncheck(index) => {
            let file = entry(state, index, messages)?;
            state.toggle(&file, false)
        }
        Command::SelectAll => {
            state.select_all();
            Ok(())
        }
        Command::DeselectAll => {
            state.deselect_all();
            Ok(())
        }
        Command::ToggleRelated => {
            let enabled = !state.related_select();
            state.set_related_select(enabled);
            Ok(())
        }
        Command::ToggleCascade => {
            let enabled = !state.cascade();
            state.set_cascade(enabled);
            Ok(())
        }
        Command::Confirm | Command::Cancel => Err(Error::selection_error(
            "confirm and cancel end the selection",
        )),
    }
}

struct Terminal<R, W> {
    lines: Lines<R>,
    writer: W,
}

/// [`SelectionPrompt`] reading commands line by line.
///
/// End of input cancels the batch.
pub struct TerminalPrompt<R, W> {
    terminal: Mutex<Terminal<R, W>>,
    messages: &'static Messages,
    target_folder: String,
}

impl<R, W> TerminalPrompt<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(
        reader: R,
        writer: W,
        messages: &'static Messages,
        target_folder: impl Into<String>,
    ) -> Self {
        Self {
            terminal: Mutex::new(Terminal {
                lines: reader.lines(),
                writer,
            }),
            messages,
            target_folder: target_folder.into(),
        }
    }

    /// Hand back the writer, e.g. to inspect what was shown
    pub fn into_writer(self) -> W {
        self.terminal.into_inner().writer
    }
}

#[async_trait]
impl<R, W> SelectionPrompt for TerminalPrompt<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn select(&self, mut state: SelectionState) -> Result<Option<BTreeSet<DocumentId>>> {
        let mut terminal = self.terminal.lock().await;
        let Terminal { lines, writer } = &mut *terminal;
        let mut show_table = true;

        loop {
            if show_table {
                let table = render_selection(&state, &self.target_folder, self.messages);
                writer.write_all(table.as_bytes()).await?;
            }
            writer.write_all(self.messages.prompt.as_bytes()).await?;
            writer.flush().await?;

            let Some(line) = lines.next_line().await? else {
                log::debug!("Selection input closed, cancelling");
                writer.write_all(b"\n").await?;
                return Ok(state.cancel());
            };

            if line.trim().is_empty() {
                show_table = false;
                continue;
            }

            let Some(command) = parse_command(&line) else {
                let notice = self.messages.unknown_command.replace("{input}", line.trim());
                writer.write_all(format!("{}\n", notice).as_bytes()).await?;
                show_table = false;
                continue;
            };

            match command {
                Command::Confirm => return Ok(state.confirm()),
                Command::Cancel => return Ok(state.cancel()),
                command => match apply(&mut state, command, self.messages) {
                    Ok(()) => show_table = true,
                    Err(e) => {
                        writer.write_all(format!("{}\n", e).as_bytes()).await?;
                        show_table = false;
                    }
                },
            }
        }
    }
}
