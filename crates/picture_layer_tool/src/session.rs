//! Interactive edit session.
//!
//! Reads one command per line. Layers are addressed by their 1-based row in
//! the current (possibly filtered) list, files by their 1-based position in
//! the layer. Deletions and the image target go through the edit state's
//! prompts and read the answer from the next input line.

use std::{
    collections::BTreeSet,
    fs,
    io::{BufRead, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{builder::RangedU64ValueParser, Parser, Subcommand, ValueEnum};
use i18n_embed_fl::fl;
use picture_layer_edit::{
    BatchAttribute, ClipboardSink, FileField, LayerField, LayerId, MoveDirection, Noop, Outcome, PictureListEditState, PicturesDirectory, Prompt,
    PromptResponse, PromptResult, SystemClipboard,
};

use crate::{commands, Options, ToolResult, LANGUAGE_LOADER};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

impl From<Direction> for MoveDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => MoveDirection::Up,
            Direction::Down => MoveDirection::Down,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "picture_layer edit", no_binary_name = true, disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// Show the visible layers
    List,
    /// Show the files of a layer
    Files {
        #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        row: usize,
    },
    /// Show counts, filter and unsaved state
    Status,
    AddLayer,
    DeleteLayer {
        #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        row: usize,
    },
    MoveLayer {
        #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        row: usize,
        direction: Direction,
    },
    AddFile {
        #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        row: usize,
    },
    DeleteFile {
        #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        row: usize,
        #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        index: usize,
    },
    MoveFile {
        #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        row: usize,
        #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        index: usize,
        direction: Direction,
    },
    /// Move a file into a new layer of its own
    Split {
        #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        row: usize,
        #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        index: usize,
    },
    /// Set a layer attribute
    Set {
        #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        row: usize,
        field: LayerField,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Set a file attribute
    SetFile {
        #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        row: usize,
        #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        index: usize,
        field: FileField,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Set the condition variable of every file of a layer
    SetVariable {
        #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        row: usize,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Only show layers of one actor
    Filter {
        #[arg(allow_hyphen_values = true)]
        actor: String,
    },
    ClearFilter,
    Select {
        #[arg(required = true, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        rows: Vec<usize>,
    },
    Deselect {
        #[arg(required = true, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        rows: Vec<usize>,
    },
    SelectAll,
    ClearSelection,
    /// Duplicate the selected layers
    Duplicate,
    /// Set a switch or the actor on all selected layers
    Batch {
        attribute: BatchAttribute,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Read the pictures directory
    Scan { dir: Option<PathBuf> },
    /// Show the scanned pictures
    Images,
    /// Select or unselect pictures
    Pick {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    ClearPicks,
    /// Add the selected pictures to a layer
    AddImages,
    /// Print the picture list text, or write it to a file
    Export { output: Option<PathBuf> },
    /// Copy the picture list text to the clipboard
    Copy,
    Save,
    Quit {
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    state: PictureListEditState,
    file: PathBuf,
    options: Options,
    clipboard: Box<dyn ClipboardSink>,
}

impl Session {
    pub fn new(state: PictureListEditState, file: PathBuf, options: Options, clipboard: Box<dyn ClipboardSink>) -> Self {
        Self {
            state,
            file,
            options,
            clipboard,
        }
    }

    /// Opens `file`, or starts an empty list if it does not exist yet.
    pub fn open(file: &Path, options: Options) -> ToolResult<Self> {
        let state = if file.exists() {
            commands::read_list(file)?
        } else {
            log::info!("{} does not exist, starting an empty list", file.display());
            PictureListEditState::new()
        };
        Ok(Self::new(state, file.to_path_buf(), options, Box::new(SystemClipboard)))
    }

    #[cfg(test)]
    fn state(&self) -> &PictureListEditState {
        &self.state
    }

    pub fn run(&mut self, input: &mut dyn BufRead, out: &mut dyn Write) -> ToolResult<()> {
        writeln!(
            out,
            "{}",
            fl!(LANGUAGE_LOADER, "session-start", file = self.file.display().to_string(), layers = self.state.len())
        )?;

        let mut line = String::new();
        loop {
            write!(out, "> ")?;
            out.flush()?;
            line.clear();
            if input.read_line(&mut line)? == 0 {
                if self.state.is_dirty() {
                    log::warn!("input ended with unsaved changes");
                    writeln!(out, "{}", fl!(LANGUAGE_LOADER, "session-eof-unsaved"))?;
                }
                return Ok(());
            }

            let words = match split_line(&line) {
                Ok(words) if words.is_empty() => continue,
                Ok(words) => words,
                Err(message) => {
                    writeln!(out, "{message}")?;
                    continue;
                }
            };
            let command = match SessionLine::try_parse_from(words) {
                Ok(parsed) => parsed.command,
                Err(err) => {
                    write!(out, "{}", err.render())?;
                    continue;
                }
            };

            match self.execute(command, input, out) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => return Ok(()),
                Err(err) => {
                    log::error!("{err:#}");
                    writeln!(out, "{}", fl!(LANGUAGE_LOADER, "error-failed", error = format!("{err:#}")))?;
                }
            }
        }
    }

    fn execute(&mut self, command: SessionCommand, input: &mut dyn BufRead, out: &mut dyn Write) -> ToolResult<Flow> {
        match command {
            SessionCommand::List => commands::write_layers(&self.state, out)?,
            SessionCommand::Files { row } => {
                let Some(id) = self.row_id(row, out)? else { return Ok(Flow::Continue) };
                if let Some(layer) = self.state.layer(id) {
                    for (index, file) in layer.file_list.iter().enumerate() {
                        writeln!(
                            out,
                            "{:>3}  {:<32} variable {} {} {}",
                            index + 1,
                            file.file_name,
                            file.variable,
                            file.variable_type.symbol(),
                            file.variable_operand
                        )?;
                    }
                }
            }
            SessionCommand::Status => self.write_status(out)?,
            SessionCommand::AddLayer => {
                let id = self.state.add_layer();
                let row = self.state.visible_ids().iter().position(|visible| *visible == id).map_or(0, |row| row + 1);
                writeln!(out, "{}", fl!(LANGUAGE_LOADER, "notice-layer-added", row = row))?;
            }
            SessionCommand::DeleteLayer { row } => {
                let Some(id) = self.row_id(row, out)? else { return Ok(Flow::Continue) };
                let requested = self.state.request_delete_layer(id).map(|_| ());
                self.ask_if_requested(requested, input, out)?;
            }
            SessionCommand::MoveLayer { row, direction } => {
                let outcome = self.state.move_visible_layer(row - 1, direction.into());
                report(out, outcome, |()| fl!(LANGUAGE_LOADER, "notice-done"))?;
            }
            SessionCommand::AddFile { row } => {
                let Some(id) = self.row_id(row, out)? else { return Ok(Flow::Continue) };
                let outcome = self.state.add_file(id);
                report(out, outcome, |index| fl!(LANGUAGE_LOADER, "notice-file-added", index = (index + 1)))?;
            }
            SessionCommand::DeleteFile { row, index } => {
                let Some(id) = self.row_id(row, out)? else { return Ok(Flow::Continue) };
                let requested = self.state.request_delete_file(id, index - 1).map(|_| ());
                self.ask_if_requested(requested, input, out)?;
            }
            SessionCommand::MoveFile { row, index, direction } => {
                let Some(id) = self.row_id(row, out)? else { return Ok(Flow::Continue) };
                let outcome = self.state.move_file(id, index - 1, direction.into());
                report(out, outcome, |()| fl!(LANGUAGE_LOADER, "notice-done"))?;
            }
            SessionCommand::Split { row, index } => {
                let Some(id) = self.row_id(row, out)? else { return Ok(Flow::Continue) };
                let outcome = self.state.split_file_to_new_layer(id, index - 1);
                let state = &self.state;
                report(out, outcome, |new_id| fl!(LANGUAGE_LOADER, "notice-split", name = layer_name(state, new_id)))?;
            }
            SessionCommand::Set { row, field, value } => {
                let Some(id) = self.row_id(row, out)? else { return Ok(Flow::Continue) };
                let outcome = self.state.update_layer_field(id, field, &value);
                report(out, outcome, |()| fl!(LANGUAGE_LOADER, "notice-done"))?;
            }
            SessionCommand::SetFile { row, index, field, value } => {
                let Some(id) = self.row_id(row, out)? else { return Ok(Flow::Continue) };
                let outcome = self.state.update_file_field(id, index - 1, field, &value);
                report(out, outcome, |()| fl!(LANGUAGE_LOADER, "notice-done"))?;
            }
            SessionCommand::SetVariable { row, value } => {
                let Some(id) = self.row_id(row, out)? else { return Ok(Flow::Continue) };
                let outcome = self.state.set_layer_variable_id(id, &value);
                report(out, outcome, |count| fl!(LANGUAGE_LOADER, "notice-variable", count = count))?;
            }
            SessionCommand::Filter { actor } => {
                let outcome = self.state.apply_filter(&actor);
                let count = self.state.summary().visible_count;
                report(out, outcome, |()| fl!(LANGUAGE_LOADER, "notice-filter", count = count, actor = actor.trim().to_string()))?;
            }
            SessionCommand::ClearFilter => {
                self.state.clear_filter();
                writeln!(out, "{}", fl!(LANGUAGE_LOADER, "notice-filter-cleared", count = self.state.len()))?;
            }
            SessionCommand::Select { rows } => self.select_rows(&rows, true, out)?,
            SessionCommand::Deselect { rows } => self.select_rows(&rows, false, out)?,
            SessionCommand::SelectAll => {
                self.state.select_all_visible();
                writeln!(out, "{}", fl!(LANGUAGE_LOADER, "notice-selected", count = self.state.selected_count()))?;
            }
            SessionCommand::ClearSelection => {
                self.state.clear_selection();
                writeln!(out, "{}", fl!(LANGUAGE_LOADER, "notice-selected", count = 0))?;
            }
            SessionCommand::Duplicate => {
                let outcome = self.state.duplicate_selected();
                report(out, outcome, |copies| fl!(LANGUAGE_LOADER, "notice-duplicated", count = copies.len()))?;
            }
            SessionCommand::Batch { attribute, value } => {
                let outcome = self.state.batch_set_selected(attribute, &value);
                report(out, outcome, |count| fl!(LANGUAGE_LOADER, "notice-batch", attribute = attribute.label(), count = count))?;
            }
            SessionCommand::Scan { dir } => {
                let dir = dir.unwrap_or_else(|| self.options.pictures_dir.clone());
                let source = PicturesDirectory::with_extensions(&dir, &self.options.image_extensions);
                let count = self.state.scan_available_images(&source)?;
                writeln!(out, "{}", fl!(LANGUAGE_LOADER, "notice-scanned", count = count, dir = dir.display().to_string()))?;
            }
            SessionCommand::Images => {
                let selected: BTreeSet<&str> = self.state.selected_images().collect();
                for image in self.state.available_images() {
                    let mark = if selected.contains(image.as_str()) { '*' } else { ' ' };
                    writeln!(out, "{mark} {image}")?;
                }
            }
            SessionCommand::Pick { paths } => {
                for path in &paths {
                    if let Outcome::Ignored(reason) = self.state.toggle_image_selection(path) {
                        ignored(out, &reason)?;
                    }
                }
                writeln!(out, "{}", fl!(LANGUAGE_LOADER, "notice-images-selected", count = self.state.selected_image_count()))?;
            }
            SessionCommand::ClearPicks => {
                self.state.clear_image_selection();
                writeln!(out, "{}", fl!(LANGUAGE_LOADER, "notice-images-selected", count = 0))?;
            }
            SessionCommand::AddImages => {
                let requested = self.state.request_add_selected_images().map(|_| ());
                self.ask_if_requested(requested, input, out)?;
            }
            SessionCommand::Export { output } => {
                let text = if self.options.copy_on_export {
                    let text = self.state.copy_export_to_clipboard(self.clipboard.as_mut())?;
                    writeln!(out, "{}", fl!(LANGUAGE_LOADER, "notice-copied"))?;
                    text
                } else {
                    self.state.export()?
                };
                commands::write_export(&text, output.as_deref(), out)?;
            }
            SessionCommand::Copy => {
                let _ = self.state.copy_export_to_clipboard(self.clipboard.as_mut())?;
                writeln!(out, "{}", fl!(LANGUAGE_LOADER, "notice-copied"))?;
            }
            SessionCommand::Save => self.save(out)?,
            SessionCommand::Quit { force } => {
                if self.state.is_dirty() && !force {
                    writeln!(out, "{}", fl!(LANGUAGE_LOADER, "session-unsaved"))?;
                } else {
                    return Ok(Flow::Quit);
                }
            }
        }
        Ok(Flow::Continue)
    }

    /// Maps a 1-based visible row to its layer, reporting rows past the end.
    fn row_id(&self, row: usize, out: &mut dyn Write) -> ToolResult<Option<LayerId>> {
        let id = row.checked_sub(1).and_then(|row| self.state.visible_row_to_id(row));
        if id.is_none() {
            let len = self.state.summary().visible_count;
            ignored(out, &Noop::RowOutOfRange { row, len })?;
        }
        Ok(id)
    }

    fn select_rows(&mut self, rows: &[usize], selected: bool, out: &mut dyn Write) -> ToolResult<()> {
        for &row in rows {
            if let Some(id) = self.row_id(row, out)? {
                if let Outcome::Ignored(reason) = self.state.toggle_select(id, selected) {
                    ignored(out, &reason)?;
                }
            }
        }
        writeln!(out, "{}", fl!(LANGUAGE_LOADER, "notice-selected", count = self.state.selected_count()))?;
        Ok(())
    }

    fn ask_if_requested(&mut self, requested: Outcome, input: &mut dyn BufRead, out: &mut dyn Write) -> ToolResult<()> {
        match requested {
            Outcome::Applied(()) => self.ask(input, out),
            Outcome::Ignored(reason) => ignored(out, &reason),
        }
    }

    /// Asks the pending prompt's question and resolves it with the answer.
    fn ask(&mut self, input: &mut dyn BufRead, out: &mut dyn Write) -> ToolResult<()> {
        let confirm = self.options.confirm_destructive;
        let (response, deleted_notice) = match self.state.pending_prompt() {
            None => return Ok(()),
            Some(Prompt::DeleteLayer { name, .. }) => {
                let notice = fl!(LANGUAGE_LOADER, "notice-layer-deleted", name = name.clone());
                if confirm {
                    writeln!(out, "{}", fl!(LANGUAGE_LOADER, "prompt-delete-layer", name = name.clone()))?;
                    (read_answer(input)?, notice)
                } else {
                    (PromptResponse::Confirm, notice)
                }
            }
            Some(Prompt::DeleteFile { file_name, .. }) => {
                let notice = fl!(LANGUAGE_LOADER, "notice-file-deleted", file = file_name.clone());
                if confirm {
                    writeln!(out, "{}", fl!(LANGUAGE_LOADER, "prompt-delete-file", file = file_name.clone()))?;
                    (read_answer(input)?, notice)
                } else {
                    (PromptResponse::Confirm, notice)
                }
            }
            Some(Prompt::AddSelectedImages { image_count, choices }) => {
                for choice in choices {
                    writeln!(out, "  {choice}")?;
                }
                writeln!(out, "{}", fl!(LANGUAGE_LOADER, "prompt-add-images", count = (*image_count)))?;
                (read_answer(input)?, String::new())
            }
        };

        match self.state.resolve_prompt(response)? {
            PromptResult::Completed(Outcome::Applied(Some(id))) => {
                writeln!(out, "{}", fl!(LANGUAGE_LOADER, "notice-images-added", name = layer_name(&self.state, id)))?;
            }
            PromptResult::Completed(Outcome::Applied(None)) => writeln!(out, "{deleted_notice}")?,
            PromptResult::Completed(Outcome::Ignored(reason)) => ignored(out, &reason)?,
            PromptResult::Cancelled => writeln!(out, "{}", fl!(LANGUAGE_LOADER, "notice-cancelled"))?,
        }
        Ok(())
    }

    fn save(&mut self, out: &mut dyn Write) -> ToolResult<()> {
        let text = self.state.export()?;
        fs::write(&self.file, text).with_context(|| fl!(LANGUAGE_LOADER, "context-write", file = self.file.display().to_string()))?;
        self.state.mark_saved();
        log::info!("saved {}", self.file.display());
        writeln!(out, "{}", fl!(LANGUAGE_LOADER, "notice-saved", file = self.file.display().to_string()))?;
        Ok(())
    }

    fn write_status(&self, out: &mut dyn Write) -> ToolResult<()> {
        let summary = self.state.summary();
        writeln!(
            out,
            "{}",
            fl!(
                LANGUAGE_LOADER,
                "status-line",
                layers = summary.layer_count,
                visible = summary.visible_count,
                selected = summary.selected_count,
                files = summary.file_count
            )
        )?;
        if let Some(actor) = self.state.filter() {
            writeln!(out, "{}", fl!(LANGUAGE_LOADER, "status-filter", actor = actor))?;
        }
        if self.state.is_dirty() {
            writeln!(out, "{}", fl!(LANGUAGE_LOADER, "status-unsaved"))?;
        }
        Ok(())
    }
}

fn layer_name(state: &PictureListEditState, id: LayerId) -> String {
    state.layer(id).map(|layer| layer.name.clone()).unwrap_or_default()
}

fn ignored(out: &mut dyn Write, reason: &Noop) -> ToolResult<()> {
    writeln!(out, "{}", fl!(LANGUAGE_LOADER, "notice-ignored", reason = reason.to_string()))?;
    Ok(())
}

fn report<T>(out: &mut dyn Write, outcome: Outcome<T>, applied: impl FnOnce(T) -> String) -> ToolResult<()> {
    match outcome {
        Outcome::Applied(value) => {
            writeln!(out, "{}", applied(value))?;
            Ok(())
        }
        Outcome::Ignored(reason) => ignored(out, &reason),
    }
}

/// Next input line as an answer; end of input cancels.
fn read_answer(input: &mut dyn BufRead) -> ToolResult<PromptResponse> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(PromptResponse::Cancel);
    }
    Ok(PromptResponse::Answer(line.trim().to_string()))
}

/// Splits a command line into words. Single and double quotes group words,
/// a backslash outside single quotes takes the next character literally.
fn split_line(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match (quote, ch) {
            (Some(open), ch) if ch == open => quote = None,
            (Some('"') | None, '\\') => {
                if let Some(next) = chars.next() {
                    word.push(next);
                    in_word = true;
                }
            }
            (Some(_), ch) => word.push(ch),
            (None, '"' | '\'') => {
                quote = Some(ch);
                in_word = true;
            }
            (None, ch) if ch.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            (None, ch) => {
                word.push(ch);
                in_word = true;
            }
        }
    }

    if let Some(open) = quote {
        return Err(format!("missing closing {open}"));
    }
    if in_word {
        words.push(word);
    }
    Ok(words)
}
