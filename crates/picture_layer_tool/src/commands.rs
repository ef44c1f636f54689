//! One-shot subcommands.

use std::{collections::BTreeMap, fs, io::Write, path::Path};

use anyhow::Context;
use i18n_embed_fl::fl;
use picture_layer_edit::{ImageSource, PictureLayer, PictureListEditState, PicturesDirectory, SystemClipboard};

use crate::{Options, ToolResult, LANGUAGE_LOADER};

/// Reads and decodes a picture list file.
pub fn read_list(file: &Path) -> ToolResult<PictureListEditState> {
    let text = fs::read_to_string(file).with_context(|| fl!(LANGUAGE_LOADER, "context-read", file = file.display().to_string()))?;
    let mut state = PictureListEditState::new();
    let _ = state
        .load(&text)
        .with_context(|| fl!(LANGUAGE_LOADER, "context-decode", file = file.display().to_string()))?;
    Ok(state)
}

/// One line per layer: visible row, selection mark, name, actor, file count
/// and the layer's variable id.
pub fn layer_row(row: usize, layer: &PictureLayer, selected: bool) -> String {
    let mark = if selected { '*' } else { ' ' };
    let name = if layer.name.is_empty() { "(unnamed)" } else { &layer.name };
    format!(
        "{row:>3} {mark} {name:<24} actor {:<4} files {:<3} variable {}",
        layer.actor_id,
        layer.file_list.len(),
        layer.variable_id()
    )
}

pub fn write_layers(state: &PictureListEditState, out: &mut dyn Write) -> ToolResult<()> {
    let mut empty = true;
    for (row, layer) in state.visible_layers().enumerate() {
        writeln!(out, "{}", layer_row(row + 1, layer, state.is_selected(layer.id())))?;
        empty = false;
    }
    if empty {
        writeln!(out, "{}", fl!(LANGUAGE_LOADER, "list-empty"))?;
    }
    Ok(())
}

pub fn check(file: &Path, out: &mut dyn Write) -> ToolResult<()> {
    let state = read_list(file)?;
    let summary = state.summary();
    writeln!(out, "{}", fl!(LANGUAGE_LOADER, "check-summary", layers = summary.layer_count, files = summary.file_count))?;

    let mut per_actor: BTreeMap<i32, usize> = BTreeMap::new();
    for layer in state.layers() {
        *per_actor.entry(layer.actor_id).or_default() += 1;
    }
    for (actor, layers) in per_actor {
        writeln!(out, "{}", fl!(LANGUAGE_LOADER, "check-actor", actor = actor, layers = layers))?;
    }
    Ok(())
}

pub fn list(file: &Path, actor: Option<&str>, out: &mut dyn Write) -> ToolResult<()> {
    let mut state = read_list(file)?;
    if let Some(actor) = actor {
        if let Some(reason) = state.apply_filter(actor).noop() {
            anyhow::bail!("{reason}");
        }
    }
    write_layers(&state, out)
}

pub fn scan(dir: &Path, extensions: &[String], out: &mut dyn Write) -> ToolResult<()> {
    let images = PicturesDirectory::with_extensions(dir, extensions).list_images()?;
    for image in &images {
        writeln!(out, "{image}")?;
    }
    log::info!("{}", fl!(LANGUAGE_LOADER, "scan-summary", count = images.len(), dir = dir.display().to_string()));
    Ok(())
}

/// Decodes and re-encodes `file`, normalising field order and string typing.
pub fn export(file: &Path, clipboard: bool, output: Option<&Path>, out: &mut dyn Write) -> ToolResult<()> {
    let state = read_list(file)?;
    let text = if clipboard {
        let text = state.copy_export_to_clipboard(&mut SystemClipboard)?;
        log::info!("{}", fl!(LANGUAGE_LOADER, "notice-copied"));
        text
    } else {
        state.export()?
    };
    write_export(&text, output, out)
}

pub fn write_export(text: &str, output: Option<&Path>, out: &mut dyn Write) -> ToolResult<()> {
    match output {
        Some(path) => fs::write(path, text).with_context(|| fl!(LANGUAGE_LOADER, "context-write", file = path.display().to_string()))?,
        None => writeln!(out, "{text}")?,
    }
    Ok(())
}

pub fn configure(options: &Options, out: &mut dyn Write) -> ToolResult<()> {
    options.store_options()?;
    if let Some(file) = Options::options_file() {
        writeln!(out, "{}", fl!(LANGUAGE_LOADER, "options-stored", file = file.display().to_string()))?;
    }
    write!(out, "{}", toml::to_string_pretty(options)?)?;
    Ok(())
}
