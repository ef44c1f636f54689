//! Confirmation and target prompts
//!
//! Operations that need an answer from the user are split into a request,
//! which records a [`Prompt`] and changes nothing else, and a resolve step
//! that runs or abandons it. Requesting a new prompt replaces a pending one.
//!
//! Answers follow the editor's textual conventions:
//! - delete confirmations accept `y` / `yes`, anything else declines
//! - the image target accepts an empty answer, `n` or `new` for a new layer,
//!   or a 1-based row of the listed layers

use std::fmt;

use crate::{EditorError, LayerId, Result};

use super::{Noop, Outcome, PictureListEditState};

/// Where selected images go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTarget {
    NewLayer,
    Layer(LayerId),
}

impl ImageTarget {
    /// Interpret a textual answer against the offered `choices`
    pub fn parse_answer(answer: &str, choices: &[TargetChoice]) -> Option<ImageTarget> {
        let answer = answer.trim().to_lowercase();
        if answer.is_empty() || answer == "n" || answer == "new" {
            return Some(ImageTarget::NewLayer);
        }
        let row: usize = answer.parse().ok()?;
        choices.iter().find(|choice| choice.row == row).map(|choice| ImageTarget::Layer(choice.id))
    }
}

/// One layer offered as image target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetChoice {
    /// 1-based row as shown to the user
    pub row: usize,
    pub id: LayerId,
    pub name: String,
    pub actor_id: i32,
}

impl fmt::Display for TargetChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() { "Unnamed" } else { &self.name };
        write!(f, "{}: {name} (Actor {})", self.row, self.actor_id)
    }
}

/// A question waiting for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    DeleteLayer { id: LayerId, name: String },
    DeleteFile { layer: LayerId, index: usize, file_name: String },
    AddSelectedImages { image_count: usize, choices: Vec<TargetChoice> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    /// Accept: delete, or add the images to a new layer
    Confirm,
    Cancel,
    Answer(String),
}

/// What resolving a prompt did.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum PromptResult {
    /// The operation ran. Image prompts report the layer that got the files.
    Completed(Outcome<Option<LayerId>>),
    /// The user declined; nothing changed.
    Cancelled,
}

impl PictureListEditState {
    /// Get the prompt waiting for an answer
    pub fn pending_prompt(&self) -> Option<&Prompt> {
        self.pending_prompt.as_ref()
    }

    /// Ask before deleting a layer
    pub fn request_delete_layer(&mut self, id: LayerId) -> Outcome<&Prompt> {
        let Some(layer) = self.layer(id) else {
            return Outcome::ignored("delete layer", Noop::UnknownLayer(id));
        };
        let prompt = Prompt::DeleteLayer { id, name: layer.name.clone() };
        Outcome::Applied(self.set_prompt(prompt))
    }

    /// Ask before deleting a file
    pub fn request_delete_file(&mut self, id: LayerId, index: usize) -> Outcome<&Prompt> {
        if let Err(reason) = self.check_file_index(id, index) {
            return Outcome::ignored("delete file", reason);
        }
        let file_name = self
            .layer(id)
            .and_then(|layer| layer.file_list.get(index))
            .map(|file| file.file_name.clone())
            .unwrap_or_default();
        let prompt = Prompt::DeleteFile { layer: id, index, file_name };
        Outcome::Applied(self.set_prompt(prompt))
    }

    /// Ask which visible layer receives the selected images
    pub fn request_add_selected_images(&mut self) -> Outcome<&Prompt> {
        if self.selected_images.is_empty() {
            return Outcome::ignored("add images", Noop::NoImagesSelected);
        }
        let choices = self
            .visible_layers()
            .enumerate()
            .map(|(row, layer)| TargetChoice {
                row: row + 1,
                id: layer.id(),
                name: layer.name.clone(),
                actor_id: layer.actor_id,
            })
            .collect();
        let prompt = Prompt::AddSelectedImages {
            image_count: self.selected_images.len(),
            choices,
        };
        Outcome::Applied(self.set_prompt(prompt))
    }

    /// Answer the pending prompt. Fails only if nothing is pending.
    pub fn resolve_prompt(&mut self, response: PromptResponse) -> Result<PromptResult> {
        let prompt = self.pending_prompt.take().ok_or(EditorError::NoPendingPrompt)?;
        if response == PromptResponse::Cancel {
            log::debug!("prompt cancelled");
            return Ok(PromptResult::Cancelled);
        }

        let result = match prompt {
            Prompt::DeleteLayer { id, .. } => {
                if !is_confirmation(&response) {
                    return Ok(PromptResult::Cancelled);
                }
                self.delete_layer(id).map(|_| None)
            }
            Prompt::DeleteFile { layer, index, file_name } => {
                if !is_confirmation(&response) {
                    return Ok(PromptResult::Cancelled);
                }
                match self.file_moved_since_prompt(layer, index, &file_name) {
                    Some(reason) => Outcome::ignored("delete file", reason),
                    None => self.delete_file(layer, index).map(|_| None),
                }
            }
            Prompt::AddSelectedImages { choices, .. } => {
                let target = match &response {
                    PromptResponse::Answer(answer) => ImageTarget::parse_answer(answer, &choices),
                    _ => Some(ImageTarget::NewLayer),
                };
                match target {
                    Some(target) => self.add_selected_images_to_layer(target).map(Some),
                    None => {
                        let answer = match response {
                            PromptResponse::Answer(answer) => answer,
                            _ => String::new(),
                        };
                        Outcome::ignored("add images", Noop::InvalidTarget(answer))
                    }
                }
            }
        };
        Ok(PromptResult::Completed(result))
    }

    /// Abandon the pending prompt. Returns false if there was none.
    pub fn cancel_prompt(&mut self) -> bool {
        self.pending_prompt.take().is_some()
    }

    /// The file at `index` must still be the one the question named.
    fn file_moved_since_prompt(&self, layer: LayerId, index: usize, file_name: &str) -> Option<Noop> {
        let current = self.layer(layer)?.file_list.get(index)?;
        (current.file_name != file_name).then(|| Noop::FileChanged {
            layer,
            index,
            expected: file_name.to_string(),
        })
    }

    fn set_prompt(&mut self, prompt: Prompt) -> &Prompt {
        if let Some(previous) = self.pending_prompt.take() {
            log::debug!("replacing pending prompt {previous:?}");
        }
        self.pending_prompt.insert(prompt)
    }
}

fn is_confirmation(response: &PromptResponse) -> bool {
    match response {
        PromptResponse::Confirm => true,
        PromptResponse::Cancel => false,
        PromptResponse::Answer(answer) => {
            let answer = answer.trim();
            answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
        }
    }
}
