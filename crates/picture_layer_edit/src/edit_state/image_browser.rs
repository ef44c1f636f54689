//! Available pictures and the image selection
//!
//! Paths are `/` separated, relative to the pictures directory and without
//! extension, which is how files reference them. Selected images are kept
//! sorted.

use crate::{ImageSource, LayerId, PictureFile, Result};

use super::{ImageTarget, Noop, Outcome, PictureListEditState};

impl PictureListEditState {
    /// Get the images offered for selection
    pub fn available_images(&self) -> &[String] {
        &self.available_images
    }

    /// Replace the available images with what `source` lists. Selected images
    /// that are no longer available are dropped. Returns the image count.
    pub fn scan_available_images(&mut self, source: &dyn ImageSource) -> Result<usize> {
        let images = source.list_images()?;
        self.set_available_images(images);
        log::info!("{} images available", self.available_images.len());
        Ok(self.available_images.len())
    }

    pub fn set_available_images(&mut self, images: Vec<String>) {
        self.available_images = images;
        let available = &self.available_images;
        self.selected_images.retain(|path| available.contains(path));
    }

    /// Flip the selection of an available image. Returns whether it is
    /// selected afterwards.
    pub fn toggle_image_selection(&mut self, path: &str) -> Outcome<bool> {
        if !self.available_images.iter().any(|image| image == path) {
            return Outcome::ignored("select image", Noop::UnknownImage(path.to_string()));
        }
        if self.selected_images.remove(path) {
            Outcome::Applied(false)
        } else {
            self.selected_images.insert(path.to_string());
            Outcome::Applied(true)
        }
    }

    pub fn clear_image_selection(&mut self) {
        self.selected_images.clear();
    }

    /// Get selected images in sorted order
    pub fn selected_images(&self) -> impl Iterator<Item = &str> + '_ {
        self.selected_images.iter().map(String::as_str)
    }

    pub fn selected_image_count(&self) -> usize {
        self.selected_images.len()
    }

    /// Append one file per selected image to `target` and clear the image
    /// selection. [`ImageTarget::NewLayer`] adds a layer first. Returns the
    /// layer that received the files.
    pub fn add_selected_images_to_layer(&mut self, target: ImageTarget) -> Outcome<LayerId> {
        if self.selected_images.is_empty() {
            return Outcome::ignored("add images", Noop::NoImagesSelected);
        }
        let id = match target {
            ImageTarget::NewLayer => self.add_layer(),
            ImageTarget::Layer(id) => {
                if self.position(id).is_none() {
                    return Outcome::ignored("add images", Noop::UnknownLayer(id));
                }
                id
            }
        };

        let images = std::mem::take(&mut self.selected_images);
        let count = images.len();
        self.append_files(id, images.into_iter().map(PictureFile::new)).map(|_| {
            log::info!("added {count} images to layer {id}");
            id
        })
    }
}
