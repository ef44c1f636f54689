//! Enumeration of the pictures a layer file can reference.
//!
//! Every source yields `/` separated paths relative to the pictures directory
//! with the extension removed (`child/misaki/emotion/joy`), sorted and without
//! duplicates.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{EditorError, Result};

/// Directory the host loads pictures from, relative to the game root.
pub const DEFAULT_PICTURES_DIR: &str = "img/pictures";

pub trait ImageSource {
    fn list_images(&self) -> Result<Vec<String>>;
}

/// Walks a pictures directory on disk.
#[derive(Debug, Clone)]
pub struct PicturesDirectory {
    root: PathBuf,
    extensions: Vec<String>,
}

impl PicturesDirectory {
    /// Lists `.png` files below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_extensions(root, ["png"])
    }

    /// Extensions are matched case-insensitively, without the leading dot.
    pub fn with_extensions<S: AsRef<str>>(root: impl Into<PathBuf>, extensions: impl IntoIterator<Item = S>) -> Self {
        Self {
            root: root.into(),
            extensions: extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn image_path(&self, path: &Path) -> Option<String> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        if !self.extensions.contains(&extension) {
            return None;
        }
        let relative = path.strip_prefix(&self.root).ok()?.with_extension("");
        let segments: Vec<&str> = relative.components().map(|c| c.as_os_str().to_str()).collect::<Option<_>>()?;
        Some(segments.join("/"))
    }
}

impl ImageSource for PicturesDirectory {
    fn list_images(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Err(EditorError::ImageScan {
                path: self.root.clone(),
                message: "not a directory".to_string(),
            });
        }
        let mut images = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(true) {
            let entry = entry.map_err(|err| EditorError::ImageScan {
                path: err.path().map_or_else(|| self.root.clone(), Path::to_path_buf),
                message: err.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            match self.image_path(entry.path()) {
                Some(image) => images.push(image),
                None => log::trace!("skipping {}", entry.path().display()),
            }
        }
        log::debug!("found {} images below {}", images.len(), self.root.display());
        Ok(normalize(images))
    }
}

/// A fixed list of picture paths, e.g. one granted by the user instead of a
/// directory walk. Paths may carry extensions and `\` separators.
#[derive(Debug, Clone, Default)]
pub struct ImageListing(pub Vec<String>);

impl ImageListing {
    pub fn new<S: Into<String>>(paths: impl IntoIterator<Item = S>) -> Self {
        Self(paths.into_iter().map(Into::into).collect())
    }
}

impl ImageSource for ImageListing {
    fn list_images(&self) -> Result<Vec<String>> {
        let images = self.0.iter().map(|path| strip_extension(&path.replace('\\', "/")).to_string()).collect();
        Ok(normalize(images))
    }
}

/// Removes a trailing `.ext` from the last segment.
fn strip_extension(path: &str) -> &str {
    let segment_start = path.rfind('/').map_or(0, |pos| pos + 1);
    match path[segment_start..].rfind('.') {
        Some(dot) if dot > 0 => &path[..segment_start + dot],
        _ => path,
    }
}

fn normalize(mut images: Vec<String>) -> Vec<String> {
    images.retain(|image| !image.is_empty());
    images.sort();
    images.dedup();
    images
}
