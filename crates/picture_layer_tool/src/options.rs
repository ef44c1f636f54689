use std::{fs, path::PathBuf};

use picture_layer_edit::images::DEFAULT_PICTURES_DIR;
use serde::{Deserialize, Serialize};

use crate::ToolResult;

const APP_NAME: &str = "picture_layer";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Directory scanned for pictures, relative to the working directory
    pub pictures_dir: PathBuf,
    pub image_extensions: Vec<String>,
    /// Ask before deleting layers or files
    pub confirm_destructive: bool,
    /// Also copy to the clipboard when exporting
    pub copy_on_export: bool,
    pub log_spec: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            pictures_dir: PathBuf::from(DEFAULT_PICTURES_DIR),
            image_extensions: vec!["png".to_string()],
            confirm_destructive: true,
            copy_on_export: false,
            log_spec: "info".to_string(),
        }
    }
}

impl Options {
    pub fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "GitHub", APP_NAME)
    }

    pub fn options_file() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("options.toml"))
    }

    /// Loads the stored options, defaults if there are none.
    pub fn load_options() -> ToolResult<Self> {
        if let Some(options_file) = Self::options_file() {
            if options_file.exists() {
                return Self::load_from(&options_file);
            }
        }
        Ok(Options::default())
    }

    pub fn load_from(file: &std::path::Path) -> ToolResult<Self> {
        let content = fs::read_to_string(file)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn store_options(&self) -> ToolResult<()> {
        if let Some(dirs) = Self::project_dirs() {
            fs::create_dir_all(dirs.config_dir())?;
            self.store_to(&dirs.config_dir().join("options.toml"))?;
        }
        Ok(())
    }

    /// Writes through a temp file so a failed write keeps the old options.
    pub fn store_to(&self, file: &std::path::Path) -> ToolResult<()> {
        let mut write_name = file.to_path_buf();
        write_name.set_extension("new");

        let toml_string = toml::to_string_pretty(self)?;
        fs::write(&write_name, toml_string)?;
        fs::rename(&write_name, file)?;
        Ok(())
    }
}
