use picture_layer_edit::EditorError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HostError>;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("Invalid value '{value}' for parameter {name}")]
    Parameter { name: String, value: String },

    #[error("Malformed struct list: {0}")]
    Decode(#[from] EditorError),

    #[error("Unknown command {command} for plugin {plugin}")]
    UnknownCommand { plugin: &'static str, command: String },

    #[error("Host call failed: {0}")]
    Host(String),
}
