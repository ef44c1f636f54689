//! Picture list edit state module structure
//!
//! Split into multiple files matching the test structure:
//! - `state.rs` - Struct definition, constructors, getters, load and export
//! - `outcome.rs` - Result of a mutation that may be ignored
//! - `filter.rs` - Actor filter and the visible projection
//! - `selection.rs` - Layer selection
//! - `layer_operations.rs` - Add, delete, move, duplicate layers
//! - `file_operations.rs` - Add, delete, move, split files of a layer
//! - `field_operations.rs` - Single attribute updates
//! - `batch_operations.rs` - Attribute updates over the selection
//! - `image_browser.rs` - Available pictures and image selection
//! - `prompt.rs` - Confirmation and target prompts as request/response steps

mod outcome;

// State struct and basic operations
mod state;

// Implementation split by category (matching test structure)
mod batch_operations;
mod field_operations;
mod file_operations;
mod filter;
mod image_browser;
mod layer_operations;
mod prompt;
mod selection;

pub use batch_operations::BatchAttribute;
pub use layer_operations::COPY_SUFFIX;
pub use outcome::{Noop, Outcome};
pub use prompt::{ImageTarget, Prompt, PromptResponse, PromptResult, TargetChoice};
pub use state::{PictureListEditState, Summary};
