//! Editing model for CharacterPictureManager picture lists.
//!
//! The host plugin stores its `PictureList` parameter as a double encoded JSON
//! array: every layer is a JSON string, and every layer's `FileList` is again a
//! JSON string holding an array of JSON strings. This crate turns that text
//! into typed records, offers the editing operations of the picture list
//! editor on top of them and writes the exact host format back.
//!
//! - [`codec`] - double encoded text <-> [`PictureLayer`] records
//! - [`PictureListEditState`] - layer store, filter view, selection and mutations
//! - [`images`] - enumeration of the pictures available to the host

mod error;
pub use error::*;

pub mod codec;
pub use codec::{decode_layers, decode_struct_list, encode_layers, encode_struct_list};

mod model;
pub use model::*;

mod edit_state;
pub use edit_state::*;

pub mod images;
pub use images::{ImageListing, ImageSource, PicturesDirectory};

pub mod clipboard;
pub use clipboard::{ClipboardSink, SystemClipboard};
