//! Export target for copied picture list text.

use clipboard_rs::{Clipboard, ClipboardContext};

use crate::{EditorError, Result};

pub trait ClipboardSink {
    fn set_text(&mut self, text: String) -> Result<()>;
}

/// The system clipboard.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: String) -> Result<()> {
        let ctx = ClipboardContext::new().map_err(|e| EditorError::Clipboard(e.to_string()))?;
        ctx.set_text(text).map_err(|e| EditorError::Clipboard(e.to_string()))?;
        log::debug!("copied picture list to clipboard");
        Ok(())
    }
}

/// Collects copied texts, for front ends without a clipboard.
impl ClipboardSink for Vec<String> {
    fn set_text(&mut self, text: String) -> Result<()> {
        self.push(text);
        Ok(())
    }
}
