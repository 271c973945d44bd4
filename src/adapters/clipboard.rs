use crate::core::Clipboard;
use crate::utils::error::{Result, ShoppiesError};

/// The desktop clipboard via `arboard`. Opened lazily on each write, since a
/// headless session may have none.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ShoppiesError::ClipboardError {
                message: format!("Clipboard unavailable: {e}"),
            })?;
        clipboard
            .set_text(text)
            .map_err(|e| ShoppiesError::ClipboardError {
                message: e.to_string(),
            })
    }
}
