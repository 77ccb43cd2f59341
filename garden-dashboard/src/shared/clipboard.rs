//! System clipboard access for copying order ids

use crate::shared::error::DashboardError;

/// Destination for copied text
pub trait ClipboardSink: Send + Sync {
    fn set_text(&self, text: &str) -> Result<(), DashboardError>;
}

/// OS clipboard via `arboard`
///
/// A new handle is opened per copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), DashboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| DashboardError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| DashboardError::Clipboard(e.to_string()))
    }
}
