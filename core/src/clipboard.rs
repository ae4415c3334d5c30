use crate::error::ClipboardError;
use tracing::{debug, warn};

/// Plain-text clipboard sink.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard. The handle is opened on first use and kept alive,
/// since on X11 the copied text disappears with its owner.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        let Some(clipboard) = self.inner.as_mut() else {
            return Err(ClipboardError::Unavailable("no clipboard handle".into()));
        };
        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

/// In-process clipboard; remembers the last text written.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
    writes: usize,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Write `text`, logging instead of surfacing a failure. Returns whether the
/// text reached the clipboard.
pub fn copy_text(clipboard: &mut dyn Clipboard, text: &str) -> bool {
    match clipboard.set_text(text) {
        Ok(()) => {
            debug!(chars = text.chars().count(), "copied to clipboard");
            true
        }
        Err(err) => {
            warn!(error = %err, "failed to copy to clipboard");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Denied;

    impl Clipboard for Denied {
        fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Unavailable("permission denied".into()))
        }
    }

    #[test]
    fn copy_text_writes_exact_text() {
        let mut clipboard = MemoryClipboard::new();
        assert!(copy_text(&mut clipboard, "Title: X\n\nY"));
        assert_eq!(clipboard.contents(), Some("Title: X\n\nY"));
        assert_eq!(clipboard.writes(), 1);
    }

    #[test]
    fn copy_text_swallows_failures() {
        assert!(!copy_text(&mut Denied, "anything"));
    }
}
