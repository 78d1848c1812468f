use crate::error::{Result, SnipdexError};
use crate::models::Snippet;
use arboard::Clipboard;
#[cfg(target_os = "linux")]
use arboard::SetExtLinux;

/// Destination for copied snippet text
pub trait ClipboardSink {
    fn write(&mut self, text: &str) -> Result<()>;

    /// Write `text` from a process that exits right afterwards.
    ///
    /// Sinks whose content dies with the writer block here until the content
    /// has been handed over.
    fn write_and_hold(&mut self, text: &str) -> Result<()> {
        self.write(text)
    }
}

/// The system clipboard
pub struct SystemClipboard {
    inner: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = Clipboard::new().map_err(|e| SnipdexError::Clipboard(e.to_string()))?;
        Ok(SystemClipboard { inner })
    }
}

impl ClipboardSink for SystemClipboard {
    fn write(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text)
            .map_err(|e| SnipdexError::Clipboard(e.to_string()))
    }

    // X11 and Wayland serve the selection from the owning process, so keep
    // serving it until another client replaces it.
    #[cfg(target_os = "linux")]
    fn write_and_hold(&mut self, text: &str) -> Result<()> {
        self.inner
            .set()
            .wait()
            .text(text)
            .map_err(|e| SnipdexError::Clipboard(e.to_string()))
    }
}

/// Copy a snippet's code to the clipboard
pub fn copy_snippet(sink: &mut impl ClipboardSink, snippet: &Snippet) -> Result<()> {
    sink.write(&snippet.code)?;
    log_copy(snippet);
    Ok(())
}

/// Copy a snippet's code from a short-lived process, such as a CLI command
pub fn copy_snippet_and_hold(sink: &mut impl ClipboardSink, snippet: &Snippet) -> Result<()> {
    sink.write_and_hold(&snippet.code)?;
    log_copy(snippet);
    Ok(())
}

fn log_copy(snippet: &Snippet) {
    tracing::info!(
        snippet = %snippet.id,
        lines = snippet.line_count(),
        "Copied snippet to clipboard"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingClipboard;

    impl ClipboardSink for FailingClipboard {
        fn write(&mut self, _text: &str) -> Result<()> {
            Err(SnipdexError::Clipboard("no display".to_string()))
        }
    }

    #[test]
    fn copy_propagates_sink_failure() {
        let snippet = Snippet {
            id: "git-status".to_string(),
            title: "Status".to_string(),
            description: String::new(),
            code: "git status".to_string(),
            language: "bash".to_string(),
        };
        let err = copy_snippet(&mut FailingClipboard, &snippet).unwrap_err();
        assert_eq!(err.to_string(), "Clipboard error: no display");
    }
}
