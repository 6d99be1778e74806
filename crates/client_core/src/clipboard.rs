#[cfg(target_os = "linux")]
use std::time::Instant;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{error, info};

use crate::error::ClipboardError;

/// Blocking notices surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    NothingToCopy,
    Copied,
    CopyFailed,
    PdfNotImplemented,
}

impl Alert {
    pub fn message(self) -> &'static str {
        match self {
            Self::NothingToCopy => "No SOW content to copy!",
            Self::Copied => "SOW content copied to clipboard!",
            Self::CopyFailed => "Failed to copy. Please try manually.",
            Self::PdfNotImplemented => "PDF generation is not yet implemented.",
        }
    }
}

#[async_trait]
pub trait ClipboardSink: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// OS clipboard through `arboard`. The handle is opened per write and the
/// blocking call runs off the async executor.
///
/// On Linux the copied text only lives as long as the process that owns the
/// selection. Short-lived callers use [`SystemClipboard::holding`] so the write
/// keeps serving the text until another application takes the clipboard or the
/// hold expires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClipboard {
    hold: Option<Duration>,
}

impl SystemClipboard {
    pub fn holding(hold: Duration) -> Self {
        Self { hold: Some(hold) }
    }

    /// How long a write may block serving the text. Always `None` off Linux.
    pub fn hold(&self) -> Option<Duration> {
        if cfg!(target_os = "linux") {
            self.hold
        } else {
            None
        }
    }
}

#[async_trait]
impl ClipboardSink for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let text = text.to_string();
        let hold = self.hold();
        if let Some(hold) = hold {
            info!(
                hold_secs = hold.as_secs(),
                "serving clipboard until another application takes it"
            );
        }
        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|err| ClipboardError::Unavailable(err.to_string()))?;
            set_clipboard_text(&mut clipboard, text, hold)
                .map_err(|err| ClipboardError::Write(err.to_string()))
        })
        .await
        .map_err(|err| ClipboardError::Write(err.to_string()))?
    }
}

#[cfg(target_os = "linux")]
fn set_clipboard_text(
    clipboard: &mut arboard::Clipboard,
    text: String,
    hold: Option<Duration>,
) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    match hold {
        Some(hold) => clipboard
            .set()
            .wait_until(Instant::now() + hold)
            .text(text),
        None => clipboard.set_text(text),
    }
}

#[cfg(not(target_os = "linux"))]
fn set_clipboard_text(
    clipboard: &mut arboard::Clipboard,
    text: String,
    _hold: Option<Duration>,
) -> Result<(), arboard::Error> {
    clipboard.set_text(text)
}

/// Empty text never reaches the clipboard.
pub async fn copy_text(clipboard: &dyn ClipboardSink, text: &str) -> Alert {
    if text.is_empty() {
        return Alert::NothingToCopy;
    }
    match clipboard.write_text(text).await {
        Ok(()) => {
            info!(bytes = text.len(), "copied sow content to clipboard");
            Alert::Copied
        }
        Err(err) => {
            error!(error = %err, "failed to copy sow content");
            Alert::CopyFailed
        }
    }
}

pub fn download_pdf() -> Alert {
    Alert::PdfNotImplemented
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingClipboard {
        writes: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl ClipboardSink for RecordingClipboard {
        async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::Unavailable("no display".into()));
            }
            self.writes.lock().expect("lock").push(text.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn empty_text_skips_clipboard() {
        let clipboard = RecordingClipboard::default();
        assert_eq!(copy_text(&clipboard, "").await, Alert::NothingToCopy);
        assert!(clipboard.writes.lock().expect("lock").is_empty());
    }

    #[tokio::test]
    async fn writes_text_and_confirms() {
        let clipboard = RecordingClipboard::default();
        assert_eq!(copy_text(&clipboard, "Title\nT").await, Alert::Copied);
        assert_eq!(*clipboard.writes.lock().expect("lock"), vec!["Title\nT"]);
    }

    #[tokio::test]
    async fn write_failure_becomes_alert() {
        let clipboard = RecordingClipboard {
            fail: true,
            ..RecordingClipboard::default()
        };
        let alert = copy_text(&clipboard, "Title\nT").await;
        assert_eq!(alert, Alert::CopyFailed);
        assert_eq!(alert.message(), "Failed to copy. Please try manually.");
    }

    #[test]
    fn default_system_clipboard_never_holds() {
        assert_eq!(SystemClipboard::default().hold(), None);
    }

    #[test]
    fn holding_clipboard_blocks_only_on_linux() {
        let clipboard = SystemClipboard::holding(Duration::from_secs(30));
        if cfg!(target_os = "linux") {
            assert_eq!(clipboard.hold(), Some(Duration::from_secs(30)));
        } else {
            assert_eq!(clipboard.hold(), None);
        }
    }

    #[test]
    fn pdf_is_a_stub() {
        assert_eq!(download_pdf(), Alert::PdfNotImplemented);
    }
}
