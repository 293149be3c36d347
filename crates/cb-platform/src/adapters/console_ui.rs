use std::collections::BTreeSet;
use std::io::Write;

use cb_core::clipboard::FormatSelection;
use cb_core::ports::{ClipboardCapability, LogLevel, PermissionState, UiPort};
use cb_core::{Classification, FormatTag, PayloadContent, SessionId};

const PREVIEW_CHARS: usize = 120;

/// UI sink that prints one line per update, prefixed with the context label.
#[derive(Debug, Clone)]
pub struct ConsoleUi {
    label: String,
}

impl ConsoleUi {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    fn line(&self, body: std::fmt::Arguments<'_>) {
        let mut out = std::io::stdout().lock();
        // A closed stdout only loses display output.
        let _ = writeln!(out, "[{}] {}", self.label, body);
    }
}

fn preview(content: &PayloadContent) -> String {
    match content {
        PayloadContent::Text(text) => {
            let mut shown: String = text.chars().take(PREVIEW_CHARS).collect();
            if text.chars().count() > PREVIEW_CHARS {
                shown.push('…');
            }
            shown.replace('\n', "\\n")
        }
        PayloadContent::Binary(bytes) => format!("<{} bytes>", bytes.len()),
    }
}

impl UiPort for ConsoleUi {
    fn append_log(&self, level: LogLevel, message: &str) {
        let tag = match level {
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        self.line(format_args!("{tag}: {message}"));
    }

    fn set_copy_in_progress(&self, in_progress: bool) {
        if in_progress {
            self.line(format_args!("copy: resolving…"));
        } else {
            self.line(format_args!("copy: ready"));
        }
    }

    fn set_paste_formats(&self, eligible: &BTreeSet<FormatTag>) {
        let aliases: Vec<&str> = eligible.iter().map(|t| t.alias()).collect();
        self.line(format_args!("paste enabled for: {}", aliases.join(", ")));
    }

    fn render_paste(&self, selection: &FormatSelection, classification: Classification) {
        match &selection.content {
            Some(content) => self.line(format_args!(
                "pasted {} ({}): {}",
                selection.tag.alias(),
                classification,
                preview(content)
            )),
            None => self.line(format_args!(
                "pasted {} ({}): <absent>",
                selection.tag.alias(),
                classification
            )),
        }
    }

    fn show_session(&self, session: &SessionId) {
        self.line(format_args!("session {session}"));
    }

    fn show_permission(&self, capability: ClipboardCapability, state: PermissionState) {
        self.line(format_args!("permission {capability}: {state:?}"));
    }
}
