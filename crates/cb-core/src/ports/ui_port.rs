//! One-way UI sink. Nothing written here ever feeds back into the core.

use std::collections::BTreeSet;

use super::{ClipboardCapability, PermissionState};
use crate::clipboard::{Classification, FormatSelection, FormatTag};
use crate::ids::SessionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

pub trait UiPort: Send + Sync {
    fn append_log(&self, level: LogLevel, message: &str);

    /// Copy controls disabled and progress shown while content resolves.
    fn set_copy_in_progress(&self, in_progress: bool);

    /// Paste controls enabled for exactly these formats.
    fn set_paste_formats(&self, eligible: &BTreeSet<FormatTag>);

    fn render_paste(&self, selection: &FormatSelection, classification: Classification);

    fn show_session(&self, session: &SessionId);

    fn show_permission(&self, capability: ClipboardCapability, state: PermissionState);
}
