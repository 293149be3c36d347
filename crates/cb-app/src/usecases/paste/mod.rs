mod paste_clipboard;

pub use paste_clipboard::{PasteClipboard, PasteOutcome};
