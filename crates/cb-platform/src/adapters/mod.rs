mod console_ui;
mod deferred_capture;
mod direct;

pub use console_ui::ConsoleUi;
pub use deferred_capture::{DeferredCaptureAdapter, DATA_TRANSFER_FORMATS};
pub use direct::DirectAdapter;
