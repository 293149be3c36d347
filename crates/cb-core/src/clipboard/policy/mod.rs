//! Paste-side policies: which format to hand out, and which formats may be asked for.
mod eligibility;
mod model;
mod selector;

pub use eligibility::{eligible_formats, is_eligible};
pub use model::{FormatPolicy, FormatSelection};
pub use selector::{select_format, DEFAULT_PRIORITY};
