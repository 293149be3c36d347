//! Business logic use cases
//!
//! Copy:
//!   begin (clear | placeholder) → resolve (detached) → publish
//!
//! Paste:
//!   read both replicas → reconcile → gate → select → render
//!
//! Mirror notification:
//!   refresh eligibility from the other context's metadata

pub mod copy;
pub mod paste;
pub mod refresh_eligibility;
pub mod report_environment;

pub use copy::{CopyContentResolver, CopyReport, CopyTicket, StartCopy};
pub use paste::{PasteClipboard, PasteOutcome};
pub use refresh_eligibility::RefreshEligibility;
pub use report_environment::ReportEnvironment;
