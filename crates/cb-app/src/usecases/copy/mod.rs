mod resolver;
mod start_copy;

pub use resolver::CopyContentResolver;
pub use start_copy::{CopyReport, CopyTicket, StartCopy};
