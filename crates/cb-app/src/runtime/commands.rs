use tokio::sync::oneshot;

use cb_core::ports::ContentError;
use cb_core::{FormatPolicy, FormatTag, PayloadSet, TriggerKind};

use crate::state::StatusReport;
use crate::usecases::{CopyReport, CopyTicket, PasteOutcome};

/// Requests delivered to a context's runtime.
#[derive(Debug)]
pub enum HarnessCommand {
    /// An empty `formats` list clears both replicas.
    Copy {
        formats: Vec<FormatTag>,
        trigger: TriggerKind,
        done: oneshot::Sender<CopyReport>,
    },
    Paste {
        policy: FormatPolicy,
        trigger: TriggerKind,
        reply: oneshot::Sender<PasteOutcome>,
    },
    Status {
        reply: oneshot::Sender<StatusReport>,
    },
    Shutdown,
}

/// Completions produced off the loop and fed back into it.
#[derive(Debug)]
pub enum HarnessEvent {
    CopyResolved {
        ticket: CopyTicket,
        result: Result<PayloadSet, ContentError>,
        done: oneshot::Sender<CopyReport>,
    },
}
