//! One-shot capture signals.
//!
//! Some transports only accept writes (and reads) while a copy or paste event
//! is being dispatched. A handler is registered for the next event of a kind,
//! fires at most once, and receives the event's [`TransferData`].

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ChannelError;
use crate::clipboard::{FormatTag, PayloadContent, PayloadSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaptureKind {
    Copy,
    Paste,
}

impl std::fmt::Display for CaptureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptureKind::Copy => f.write_str("copy"),
            CaptureKind::Paste => f.write_str("paste"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(pub u64);

/// Callback run synchronously inside the capture event.
pub type CaptureHandler = Box<dyn FnOnce(&mut TransferData) + Send>;

/// The data carrier handed to a capture handler.
///
/// During a copy it starts empty and is writable; during a paste it holds the
/// buffer contents and is read-only.
#[derive(Debug, Clone)]
pub struct TransferData {
    kind: CaptureKind,
    payloads: PayloadSet,
    rejected: BTreeSet<FormatTag>,
}

impl TransferData {
    /// Writable carrier for a copy event. Tags in `rejected` throw on write.
    pub fn for_copy(rejected: BTreeSet<FormatTag>) -> Self {
        Self {
            kind: CaptureKind::Copy,
            payloads: PayloadSet::new(),
            rejected,
        }
    }

    pub fn for_paste(payloads: PayloadSet) -> Self {
        Self {
            kind: CaptureKind::Paste,
            payloads,
            rejected: BTreeSet::new(),
        }
    }

    pub fn kind(&self) -> CaptureKind {
        self.kind
    }

    pub fn set_data(&mut self, tag: FormatTag, content: PayloadContent) -> Result<(), ChannelError> {
        if self.kind != CaptureKind::Copy {
            return Err(ChannelError::WriteRejected {
                format: tag,
                reason: "transfer data is read-only during paste".into(),
            });
        }
        if self.rejected.contains(&tag) {
            return Err(ChannelError::WriteRejected {
                format: tag,
                reason: "format not accepted by the platform".into(),
            });
        }
        self.payloads.insert(tag, content);
        Ok(())
    }

    /// Sets every entry of `payloads`, skipping the ones the carrier refuses.
    ///
    /// Returns one error per skipped tag.
    pub fn set_all(&mut self, payloads: PayloadSet) -> Vec<ChannelError> {
        payloads
            .into_iter()
            .filter_map(|(tag, content)| self.set_data(tag, content).err())
            .collect()
    }

    pub fn get_data(&self, tag: &FormatTag) -> Option<&PayloadContent> {
        self.payloads.get(tag)
    }

    pub fn payloads(&self) -> &PayloadSet {
        &self.payloads
    }

    pub fn into_payloads(self) -> PayloadSet {
        self.payloads
    }
}

#[async_trait]
pub trait CaptureSignalPort: Send + Sync {
    /// Registers `handler` for the next `kind` event. It fires at most once.
    fn register_once(&self, kind: CaptureKind, handler: CaptureHandler) -> HandlerId;

    /// Removes a handler that has not fired. Returns `false` if it already fired or was removed.
    fn deregister(&self, id: HandlerId) -> bool;

    /// Programmatic capture command. Returns whether the platform honoured it;
    /// when honoured, the pending handler has already run on return.
    fn request_capture(&self, kind: CaptureKind) -> bool;

    /// Delivers a user gesture (e.g. Ctrl+C) whose default action fires the capture event.
    /// Returns whether a registered handler observed it.
    async fn dispatch_gesture(&self, kind: CaptureKind) -> bool;
}
