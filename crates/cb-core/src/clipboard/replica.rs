use serde::{Deserialize, Serialize};

use super::{CopyMetadata, PayloadSet};

/// Which storage location a replica was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplicaKind {
    /// Ephemeral platform transfer buffer.
    Channel,
    /// Persistent same-origin mirror store.
    Mirror,
}

impl ReplicaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplicaKind::Channel => "channel",
            ReplicaKind::Mirror => "mirror",
        }
    }
}

/// One payload set together with the metadata written next to it.
///
/// `metadata == None` means the replica carries no known origin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replica {
    pub payloads: PayloadSet,
    pub metadata: Option<CopyMetadata>,
}

impl Replica {
    pub fn new(payloads: PayloadSet, metadata: Option<CopyMetadata>) -> Self {
        Self { payloads, metadata }
    }

    /// A replica without origin metadata, e.g. content copied by another application.
    pub fn foreign(payloads: PayloadSet) -> Self {
        Self {
            payloads,
            metadata: None,
        }
    }

    pub fn copied_at(&self) -> Option<i64> {
        self.payloads.copied_at()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty() && self.metadata.is_none()
    }
}
