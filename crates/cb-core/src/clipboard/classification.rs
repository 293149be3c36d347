use serde::{Deserialize, Serialize};

use super::CopyMetadata;
use crate::ids::SessionId;

/// Paste-time judgement of where the pasted content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    /// Copied by this execution context.
    SameSession,
    /// Copied by another context of the same origin.
    CrossSession,
    /// No origin metadata: another application or an unknown writer.
    External,
}

impl Classification {
    /// Derives the classification from a replica's metadata.
    pub fn of(metadata: Option<&CopyMetadata>, current: &SessionId) -> Self {
        match metadata {
            None => Classification::External,
            Some(meta) if meta.session_id == *current => Classification::SameSession,
            Some(_) => Classification::CrossSession,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::SameSession => "same-session",
            Classification::CrossSession => "cross-session",
            Classification::External => "external",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
