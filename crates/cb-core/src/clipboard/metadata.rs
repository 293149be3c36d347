use serde::{Deserialize, Serialize};

use crate::ids::SessionId;

/// Progress of the copy that produced a replica.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyStatus {
    /// Placeholder published, content still resolving.
    Started,
    /// Resolved content published.
    Completed,
}

/// Origin facts attached to a replica by the copying session.
///
/// Serialized as `{"sessionId": "...", "copyStatus": "started" | "completed"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyMetadata {
    pub session_id: SessionId,
    pub copy_status: CopyStatus,
}

impl CopyMetadata {
    pub fn started(session_id: SessionId) -> Self {
        Self {
            session_id,
            copy_status: CopyStatus::Started,
        }
    }

    pub fn completed(session_id: SessionId) -> Self {
        Self {
            session_id,
            copy_status: CopyStatus::Completed,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_uses_camel_case_keys() {
        let meta = CopyMetadata::started(SessionId::from("s-1"));
        let json = meta.to_json().unwrap();
        assert_eq!(json, r#"{"sessionId":"s-1","copyStatus":"started"}"#);
    }

    #[test]
    fn parses_completed_metadata() {
        let meta = CopyMetadata::from_json(r#"{"sessionId":"s-2","copyStatus":"completed"}"#)
            .unwrap();
        assert_eq!(meta, CopyMetadata::completed(SessionId::from("s-2")));
    }

    #[test]
    fn rejects_unknown_status() {
        assert!(CopyMetadata::from_json(r#"{"sessionId":"s","copyStatus":"pending"}"#).is_err());
    }
}
