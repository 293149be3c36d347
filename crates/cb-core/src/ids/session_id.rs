use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Identifier of one execution context (one harness "tab").
///
/// Opaque: two session ids are only ever compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl_id!(SessionId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_from_str() {
        let id: SessionId = "5f0c2b2e-1111-4aaa-8bbb-000000000000".into();
        assert_eq!(id.as_str(), "5f0c2b2e-1111-4aaa-8bbb-000000000000");
    }

    #[test]
    fn test_generated_session_ids_are_distinct() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn test_session_id_serializes_as_plain_string() {
        let id = SessionId::from("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }
}
