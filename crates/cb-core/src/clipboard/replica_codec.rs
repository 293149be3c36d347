//! Text encoding of a replica for the mirror store.
//!
//! Layout: two string keys. `CopyPayloads` is a JSON object mapping format tag
//! to string (binary inlined as a base64 data URL); `CopyMetadata` is the JSON
//! metadata object.

use std::collections::BTreeMap;

use super::{CopyMetadata, PayloadSet};
use crate::ports::{MirrorError, MIRROR_METADATA_KEY, MIRROR_PAYLOADS_KEY};

pub struct ReplicaCodec;

impl ReplicaCodec {
    pub fn encode_payloads(payloads: &PayloadSet) -> Result<String, MirrorError> {
        serde_json::to_string(&payloads.to_text_map()).map_err(|e| MirrorError::Malformed {
            key: MIRROR_PAYLOADS_KEY.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn decode_payloads(raw: &str) -> Result<PayloadSet, MirrorError> {
        let map: BTreeMap<String, String> =
            serde_json::from_str(raw).map_err(|e| MirrorError::Malformed {
                key: MIRROR_PAYLOADS_KEY.to_string(),
                reason: e.to_string(),
            })?;
        Ok(PayloadSet::from_text_map(map))
    }

    pub fn encode_metadata(metadata: &CopyMetadata) -> Result<String, MirrorError> {
        metadata.to_json().map_err(|e| MirrorError::Malformed {
            key: MIRROR_METADATA_KEY.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn decode_metadata(raw: &str) -> Result<CopyMetadata, MirrorError> {
        CopyMetadata::from_json(raw).map_err(|e| MirrorError::Malformed {
            key: MIRROR_METADATA_KEY.to_string(),
            reason: e.to_string(),
        })
    }
}
