//! Framing of the channel replica.
//!
//! The channel holds a single payload set, so the copy metadata rides along
//! under the reserved [`FormatTag::METADATA`] tag as JSON. One write and one read
//! move both halves of the replica.

use super::{CopyMetadata, FormatTag, PayloadContent, PayloadSet, Replica};

pub struct ChannelEnvelope;

impl ChannelEnvelope {
    /// Packs `replica` into the payload set actually written to the channel.
    pub fn seal(replica: &Replica) -> PayloadSet {
        let mut sealed = replica.payloads.clone();
        sealed.remove(&FormatTag::metadata());
        if let Some(meta) = &replica.metadata {
            match meta.to_json() {
                Ok(json) => {
                    sealed.insert(FormatTag::metadata(), PayloadContent::Text(json));
                }
                Err(_err) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(error = %_err, "Failed to encode copy metadata for channel");
                }
            }
        }
        sealed
    }

    /// Splits a payload set read from the channel back into payloads and metadata.
    ///
    /// Metadata that is not valid JSON is treated as absent.
    pub fn open(mut raw: PayloadSet) -> Replica {
        let metadata = raw
            .remove(&FormatTag::metadata())
            .and_then(|content| match content {
                PayloadContent::Text(json) => match CopyMetadata::from_json(&json) {
                    Ok(meta) => Some(meta),
                    Err(_err) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(error = %_err, "Ignoring unparsable channel metadata");
                        None
                    }
                },
                PayloadContent::Binary(_) => None,
            });
        Replica::new(raw, metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SessionId;

    #[test]
    fn seal_then_open_restores_replica() {
        let replica = Replica::new(
            PayloadSet::new().with(FormatTag::plain_text(), PayloadContent::text("hi")),
            Some(CopyMetadata::completed(SessionId::from("s"))),
        );
        let sealed = ChannelEnvelope::seal(&replica);
        assert!(sealed.contains(&FormatTag::metadata()));
        assert_eq!(ChannelEnvelope::open(sealed), replica);
    }

    #[test]
    fn open_without_metadata_tag_has_no_origin() {
        let raw = PayloadSet::new().with(FormatTag::plain_text(), PayloadContent::text("x"));
        let replica = ChannelEnvelope::open(raw.clone());
        assert_eq!(replica.metadata, None);
        assert_eq!(replica.payloads, raw);
    }

    #[test]
    fn garbage_metadata_is_treated_as_absent() {
        let raw = PayloadSet::new()
            .with(FormatTag::plain_text(), PayloadContent::text("x"))
            .with(FormatTag::metadata(), PayloadContent::text("{not json"));
        let replica = ChannelEnvelope::open(raw);
        assert_eq!(replica.metadata, None);
        assert!(!replica.payloads.contains(&FormatTag::metadata()));
    }
}
