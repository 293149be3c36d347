//! Clipboard domain models.
//!
//! A copy produces a [`PayloadSet`] plus [`CopyMetadata`]; both are published to
//! two replicas (the transfer channel and the mirror store). A paste reads both
//! replicas back, picks the authoritative one and classifies its provenance.
mod classification;
mod content;
mod envelope;
mod format;
mod marker;
mod metadata;
mod payload_set;
pub mod policy;
mod reconcile;
mod replica_codec;
mod replica;
mod storage_policy;

pub use classification::Classification;
pub use content::PayloadContent;
pub use envelope::ChannelEnvelope;
pub use format::FormatTag;
pub use marker::{parse_copied_at, wrap_with_copied_at, COPIED_AT_ATTRIBUTE};
pub use metadata::{CopyMetadata, CopyStatus};
pub use payload_set::{PayloadSet, PLACEHOLDER_TEXT};
pub use policy::{
    eligible_formats, is_eligible, select_format, FormatPolicy, FormatSelection,
    DEFAULT_PRIORITY,
};
pub use reconcile::{reconcile, ChoiceReason, MirrorRead, ReconcileOutcome, Reconciled};
pub use replica::{Replica, ReplicaKind};
pub use replica_codec::ReplicaCodec;
pub use storage_policy::{StoragePolicy, TriggerKind, UnknownStoragePolicy};
