//! Paste reconciliation.
//!
//! Two replicas of the last copy exist: the channel (written inside a capture
//! signal) and the mirror (written one asynchronous hop later). Neither write is
//! atomic with the other, so at paste time either may be stale or missing. The
//! reconciler picks one using the producer-embedded rich-text timestamps and
//! classifies the winner from its own metadata.

use super::{Classification, Replica, ReplicaKind};
use crate::ids::SessionId;

/// Result of reading the mirror replica.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorRead {
    /// Mirroring is turned off by the storage policy. Never treated as stale data.
    Disabled,
    /// Mirroring is on but nothing has been published.
    Absent,
    /// The store could not be read.
    Unavailable(String),
    Present(Replica),
}

/// Why the reconciler picked its winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceReason {
    /// Only the channel was available.
    ChannelOnly,
    /// The channel timestamp is strictly newer than the mirror's.
    ChannelNewer,
    /// At least one timestamp is missing or unparsable.
    TimestampUnknown,
    /// The mirror timestamp is equal or newer.
    MirrorNotOlder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub source: ReplicaKind,
    pub reason: ChoiceReason,
    pub classification: Classification,
    pub replica: Replica,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The channel could not be read; nothing changes and nothing is pasted.
    Aborted,
    Resolved(Reconciled),
}

/// Decides which replica is authoritative and classifies it.
///
/// Total and deterministic for a given set of inputs.
pub fn reconcile(
    channel: Option<Replica>,
    mirror: MirrorRead,
    current: &SessionId,
) -> ReconcileOutcome {
    let Some(channel) = channel else {
        return ReconcileOutcome::Aborted;
    };

    let mirror = match mirror {
        MirrorRead::Present(replica) => replica,
        MirrorRead::Disabled | MirrorRead::Absent | MirrorRead::Unavailable(_) => {
            return ReconcileOutcome::Resolved(resolved(
                ReplicaKind::Channel,
                ChoiceReason::ChannelOnly,
                channel,
                current,
            ));
        }
    };

    let (source, reason) = match (channel.copied_at(), mirror.copied_at()) {
        (Some(c), Some(m)) if c > m => (ReplicaKind::Channel, ChoiceReason::ChannelNewer),
        (Some(_), Some(_)) => (ReplicaKind::Mirror, ChoiceReason::MirrorNotOlder),
        _ => (ReplicaKind::Channel, ChoiceReason::TimestampUnknown),
    };

    let winner = match source {
        ReplicaKind::Channel => channel,
        ReplicaKind::Mirror => mirror,
    };
    ReconcileOutcome::Resolved(resolved(source, reason, winner, current))
}

fn resolved(
    source: ReplicaKind,
    reason: ChoiceReason,
    replica: Replica,
    current: &SessionId,
) -> Reconciled {
    Reconciled {
        source,
        reason,
        classification: Classification::of(replica.metadata.as_ref(), current),
        replica,
    }
}
