use crate::clipboard::{FormatTag, PayloadContent};

/// How a paste chooses among the formats of the winning replica.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatPolicy {
    /// Exactly this tag, whether or not it is present.
    Explicit(FormatTag),
    /// First present tag of [`DEFAULT_PRIORITY`](super::DEFAULT_PRIORITY).
    DefaultPriority,
}

/// Result of applying a [`FormatPolicy`] to a payload set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSelection {
    pub tag: FormatTag,
    /// `None` when an explicit tag was requested but is not in the set.
    pub content: Option<PayloadContent>,
}
