use thiserror::Error;

use super::CaptureKind;
use crate::clipboard::FormatTag;

/// Failures of the transfer channel. None of them is fatal to a copy or a paste.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChannelError {
    /// The platform lacks the capability entirely.
    #[error("platform does not support {0}")]
    UnsupportedCapability(String),

    /// The platform declined a capture request, or the gesture never fired.
    #[error("platform declined the {0} capture")]
    CaptureRejected(CaptureKind),

    /// One format could not be written; the others may still have been.
    #[error("write of {format} rejected: {reason}")]
    WriteRejected { format: FormatTag, reason: String },

    #[error("channel backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MirrorError {
    #[error("mirror storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("mirror key {key} holds malformed data: {reason}")]
    Malformed { key: String, reason: String },
}

/// Failures of the content provider while resolving one requested format.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("network error resolving {format}: {reason}")]
    Network { format: FormatTag, reason: String },

    #[error("parse error resolving {format}: {reason}")]
    Parse { format: FormatTag, reason: String },
}

impl ContentError {
    pub fn format(&self) -> &FormatTag {
        match self {
            ContentError::Network { format, .. } | ContentError::Parse { format, .. } => format,
        }
    }
}
