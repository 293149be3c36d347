//! Aggregate error taxonomy of the harness.
//!
//! Every variant degrades functionality; none of them is meant to abort the
//! process or the user's gesture. Use cases collect them and surface them
//! through the log sink.

use thiserror::Error;

use crate::ports::{ChannelError, ContentError, MirrorError};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HarnessError {
    #[error("channel: {0}")]
    Channel(#[from] ChannelError),

    #[error("mirror: {0}")]
    Mirror(#[from] MirrorError),

    #[error("content resolution failed: {0}")]
    ContentResolution(#[from] ContentError),
}

impl HarnessError {
    /// Short taxonomy name used in logs.
    pub fn category(&self) -> &'static str {
        match self {
            HarnessError::Channel(ChannelError::UnsupportedCapability(_)) => "UnsupportedCapability",
            HarnessError::Channel(ChannelError::CaptureRejected(_)) => "CaptureRejected",
            HarnessError::Channel(ChannelError::WriteRejected { .. }) => "WriteRejected",
            HarnessError::Channel(ChannelError::Backend(_)) => "ChannelBackend",
            HarnessError::Mirror(_) => "StorageUnavailable",
            HarnessError::ContentResolution(_) => "ContentResolutionFailure",
        }
    }
}
