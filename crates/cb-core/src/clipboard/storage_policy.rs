use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where a copy is published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoragePolicy {
    /// Channel plus the same-origin mirror store.
    #[default]
    ChannelAndMirror,
    /// Channel only. The mirror is never written and never read.
    ChannelOnly,
}

impl StoragePolicy {
    pub fn mirrors(&self) -> bool {
        matches!(self, StoragePolicy::ChannelAndMirror)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StoragePolicy::ChannelAndMirror => "channel_and_mirror",
            StoragePolicy::ChannelOnly => "channel_only",
        }
    }
}

impl fmt::Display for StoragePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown storage policy: {0}")]
pub struct UnknownStoragePolicy(pub String);

impl FromStr for StoragePolicy {
    type Err = UnknownStoragePolicy;

    /// Accepts the config spelling as well as the legacy `localstorageAndClipboard` / `clipboard`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "channel_and_mirror" | "localstorageAndClipboard" => Ok(StoragePolicy::ChannelAndMirror),
            "channel_only" | "clipboard" => Ok(StoragePolicy::ChannelOnly),
            other => Err(UnknownStoragePolicy(other.to_string())),
        }
    }
}

/// What started a copy or a paste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    /// A user gesture such as Ctrl+C; the channel is reached inside its capture signal.
    Keyboard,
    /// A button or command; the channel adapter reaches the platform on its own.
    Programmatic,
}

impl TriggerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerKind::Keyboard => "keyboard",
            TriggerKind::Programmatic => "programmatic",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_config_and_legacy_spellings() {
        assert_eq!(
            "channel_only".parse::<StoragePolicy>(),
            Ok(StoragePolicy::ChannelOnly)
        );
        assert_eq!(
            "localstorageAndClipboard".parse::<StoragePolicy>(),
            Ok(StoragePolicy::ChannelAndMirror)
        );
        assert!("mirror_only".parse::<StoragePolicy>().is_err());
        assert!(!StoragePolicy::ChannelOnly.mirrors());
    }
}
