use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Key identifying a payload's content type within a [`PayloadSet`](super::PayloadSet).
///
/// Tags are plain strings so unknown formats survive a round-trip through either
/// replica untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct FormatTag(pub String);

impl FormatTag {
    pub const PLAIN_TEXT: &'static str = "text/plain";
    pub const RICH_TEXT: &'static str = "text/html";
    pub const IMAGE: &'static str = "image/png";
    pub const CUSTOM: &'static str = "web application/x-clipbench-custom";
    /// Reserved tag carrying the copy metadata inside the channel replica.
    pub const METADATA: &'static str = "web application/x-clipbench-metadata";

    pub fn plain_text() -> Self {
        Self(Self::PLAIN_TEXT.into())
    }
    pub fn rich_text() -> Self {
        Self(Self::RICH_TEXT.into())
    }
    pub fn image() -> Self {
        Self(Self::IMAGE.into())
    }
    pub fn custom() -> Self {
        Self(Self::CUSTOM.into())
    }
    pub fn metadata() -> Self {
        Self(Self::METADATA.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_reserved(&self) -> bool {
        self.0 == Self::METADATA
    }

    pub fn is_binary(&self) -> bool {
        self.0.starts_with("image/")
    }

    /// The four user-facing formats, in the order the harness offers them.
    pub fn user_formats() -> [FormatTag; 4] {
        [
            Self::plain_text(),
            Self::rich_text(),
            Self::image(),
            Self::custom(),
        ]
    }

    /// Short alias used by the harness shell and config files.
    pub fn alias(&self) -> &str {
        match self.0.as_str() {
            Self::PLAIN_TEXT => "text",
            Self::RICH_TEXT => "html",
            Self::IMAGE => "img",
            Self::CUSTOM => "custom",
            other => other,
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FormatTag {
    type Err = std::convert::Infallible;

    /// Accepts either a full tag or one of the short aliases (`text`, `html`, `img`, `custom`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = match s.trim() {
            "text" | "plain" => Self::plain_text(),
            "html" | "rich" => Self::rich_text(),
            "img" | "image" => Self::image(),
            "custom" | "sw" => Self::custom(),
            other => Self(other.to_string()),
        };
        Ok(tag)
    }
}

impl From<&str> for FormatTag {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
