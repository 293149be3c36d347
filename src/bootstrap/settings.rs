//! Defaults and enum parsing on top of the raw [`HarnessConfig`].
//!
//! The loader accepts whatever is in the file; this is where an empty value
//! becomes a default and an unknown value becomes an error.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::ValueEnum;

use cb_app::HarnessSettings;
use cb_core::config::HarnessConfig;
use cb_core::{FormatTag, StoragePolicy};

const DEFAULT_CAPTURE_TIMEOUT_MS: u64 = 1_000;
const DEFAULT_RESOLVE_DELAY_MS: u64 = 300;
const DEFAULT_CONTEXTS: usize = 2;

/// Copied when `[copy] formats` is empty. The custom format is opt-in.
fn default_copy_formats() -> Vec<FormatTag> {
    vec![FormatTag::plain_text(), FormatTag::rich_text(), FormatTag::image()]
}

/// Which transfer channel adapter every context uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChannelApi {
    /// One-shot copy/paste capture signals.
    DataTransfer,
    /// The async clipboard capability.
    AsyncClipboard,
}

impl FromStr for ChannelApi {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "data_transfer" | "dataTransfer" => Ok(ChannelApi::DataTransfer),
            "async_clipboard" | "asyncClipboard" => Ok(ChannelApi::AsyncClipboard),
            other => bail!("unknown channel api: {other}"),
        }
    }
}

/// Backing store of the shared system buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BufferBackend {
    Memory,
    /// The OS clipboard.
    System,
}

impl FromStr for BufferBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "memory" => Ok(BufferBackend::Memory),
            "system" => Ok(BufferBackend::System),
            other => bail!("unknown channel backend: {other}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ContentSource {
    Fixture,
    Http,
}

impl FromStr for ContentSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "fixture" => Ok(ContentSource::Fixture),
            "http" => Ok(ContentSource::Http),
            other => bail!("unknown content source: {other}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub channel_api: ChannelApi,
    pub backend: BufferBackend,
    pub honor_capture_requests: bool,
    pub async_clipboard_available: bool,
    pub capture_timeout: Duration,
    pub storage_policy: StoragePolicy,
    pub mirror_path: Option<PathBuf>,
    pub default_formats: Vec<FormatTag>,
    pub resolve_delay: Duration,
    pub content_source: ContentSource,
    pub content_base_url: Option<String>,
    pub content_image_path: Option<PathBuf>,
    pub contexts: usize,
}

fn parse_or<T: FromStr<Err = anyhow::Error>>(raw: &str, default: T) -> Result<T> {
    if raw.trim().is_empty() {
        Ok(default)
    } else {
        raw.parse()
    }
}

fn non_empty_path(path: &std::path::Path) -> Option<PathBuf> {
    (!path.as_os_str().is_empty()).then(|| path.to_path_buf())
}

impl ResolvedSettings {
    pub fn from_config(config: &HarnessConfig) -> Result<Self> {
        let storage_policy = if config.storage_policy.trim().is_empty() {
            StoragePolicy::default()
        } else {
            config
                .storage_policy
                .parse::<StoragePolicy>()
                .context("invalid [storage] policy")?
        };

        let default_formats = if config.copy_formats.is_empty() {
            default_copy_formats()
        } else {
            config
                .copy_formats
                .iter()
                .map(|raw| match raw.parse::<FormatTag>() {
                    Ok(tag) => tag,
                    Err(never) => match never {},
                })
                .collect()
        };

        let capture_timeout_ms = match config.capture_timeout_ms {
            0 => DEFAULT_CAPTURE_TIMEOUT_MS,
            ms => ms,
        };
        let contexts = match config.contexts {
            0 => DEFAULT_CONTEXTS,
            n => usize::try_from(n).context("[harness] contexts out of range")?,
        };
        let content_base_url =
            (!config.content_base_url.trim().is_empty()).then(|| config.content_base_url.clone());

        Ok(Self {
            channel_api: parse_or(&config.channel_api, ChannelApi::DataTransfer)
                .context("invalid [channel] api")?,
            backend: parse_or(&config.channel_backend, BufferBackend::Memory)
                .context("invalid [channel] backend")?,
            honor_capture_requests: config.honor_capture_requests.unwrap_or(true),
            async_clipboard_available: config.async_clipboard_available.unwrap_or(true),
            capture_timeout: Duration::from_millis(capture_timeout_ms),
            storage_policy,
            mirror_path: non_empty_path(&config.mirror_path),
            default_formats,
            // The DTO reads an absent key as 0.
            resolve_delay: Duration::from_millis(match config.resolve_delay_ms {
                0 => DEFAULT_RESOLVE_DELAY_MS,
                ms => ms,
            }),
            content_source: parse_or(&config.content_source, ContentSource::Fixture)
                .context("invalid [content] source")?,
            content_base_url,
            content_image_path: non_empty_path(&config.content_image_path),
            contexts,
        })
    }

    pub fn harness_settings(&self) -> HarnessSettings {
        HarnessSettings {
            storage_policy: self.storage_policy,
            resolve_delay: self.resolve_delay,
            capture_timeout: self.capture_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_resolves_to_defaults() {
        let settings = ResolvedSettings::from_config(&HarnessConfig::empty()).unwrap();
        assert_eq!(settings.channel_api, ChannelApi::DataTransfer);
        assert_eq!(settings.backend, BufferBackend::Memory);
        assert!(settings.honor_capture_requests);
        assert_eq!(settings.storage_policy, StoragePolicy::ChannelAndMirror);
        assert_eq!(
            settings.default_formats,
            vec![FormatTag::plain_text(), FormatTag::rich_text(), FormatTag::image()]
        );
        assert!(!settings.default_formats.contains(&FormatTag::custom()));
        assert_eq!(settings.contexts, DEFAULT_CONTEXTS);
        assert_eq!(settings.mirror_path, None);
        assert_eq!(settings.capture_timeout, Duration::from_millis(DEFAULT_CAPTURE_TIMEOUT_MS));
    }

    #[test]
    fn legacy_spellings_are_accepted() {
        let config = HarnessConfig {
            channel_api: "asyncClipboard".into(),
            storage_policy: "clipboard".into(),
            copy_formats: vec!["sw".into(), "img".into()],
            ..HarnessConfig::empty()
        };
        let settings = ResolvedSettings::from_config(&config).unwrap();
        assert_eq!(settings.channel_api, ChannelApi::AsyncClipboard);
        assert_eq!(settings.storage_policy, StoragePolicy::ChannelOnly);
        assert_eq!(settings.default_formats, vec![FormatTag::custom(), FormatTag::image()]);
    }

    #[test]
    fn unknown_values_are_errors() {
        let config = HarnessConfig {
            channel_backend: "floppy".into(),
            ..HarnessConfig::empty()
        };
        let err = ResolvedSettings::from_config(&config).unwrap_err();
        assert!(format!("{err:#}").contains("unknown channel backend: floppy"));
    }
}
