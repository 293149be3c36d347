use std::path::PathBuf;

/// Harness configuration DTO (pure data, no logic)
/// 测试工具配置 DTO（纯数据，无逻辑）
///
/// Empty strings and zeros are facts read from the file, not errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarnessConfig {
    /// `channel.api`: "data_transfer" or "async_clipboard"
    pub channel_api: String,
    /// `channel.backend`: "memory" or "system"
    pub channel_backend: String,
    /// `channel.honor_capture_requests`
    pub honor_capture_requests: Option<bool>,
    /// `channel.async_clipboard_available`
    pub async_clipboard_available: Option<bool>,
    /// `channel.capture_timeout_ms`
    pub capture_timeout_ms: u64,

    /// `storage.policy`: "channel_and_mirror" or "channel_only"
    pub storage_policy: String,
    /// `storage.mirror_path`: optional file backing the mirror store
    pub mirror_path: PathBuf,

    /// `copy.formats`: tags or aliases copied by default
    pub copy_formats: Vec<String>,
    /// `copy.resolve_delay_ms`
    pub resolve_delay_ms: u64,

    /// `content.source`: "fixture" or "http"
    pub content_source: String,
    /// `content.base_url`
    pub content_base_url: String,
    /// `content.image_path`
    pub content_image_path: PathBuf,

    /// `harness.contexts`: number of simulated tabs
    pub contexts: u64,
}

impl HarnessConfig {
    /// Create HarnessConfig from a TOML value
    ///
    /// **Prohibited**: no validation, no defaults beyond "empty".
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let str_at = |section: &str, key: &str| -> String {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };
        let int_at = |section: &str, key: &str| -> u64 {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
                .max(0) as u64
        };
        let bool_at = |section: &str, key: &str| -> Option<bool> {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_bool())
        };

        Ok(Self {
            channel_api: str_at("channel", "api"),
            channel_backend: str_at("channel", "backend"),
            honor_capture_requests: bool_at("channel", "honor_capture_requests"),
            async_clipboard_available: bool_at("channel", "async_clipboard_available"),
            capture_timeout_ms: int_at("channel", "capture_timeout_ms"),
            storage_policy: str_at("storage", "policy"),
            mirror_path: PathBuf::from(str_at("storage", "mirror_path")),
            copy_formats: toml_value
                .get("copy")
                .and_then(|c| c.get("formats"))
                .and_then(|v| v.as_array())
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default(),
            resolve_delay_ms: int_at("copy", "resolve_delay_ms"),
            content_source: str_at("content", "source"),
            content_base_url: str_at("content", "base_url"),
            content_image_path: PathBuf::from(str_at("content", "image_path")),
            contexts: int_at("harness", "contexts"),
        })
    }

    /// Create empty HarnessConfig (all empty/default values)
    pub fn empty() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_section() {
        let value: toml::Value = toml::from_str(
            r#"
            [channel]
            api = "async_clipboard"
            backend = "memory"
            honor_capture_requests = false
            capture_timeout_ms = 750

            [storage]
            policy = "channel_only"
            mirror_path = "/tmp/mirror.json"

            [copy]
            formats = ["text", "html"]
            resolve_delay_ms = 250

            [content]
            source = "http"
            base_url = "http://localhost:8080/fixtures"

            [harness]
            contexts = 3
            "#,
        )
        .unwrap();

        let config = HarnessConfig::from_toml(&value).unwrap();
        assert_eq!(config.channel_api, "async_clipboard");
        assert_eq!(config.honor_capture_requests, Some(false));
        assert_eq!(config.async_clipboard_available, None);
        assert_eq!(config.capture_timeout_ms, 750);
        assert_eq!(config.storage_policy, "channel_only");
        assert_eq!(config.mirror_path, PathBuf::from("/tmp/mirror.json"));
        assert_eq!(config.copy_formats, vec!["text".to_string(), "html".to_string()]);
        assert_eq!(config.resolve_delay_ms, 250);
        assert_eq!(config.content_source, "http");
        assert_eq!(config.contexts, 3);
    }

    #[test]
    fn missing_sections_are_empty_facts() {
        let value: toml::Value = toml::from_str("").unwrap();
        assert_eq!(HarnessConfig::from_toml(&value).unwrap(), HarnessConfig::empty());
    }
}
