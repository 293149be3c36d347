//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - Read TOML configuration files / 读取 TOML 配置文件
//! - Parse TOML into the HarnessConfig DTO / 解析为 HarnessConfig DTO
//! - Report I/O and parsing errors with context / 报告 I/O 和解析错误
//!
//! ## Prohibited / 禁止事项
//!
//! - No validation logic / 禁止验证逻辑
//! - No default value logic (see [`settings`](super::settings)) / 禁止默认值逻辑
//!
//! > **Pure data loading only. Accept whatever is in the file.**
//! > **仅加载数据，接受文件中的任何内容。**

use std::path::PathBuf;

use anyhow::Context;
use cb_core::config::HarnessConfig;

/// Load configuration from a TOML file
///
/// Empty strings, zero counts and missing sections are facts, not errors.
///
/// # Errors
///
/// Returns error if:
/// - File cannot be read (I/O error)
/// - Content is not valid TOML (parse error)
pub fn load_config(config_path: PathBuf) -> anyhow::Result<HarnessConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    HarnessConfig::from_toml(&toml_value)
}

/// `<config dir>/clipbench/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("clipbench").join("config.toml"))
}
