//! Command-line flags. Anything given here overrides the config file.

use std::path::PathBuf;

use clap::Parser;

use cb_core::StoragePolicy;

use crate::bootstrap::{BufferBackend, ChannelApi, ResolvedSettings};

#[derive(Debug, Parser)]
#[command(name = "clipbench", version, about = "Copy/paste reconciliation harness")]
pub struct Cli {
    /// Config file (defaults to <config_dir>/clipbench/config.toml when present)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Number of simulated contexts sharing one buffer and one origin
    #[arg(long)]
    pub contexts: Option<usize>,

    /// Transfer channel used by every context
    #[arg(long, value_enum)]
    pub api: Option<ChannelApi>,

    /// Backing store of the shared system buffer
    #[arg(long, value_enum)]
    pub backend: Option<BufferBackend>,

    /// channel_and_mirror or channel_only
    #[arg(long)]
    pub storage_policy: Option<StoragePolicy>,

    /// Persist the mirror store to this JSON file
    #[arg(long)]
    pub mirror_path: Option<PathBuf>,

    /// Decline every programmatic capture request
    #[arg(long)]
    pub decline_capture_requests: bool,

    /// Also write logs to the local data directory
    #[arg(long)]
    pub log_file: bool,
}

impl Cli {
    pub fn apply_overrides(&self, settings: &mut ResolvedSettings) {
        if let Some(contexts) = self.contexts {
            settings.contexts = contexts;
        }
        if let Some(api) = self.api {
            settings.channel_api = api;
        }
        if let Some(backend) = self.backend {
            settings.backend = backend;
        }
        if let Some(policy) = self.storage_policy {
            settings.storage_policy = policy;
        }
        if let Some(path) = &self.mirror_path {
            settings.mirror_path = Some(path.clone());
        }
        if self.decline_capture_requests {
            settings.honor_capture_requests = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cb_core::config::HarnessConfig;

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "clipbench",
            "--contexts",
            "3",
            "--api",
            "async-clipboard",
            "--storage-policy",
            "channel_only",
            "--decline-capture-requests",
        ]);
        let mut settings = ResolvedSettings::from_config(&HarnessConfig::empty()).unwrap();
        cli.apply_overrides(&mut settings);

        assert_eq!(settings.contexts, 3);
        assert_eq!(settings.channel_api, ChannelApi::AsyncClipboard);
        assert_eq!(settings.storage_policy, StoragePolicy::ChannelOnly);
        assert!(!settings.honor_capture_requests);
        assert_eq!(settings.backend, BufferBackend::Memory);
    }

    #[test]
    fn unknown_storage_policy_is_rejected() {
        assert!(Cli::try_parse_from(["clipbench", "--storage-policy", "everywhere"]).is_err());
    }
}
