use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tracing::{error, info};

use cb_core::config::HarnessConfig;
use clipbench_lib::bootstrap::{
    default_config_path, init_tracing_subscriber, load_config, wire_harness, ResolvedSettings,
};
use clipbench_lib::shell::{run_shell, HELP};
use clipbench_lib::Cli;

fn load_harness_config(cli: &Cli) -> anyhow::Result<HarnessConfig> {
    if let Some(path) = &cli.config {
        return load_config(path.clone());
    }
    match default_config_path() {
        Some(path) if path.exists() => match load_config(path.clone()) {
            Ok(config) => {
                info!(path = %path.display(), "Loaded config");
                Ok(config)
            }
            Err(err) => {
                let reason = format!("{err:#}");
                error!(path = %path.display(), error = %reason, "Failed to load config, using defaults");
                Ok(HarnessConfig::empty())
            }
        },
        _ => Ok(HarnessConfig::empty()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_subscriber(cli.log_file).context("Failed to initialize tracing")?;

    let config = load_harness_config(&cli)?;
    let mut settings = ResolvedSettings::from_config(&config)?;
    cli.apply_overrides(&mut settings);

    let harness = wire_harness(&settings).await?;
    println!("{HELP}");

    let stdin = BufReader::new(tokio::io::stdin());
    let result = run_shell(&harness, stdin).await;

    harness.shutdown().await;
    result
}
