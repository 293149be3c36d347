//! Tracing configuration for clipbench / 日志追踪配置
//!
//! Structured logs go to stderr so that the per-tab console output on stdout
//! stays readable. A plain-text copy can be written to the data directory.
//!
//! ## Layers / 层
//!
//! - **EnvFilter**: `RUST_LOG` wins, otherwise [`build_filter_directives`]
//! - **Sentry**: only when `SENTRY_DSN` is set
//! - **stderr**: always
//! - **file**: `<data_local_dir>/clipbench/logs/clipbench.log` when requested

use std::{fs, io, path::PathBuf, sync::OnceLock};

use anyhow::Context;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static SENTRY_GUARD: OnceLock<sentry::ClientInitGuard> = OnceLock::new();

const LOG_FILE_NAME: &str = "clipbench.log";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Default filter directives.
///
/// ## Behavior / 行为
/// - **Development**: debug for the harness crates / 开发环境使用 debug 级别
/// - **Production**: info / 生产环境使用 info 级别
/// - HTTP client internals are capped at warn either way
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    vec![
        level.to_string(),
        format!("cb_app={level}"),
        format!("cb_platform={level}"),
        format!("cb_infra={level}"),
        "reqwest=warn".to_string(),
        "hyper=warn".to_string(),
        "hyper_util=warn".to_string(),
        "rustls=warn".to_string(),
    ]
}

/// Installs the global subscriber.
///
/// Call once from `main`, before the harness is wired:
///
/// ```ignore
/// clipbench_lib::bootstrap::init_tracing_subscriber(cli.log_file)?;
/// ```
///
/// Returns `Err` if a subscriber is already registered. A failure to open the
/// log file only disables the file layer.
pub fn init_tracing_subscriber(file_logging: bool) -> anyhow::Result<()> {
    let is_dev = is_development();

    let filter_directives = build_filter_directives(is_dev);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter_directives.join(",")));

    let sentry_layer = match std::env::var("SENTRY_DSN") {
        Ok(dsn) if !dsn.trim().is_empty() => {
            let guard = sentry::init((
                dsn,
                sentry::ClientOptions {
                    release: sentry::release_name!(),
                    traces_sample_rate: 1.0,
                    ..Default::default()
                },
            ));
            if SENTRY_GUARD.set(guard).is_err() {
                eprintln!("Sentry guard already initialized");
            }
            Some(sentry_tracing::layer())
        }
        _ => None,
    };

    let file_writer = if file_logging {
        match build_file_writer() {
            Ok(writer) => Some(writer),
            Err(err) => {
                eprintln!("Failed to initialize file logging, continuing with stderr only: {err:#}");
                None
            }
        }
    } else {
        None
    };

    let stderr_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
        .with_level(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(BoxMakeWriter::new(io::stderr));

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
    });

    let subscriber = registry()
        .with(env_filter)
        .with(sentry_layer)
        .with(stderr_layer);

    if let Some(layer) = file_layer {
        subscriber.with(layer).try_init()?;
    } else {
        subscriber.try_init()?;
    }

    Ok(())
}

fn logs_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::data_local_dir().context("no local data directory on this platform")?;
    Ok(base.join("clipbench").join("logs"))
}

fn build_file_writer() -> anyhow::Result<NonBlocking> {
    let dir = logs_dir()?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("create log dir failed: {}", dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}
