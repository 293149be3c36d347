//! # Dependency wiring / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - Create the shared platform (system buffer, capture bus, permissions)
//!   / 创建共享平台（系统缓冲区、捕获总线、权限）
//! - Create infra implementations (origin storage, content provider, clock, identity)
//!   / 创建 infra 层具体实现
//! - Inject them into one [`HarnessRuntime`] per simulated context
//!   / 为每个模拟上下文注入一个运行时
//!
//! ## Prohibited / 禁止事项
//!
//! **No business logic.** Nothing here decides what a copy or a paste does.
//!
//! **No configuration validation.** Values arrive already resolved in
//! [`ResolvedSettings`]; wiring only fails when a resource cannot be opened.
//!
//! > This is the only place allowed to depend on cb-infra + cb-platform + cb-app
//! > simultaneously. The privilege is for assembly only.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::info;

use cb_app::{HarnessDeps, HarnessHandle, HarnessRuntime};
use cb_core::ports::{ContentProviderPort, TransferChannelPort};
use cb_core::FormatTag;
use cb_infra::{
    FixtureContentProvider, HttpContentProvider, LazySessionIdentity, OriginStorage, SystemClock,
};
use cb_platform::ports::SystemBufferPort;
use cb_platform::{
    ConsoleUi, DeferredCaptureAdapter, DirectAdapter, MemoryBuffer, PlatformSettings,
    SimulatedPlatform, SystemClipboardBuffer,
};

use super::settings::{BufferBackend, ChannelApi, ContentSource, ResolvedSettings};

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（资源初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Origin storage initialization failed: {0}")]
    StorageInit(String),

    #[error("Content provider initialization failed: {0}")]
    ContentInit(String),

    #[error("Harness needs at least one context")]
    NoContexts,
}

/// Every running context of one simulated browser.
pub struct Harness {
    pub handles: Vec<HarnessHandle>,
    pub tasks: Vec<JoinHandle<()>>,
    pub storage: Arc<OriginStorage>,
    pub platform: SimulatedPlatform,
    /// Formats a bare `copy` uses.
    pub default_formats: Vec<FormatTag>,
}

impl Harness {
    pub fn handle(&self, index: usize) -> Option<&HarnessHandle> {
        self.handles.get(index)
    }

    /// Asks every runtime to stop and waits for its task to end.
    pub async fn shutdown(self) {
        for handle in &self.handles {
            if let Err(err) = handle.shutdown().await {
                tracing::debug!(context = handle.label(), error = %err, "Runtime already stopped");
            }
        }
        for task in self.tasks {
            if let Err(err) = task.await {
                tracing::warn!(error = %err, "Runtime task ended abnormally");
            }
        }
    }
}

fn create_buffer(backend: BufferBackend) -> Arc<dyn SystemBufferPort> {
    match backend {
        BufferBackend::Memory => Arc::new(MemoryBuffer::new()),
        BufferBackend::System => Arc::new(SystemClipboardBuffer::new()),
    }
}

async fn create_storage(settings: &ResolvedSettings) -> WiringResult<Arc<OriginStorage>> {
    match &settings.mirror_path {
        Some(path) => OriginStorage::open(path)
            .await
            .map_err(|e| WiringError::StorageInit(format!("{e:#}"))),
        None => Ok(OriginStorage::in_memory()),
    }
}

fn create_content(settings: &ResolvedSettings) -> WiringResult<Arc<dyn ContentProviderPort>> {
    match settings.content_source {
        ContentSource::Fixture => {
            let fixtures = FixtureContentProvider::builtin();
            let fixtures = match &settings.content_image_path {
                Some(path) => fixtures
                    .with_image_file(path)
                    .map_err(|e| WiringError::ContentInit(format!("{e:#}")))?,
                None => fixtures,
            };
            Ok(Arc::new(fixtures))
        }
        ContentSource::Http => {
            let base_url = settings.content_base_url.as_deref().ok_or_else(|| {
                WiringError::ContentInit("content.base_url is required for the http source".into())
            })?;
            Ok(Arc::new(HttpContentProvider::new(base_url)))
        }
    }
}

/// Builds the shared platform and starts one runtime per context.
///
/// Every context shares the same system buffer, origin storage and content
/// source, and gets its own capture bus, session identity and console UI.
pub async fn wire_harness(settings: &ResolvedSettings) -> WiringResult<Harness> {
    if settings.contexts == 0 {
        return Err(WiringError::NoContexts);
    }

    let buffer = create_buffer(settings.backend);
    let platform = SimulatedPlatform::new(
        buffer,
        PlatformSettings {
            honor_capture_requests: settings.honor_capture_requests,
            async_clipboard_available: settings.async_clipboard_available,
            ..PlatformSettings::default()
        },
    );
    let storage = create_storage(settings).await?;
    let content = create_content(settings)?;
    let harness_settings = settings.harness_settings();

    let mut handles = Vec::with_capacity(settings.contexts);
    let mut tasks = Vec::with_capacity(settings.contexts);
    for index in 0..settings.contexts {
        let label = format!("tab-{index}");
        let ctx = platform.open_context();
        let channel: Arc<dyn TransferChannelPort> = match settings.channel_api {
            ChannelApi::DataTransfer => Arc::new(DeferredCaptureAdapter::new(ctx.capture.clone())),
            ChannelApi::AsyncClipboard => Arc::new(DirectAdapter::new(ctx.async_clipboard.clone())),
        };

        let deps = HarnessDeps {
            channel,
            capture: ctx.capture,
            mirror: Arc::new(storage.handle()),
            content: content.clone(),
            permissions: ctx.permissions,
            identity: Arc::new(LazySessionIdentity::new()),
            clock: Arc::new(SystemClock),
            ui: Arc::new(ConsoleUi::new(label.clone())),
        };

        let (runtime, handle) = HarnessRuntime::new(label, deps, harness_settings);
        tasks.push(tokio::spawn(runtime.start()));
        handles.push(handle);
    }

    info!(
        contexts = settings.contexts,
        api = ?settings.channel_api,
        backend = ?settings.backend,
        policy = %settings.storage_policy,
        "Harness wired"
    );

    Ok(Harness {
        handles,
        tasks,
        storage,
        platform,
        default_formats: settings.default_formats.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cb_core::config::HarnessConfig;

    fn memory_settings() -> ResolvedSettings {
        ResolvedSettings::from_config(&HarnessConfig::empty()).unwrap()
    }

    #[tokio::test]
    async fn http_source_without_base_url_fails() {
        let settings = ResolvedSettings {
            content_source: ContentSource::Http,
            ..memory_settings()
        };
        let err = wire_harness(&settings).await.err().unwrap();
        assert!(matches!(err, WiringError::ContentInit(_)));
    }

    #[tokio::test]
    async fn zero_contexts_is_rejected() {
        let settings = ResolvedSettings {
            contexts: 0,
            ..memory_settings()
        };
        assert!(matches!(
            wire_harness(&settings).await.err().unwrap(),
            WiringError::NoContexts
        ));
    }

    #[tokio::test]
    async fn opens_one_runtime_per_context() {
        let settings = ResolvedSettings {
            contexts: 3,
            ..memory_settings()
        };
        let harness = wire_harness(&settings).await.unwrap();
        assert_eq!(harness.handles.len(), 3);
        assert_eq!(harness.handle(2).unwrap().label(), "tab-2");

        let first = harness.handle(0).unwrap().status().await.unwrap();
        let second = harness.handle(1).unwrap().status().await.unwrap();
        assert_ne!(first.session_id, second.session_id);

        harness.shutdown().await;
    }
}
