//! # Harness Dependencies / 测试工具依赖
//!
//! Parameter grouping for building one context's runtime.
//! 用于构建单个上下文运行时的参数分组。
//!
//! **Note / 注意**: This is NOT a Builder pattern.
//! **这不是 Builder 模式。**
//! - No build steps / 无构建步骤
//! - No default values / 无默认值
//! - No hidden logic / 无隐藏逻辑
//! - Just parameter grouping / 仅用于参数打包

use std::sync::Arc;
use std::time::Duration;

use cb_core::ports::*;
use cb_core::StoragePolicy;

/// Ports of one context. All required.
/// 单个上下文的端口，全部必填。
#[derive(Clone)]
pub struct HarnessDeps {
    // Transfer channel
    pub channel: Arc<dyn TransferChannelPort>,
    pub capture: Arc<dyn CaptureSignalPort>,

    // Mirror replica
    pub mirror: Arc<dyn MirrorStorePort>,

    // Copy content
    pub content: Arc<dyn ContentProviderPort>,

    // Environment
    pub permissions: Arc<dyn PermissionQueryPort>,
    pub identity: Arc<dyn SessionIdentityPort>,
    pub clock: Arc<dyn ClockPort>,

    // UI sink
    pub ui: Arc<dyn UiPort>,
}

/// Resolved knobs of one context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarnessSettings {
    pub storage_policy: StoragePolicy,
    /// Artificial latency before content resolution starts.
    pub resolve_delay: Duration,
    /// How long a keyboard-triggered operation waits for its capture signal.
    pub capture_timeout: Duration,
}
