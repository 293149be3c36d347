#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use cb_app::{HarnessDeps, HarnessHandle, HarnessRuntime, HarnessSettings, StatusReport};
use cb_core::clipboard::FormatSelection;
use cb_core::ports::{
    ClipboardCapability, ContentProviderPort, LogLevel, PermissionState, TransferChannelPort,
    UiPort,
};
use cb_core::{Classification, FormatTag, SessionId, StoragePolicy};
use cb_infra::{FixtureContentProvider, LazySessionIdentity, OriginStorage, SystemClock};
use cb_platform::{
    DeferredCaptureAdapter, DirectAdapter, MemoryBuffer, PlatformSettings, SimulatedPlatform,
};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// UI sink that remembers everything it was told.
#[derive(Default)]
pub struct RecordingUi {
    pub logs: Mutex<Vec<(LogLevel, String)>>,
    pub paste_formats: Mutex<Vec<BTreeSet<FormatTag>>>,
    pub rendered: Mutex<Vec<(FormatSelection, Classification)>>,
    pub progress: Mutex<Vec<bool>>,
}

impl RecordingUi {
    pub fn has_log(&self, needle: &str) -> bool {
        self.logs
            .lock()
            .unwrap()
            .iter()
            .any(|(_, line)| line.contains(needle))
    }

    pub fn last_paste_formats(&self) -> Option<BTreeSet<FormatTag>> {
        self.paste_formats.lock().unwrap().last().cloned()
    }
}

impl UiPort for RecordingUi {
    fn append_log(&self, level: LogLevel, message: &str) {
        self.logs.lock().unwrap().push((level, message.to_string()));
    }

    fn set_copy_in_progress(&self, in_progress: bool) {
        self.progress.lock().unwrap().push(in_progress);
    }

    fn set_paste_formats(&self, eligible: &BTreeSet<FormatTag>) {
        self.paste_formats.lock().unwrap().push(eligible.clone());
    }

    fn render_paste(&self, selection: &FormatSelection, classification: Classification) {
        self.rendered
            .lock()
            .unwrap()
            .push((selection.clone(), classification));
    }

    fn show_session(&self, _session: &SessionId) {}

    fn show_permission(&self, _capability: ClipboardCapability, _state: PermissionState) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Api {
    DataTransfer,
    AsyncClipboard,
}

pub struct Tab {
    pub handle: HarnessHandle,
    pub ui: Arc<RecordingUi>,
    pub session: SessionId,
    pub join: JoinHandle<()>,
}

/// One simulated browser with a shared buffer and one origin storage.
pub struct Browser {
    pub buffer: Arc<MemoryBuffer>,
    pub platform: SimulatedPlatform,
    pub storage: Arc<OriginStorage>,
}

pub fn settings(policy: StoragePolicy) -> HarnessSettings {
    HarnessSettings {
        storage_policy: policy,
        resolve_delay: Duration::ZERO,
        capture_timeout: Duration::from_millis(500),
    }
}

impl Browser {
    pub fn new(platform_settings: PlatformSettings) -> Self {
        let buffer = Arc::new(MemoryBuffer::new());
        let platform = SimulatedPlatform::new(buffer.clone(), platform_settings);
        Self {
            buffer,
            platform,
            storage: OriginStorage::in_memory(),
        }
    }

    pub fn open_tab(&self, label: &str, api: Api, settings: HarnessSettings) -> Tab {
        self.open_tab_with_content(
            label,
            api,
            settings,
            Arc::new(FixtureContentProvider::builtin()),
        )
    }

    pub fn open_tab_with_content(
        &self,
        label: &str,
        api: Api,
        settings: HarnessSettings,
        content: Arc<dyn ContentProviderPort>,
    ) -> Tab {
        let ctx = self.platform.open_context();
        let channel: Arc<dyn TransferChannelPort> = match api {
            Api::DataTransfer => Arc::new(DeferredCaptureAdapter::new(ctx.capture.clone())),
            Api::AsyncClipboard => Arc::new(DirectAdapter::new(ctx.async_clipboard.clone())),
        };
        let identity = Arc::new(LazySessionIdentity::new());
        let session = cb_core::ports::SessionIdentityPort::current_session_id(identity.as_ref());
        let ui = Arc::new(RecordingUi::default());

        let deps = HarnessDeps {
            channel,
            capture: ctx.capture.clone(),
            mirror: Arc::new(self.storage.handle()),
            content,
            permissions: ctx.permissions.clone(),
            identity,
            clock: Arc::new(SystemClock),
            ui: ui.clone(),
        };
        let (runtime, handle) = HarnessRuntime::new(label, deps, settings);
        let join = tokio::spawn(runtime.start());

        Tab {
            handle,
            ui,
            session,
            join,
        }
    }
}

/// Polls `status` until `check` holds.
pub async fn eventually(handle: &HarnessHandle, check: impl Fn(&StatusReport) -> bool) -> StatusReport {
    for _ in 0..100 {
        let status = handle.status().await.unwrap();
        if check(&status) {
            return status;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition never held for {}", handle.label());
}

pub fn all_formats() -> Vec<FormatTag> {
    FormatTag::user_formats().to_vec()
}
