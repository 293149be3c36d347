use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, warn};

use cb_core::ports::{MirrorChange, MirrorError, MirrorStorePort};

/// Key/value storage of one origin, visible to every context of that origin.
///
/// Optionally backed by a JSON file so that the mirror outlives a single
/// harness run. Each context talks to it through its own [`MirrorStoreHandle`];
/// a mutation is announced to every *other* handle's subscribers.
pub struct OriginStorage {
    entries: Mutex<BTreeMap<String, String>>,
    watchers: StdMutex<Vec<Watcher>>,
    path: Option<PathBuf>,
    available: AtomicBool,
    next_context: AtomicU64,
}

struct Watcher {
    context: u64,
    tx: mpsc::UnboundedSender<MirrorChange>,
}

impl OriginStorage {
    pub fn in_memory() -> Arc<Self> {
        Arc::new(Self::with_entries(BTreeMap::new(), None))
    }

    /// Opens storage persisted at `path`, loading existing entries if the file exists.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Arc<Self>> {
        let path = path.into();
        let entries = match fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("parse origin storage failed: {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read origin storage failed: {}", path.display()))
            }
        };
        debug!(path = %path.display(), keys = entries.len(), "Opened origin storage");
        Ok(Arc::new(Self::with_entries(entries, Some(path))))
    }

    fn with_entries(entries: BTreeMap<String, String>, path: Option<PathBuf>) -> Self {
        Self {
            entries: Mutex::new(entries),
            watchers: StdMutex::new(Vec::new()),
            path,
            available: AtomicBool::new(true),
            next_context: AtomicU64::new(1),
        }
    }

    /// A new context's view of this storage.
    pub fn handle(self: &Arc<Self>) -> MirrorStoreHandle {
        MirrorStoreHandle {
            storage: Arc::clone(self),
            context: self.next_context.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Makes every operation fail with `StorageUnavailable` (quota, private mode, ...).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn ensure_available(&self) -> Result<(), MirrorError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(MirrorError::StorageUnavailable(
                "origin storage is not accessible".into(),
            ))
        }
    }

    async fn read(&self, key: &str) -> Result<Option<String>, MirrorError> {
        self.ensure_available()?;
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn mutate(
        &self,
        context: u64,
        key: &str,
        new_value: Option<String>,
    ) -> Result<(), MirrorError> {
        self.ensure_available()?;

        let mut entries = self.entries.lock().await;
        let old_value = entries.get(key).cloned();
        if old_value == new_value {
            return Ok(());
        }

        let mut next = entries.clone();
        match &new_value {
            Some(value) => next.insert(key.to_string(), value.clone()),
            None => next.remove(key),
        };

        if let Some(path) = &self.path {
            persist(path, &next)
                .await
                .map_err(|e| MirrorError::StorageUnavailable(format!("{e:#}")))?;
        }
        *entries = next;
        drop(entries);

        self.notify(
            context,
            MirrorChange {
                key: key.to_string(),
                old_value,
                new_value,
            },
        );
        Ok(())
    }

    fn notify(&self, origin_context: u64, change: MirrorChange) {
        let Ok(mut watchers) = self.watchers.lock() else {
            warn!("Origin storage watcher list poisoned; dropping change notification");
            return;
        };
        watchers.retain(|w| {
            if w.context == origin_context {
                return !w.tx.is_closed();
            }
            w.tx.send(change.clone()).is_ok()
        });
    }

    fn subscribe(&self, context: u64) -> mpsc::UnboundedReceiver<MirrorChange> {
        let (tx, rx) = mpsc::unbounded_channel();
        match self.watchers.lock() {
            Ok(mut watchers) => watchers.push(Watcher { context, tx }),
            Err(_) => warn!("Origin storage watcher list poisoned; subscription will stay silent"),
        }
        rx
    }
}

/// Writes `entries` to a temp file next to `path`, then renames it into place.
async fn persist(path: &Path, entries: &BTreeMap<String, String>) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .await
            .with_context(|| format!("create origin storage dir failed: {}", dir.display()))?;
    }
    let content = serde_json::to_string_pretty(entries).context("serialize origin storage failed")?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, content)
        .await
        .with_context(|| format!("write temp origin storage failed: {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).await.with_context(|| {
        format!(
            "rename temp origin storage to target failed: {} -> {}",
            tmp_path.display(),
            path.display()
        )
    })?;
    Ok(())
}

/// One context's view of an [`OriginStorage`].
#[derive(Clone)]
pub struct MirrorStoreHandle {
    storage: Arc<OriginStorage>,
    context: u64,
}

impl MirrorStoreHandle {
    pub fn context(&self) -> u64 {
        self.context
    }
}

#[async_trait]
impl MirrorStorePort for MirrorStoreHandle {
    async fn put(&self, key: &str, value: String) -> Result<(), MirrorError> {
        self.storage.mutate(self.context, key, Some(value)).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, MirrorError> {
        self.storage.read(key).await
    }

    async fn remove(&self, key: &str) -> Result<(), MirrorError> {
        self.storage.mutate(self.context, key, None).await
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<MirrorChange> {
        self.storage.subscribe(self.context)
    }
}
