use std::sync::OnceLock;

use cb_core::ports::SessionIdentityPort;
use cb_core::SessionId;
use tracing::info;

/// Session identity generated on first use and fixed for the context's lifetime.
#[derive(Debug, Default)]
pub struct LazySessionIdentity {
    id: OnceLock<SessionId>,
}

impl LazySessionIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity pinned to a known id, for tests and replays.
    pub fn fixed(id: SessionId) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(id);
        Self { id: cell }
    }
}

impl SessionIdentityPort for LazySessionIdentity {
    fn current_session_id(&self) -> SessionId {
        self.id
            .get_or_init(|| {
                let id = SessionId::generate();
                info!(session_id = %id, "Assigned session id");
                id
            })
            .clone()
    }
}
