use crate::ids::SessionId;

/// Identity of the current execution context.
///
/// Implementations generate the id lazily and return the same value for the
/// lifetime of the context.
pub trait SessionIdentityPort: Send + Sync {
    fn current_session_id(&self) -> SessionId;
}
