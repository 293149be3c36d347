//! Same-origin storage shared by every context, and the per-context mirror view.
mod origin_storage;

pub use origin_storage::{MirrorStoreHandle, OriginStorage};
