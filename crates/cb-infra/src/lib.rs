//! # cb-infra
//!
//! Infrastructure implementations of the clipbench ports: the same-origin
//! storage behind the mirror replica, content sources, clock and session
//! identity.

pub mod content;
pub mod identity;
pub mod storage;
pub mod time;

pub use content::{FixtureContentProvider, HttpContentProvider};
pub use identity::LazySessionIdentity;
pub use storage::{MirrorStoreHandle, OriginStorage};
pub use time::SystemClock;
