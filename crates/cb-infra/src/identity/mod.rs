mod lazy_session;

pub use lazy_session::LazySessionIdentity;
