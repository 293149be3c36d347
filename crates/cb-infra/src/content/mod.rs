//! Content sources behind the copy formats.
mod fixture;
mod http;

pub use fixture::FixtureContentProvider;
pub use http::HttpContentProvider;
