//! Plain data carried between the fetch layers.
//!
//! Nothing in here performs I/O. The scheme type only knows how to decorate
//! a [`Request`] and how to absorb a [`ResponseMeta`].

pub mod request;
pub mod scheme;

pub use request::{Request, ResponseMeta};
pub use scheme::{FreshnessScheme, SchemeKind};

/// Entity-tag response header.
pub const ETAG: &str = "ETag";
/// Modification-time response header.
pub const LAST_MODIFIED: &str = "Last-Modified";
/// Conditional counterpart of [`ETAG`].
pub const IF_NONE_MATCH: &str = "If-None-Match";
/// Conditional counterpart of [`LAST_MODIFIED`].
pub const IF_MODIFIED_SINCE: &str = "If-Modified-Since";

/// Status a server returns when a conditional request matched.
pub const NOT_MODIFIED: u16 = 304;
