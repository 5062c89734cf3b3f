use std::fmt;

use super::{IF_MODIFIED_SINCE, IF_NONE_MATCH, Request, ResponseMeta};

/// Conditional-request strategy for one mirrored resource.
///
/// The variant set is closed. A variant holding `None` has no token yet and
/// sends an unconditional request until a response supplies one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FreshnessScheme {
    /// Sends `If-None-Match` with the last seen `ETag`.
    EntityTag(Option<String>),
    /// Sends `If-Modified-Since` with the last seen `Last-Modified`.
    ModTime(Option<String>),
    /// Always transfers the full resource.
    Unconditional,
}

/// Variant tag of a [`FreshnessScheme`], without its token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemeKind {
    EntityTag,
    ModTime,
    Unconditional,
}

impl fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemeKind::EntityTag => write!(f, "entity-tag"),
            SchemeKind::ModTime => write!(f, "mod-time"),
            SchemeKind::Unconditional => write!(f, "unconditional"),
        }
    }
}

impl FreshnessScheme {
    pub fn kind(&self) -> SchemeKind {
        match self {
            FreshnessScheme::EntityTag(_) => SchemeKind::EntityTag,
            FreshnessScheme::ModTime(_) => SchemeKind::ModTime,
            FreshnessScheme::Unconditional => SchemeKind::Unconditional,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            FreshnessScheme::EntityTag(token) | FreshnessScheme::ModTime(token) => token.as_deref(),
            FreshnessScheme::Unconditional => None,
        }
    }

    /// Attach the conditional header for the stored token.
    ///
    /// The token is sent even when it has not changed since the previous
    /// request; the scheme never suppresses a request on its own.
    pub fn prepare(&self, request: &mut Request) {
        match self {
            FreshnessScheme::EntityTag(Some(etag)) => request.set_header(IF_NONE_MATCH, etag.as_str()),
            FreshnessScheme::ModTime(Some(date)) => request.set_header(IF_MODIFIED_SINCE, date.as_str()),
            FreshnessScheme::EntityTag(None)
            | FreshnessScheme::ModTime(None)
            | FreshnessScheme::Unconditional => {}
        }
    }

    /// Store the token carried by a response that was committed.
    pub fn observe(&mut self, meta: &ResponseMeta) {
        match self {
            FreshnessScheme::EntityTag(token) => *token = meta.etag.clone(),
            FreshnessScheme::ModTime(token) => *token = meta.last_modified.clone(),
            FreshnessScheme::Unconditional => {}
        }
    }
}
