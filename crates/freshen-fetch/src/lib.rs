//! Conditional HTTP retrieval for keeping a local mirror fresh.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Requests, response metadata and the freshness scheme
//! - [`core`] - Pure decisions: scheme selection, status classification, dates
//! - [`effects`] - Network I/O behind the [`HttpClient`] trait
//!
//! A [`FreshnessScheme`] is chosen once from a metadata probe and then
//! decorates every request with the matching conditional header. Whether a
//! transfer is skipped is decided by the server's `304 Not Modified`, never
//! locally.

pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use crate::core::{StatusClass, classify_status, http_date, select_scheme};
pub use data::{FreshnessScheme, Request, ResponseMeta, SchemeKind};
pub use effects::{
    BoxStream, ConditionalFetcher, FetchOutcome, HttpClient, Response, ResponseHead,
    SchemeSelector,
};

#[cfg(feature = "reqwest")]
pub use effects::{ClientOptions, ReqwestClient};

pub use error::{FetchError, Result};
