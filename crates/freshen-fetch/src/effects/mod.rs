//! Network I/O for conditional retrieval.

mod conditional;
mod http;
mod selector;

pub use conditional::{ConditionalFetcher, FetchOutcome};
pub use http::{BoxStream, HttpClient, Response, ResponseHead};
pub use selector::SchemeSelector;

#[cfg(feature = "reqwest")]
pub use http::{ClientOptions, ReqwestClient};
