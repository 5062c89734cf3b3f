//! Keep a local file mirror of a remote HTTP resource fresh.
//!
//! A mirror owns one cache file. On start, an existing copy is handed to the
//! update callback straight away; a background task then polls the resource
//! with conditional requests and, whenever the server reports a change,
//! validates the new content through the same callback before atomically
//! replacing the file.
//!
//! # Architecture
//!
//! - [`freshen_fetch`] decides how freshness is checked and talks HTTP
//! - [`freshen_fs`] stages and commits the cache file
//! - this crate wires both into the initial load and the polling loop
//!
//! # Example
//!
//! ```no_run
//! use std::io::Read;
//! use std::time::Duration;
//!
//! # async fn run() -> freshen::Result<()> {
//! let mirror = freshen::start(
//!     "https://example.com/rates.json",
//!     "cache/rates.json",
//!     Duration::from_secs(60),
//!     |reader: &mut dyn Read| {
//!         let mut body = Vec::new();
//!         reader.read_to_end(&mut body)?;
//!         if body.is_empty() {
//!             return Err("empty rates".into());
//!         }
//!         Ok(())
//!     },
//! )?;
//! # mirror.shutdown().await;
//! # Ok(())
//! # }
//! ```

mod error;
mod loader;
mod mirror;
mod options;
mod poller;
mod replacer;

pub use error::{BoxError, Error, ErrorKind, Result};
pub use loader::load_initial;
pub use mirror::{MirrorHandle, start_with_client};
#[cfg(feature = "reqwest")]
pub use mirror::{start, start_with_options};
pub use options::{DEFAULT_INTERVAL, DEFAULT_REQUEST_TIMEOUT, MirrorOptions};
pub use poller::{CycleOutcome, PollPhase, Poller};
pub use replacer::{UpdateFn, replace_validated};

pub use freshen_fetch::{FreshnessScheme, SchemeKind};
pub use freshen_fs::{CommitMethod, ReplaceOptions};
