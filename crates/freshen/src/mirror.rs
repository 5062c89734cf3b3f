use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use freshen_fetch::{ConditionalFetcher, HttpClient};
use tokio::runtime::Handle;
use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::{BoxError, Error, Result};
use crate::loader::load_initial;
use crate::options::MirrorOptions;
use crate::poller::{PollPhase, Poller};
use crate::replacer::UpdateFn;

/// Handle to a running mirror.
///
/// Dropping the handle detaches the mirror, which then polls for the rest
/// of the runtime's life. Call [`MirrorHandle::shutdown`] to stop it.
#[derive(Debug)]
pub struct MirrorHandle {
    shutdown: Arc<Notify>,
    phase:    watch::Receiver<PollPhase>,
    task:     JoinHandle<()>,
}

impl MirrorHandle {
    pub fn phase(&self) -> PollPhase { *self.phase.borrow() }

    /// Watch phase transitions as they happen.
    pub fn subscribe(&self) -> watch::Receiver<PollPhase> { self.phase.clone() }

    pub fn is_finished(&self) -> bool { self.task.is_finished() }

    /// Stop polling and wait for the loop to exit.
    pub async fn shutdown(self) {
        self.shutdown.notify_one();
        if let Err(e) = self.task.await {
            debug!(error = %e, "mirror task ended abnormally");
        }
    }
}

/// Start mirroring `url` into `cache_path`, polling every `interval`.
///
/// Must be called from within a Tokio runtime. Before returning, an
/// existing copy at `cache_path` is handed to `on_update`; every later
/// change on the server is handed to it from a background task before
/// being written. Only local setup failures are returned, so an
/// unreachable server still yields a running mirror.
///
/// The startup load reads the cache file and runs `on_update` on the
/// calling thread, which is usually a runtime worker. That keeps it ahead
/// of any network activity but blocks the worker meanwhile, so keep the
/// callback cheap or call `start` from `spawn_blocking`. Later invocations
/// run on the blocking pool.
///
/// # Examples
///
/// ```no_run
/// use std::io::Read;
/// use std::time::Duration;
///
/// # async fn run() -> freshen::Result<()> {
/// let mirror = freshen::start(
///     "https://example.com/feed.xml",
///     "/var/cache/app/feed.xml",
///     Duration::from_secs(300),
///     |reader: &mut dyn Read| {
///         let mut text = String::new();
///         reader.read_to_string(&mut text)?;
///         println!("feed is {} bytes", text.len());
///         Ok(())
///     },
/// )?;
/// mirror.shutdown().await;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "reqwest")]
pub fn start<F>(
    url: impl Into<String>,
    cache_path: impl Into<PathBuf>,
    interval: Duration,
    on_update: F,
) -> Result<MirrorHandle>
where
    F: Fn(&mut dyn Read) -> std::result::Result<(), BoxError> + Send + Sync + 'static,
{
    start_with_options(url, cache_path, MirrorOptions::new().interval(interval), on_update)
}

/// [`start`] with full control over timeouts, user agent and replacement.
#[cfg(feature = "reqwest")]
pub fn start_with_options<F>(
    url: impl Into<String>,
    cache_path: impl Into<PathBuf>,
    options: MirrorOptions,
    on_update: F,
) -> Result<MirrorHandle>
where
    F: Fn(&mut dyn Read) -> std::result::Result<(), BoxError> + Send + Sync + 'static,
{
    let client = freshen_fetch::ReqwestClient::with_options(&options.client_options()).map_err(|e| {
        Error::Client {
            message: e.to_string(),
        }
    })?;
    start_with_client(client, url, cache_path, options, on_update)
}

/// [`start`] over any [`HttpClient`].
pub fn start_with_client<C, F>(
    client: C,
    url: impl Into<String>,
    cache_path: impl Into<PathBuf>,
    options: MirrorOptions,
    on_update: F,
) -> Result<MirrorHandle>
where
    C: HttpClient + 'static,
    F: Fn(&mut dyn Read) -> std::result::Result<(), BoxError> + Send + Sync + 'static,
{
    let runtime = Handle::try_current().map_err(|e| Error::Runtime {
        message: e.to_string(),
    })?;
    let cache_path = cache_path.into();
    ensure_parent(&cache_path)?;

    let on_update: Arc<UpdateFn> = Arc::new(on_update);
    let baseline = load_initial(&cache_path, on_update.as_ref());

    let poller = Poller::new(
        ConditionalFetcher::new(client, url),
        cache_path,
        &options,
        on_update,
        baseline,
    );
    let phase = poller.subscribe();
    let shutdown = Arc::new(Notify::new());
    let task = runtime.spawn(poller.run(Arc::clone(&shutdown)));

    Ok(MirrorHandle {
        shutdown,
        phase,
        task,
    })
}

fn ensure_parent(cache_path: &Path) -> Result<()> {
    let Some(parent) = cache_path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    std::fs::create_dir_all(parent).map_err(|source| Error::CacheDir {
        path: parent.to_path_buf(),
        source,
    })
}
