//! The background refresh loop.
//!
//! Each cycle selects a freshness scheme if none is established yet, sends
//! one conditional request, and on a full transfer runs the update callback
//! and the atomic replacement. The scheme token only advances after both
//! succeed, so a rejected or uncommitted body is fetched again next cycle.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use bytes::Bytes;
use freshen_fetch::{ConditionalFetcher, FetchOutcome, FreshnessScheme, HttpClient, ResponseMeta};
use freshen_fs::ReplaceOptions;
use tokio::sync::{Notify, watch};
use tracing::{debug, info, warn};

use crate::error::{Error, ErrorKind, Result};
use crate::options::MirrorOptions;
use crate::replacer::{UpdateFn, replace_validated};

/// Where the loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PollPhase {
    /// No scheme established; the next cycle probes.
    #[default]
    Unselected,
    /// Probing the resource for its freshness metadata.
    Selecting,
    /// Sending the conditional request.
    Probing,
    /// A full body arrived; validating and committing it.
    Fetching,
    /// Scheme established, waiting for the next cycle.
    Idle,
}

impl fmt::Display for PollPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollPhase::Unselected => write!(f, "unselected"),
            PollPhase::Selecting => write!(f, "selecting"),
            PollPhase::Probing => write!(f, "probing"),
            PollPhase::Fetching => write!(f, "fetching"),
            PollPhase::Idle => write!(f, "idle"),
        }
    }
}

/// How one refresh cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The server reported the mirror current.
    NotModified,
    /// New content was accepted and committed.
    Updated,
    /// The cycle stopped at the given step; the loop retries next interval.
    Failed(ErrorKind),
}

/// Owns the mirror's freshness state and drives refresh cycles.
pub struct Poller<C: HttpClient> {
    fetcher:    ConditionalFetcher<C>,
    cache_path: PathBuf,
    interval:   Duration,
    replace:    ReplaceOptions,
    on_update:  Arc<UpdateFn>,
    baseline:   Option<SystemTime>,
    scheme:     Option<FreshnessScheme>,
    phase:      watch::Sender<PollPhase>,
}

impl<C: HttpClient> Poller<C> {
    /// `baseline` is the modification time of an accepted local copy, if any.
    pub fn new(
        fetcher: ConditionalFetcher<C>,
        cache_path: impl Into<PathBuf>,
        options: &MirrorOptions,
        on_update: Arc<UpdateFn>,
        baseline: Option<SystemTime>,
    ) -> Self {
        Self {
            fetcher,
            cache_path: cache_path.into(),
            interval: options.get_interval(),
            replace: options.get_replace(),
            on_update,
            baseline,
            scheme: None,
            phase: watch::Sender::new(PollPhase::Unselected),
        }
    }

    pub fn scheme(&self) -> Option<&FreshnessScheme> { self.scheme.as_ref() }

    pub fn phase(&self) -> PollPhase { *self.phase.borrow() }

    pub fn subscribe(&self) -> watch::Receiver<PollPhase> { self.phase.subscribe() }

    /// Run one cycle, logging any failure instead of returning it.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let outcome = match self.cycle().await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(url = %self.fetcher.url(), kind = %e.kind(), error = %e, "refresh cycle failed");
                CycleOutcome::Failed(e.kind())
            }
        };
        self.enter(if self.scheme.is_some() { PollPhase::Idle } else { PollPhase::Unselected });
        outcome
    }

    /// Cycle every interval until `shutdown` is notified.
    ///
    /// A notification that arrives mid-cycle abandons the cycle. A commit
    /// already handed to the blocking pool still runs to completion.
    pub async fn run(mut self, shutdown: Arc<Notify>) {
        info!(
            url = %self.fetcher.url(),
            path = %self.cache_path.display(),
            interval_ms = self.interval.as_millis() as u64,
            "mirror started"
        );

        loop {
            tokio::select! {
                _ = shutdown.notified() => break,
                _ = self.run_cycle() => {}
            }
            tokio::select! {
                _ = shutdown.notified() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        info!(url = %self.fetcher.url(), "mirror stopped");
    }

    async fn cycle(&mut self) -> Result<CycleOutcome> {
        let mut scheme = match self.scheme.take() {
            Some(scheme) => scheme,
            None => {
                self.enter(PollPhase::Selecting);
                let scheme = self
                    .fetcher
                    .select_scheme(self.baseline)
                    .await
                    .map_err(Error::Probe)?;
                info!(url = %self.fetcher.url(), scheme = %scheme.kind(), "freshness scheme selected");
                scheme
            }
        };

        let result = self.refresh(&mut scheme).await;
        self.scheme = Some(scheme);
        result
    }

    async fn refresh(&self, scheme: &mut FreshnessScheme) -> Result<CycleOutcome> {
        self.enter(PollPhase::Probing);
        let (meta, body) = match self.fetcher.fetch(scheme).await.map_err(Error::Fetch)? {
            FetchOutcome::NotModified => return Ok(CycleOutcome::NotModified),
            FetchOutcome::Modified { meta, body } => (meta, body),
        };

        self.enter(PollPhase::Fetching);
        let bytes = body.len();
        self.commit(body).await?;
        self.advance(scheme, &meta);

        info!(url = %self.fetcher.url(), path = %self.cache_path.display(), bytes, "mirror updated");
        Ok(CycleOutcome::Updated)
    }

    async fn commit(&self, body: Bytes) -> Result<()> {
        let path = self.cache_path.clone();
        let on_update = Arc::clone(&self.on_update);
        let options = self.replace;

        tokio::task::spawn_blocking(move || replace_validated(&path, &body, on_update.as_ref(), options))
            .await
            .map_err(|e| Error::Callback(Box::new(e)))??;
        Ok(())
    }

    fn advance(&self, scheme: &mut FreshnessScheme, meta: &ResponseMeta) {
        scheme.observe(meta);
        debug!(url = %self.fetcher.url(), scheme = %scheme.kind(), token = ?scheme.token(), "token advanced");
    }

    fn enter(&self, phase: PollPhase) { self.phase.send_replace(phase); }
}

impl<C: HttpClient> fmt::Debug for Poller<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poller")
            .field("url", &self.fetcher.url())
            .field("cache_path", &self.cache_path)
            .field("interval", &self.interval)
            .field("scheme", &self.scheme)
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}
