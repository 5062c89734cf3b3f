//! Conditional download of a single resource.
//!
//! The active [`FreshnessScheme`] decorates the request; the server decides
//! whether anything is transferred.

use std::time::SystemTime;

use bytes::Bytes;
use futures_util::TryStreamExt;
use tracing::debug;

use super::http::{BoxStream, HttpClient};
use super::selector::SchemeSelector;
use crate::core::{StatusClass, classify_status};
use crate::data::{FreshnessScheme, Request, ResponseMeta};
use crate::error::{FetchError, Result};

/// Result of one conditional fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The server answered `304`; nothing was transferred.
    NotModified,
    /// A full body was transferred and held in memory.
    Modified { meta: ResponseMeta, body: Bytes },
}

/// Fetcher bound to one remote resource.
#[derive(Debug)]
pub struct ConditionalFetcher<C: HttpClient> {
    client: C,
    url:    String,
}

impl<C: HttpClient> ConditionalFetcher<C> {
    pub fn new(client: C, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str { &self.url }

    pub fn client(&self) -> &C { &self.client }

    pub fn selector(&self) -> SchemeSelector<'_, C> { SchemeSelector::new(&self.client, &self.url) }

    /// Probe the resource and pick its scheme, see [`SchemeSelector::select`].
    pub async fn select_scheme(&self, baseline: Option<SystemTime>) -> Result<FreshnessScheme> {
        self.selector().select(baseline).await
    }

    /// Send a `GET` decorated by `scheme` and read the body if one follows.
    ///
    /// `scheme` is only read; storing the new token is left to the caller
    /// once the body has been accepted.
    pub async fn fetch(&self, scheme: &FreshnessScheme) -> Result<FetchOutcome> {
        let mut request = Request::new(self.url.as_str());
        scheme.prepare(&mut request);

        let response = self
            .client
            .get(&request)
            .await
            .map_err(|e| FetchError::Transport {
                url:     self.url.clone(),
                message: e.to_string(),
            })?;

        match classify_status(response.head.status) {
            StatusClass::NotModified => {
                debug!(url = %self.url, scheme = %scheme.kind(), "not modified");
                Ok(FetchOutcome::NotModified)
            }
            StatusClass::Failed => Err(FetchError::Status {
                url:    self.url.clone(),
                status: response.head.status,
            }),
            StatusClass::Modified => {
                let body = self.read_body(response.body).await?;
                debug!(url = %self.url, bytes = body.len(), "fetched body");
                Ok(FetchOutcome::Modified {
                    meta: response.head.meta,
                    body,
                })
            }
        }
    }

    async fn read_body(&self, mut body: BoxStream<'static, std::result::Result<Bytes, C::Error>>) -> Result<Bytes> {
        let mut buf = Vec::new();
        while let Some(chunk) = body.try_next().await.map_err(|e| FetchError::Body {
            url:     self.url.clone(),
            message: e.to_string(),
        })? {
            buf.extend_from_slice(&chunk);
        }
        Ok(Bytes::from(buf))
    }
}
