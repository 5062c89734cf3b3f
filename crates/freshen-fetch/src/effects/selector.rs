use std::time::SystemTime;

use tracing::debug;

use super::http::HttpClient;
use crate::core::{is_head_usable, select_scheme};
use crate::data::{FreshnessScheme, Request};
use crate::error::{FetchError, Result};

/// Probes a resource with `HEAD` to learn which freshness scheme it
/// supports.
#[derive(Debug)]
pub struct SchemeSelector<'a, C> {
    client: &'a C,
    url:    &'a str,
}

impl<'a, C: HttpClient> SchemeSelector<'a, C> {
    pub fn new(client: &'a C, url: &'a str) -> Self { Self { client, url } }

    /// Probe the resource and build its scheme.
    ///
    /// Fails on transport errors and on any status that does not describe
    /// the resource, such as an error page or a redirect; the caller
    /// probes again next cycle. A server that only rejects `HEAD` (`405`,
    /// `501`) ends up unconditional.
    pub async fn select(&self, baseline: Option<SystemTime>) -> Result<FreshnessScheme> {
        let request = Request::new(self.url);
        let head = self
            .client
            .head(&request)
            .await
            .map_err(|e| FetchError::Transport {
                url:     self.url.to_string(),
                message: e.to_string(),
            })?;

        if !is_head_usable(head.status) {
            return Err(FetchError::Status {
                url:    self.url.to_string(),
                status: head.status,
            });
        }

        let scheme = select_scheme(&head.meta, baseline);
        debug!(
            url = %self.url,
            status = head.status,
            scheme = %scheme.kind(),
            seeded = scheme.token().is_some(),
            "selected freshness scheme"
        );
        Ok(scheme)
    }
}
