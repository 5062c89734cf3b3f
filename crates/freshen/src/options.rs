use std::time::Duration;

use freshen_fs::ReplaceOptions;

/// Interval used when none, or a zero one, is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

/// Request timeout used unless overridden.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a mirror.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use freshen::MirrorOptions;
///
/// let options = MirrorOptions::new()
///     .interval(Duration::from_secs(300))
///     .request_timeout(Duration::from_secs(10))
///     .user_agent("my-app/1.0");
/// assert_eq!(options.get_interval(), Duration::from_secs(300));
///
/// let defaulted = MirrorOptions::new().interval(Duration::ZERO);
/// assert_eq!(defaulted.get_interval(), Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct MirrorOptions {
    interval:        Duration,
    request_timeout: Option<Duration>,
    user_agent:      Option<String>,
    replace:         ReplaceOptions,
}

impl Default for MirrorOptions {
    fn default() -> Self { Self::new() }
}

impl MirrorOptions {
    pub fn new() -> Self {
        Self {
            interval:        DEFAULT_INTERVAL,
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            user_agent:      None,
            replace:         ReplaceOptions::new(),
        }
    }

    /// Pause between polling cycles. Zero selects [`DEFAULT_INTERVAL`].
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = if interval.is_zero() { DEFAULT_INTERVAL } else { interval };
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Let requests run as long as the server keeps them open.
    pub fn no_request_timeout(mut self) -> Self {
        self.request_timeout = None;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// How fetched content is swapped into the cache path.
    pub fn replace(mut self, replace: ReplaceOptions) -> Self {
        self.replace = replace;
        self
    }

    pub fn get_interval(&self) -> Duration { self.interval }

    pub fn get_request_timeout(&self) -> Option<Duration> { self.request_timeout }

    pub fn get_user_agent(&self) -> Option<&str> { self.user_agent.as_deref() }

    pub fn get_replace(&self) -> ReplaceOptions { self.replace }

    #[cfg(feature = "reqwest")]
    pub(crate) fn client_options(&self) -> freshen_fetch::ClientOptions {
        let mut client = freshen_fetch::ClientOptions::new();
        if let Some(timeout) = self.request_timeout {
            client = client.timeout(timeout);
        }
        if let Some(user_agent) = &self.user_agent {
            client = client.user_agent(user_agent.as_str());
        }
        client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = MirrorOptions::default();
        assert_eq!(options.get_interval(), DEFAULT_INTERVAL);
        assert_eq!(options.get_request_timeout(), Some(DEFAULT_REQUEST_TIMEOUT));
        assert_eq!(options.get_user_agent(), None);
    }

    #[test]
    fn test_zero_interval_falls_back() {
        let options = MirrorOptions::new()
            .interval(Duration::from_millis(50))
            .interval(Duration::ZERO);
        assert_eq!(options.get_interval(), DEFAULT_INTERVAL);
    }

    #[test]
    fn test_no_request_timeout() {
        let options = MirrorOptions::new().no_request_timeout();
        assert_eq!(options.get_request_timeout(), None);
    }
}
