use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::Stream;

use crate::data::{Request, ResponseMeta};

/// A boxed stream type for HTTP response bodies.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// Status line and freshness metadata of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: u16,
    pub meta:   ResponseMeta,
}

/// A response whose body has not been read yet.
pub struct Response<E> {
    pub head: ResponseHead,
    pub body: BoxStream<'static, std::result::Result<Bytes, E>>,
}

impl<E> std::fmt::Debug for Response<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Response")
            .field("head", &self.head)
            .field("body", &"{ ... }")
            .finish()
    }
}

/// Asynchronous HTTP client abstraction.
///
/// This trait provides the minimal interface needed for conditional
/// retrieval. Implementations follow redirects and apply timeouts on their
/// own; non-success statuses are returned as responses, not errors.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - Mock implementations for testing
pub trait HttpClient: Send + Sync {
    /// Error type for transport failures.
    type Error: std::error::Error + Send + 'static;

    /// Issue a metadata-only (`HEAD`) request.
    fn head(
        &self,
        request: &Request,
    ) -> impl Future<Output = std::result::Result<ResponseHead, Self::Error>> + Send;

    /// Issue a `GET` request carrying every header in `request`.
    fn get(
        &self,
        request: &Request,
    ) -> impl Future<Output = std::result::Result<Response<Self::Error>, Self::Error>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use std::time::Duration;

    use reqwest::header::HeaderMap;

    use super::*;
    use crate::data::{ETAG, LAST_MODIFIED};

    /// Settings for [`ReqwestClient`].
    #[derive(Debug, Clone, Default)]
    pub struct ClientOptions {
        timeout:    Option<Duration>,
        user_agent: Option<String>,
    }

    impl ClientOptions {
        pub fn new() -> Self { Self::default() }

        /// Upper bound on a whole request, body included.
        pub fn timeout(mut self, timeout: Duration) -> Self {
            self.timeout = Some(timeout);
            self
        }

        pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
            self.user_agent = Some(user_agent.into());
            self
        }
    }

    /// Production HTTP client implementation using reqwest.
    #[derive(Debug, Clone)]
    pub struct ReqwestClient {
        client: reqwest::Client,
    }

    impl ReqwestClient {
        /// Create a new ReqwestClient with default configuration.
        pub fn new() -> std::result::Result<Self, reqwest::Error> {
            Self::with_options(&ClientOptions::default())
        }

        pub fn with_options(options: &ClientOptions) -> std::result::Result<Self, reqwest::Error> {
            let mut builder = reqwest::Client::builder();
            if let Some(timeout) = options.timeout {
                builder = builder.timeout(timeout);
            }
            if let Some(user_agent) = &options.user_agent {
                builder = builder.user_agent(user_agent.as_str());
            }
            Ok(Self {
                client: builder.build()?,
            })
        }

        fn build(&self, method: reqwest::Method, request: &Request) -> reqwest::RequestBuilder {
            let mut builder = self.client.request(method, request.url());
            for (name, value) in request.headers() {
                builder = builder.header(name.as_str(), value.as_str());
            }
            builder
        }
    }

    fn meta_from(headers: &HeaderMap) -> ResponseMeta {
        let text = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
        };
        ResponseMeta::new(text(ETAG), text(LAST_MODIFIED))
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        async fn head(&self, request: &Request) -> std::result::Result<ResponseHead, Self::Error> {
            let response = self.build(reqwest::Method::HEAD, request).send().await?;
            Ok(ResponseHead {
                status: response.status().as_u16(),
                meta:   meta_from(response.headers()),
            })
        }

        async fn get(&self, request: &Request) -> std::result::Result<Response<Self::Error>, Self::Error> {
            let response = self.build(reqwest::Method::GET, request).send().await?;
            let head = ResponseHead {
                status: response.status().as_u16(),
                meta:   meta_from(response.headers()),
            };
            Ok(Response {
                head,
                body: Box::pin(response.bytes_stream()),
            })
        }
    }

}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::{ClientOptions, ReqwestClient};
