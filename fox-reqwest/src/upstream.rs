//! Upstream wrapper around a reqwest-middleware client.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use fox_core::{CachedResponse, Headers, OutboundRequest, Upstream, UpstreamError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Request, Url};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};

/// Timeout applied to every request unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends fox requests with reqwest.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct ReqwestUpstream {
    client: ClientWithMiddleware,
    timeout: Duration,
}

impl ReqwestUpstream {
    /// Creates a builder with a 30 second timeout.
    pub fn builder() -> ReqwestUpstreamBuilder {
        ReqwestUpstreamBuilder::default()
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn prepare(&self, req: OutboundRequest) -> Result<Request, UpstreamError> {
        let url = Url::parse_with_params(&req.base, &req.parameters)
            .map_err(|e| UpstreamError::new(req.base.clone(), e))?;
        let headers = header_map(&req.headers).map_err(|e| UpstreamError::new(url.as_str(), e))?;

        let mut request = Request::new(Method::GET, url);
        *request.headers_mut() = headers;
        *request.timeout_mut() = Some(self.timeout);
        Ok(request)
    }
}

fn header_map(headers: &Headers) -> Result<HeaderMap, Box<dyn std::error::Error + Send + Sync>> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        map.insert(
            HeaderName::from_bytes(name.as_bytes())?,
            HeaderValue::from_str(value)?,
        );
    }
    Ok(map)
}

impl Upstream for ReqwestUpstream {
    type Future = Pin<Box<dyn Future<Output = Result<CachedResponse, UpstreamError>> + Send>>;

    fn call(&mut self, req: OutboundRequest) -> Self::Future {
        let client = self.client.clone();
        let request = self.prepare(req);

        Box::pin(async move {
            let request = request?;
            let url = request.url().to_string();
            tracing::debug!(%url, "sending request");

            let response = client
                .execute(request)
                .await
                .map_err(|e| UpstreamError::new(url.clone(), e))?;

            let status = response.status().as_u16();
            let final_url = response.url().to_string();
            let body = response
                .text()
                .await
                .map_err(|e| UpstreamError::new(final_url.clone(), e))?;

            Ok(CachedResponse::new(status, final_url, body))
        })
    }
}

/// Builder for [`ReqwestUpstream`].
#[derive(Debug)]
pub struct ReqwestUpstreamBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    client: Option<ClientWithMiddleware>,
}

impl Default for ReqwestUpstreamBuilder {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            client: None,
        }
    }
}

impl ReqwestUpstreamBuilder {
    /// Per-request timeout covering connect, send and body read.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Default `User-Agent` for the built-in client.
    ///
    /// Ignored when a client is supplied with [`client`](Self::client);
    /// set the header through the request configuration instead.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Uses an existing middleware client, e.g. one with a retry layer.
    pub fn client(mut self, client: ClientWithMiddleware) -> Self {
        self.client = Some(client);
        self
    }

    /// Builds the upstream.
    ///
    /// Fails only if the built-in reqwest client can't be initialized.
    pub fn build(self) -> Result<ReqwestUpstream, reqwest::Error> {
        let client = match self.client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                ClientBuilder::new(builder.build()?).build()
            }
        };

        Ok(ReqwestUpstream {
            client,
            timeout: self.timeout,
        })
    }
}
