//! Shared REST session
//!
//! One `RestClient` is created per process and cloned into every handler
//! context. Clones share the same underlying connection pool and are
//! released together by [`RestClient::close`].

use crate::error::{RestError, RestResult};
use blackbox_common::ClientConfig;
use parking_lot::RwLock;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Placeholder for requests without query or body data
pub const NO_DATA: Option<&()> = None;

struct RestInner {
    /// `None` once the session has been released
    http: RwLock<Option<reqwest::Client>>,
    base_url: String,
    token: String,
    closed: AtomicBool,
}

/// Authenticated, reference-counted REST session
#[derive(Clone)]
pub struct RestClient {
    inner: Arc<RestInner>,
}

impl RestClient {
    /// Create a session against `base_url` (e.g. `http://localhost:8080/api`)
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> RestResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            inner: Arc::new(RestInner {
                http: RwLock::new(Some(http)),
                base_url,
                token: token.into(),
                closed: AtomicBool::new(false),
            }),
        })
    }

    /// Create a session from the client configuration
    pub fn from_config(config: &ClientConfig) -> RestResult<Self> {
        Self::new(
            config.endpoint.rest_base_url(),
            config.token.clone(),
            config.rest.timeout(),
        )
    }

    /// Base URL for requests
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Full URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'))
    }

    /// Check whether the session has been released
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    /// Release the session
    ///
    /// Returns `true` for the call that actually released it; later calls are
    /// no-ops. Requests already in flight keep their own handle and finish.
    pub fn close(&self) -> bool {
        if self.inner.closed.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.inner.http.write().take();
        tracing::info!(base_url = %self.inner.base_url, "REST session closed");
        true
    }

    fn http(&self) -> RestResult<reqwest::Client> {
        self.inner
            .http
            .read()
            .as_ref()
            .cloned()
            .ok_or(RestError::SessionClosed)
    }

    /// Send an authenticated request and check its status
    ///
    /// `data` is sent as query parameters for `GET` and as a JSON body for
    /// every other method.
    pub async fn send<B>(&self, method: Method, path: &str, data: Option<&B>) -> RestResult<Response>
    where
        B: Serialize + ?Sized,
    {
        let http = self.http()?;
        let url = self.url(path);

        let mut builder = http
            .request(method.clone(), &url)
            .header(AUTHORIZATION, self.inner.token.as_str());
        if let Some(data) = data {
            builder = if method == Method::GET {
                builder.query(data)
            } else {
                builder.json(data)
            };
        }

        tracing::debug!(method = %method, path = %path, "Sending REST request");
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                method = %method,
                path = %path,
                status = status.as_u16(),
                "REST request failed"
            );
            return Err(RestError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    /// Send an authenticated request and decode the JSON response
    pub async fn request<T, B>(&self, method: Method, path: &str, data: Option<&B>) -> RestResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(method, path, data).await?;
        Ok(response.json::<T>().await?)
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.inner.base_url)
            .field("closed", &self.is_closed())
            .finish()
    }
}
