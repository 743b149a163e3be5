//! HTTP plumbing shared by every endpoint.

use delib_session::AuthToken;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use tracing::debug;

use crate::error::ApiError;

/// Client for the library REST API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the API rooted at `base_url`
    /// (e.g. `https://library.example.com`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    /// Creates a client that reuses an existing `reqwest::Client`.
    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// Root URL requests are made against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Starts a request, attaching the bearer token when one is given.
    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&AuthToken>,
    ) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match token {
            Some(token) => builder.header(AUTHORIZATION, token.bearer()),
            None => builder,
        }
    }

    /// Sends a request and turns non-success statuses into errors.
    pub(crate) async fn send(
        &self,
        builder: RequestBuilder,
    ) -> delib_core::Result<Response, ApiError> {
        let response = builder.send().await.map_err(|e| ApiError::Transport {
            reason: e.to_string(),
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!(status = status.as_u16(), error = %e, "failed to read error body");
                String::new()
            }
        };
        debug!(status = status.as_u16(), "API call failed");
        Err(ApiError::from_response(status.as_u16(), &body).into())
    }

    /// Sends a request and decodes a JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> delib_core::Result<T, ApiError> {
        let text = self.send_text(builder).await?;
        decode(&text)
    }

    /// Sends a request whose successful JSON body may be empty or `null`.
    ///
    /// Every non-success status, 404 included, is an error.
    pub(crate) async fn send_optional_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> delib_core::Result<Option<T>, ApiError> {
        let text = self.send_text(builder).await?;
        decode_optional(&text)
    }

    /// Looks up a resource that may not exist: a 404 reads as `None`.
    pub(crate) async fn fetch_optional_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> delib_core::Result<Option<T>, ApiError> {
        match self.send_text(builder).await {
            Ok(text) => decode_optional(&text),
            Err(report) if report.current_context().status() == Some(404) => Ok(None),
            Err(report) => Err(report),
        }
    }

    /// Sends a request and returns the body as text.
    pub(crate) async fn send_text(
        &self,
        builder: RequestBuilder,
    ) -> delib_core::Result<String, ApiError> {
        let response = self.send(builder).await?;
        let text = response.text().await.map_err(|e| ApiError::Transport {
            reason: e.to_string(),
        })?;
        Ok(text)
    }

    /// Sends a request and discards the body.
    pub(crate) async fn send_empty(
        &self,
        builder: RequestBuilder,
    ) -> delib_core::Result<(), ApiError> {
        self.send(builder).await?;
        Ok(())
    }
}

/// Percent-encodes one URL path segment.
pub(crate) fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

fn decode_optional<T: DeserializeOwned>(text: &str) -> delib_core::Result<Option<T>, ApiError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }
    decode(trimmed).map(Some)
}

fn decode<T: DeserializeOwned>(text: &str) -> delib_core::Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| {
        ApiError::Decode {
            reason: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::ApiClient;
    use axum::Router;
    use axum::http::HeaderMap;

    /// Serves `router` on an ephemeral port and returns a client for it.
    pub(crate) async fn serve(router: Router) -> ApiClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub server");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("stub server");
        });
        ApiClient::new(format!("http://{addr}/"))
    }

    /// The `Authorization` header of a stub request.
    pub(crate) fn authorization(headers: &HeaderMap) -> Option<String> {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }
}
