//! Reaching the library API from views.

use delib_api::{ApiClient, ApiError};
use delib_session::AuthToken;
use leptos::prelude::*;
use std::future::Future;

use crate::config::ClientConfig;
use crate::error::{CONFIG_UNAVAILABLE, SIGNED_OUT, failure_message};
use crate::session::SessionContext;

/// Returns the API location and upload container configured on the server.
#[server]
pub async fn get_client_config() -> Result<ClientConfig, ServerFnError> {
    use axum::Extension;

    let Extension(config): Extension<ClientConfig> = leptos_axum::extract().await?;
    Ok(config)
}

/// Per-app handle for making API calls.
#[derive(Clone, Copy)]
pub struct ApiContext {
    config: Resource<Result<ClientConfig, ServerFnError>>,
    session: SessionContext,
}

impl ApiContext {
    /// Client configuration, fetched once per page load.
    pub async fn config(&self) -> Result<ClientConfig, String> {
        self.config.await.map_err(|e| {
            leptos::logging::error!("failed to load client configuration: {e}");
            CONFIG_UNAVAILABLE.to_string()
        })
    }

    pub async fn client(&self) -> Result<ApiClient, String> {
        self.config().await.map(|config| ApiClient::new(config.api_url))
    }

    /// Runs a call that needs the bearer token.
    ///
    /// The token is read when the call starts. Failures come back as the
    /// inline message to show: the server's own text, else `fallback`.
    pub async fn authorized<T, F, Fut>(&self, fallback: &str, call: F) -> Result<T, String>
    where
        F: FnOnce(ApiClient, AuthToken) -> Fut,
        Fut: Future<Output = delib_core::Result<T, ApiError>>,
    {
        self.authorized_as(call, |error| error.user_message(fallback))
            .await
    }

    /// Like [`authorized`](Self::authorized) with a custom message for
    /// failures that do not end the session.
    pub async fn authorized_as<T, F, Fut, D>(&self, call: F, describe: D) -> Result<T, String>
    where
        F: FnOnce(ApiClient, AuthToken) -> Fut,
        Fut: Future<Output = delib_core::Result<T, ApiError>>,
        D: FnOnce(&ApiError) -> String,
    {
        let Some(token) = self.session.token_untracked() else {
            return Err(SIGNED_OUT.to_string());
        };
        let client = self.client().await?;
        call(client, token)
            .await
            .map_err(|report| failure_message(self.session, &report, describe))
    }
}

pub fn provide_api_context(session: SessionContext) -> ApiContext {
    let context = ApiContext {
        config: Resource::new(|| (), |_| get_client_config()),
        session,
    };
    provide_context(context);
    context
}

pub fn use_api() -> ApiContext {
    expect_context::<ApiContext>()
}
