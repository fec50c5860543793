//! # API Client
//!
//! Main HTTP client for the Compass REST API.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Instant;

use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    Airdrop, AuthResponse, BatchUpdateRequest, ErrorResponse, LoginRequest, RecurringTask, RegisterRequest,
    UserAlert, UserInfo,
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::app::session::AuthContext;
use crate::config::CompassConfig;
use crate::core::error::{AppError, Result};
use crate::core::service::ApiService;

/// HTTP client for the Compass REST API.
///
/// Holds one connection pool and the injected [`AuthContext`]; every request carries the
/// current bearer token (when one is held) and a fresh `x-request-id`.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
    auth: Arc<AuthContext>,
}

impl ApiClient {
    /// Create a client for `config.api_base_url` with the configured timeout.
    pub fn new(config: &CompassConfig, auth: Arc<AuthContext>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            auth,
        })
    }

    /// Get the base URL for API requests.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth(&self) -> &Arc<AuthContext> {
        &self.auth
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET path`, decoding the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send::<()>(Method::GET, path, None).await?;
        decode(response).await
    }

    /// `method path` with a JSON body, decoding the JSON response.
    pub(crate) async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self.send(method, path, Some(body)).await?;
        decode(response).await
    }

    /// `POST path` without a body, decoding the JSON response.
    pub(crate) async fn post_action<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send::<()>(Method::POST, path, None).await?;
        decode(response).await
    }

    /// `DELETE path`; any 2xx counts as success and the body is ignored.
    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.send::<()>(Method::DELETE, path, None).await.map(|_| ())
    }

    async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Response>
    where
        B: Serialize + ?Sized + Sync,
    {
        let request_id = Uuid::new_v4().to_string();
        let token = self.auth.token();

        let mut builder = self
            .client
            .request(method.clone(), self.url(path))
            .header("x-request-id", &request_id);
        if let Some(token) = &token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let start = Instant::now();
        let response = builder.send().await.map_err(|e| {
            warn!(method = %method, path, request_id = %request_id, error = %e, "API request failed");
            AppError::from(e)
        })?;

        let status = response.status();
        debug!(
            method = %method,
            path,
            status = status.as_u16(),
            duration_ms = start.elapsed().as_millis(),
            request_id = %request_id,
            "API response"
        );

        if status.is_success() {
            return Ok(response);
        }

        // A 401 without a token is a credential failure (login), not an expired session.
        if status == StatusCode::UNAUTHORIZED && token.is_some() {
            warn!(method = %method, path, "Bearer token rejected");
            self.auth.expire();
            return Err(AppError::Unauthorized);
        }

        let message = error_message(response).await;
        warn!(method = %method, path, status = status.as_u16(), error = %message, "API error response");
        Err(AppError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

/// Percent-encode a record id so it stays a single path segment.
pub(crate) fn segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| AppError::Decode(e.to_string()))
}

/// Best-effort message from an error body, falling back to the status reason.
async fn error_message(response: Response) -> String {
    let status = response.status();
    let fallback = match status.canonical_reason() {
        Some(reason) => format!("{} ({})", reason, status.as_u16()),
        None => format!("Request failed with status {}", status.as_u16()),
    };

    match response.bytes().await {
        Ok(bytes) => serde_json::from_slice::<ErrorResponse>(&bytes)
            .ok()
            .and_then(|body| body.text().map(str::to_string))
            .unwrap_or(fallback),
        Err(_) => fallback,
    }
}

#[async_trait::async_trait]
impl ApiService for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        crate::services::api::auth::login(self, request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        crate::services::api::auth::register(self, request).await
    }

    async fn current_user(&self) -> Result<UserInfo> {
        crate::services::api::auth::current_user(self).await
    }

    async fn batch_update_airdrops(&self, request: &BatchUpdateRequest) -> Result<Vec<Airdrop>> {
        crate::services::api::airdrops::batch_update(self, request).await
    }

    async fn complete_recurring_task(&self, id: &str) -> Result<RecurringTask> {
        crate::services::api::recurring::complete(self, id).await
    }

    async fn promote_watchlist_item(&self, id: &str) -> Result<Airdrop> {
        crate::services::api::watchlist::promote(self, id).await
    }

    async fn mark_all_alerts_read(&self) -> Result<Vec<UserAlert>> {
        crate::services::api::alerts::mark_all_read(self).await
    }
}
