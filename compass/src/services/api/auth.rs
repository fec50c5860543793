//! # Authentication Endpoints
//!
//! Login, registration and the current user.

use reqwest::Method;
use shared::{AuthResponse, LoginRequest, RegisterRequest, UserInfo};

use super::client::ApiClient;
use crate::core::error::Result;

/// Login with email and password.
#[tracing::instrument(skip(client, request), fields(email = %request.email))]
pub async fn login(client: &ApiClient, request: &LoginRequest) -> Result<AuthResponse> {
    tracing::info!("Attempting login");
    let start = std::time::Instant::now();

    let result = client
        .send_json::<_, AuthResponse>(Method::POST, "/auth/login", request)
        .await;

    match &result {
        Ok(response) => tracing::info!(
            user_id = %response.user.id,
            duration_ms = start.elapsed().as_millis(),
            "Login successful"
        ),
        Err(e) => tracing::warn!(error = %e, duration_ms = start.elapsed().as_millis(), "Login failed"),
    }
    result
}

/// Register a new user.
#[tracing::instrument(skip(client, request), fields(username = %request.username))]
pub async fn register(client: &ApiClient, request: &RegisterRequest) -> Result<AuthResponse> {
    client
        .send_json::<_, AuthResponse>(Method::POST, "/auth/register", request)
        .await
}

/// Fetch the user owning the current token.
pub async fn current_user(client: &ApiClient) -> Result<UserInfo> {
    client.get::<UserInfo>("/auth/me").await
}
