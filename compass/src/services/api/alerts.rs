//! # Alert Endpoints

use shared::UserAlert;

use super::client::ApiClient;
use crate::core::error::Result;

/// Mark every alert read; returns the full, updated alert list.
pub async fn mark_all_read(client: &ApiClient) -> Result<Vec<UserAlert>> {
    client.post_action::<Vec<UserAlert>>("/alerts/mark-all-read").await
}
