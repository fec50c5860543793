//! # Airdrop Endpoints
//!
//! Bespoke airdrop actions. CRUD goes through [`super::RestCollection`].

use reqwest::Method;
use shared::{Airdrop, BatchUpdateRequest};

use super::client::ApiClient;
use crate::core::error::Result;

/// Apply the same changes to several airdrops; returns the updated records.
#[tracing::instrument(skip(client, request), fields(count = request.ids.len()))]
pub async fn batch_update(client: &ApiClient, request: &BatchUpdateRequest) -> Result<Vec<Airdrop>> {
    client
        .send_json::<_, Vec<Airdrop>>(Method::PUT, "/airdrops/batch-update", request)
        .await
}
