//! # Watchlist Endpoints

use shared::Airdrop;

use super::client::{segment, ApiClient};
use crate::core::error::Result;

/// Turn a watchlist item into a tracked airdrop.
///
/// The server deletes the watchlist item and returns the new airdrop.
pub async fn promote(client: &ApiClient, id: &str) -> Result<Airdrop> {
    client
        .post_action::<Airdrop>(&format!("/watchlist/{}/promote-to-airdrop", segment(id)))
        .await
}
