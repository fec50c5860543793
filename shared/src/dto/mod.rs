//! # Data Transfer Objects (DTOs)
//!
//! This module contains every record exchanged with the Compass REST API.
//!
//! ## Module Organization
//!
//! - [`auth`] - Login, registration and the authenticated user
//! - [`wallet`] - Tracked wallets and their gas logs
//! - [`airdrop`] - Airdrops, their tasks and batch updates
//! - [`recurring`] - Recurring farming tasks
//! - [`settings`] - The per-user settings document
//! - [`watchlist`] - Projects being watched before they become airdrops
//! - [`portfolio`] - Yield positions and logged transactions
//! - [`knowledge`] - Strategy notes, learning resources and airdrop templates
//! - [`alerts`] - User alerts and achievement badges
//!
//! ## Serialization Format
//!
//! - **Field naming**: camelCase on the wire (`#[serde(rename_all = "camelCase")]`)
//! - **Optional fields**: Omitted when `None`
//! - **Dates**: `YYYY-MM-DD` for calendar dates, RFC 3339 for timestamps
//!
//! ## Entities and Drafts
//!
//! Every collection record implements [`Entity`]. Its associated `Draft` type is the
//! creation payload: the same record without the server-assigned id.
//!
//! ```text
//! POST /api/wallets
//! { "address": "0xabc...", "name": "Main", "blockchain": "Ethereum" }
//!
//! HTTP/1.1 201 Created
//! { "id": "w_1", "address": "0xabc...", "name": "Main", "blockchain": "Ethereum",
//!   "isArchived": false, "gasLogs": [] }
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Implements [`Entity`] for a record with a `pub id: String` field.
macro_rules! entity {
    ($ty:ty, $draft:ty, $kind:literal) => {
        impl $crate::dto::Entity for $ty {
            type Draft = $draft;
            const KIND: &'static str = $kind;

            fn id(&self) -> &str {
                &self.id
            }
        }
    };
}

pub mod airdrop;
pub mod alerts;
pub mod auth;
pub mod knowledge;
pub mod portfolio;
pub mod recurring;
pub mod settings;
pub mod wallet;
pub mod watchlist;

pub use airdrop::*;
pub use alerts::*;
pub use auth::*;
pub use knowledge::*;
pub use portfolio::*;
pub use recurring::*;
pub use settings::*;
pub use wallet::*;
pub use watchlist::*;

/// A server-identified record that lives in a client-side collection.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Creation payload sent to the server (no id).
    type Draft: Serialize + Send + Sync;

    /// Short collection name, used in log fields.
    const KIND: &'static str;

    /// Server-assigned identifier.
    fn id(&self) -> &str;
}

/// A record that owns a nested collection of `C` (tasks of an airdrop, gas logs of a wallet).
pub trait HasChildren<C: Entity>: Entity {
    fn children(&self) -> &[C];
    fn children_mut(&mut self) -> &mut Vec<C>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kinds_are_distinct() {
        let kinds = [
            Wallet::KIND,
            GasLog::KIND,
            Airdrop::KIND,
            AirdropTask::KIND,
            RecurringTask::KIND,
            WatchlistItem::KIND,
            YieldPosition::KIND,
            Transaction::KIND,
            StrategyNote::KIND,
            LearningResource::KIND,
            AirdropTemplate::KIND,
            UserAlert::KIND,
            Badge::KIND,
        ];
        let unique: std::collections::HashSet<&str> = kinds.iter().copied().collect();
        assert_eq!(unique.len(), kinds.len());
    }

    #[test]
    fn test_entity_id_reads_the_id_field() {
        let badge: Badge =
            serde_json::from_str(r#"{"id":"b7","name":"Early","description":"","achieved":false}"#).unwrap();
        assert_eq!(badge.id(), "b7");
    }
}
