//! # Service Traits
//!
//! The seams between the stores and the network. Stores only ever talk to these traits,
//! so tests can swap the HTTP client for in-memory fakes.
//!
//! - [`Collection`]: list/create/update/delete of one REST resource family
//! - [`NestedCollection`]: the same, one level below a parent record
//! - [`Document`]: a singleton resource (`GET`/`PUT`)
//! - [`ApiService`]: authentication and the bespoke action endpoints

use async_trait::async_trait;
use shared::{
    Airdrop, AuthResponse, BatchUpdateRequest, Entity, LoginRequest, RecurringTask, RegisterRequest, UserAlert,
    UserInfo,
};

use super::error::Result;

/// One REST resource family (`GET /x`, `POST /x`, `PUT /x/:id`, `DELETE /x/:id`).
#[async_trait]
pub trait Collection<T: Entity>: Send + Sync {
    /// Resource path relative to the API base, e.g. `/wallets`.
    fn path(&self) -> &str;

    /// Fetch the full collection.
    async fn list(&self) -> Result<Vec<T>>;

    /// Create a record; the server assigns the id.
    async fn create(&self, draft: &T::Draft) -> Result<T>;

    /// Replace a record; returns the server's copy.
    async fn update(&self, record: &T) -> Result<T>;

    /// Delete a record by id.
    async fn delete(&self, id: &str) -> Result<()>;
}

/// A collection nested under a parent record (`/airdrops/:id/tasks`).
#[async_trait]
pub trait NestedCollection<C: Entity>: Send + Sync {
    async fn create(&self, parent_id: &str, draft: &C::Draft) -> Result<C>;

    async fn update(&self, parent_id: &str, record: &C) -> Result<C>;

    async fn delete(&self, parent_id: &str, id: &str) -> Result<()>;
}

/// A singleton resource such as `/settings`.
#[async_trait]
pub trait Document<T>: Send + Sync {
    fn path(&self) -> &str;

    async fn get(&self) -> Result<T>;

    async fn put(&self, document: &T) -> Result<T>;
}

/// Authentication and the bespoke action endpoints.
#[async_trait]
pub trait ApiService: Send + Sync {
    /// `POST /auth/login`
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse>;

    /// `POST /auth/register`
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse>;

    /// `GET /auth/me`
    async fn current_user(&self) -> Result<UserInfo>;

    /// `PUT /airdrops/batch-update`
    async fn batch_update_airdrops(&self, request: &BatchUpdateRequest) -> Result<Vec<Airdrop>>;

    /// `POST /recurring-tasks/:id/complete`
    async fn complete_recurring_task(&self, id: &str) -> Result<RecurringTask>;

    /// `POST /watchlist/:id/promote-to-airdrop`
    async fn promote_watchlist_item(&self, id: &str) -> Result<Airdrop>;

    /// `POST /alerts/mark-all-read`
    async fn mark_all_alerts_read(&self) -> Result<Vec<UserAlert>>;
}
