//! # Store Registry
//!
//! Every store of the app, wired to the REST API, plus the actions that span more than a
//! single CRUD call.

use std::sync::Arc;

use shared::{
    Airdrop, AirdropChanges, AirdropTask, AirdropTemplate, Badge, BatchUpdateRequest, Entity, GasLog,
    LearningResource, RecurringTask, Settings, StrategyNote, Transaction, UserAlert, Wallet, WatchlistItem,
    YieldPosition,
};
use tracing::info;

use super::{ChildStore, EntityStore, SingletonStore, Syncable};
use crate::cache::{CacheKey, LocalCache, Mirror};
use crate::core::error::{AppError, Result};
use crate::core::service::ApiService;
use crate::services::api::{ApiClient, RestCollection, RestDocument, RestNested};

/// All client-side stores.
///
/// Cloning shares the underlying stores.
#[derive(Clone)]
pub struct Stores {
    pub wallets: EntityStore<Wallet>,
    pub gas_logs: ChildStore<Wallet, GasLog>,
    pub airdrops: EntityStore<Airdrop>,
    pub airdrop_tasks: ChildStore<Airdrop, AirdropTask>,
    pub recurring_tasks: EntityStore<RecurringTask>,
    pub settings: SingletonStore<Settings>,
    pub watchlist: EntityStore<WatchlistItem>,
    pub yield_positions: EntityStore<YieldPosition>,
    pub transactions: EntityStore<Transaction>,
    pub strategy_notes: EntityStore<StrategyNote>,
    pub learning_resources: EntityStore<LearningResource>,
    pub airdrop_templates: EntityStore<AirdropTemplate>,
    pub alerts: EntityStore<UserAlert>,
    pub badges: EntityStore<Badge>,
    actions: Arc<dyn ApiService>,
}

fn collection<T: Entity>(
    api: &Arc<ApiClient>,
    cache: &Arc<dyn LocalCache>,
    path: &str,
    key: CacheKey,
) -> EntityStore<T> {
    EntityStore::new(
        Arc::new(RestCollection::<T>::new(Arc::clone(api), path)),
        Mirror::new(Arc::clone(cache), key),
    )
}

impl Stores {
    /// Build every store against `api`, hydrated from `cache`.
    pub fn connect(api: Arc<ApiClient>, cache: Arc<dyn LocalCache>) -> Self {
        let wallets = collection::<Wallet>(&api, &cache, "/wallets", CacheKey::Wallets);
        let airdrops = collection::<Airdrop>(&api, &cache, "/airdrops", CacheKey::Airdrops);

        Self {
            gas_logs: ChildStore::new(
                wallets.clone(),
                Arc::new(RestNested::new(Arc::clone(&api), "/wallets", "gas-logs")),
            ),
            airdrop_tasks: ChildStore::new(
                airdrops.clone(),
                Arc::new(RestNested::new(Arc::clone(&api), "/airdrops", "tasks")),
            ),
            wallets,
            airdrops,
            recurring_tasks: collection(&api, &cache, "/recurring-tasks", CacheKey::RecurringTasks),
            settings: SingletonStore::new(
                "settings",
                Arc::new(RestDocument::new(Arc::clone(&api), "/settings")),
                Mirror::new(Arc::clone(&cache), CacheKey::Settings),
            ),
            watchlist: collection(&api, &cache, "/watchlist", CacheKey::Watchlist),
            yield_positions: collection(&api, &cache, "/yield-positions", CacheKey::YieldPositions),
            transactions: collection(&api, &cache, "/transactions", CacheKey::Transactions),
            strategy_notes: collection(&api, &cache, "/strategy-notes", CacheKey::StrategyNotes),
            learning_resources: collection(&api, &cache, "/learning-resources", CacheKey::LearningResources),
            airdrop_templates: collection(&api, &cache, "/airdrop-templates", CacheKey::AirdropTemplates),
            alerts: collection(&api, &cache, "/alerts", CacheKey::Alerts),
            badges: collection(&api, &cache, "/badges", CacheKey::Badges),
            actions: api,
        }
    }

    /// The twelve top-level stores, in bootstrap order.
    pub fn syncables(&self) -> Vec<&dyn Syncable> {
        vec![
            &self.wallets as &dyn Syncable,
            &self.airdrops as &dyn Syncable,
            &self.recurring_tasks as &dyn Syncable,
            &self.settings as &dyn Syncable,
            &self.watchlist as &dyn Syncable,
            &self.yield_positions as &dyn Syncable,
            &self.transactions as &dyn Syncable,
            &self.strategy_notes as &dyn Syncable,
            &self.learning_resources as &dyn Syncable,
            &self.airdrop_templates as &dyn Syncable,
            &self.alerts as &dyn Syncable,
            &self.badges as &dyn Syncable,
        ]
    }

    /// Drop the in-memory contents of every store.
    pub fn clear_all(&self) {
        for store in self.syncables() {
            store.clear();
        }
    }

    /// Apply `changes` to every airdrop in `ids`.
    ///
    /// All or nothing: the local records change only once the server has confirmed the
    /// whole batch.
    pub async fn batch_update_airdrops(&self, ids: Vec<String>, changes: AirdropChanges) -> Result<Vec<Airdrop>> {
        if ids.is_empty() {
            return Err(AppError::Validation("Select at least one airdrop".to_string()));
        }
        let request = BatchUpdateRequest { ids, changes };
        let updated = self.actions.batch_update_airdrops(&request).await?;
        info!(count = updated.len(), "Airdrops batch-updated");
        self.airdrops.upsert_confirmed(updated.clone());
        Ok(updated)
    }

    /// Mark a recurring task done; the server advances its next due date.
    pub async fn complete_recurring_task(&self, id: &str) -> Result<RecurringTask> {
        let task = self.actions.complete_recurring_task(id).await?;
        info!(id, next_due = %task.next_due_date, "Recurring task completed");
        self.recurring_tasks.upsert_confirmed(vec![task.clone()]);
        Ok(task)
    }

    /// Move a watched project into the airdrop tracker.
    pub async fn promote_watchlist_item(&self, id: &str) -> Result<Airdrop> {
        let airdrop = self.actions.promote_watchlist_item(id).await?;
        info!(watchlist_id = id, airdrop_id = %airdrop.id, "Watchlist item promoted");
        self.watchlist.remove_confirmed(id);
        self.airdrops.upsert_confirmed(vec![airdrop.clone()]);
        Ok(airdrop)
    }

    pub async fn mark_all_alerts_read(&self) -> Result<usize> {
        let alerts = self.actions.mark_all_alerts_read().await?;
        let count = alerts.len();
        self.alerts.replace_confirmed(alerts);
        Ok(count)
    }
}
