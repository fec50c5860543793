//! # Local Cache
//!
//! Persisted local mirrors of server state, used for offline re-display on startup.
//!
//! The cache is never a source of truth. Every entry is rebuilt from the server: a store's
//! mirror is replaced wholesale on its next successful fetch (and after each confirmed
//! mutation). Entries are named by [`CacheKey`], one per store plus the auth and
//! preference entries, so no module invents its own storage keys.
//!
//! ## Implementations
//!
//! - [`FileCache`]: one `<key>.json` file per entry in a directory
//! - [`MemoryCache`]: a map, for tests and ephemeral sessions
//!
//! [`Mirror`] adds typed (de)serialization on top of a [`LocalCache`] and one key.

mod file;
mod memory;
mod mirror;

pub use file::FileCache;
pub use memory::MemoryCache;
pub use mirror::Mirror;

use crate::core::error::Result;

/// Every named entry in the local cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CacheKey {
    Wallets,
    Airdrops,
    RecurringTasks,
    Settings,
    Watchlist,
    YieldPositions,
    Transactions,
    StrategyNotes,
    LearningResources,
    AirdropTemplates,
    Alerts,
    Badges,
    Auth,
    Theme,
    UiPreferences,
}

impl CacheKey {
    /// All keys, store mirrors first.
    pub fn all() -> &'static [CacheKey] {
        &[
            CacheKey::Wallets,
            CacheKey::Airdrops,
            CacheKey::RecurringTasks,
            CacheKey::Settings,
            CacheKey::Watchlist,
            CacheKey::YieldPositions,
            CacheKey::Transactions,
            CacheKey::StrategyNotes,
            CacheKey::LearningResources,
            CacheKey::AirdropTemplates,
            CacheKey::Alerts,
            CacheKey::Badges,
            CacheKey::Auth,
            CacheKey::Theme,
            CacheKey::UiPreferences,
        ]
    }

    /// Stable entry name (also the file stem for [`FileCache`]).
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheKey::Wallets => "wallets",
            CacheKey::Airdrops => "airdrops",
            CacheKey::RecurringTasks => "recurring-tasks",
            CacheKey::Settings => "settings",
            CacheKey::Watchlist => "watchlist",
            CacheKey::YieldPositions => "yield-positions",
            CacheKey::Transactions => "transactions",
            CacheKey::StrategyNotes => "strategy-notes",
            CacheKey::LearningResources => "learning-resources",
            CacheKey::AirdropTemplates => "airdrop-templates",
            CacheKey::Alerts => "alerts",
            CacheKey::Badges => "badges",
            CacheKey::Auth => "auth",
            CacheKey::Theme => "theme",
            CacheKey::UiPreferences => "ui-preferences",
        }
    }

    /// True for entries that mirror an entity store.
    pub fn is_store_mirror(&self) -> bool {
        !matches!(self, CacheKey::Auth | CacheKey::Theme | CacheKey::UiPreferences)
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw key/value persistence for JSON text.
pub trait LocalCache: Send + Sync {
    /// `Ok(None)` when the entry does not exist.
    fn read(&self, key: CacheKey) -> Result<Option<String>>;

    fn write(&self, key: CacheKey, value: &str) -> Result<()>;

    /// Removing a missing entry is not an error.
    fn remove(&self, key: CacheKey) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_cache_key_names_are_unique() {
        let names: HashSet<&str> = CacheKey::all().iter().map(|k| k.as_str()).collect();
        assert_eq!(names.len(), CacheKey::all().len());
    }

    #[test]
    fn test_twelve_store_mirrors() {
        let mirrors = CacheKey::all().iter().filter(|k| k.is_store_mirror()).count();
        assert_eq!(mirrors, 12);
    }
}
