//! # UI Preferences
//!
//! Local-only preferences, loaded once at the composition root with explicit defaults and
//! written back on every change.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::Theme;
use tracing::warn;

use crate::cache::{CacheKey, LocalCache, Mirror};

/// Layout preferences persisted under [`CacheKey::UiPreferences`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiPreferences {
    #[serde(default)]
    pub sidebar_collapsed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_page: Option<String>,
}

pub struct Preferences {
    theme: Theme,
    ui: UiPreferences,
    theme_mirror: Mirror<Theme>,
    ui_mirror: Mirror<UiPreferences>,
}

impl Preferences {
    pub fn load(cache: Arc<dyn LocalCache>) -> Self {
        let theme_mirror = Mirror::new(Arc::clone(&cache), CacheKey::Theme);
        let ui_mirror = Mirror::new(cache, CacheKey::UiPreferences);
        Self {
            theme: theme_mirror.load().unwrap_or_default(),
            ui: ui_mirror.load().unwrap_or_default(),
            theme_mirror,
            ui_mirror,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn ui(&self) -> &UiPreferences {
        &self.ui
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        if let Err(e) = self.theme_mirror.replace(&theme) {
            warn!(error = %e, "Failed to persist theme");
        }
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let next = match self.theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
        self.set_theme(next);
        next
    }

    pub fn set_sidebar_collapsed(&mut self, collapsed: bool) {
        self.ui.sidebar_collapsed = collapsed;
        self.persist_ui();
    }

    pub fn set_last_page(&mut self, page: impl Into<String>) {
        self.ui.last_page = Some(page.into());
        self.persist_ui();
    }

    fn persist_ui(&self) {
        if let Err(e) = self.ui_mirror.replace(&self.ui) {
            warn!(error = %e, "Failed to persist UI preferences");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;

    #[test]
    fn test_defaults_without_cache_entries() {
        let prefs = Preferences::load(Arc::new(MemoryCache::new()));
        assert_eq!(prefs.theme(), Theme::Dark);
        assert_eq!(prefs.ui(), &UiPreferences::default());
    }

    #[test]
    fn test_changes_survive_reload() {
        let cache: Arc<dyn LocalCache> = Arc::new(MemoryCache::new());
        let mut prefs = Preferences::load(cache.clone());
        assert_eq!(prefs.toggle_theme(), Theme::Light);
        prefs.set_sidebar_collapsed(true);
        prefs.set_last_page("/airdrops");

        let reloaded = Preferences::load(cache.clone());
        assert_eq!(reloaded.theme(), Theme::Light);
        assert!(reloaded.ui().sidebar_collapsed);
        assert_eq!(reloaded.ui().last_page.as_deref(), Some("/airdrops"));
        assert_eq!(cache.read(CacheKey::Theme).unwrap().as_deref(), Some("\"light\""));
    }

    #[test]
    fn test_corrupt_entry_falls_back_to_default() {
        let cache: Arc<dyn LocalCache> = Arc::new(MemoryCache::new());
        cache.write(CacheKey::Theme, "not json").unwrap();
        assert_eq!(Preferences::load(cache).theme(), Theme::Dark);
    }
}
