//! # Application Orchestrator
//!
//! [`App`] is the composition root: it owns the configuration, the auth context, the API
//! client, every store, the preferences and the toast queue, and drives the session
//! lifecycle.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  App (orchestrator)                                         │
//! │  - login() / register() / restore() / logout()              │
//! │  - bootstrap() - fetch all stores concurrently              │
//! │  - on_tick() - drain async events                           │
//! └────────────┬───────────────────────────────┬────────────────┘
//!              │                               │ async_channel
//! ┌────────────▼──────────────┐   ┌────────────┴────────────────┐
//! │  Stores (12 + nested)     │   │  AuthContext (401 → expire) │
//! │  EntityStore<T> ──────────┼──▶│  Reminder watcher (timer)   │
//! │        │                  │   └─────────────────────────────┘
//! │        ▼                  │
//! │  ApiClient ─▶ REST API    │
//! │  Mirror<T> ─▶ LocalCache  │
//! └───────────────────────────┘
//! ```
//!
//! ## Session Lifecycle
//!
//! - A failed login returns to [`SessionPhase::Unauthenticated`].
//! - A successful login moves to `Syncing`, runs the bootstrap and ends `Ready`, even when
//!   some stores failed (one error toast names them).
//! - [`AppEvent::SessionExpired`] (any 401 with a token) and [`App::logout`] return to
//!   `Unauthenticated` and clear the in-memory stores.
//!
//! ## Event-Driven Communication
//!
//! Background work reports back through an unbounded channel, drained without blocking:
//!
//! ```rust,ignore
//! while let Ok(event) = app.event_rx.try_recv() {
//!     app.handle_event(event);
//! }
//! ```

pub mod bootstrap;
pub mod events;
pub mod notifications;
pub mod preferences;
pub mod reminders;
pub mod session;

pub use bootstrap::{sync_all, SyncReport};
pub use events::{AppEvent, DueReminder};
pub use notifications::{Toast, ToastLevel, ToastQueue};
pub use preferences::{Preferences, UiPreferences};
pub use session::{AuthContext, SessionPhase, StoredSession};

use std::sync::Arc;

use async_channel::{unbounded, Receiver, Sender};
use shared::{LoginRequest, RegisterRequest, Theme, UserInfo};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::cache::{FileCache, LocalCache};
use crate::config::CompassConfig;
use crate::core::error::{AppError, Result};
use crate::core::service::ApiService;
use crate::services::api::ApiClient;
use crate::store::Stores;

pub struct App {
    config: CompassConfig,
    auth: Arc<AuthContext>,
    api: Arc<ApiClient>,
    stores: Stores,
    preferences: Preferences,
    toasts: ToastQueue,
    phase: SessionPhase,
    event_tx: Sender<AppEvent>,
    event_rx: Receiver<AppEvent>,
    reminders: Option<JoinHandle<()>>,
    last_sync: Option<SyncReport>,
}

impl App {
    /// Create the app with a file cache in `config.cache_dir`.
    pub fn new(config: CompassConfig) -> Result<Self> {
        let cache: Arc<dyn LocalCache> = Arc::new(FileCache::open(&config.cache_dir)?);
        Self::with_cache(config, cache)
    }

    /// Create the app on top of any cache. Stores, session and preferences are hydrated
    /// from it.
    pub fn with_cache(config: CompassConfig, cache: Arc<dyn LocalCache>) -> Result<Self> {
        config.validate()?;

        let (event_tx, event_rx) = unbounded();
        let auth = Arc::new(AuthContext::new(Arc::clone(&cache), event_tx.clone()));
        let api = Arc::new(ApiClient::new(&config, Arc::clone(&auth))?);
        let stores = Stores::connect(Arc::clone(&api), Arc::clone(&cache));
        let preferences = Preferences::load(cache);

        info!(api = %config.api_base_url, resumable = auth.has_token(), "App initialized");

        Ok(Self {
            config,
            auth,
            api,
            stores,
            preferences,
            toasts: ToastQueue::default(),
            phase: SessionPhase::Unauthenticated,
            event_tx,
            event_rx,
            reminders: None,
            last_sync: None,
        })
    }

    pub fn config(&self) -> &CompassConfig {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    pub fn auth(&self) -> &Arc<AuthContext> {
        &self.auth
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.auth.user()
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut Preferences {
        &mut self.preferences
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn take_toasts(&mut self) -> Vec<Toast> {
        self.toasts.drain()
    }

    /// Report of the most recent bootstrap.
    pub fn last_sync(&self) -> Option<&SyncReport> {
        self.last_sync.as_ref()
    }

    /// Sender for background work that reports to the app.
    pub fn event_sender(&self) -> Sender<AppEvent> {
        self.event_tx.clone()
    }

    /// Log in and bootstrap every store.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<UserInfo> {
        let checked = lib_utils::validate_email(email)
            .and_then(|_| lib_utils::validate_not_empty(password, "Password"))
            .map_err(AppError::Validation);
        if let Err(e) = checked {
            self.toasts.error(&e);
            return Err(e);
        }

        self.phase = SessionPhase::Authenticating;
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let result = self.api.login(&request).await;
        self.finish_authentication(result).await
    }

    /// Create an account, then continue as after a login.
    pub async fn register(&mut self, username: &str, email: &str, password: &str) -> Result<UserInfo> {
        let checked = lib_utils::validate_not_empty(username, "Username")
            .and_then(|_| lib_utils::validate_email(email))
            .and_then(|_| lib_utils::validate_min_length(password, 8, "Password"))
            .map_err(AppError::Validation);
        if let Err(e) = checked {
            self.toasts.error(&e);
            return Err(e);
        }

        self.phase = SessionPhase::Authenticating;
        let request = RegisterRequest {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let result = self.api.register(&request).await;
        self.finish_authentication(result).await
    }

    /// Resume a persisted session.
    ///
    /// Returns `Ok(false)` when there is nothing to resume or the server rejected the
    /// token. A transport failure keeps the token for a later attempt and is returned.
    pub async fn restore(&mut self) -> Result<bool> {
        if !self.auth.has_token() {
            return Ok(false);
        }

        self.phase = SessionPhase::Authenticating;
        match self.api.current_user().await {
            Ok(user) => {
                info!(user_id = %user.id, "Session restored");
                self.auth.set_user(user);
                self.bootstrap().await;
                Ok(true)
            }
            Err(AppError::Unauthorized) => {
                self.on_tick();
                self.phase = SessionPhase::Unauthenticated;
                Ok(false)
            }
            Err(e) => {
                warn!(error = %e, "Could not validate persisted session");
                self.phase = SessionPhase::Unauthenticated;
                self.toasts.error(&e);
                Err(e)
            }
        }
    }

    /// Fetch every store concurrently and become ready.
    pub async fn bootstrap(&mut self) -> &SyncReport {
        self.phase = SessionPhase::Syncing;
        let report = sync_all(&self.stores.syncables()).await;

        if let Some(summary) = report.failure_summary() {
            self.toasts.push(ToastLevel::Error, summary);
        }

        // A 401 during the bootstrap expired the session; the pending event handles it.
        self.on_tick();
        if self.auth.has_token() {
            self.phase = SessionPhase::Ready;
            self.spawn_reminders();
        }

        self.last_sync.insert(report)
    }

    /// End the session: forget the token and the in-memory data.
    pub fn logout(&mut self) {
        info!("Logging out");
        self.auth.clear();
        self.end_session();
        self.toasts.info("Logged out");
    }

    /// Process pending async events without blocking. Returns how many were handled.
    pub fn on_tick(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SessionExpired => {
                if self.phase != SessionPhase::Unauthenticated {
                    warn!("Session expired, returning to login");
                    self.end_session();
                    self.toasts.error(&AppError::Unauthorized);
                }
            }
            AppEvent::RecurringTasksDue(due) => {
                for reminder in due {
                    self.toasts
                        .info(format!("'{}' is due ({})", reminder.name, reminder.next_due_date));
                }
            }
        }
    }

    /// Push an error toast for a failed action and pass the value through on success.
    pub fn surface<T>(&mut self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.toasts.error(&e);
                None
            }
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.preferences.set_theme(theme);
    }

    /// Start the recurring-task watcher if it is not running.
    pub fn spawn_reminders(&mut self) {
        if self.reminders.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return;
        }
        self.reminders = Some(reminders::spawn_watcher(
            self.stores.recurring_tasks.clone(),
            self.config.reminder_interval,
            self.event_tx.clone(),
        ));
    }

    async fn finish_authentication(&mut self, result: Result<shared::AuthResponse>) -> Result<UserInfo> {
        match result {
            Ok(response) => {
                let user = response.user.clone();
                self.auth.set_session(response.token, Some(response.user));
                self.toasts.success(format!("Welcome, {}", user.username));
                self.bootstrap().await;
                Ok(user)
            }
            Err(e) => {
                self.phase = SessionPhase::Unauthenticated;
                self.toasts.error(&e);
                Err(e)
            }
        }
    }

    fn end_session(&mut self) {
        if let Some(handle) = self.reminders.take() {
            handle.abort();
        }
        self.stores.clear_all();
        self.phase = SessionPhase::Unauthenticated;
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some(handle) = self.reminders.take() {
            handle.abort();
        }
    }
}
