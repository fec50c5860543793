//! # Application Events
//!
//! Event types sent from background work (API client, reminder watcher) to the app.

use chrono::NaiveDate;

/// A recurring task that has come due
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueReminder {
    pub task_id: String,
    pub name: String,
    pub next_due_date: NaiveDate,
}

/// Async results sent to the app, drained by [`crate::app::App::on_tick`]
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The server rejected the bearer token; auth state is already cleared
    SessionExpired,
    /// Recurring tasks newly found due by the reminder watcher
    RecurringTasksDue(Vec<DueReminder>),
}
