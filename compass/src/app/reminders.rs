//! # Recurring-Task Reminders
//!
//! Compares recurring tasks' due dates with today on a timer and tells the app about
//! tasks that have newly come due.

use std::collections::HashSet;
use std::time::Duration;

use async_channel::Sender;
use chrono::NaiveDate;
use shared::RecurringTask;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::events::{AppEvent, DueReminder};
use crate::store::EntityStore;

/// Active tasks due on or before `today`, earliest first.
pub fn due_tasks(tasks: &[RecurringTask], today: NaiveDate) -> Vec<&RecurringTask> {
    let mut due: Vec<&RecurringTask> = tasks.iter().filter(|task| task.is_due(today)).collect();
    due.sort_by(|a, b| a.next_due_date.cmp(&b.next_due_date).then_with(|| a.name.cmp(&b.name)));
    due
}

/// Remembers which tasks were already reported so each due date is announced once.
#[derive(Debug, Default)]
pub struct ReminderTracker {
    reported: HashSet<(String, NaiveDate)>,
}

impl ReminderTracker {
    /// Due tasks not reported before. Entries for tasks that are no longer due are
    /// forgotten, so a task completed and due again is reported again.
    pub fn check(&mut self, tasks: &[RecurringTask], today: NaiveDate) -> Vec<DueReminder> {
        let due = due_tasks(tasks, today);
        let current: HashSet<(String, NaiveDate)> =
            due.iter().map(|task| (task.id.clone(), task.next_due_date)).collect();
        self.reported.retain(|entry| current.contains(entry));

        due.into_iter()
            .filter(|task| self.reported.insert((task.id.clone(), task.next_due_date)))
            .map(|task| DueReminder {
                task_id: task.id.clone(),
                name: task.name.clone(),
                next_due_date: task.next_due_date,
            })
            .collect()
    }
}

/// Spawn the watcher. It runs until the event channel closes or the handle is aborted.
pub fn spawn_watcher(
    tasks: EntityStore<RecurringTask>,
    interval: Duration,
    events: Sender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        let mut tracker = ReminderTracker::default();
        info!(interval_secs = interval.as_secs(), "Reminder watcher started");

        loop {
            ticker.tick().await;
            let due = tracker.check(&tasks.items(), lib_utils::today_utc());
            if due.is_empty() {
                continue;
            }
            debug!(count = due.len(), "Recurring tasks due");
            if events.send(AppEvent::RecurringTasksDue(due)).await.is_err() {
                debug!("Event channel closed, reminder watcher stopping");
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Frequency;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    fn task(id: &str, due: NaiveDate, active: bool) -> RecurringTask {
        RecurringTask {
            id: id.to_string(),
            name: format!("Task {}", id),
            associated_airdrop_id: None,
            frequency: Frequency::Daily,
            every_x_days: None,
            next_due_date: due,
            last_completed_date: None,
            is_active: active,
            notes: None,
        }
    }

    #[test]
    fn test_due_tasks_filters_and_sorts() {
        let tasks = vec![
            task("late", d(10), true),
            task("early", d(3), true),
            task("future", d(20), true),
            task("off", d(1), false),
        ];

        let ids: Vec<&str> = due_tasks(&tasks, d(10)).iter().map(|t| t.id.as_str()).collect();

        assert_eq!(ids, vec!["early", "late"]);
    }

    #[test]
    fn test_tracker_reports_each_due_date_once() {
        let mut tracker = ReminderTracker::default();
        let mut tasks = vec![task("a", d(5), true)];

        assert_eq!(tracker.check(&tasks, d(5)).len(), 1);
        assert!(tracker.check(&tasks, d(6)).is_empty());

        // Completed: next due date moves forward, then comes due again.
        tasks[0].next_due_date = d(7);
        assert!(tracker.check(&tasks, d(6)).is_empty());
        let again = tracker.check(&tasks, d(7));
        assert_eq!(again[0].next_due_date, d(7));
    }
}
