use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// How often a recurring task comes due
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    EveryXDays,
}

/// A farming chore that repeats (daily bridge, weekly swap, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTask {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_airdrop_id: Option<String>,
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub every_x_days: Option<u32>,
    pub next_due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_completed_date: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Creation payload for [`RecurringTask`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewRecurringTask {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_airdrop_id: Option<String>,
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub every_x_days: Option<u32>,
    pub next_due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn default_active() -> bool {
    true
}

entity!(RecurringTask, NewRecurringTask, "recurring-tasks");

impl RecurringTask {
    /// Active and due on or before `today`.
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.is_active && self.next_due_date <= today
    }
}

/// Advance a due date by one period.
///
/// Monthly steps keep the day of month where possible and clamp to the month end
/// (Jan 31 → Feb 29/28). `EveryXDays` with a missing or zero interval advances one day.
pub fn next_due_date(frequency: Frequency, from: NaiveDate, every_x_days: Option<u32>) -> NaiveDate {
    let advanced = match frequency {
        Frequency::Daily => from.checked_add_days(Days::new(1)),
        Frequency::Weekly => from.checked_add_days(Days::new(7)),
        Frequency::Monthly => from.checked_add_months(Months::new(1)),
        Frequency::EveryXDays => {
            let days = every_x_days.unwrap_or(1).max(1);
            from.checked_add_days(Days::new(u64::from(days)))
        }
    };
    advanced.unwrap_or(from)
}

/// Days from `today` until `due` (negative when overdue).
pub fn days_until(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

/// True when `date` falls in the same calendar month as `other`.
pub fn same_month(date: NaiveDate, other: NaiveDate) -> bool {
    date.year() == other.year() && date.month() == other.month()
}
