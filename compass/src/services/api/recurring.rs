//! # Recurring Task Endpoints

use shared::RecurringTask;

use super::client::{segment, ApiClient};
use crate::core::error::Result;

/// Mark a recurring task done; the server advances its next due date.
pub async fn complete(client: &ApiClient, id: &str) -> Result<RecurringTask> {
    client
        .post_action::<RecurringTask>(&format!("/recurring-tasks/{}/complete", segment(id)))
        .await
}
