use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::HasChildren;

/// Public lifecycle of an airdrop campaign
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AirdropStatus {
    Rumored,
    Confirmed,
    Live,
    Ended,
    Claimed,
}

/// The user's own progress on an airdrop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParticipationStatus {
    NotStarted,
    InProgress,
    Completed,
    Abandoned,
}

/// Expected reward tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Potential {
    #[default]
    Unknown,
    Low,
    Medium,
    High,
}

/// An airdrop being farmed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Airdrop {
    pub id: String,
    pub project_name: String,
    pub blockchain: String,
    pub status: AirdropStatus,
    pub my_status: ParticipationStatus,
    #[serde(default)]
    pub potential: Potential,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tasks: Vec<AirdropTask>,
    #[serde(default)]
    pub is_archived: bool,
    pub date_added: NaiveDate,
}

/// Creation payload for [`Airdrop`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewAirdrop {
    pub project_name: String,
    pub blockchain: String,
    pub status: AirdropStatus,
    pub my_status: ParticipationStatus,
    #[serde(default)]
    pub potential: Potential,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A single task within an airdrop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AirdropTask {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_wallet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Cost in USD spent completing the task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

/// Creation payload for [`AirdropTask`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewAirdropTask {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_wallet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

/// Fields applied to every airdrop of a batch update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AirdropChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AirdropStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub my_status: Option<ParticipationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub potential: Option<Potential>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

/// Body of `PUT /airdrops/batch-update`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateRequest {
    pub ids: Vec<String>,
    pub changes: AirdropChanges,
}

entity!(Airdrop, NewAirdrop, "airdrops");
entity!(AirdropTask, NewAirdropTask, "airdrop-tasks");

impl HasChildren<AirdropTask> for Airdrop {
    fn children(&self) -> &[AirdropTask] {
        &self.tasks
    }

    fn children_mut(&mut self) -> &mut Vec<AirdropTask> {
        &mut self.tasks
    }
}

impl Airdrop {
    /// Number of completed tasks.
    pub fn completed_tasks(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_airdrop_defaults_missing_collections() {
        let json = r#"{
            "id": "a1",
            "projectName": "LayerZero",
            "blockchain": "Multi-chain",
            "status": "Live",
            "myStatus": "InProgress",
            "dateAdded": "2024-02-10"
        }"#;
        let airdrop: Airdrop = serde_json::from_str(json).unwrap();
        assert!(airdrop.tasks.is_empty());
        assert_eq!(airdrop.potential, Potential::Unknown);
        assert!(!airdrop.is_archived);
    }

    #[test]
    fn test_batch_changes_skip_unset_fields() {
        let changes = AirdropChanges {
            my_status: Some(ParticipationStatus::Completed),
            ..Default::default()
        };
        let value = serde_json::to_value(&changes).unwrap();
        assert_eq!(value, serde_json::json!({"myStatus": "Completed"}));
    }
}
