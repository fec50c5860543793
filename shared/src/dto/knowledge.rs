use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A free-form strategy note
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StrategyNote {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub last_modified: DateTime<Utc>,
    #[serde(default)]
    pub linked_airdrop_ids: Vec<String>,
}

/// Creation payload for [`StrategyNote`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewStrategyNote {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub linked_airdrop_ids: Vec<String>,
}

/// Kind of learning material
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Guide,
    Glossary,
    News,
}

/// A guide, glossary entry or news item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LearningResource {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Creation payload for [`LearningResource`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewLearningResource {
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A reusable list of tasks to seed new airdrops with
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AirdropTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blockchain: Option<String>,
    #[serde(default)]
    pub tasks: Vec<String>,
}

/// Creation payload for [`AirdropTemplate`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewAirdropTemplate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blockchain: Option<String>,
    #[serde(default)]
    pub tasks: Vec<String>,
}

entity!(StrategyNote, NewStrategyNote, "strategy-notes");
entity!(LearningResource, NewLearningResource, "learning-resources");
entity!(AirdropTemplate, NewAirdropTemplate, "airdrop-templates");
