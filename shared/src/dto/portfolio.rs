use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A staking / liquidity position
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct YieldPosition {
    pub id: String,
    pub platform_name: String,
    pub asset_symbol: String,
    /// USD value at entry
    pub amount_staked: f64,
    pub wallet_id: String,
    pub entry_date: NaiveDate,
    /// Latest USD value, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
    /// Percent, e.g. `12.5`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_apy: Option<f64>,
}

/// Creation payload for [`YieldPosition`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewYieldPosition {
    pub platform_name: String,
    pub asset_symbol: String,
    pub amount_staked: f64,
    pub wallet_id: String,
    pub entry_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_apy: Option<f64>,
}

/// An on-chain transaction logged against an airdrop and/or wallet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airdrop_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_id: Option<String>,
    pub hash: String,
    pub date: NaiveDate,
    /// Cost in USD
    #[serde(default)]
    pub cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Creation payload for [`Transaction`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airdrop_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_id: Option<String>,
    pub hash: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

entity!(YieldPosition, NewYieldPosition, "yield-positions");
entity!(Transaction, NewTransaction, "transactions");
