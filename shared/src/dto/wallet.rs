use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::HasChildren;

/// A tracked wallet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    pub address: String,
    pub name: String,
    pub blockchain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub gas_logs: Vec<GasLog>,
}

/// Creation payload for [`Wallet`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewWallet {
    pub address: String,
    pub name: String,
    pub blockchain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// Gas spent by a wallet on one occasion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GasLog {
    pub id: String,
    pub date: NaiveDate,
    pub amount: f64,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
}

/// Creation payload for [`GasLog`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewGasLog {
    pub date: NaiveDate,
    pub amount: f64,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
}

entity!(Wallet, NewWallet, "wallets");
entity!(GasLog, NewGasLog, "gas-logs");

impl HasChildren<GasLog> for Wallet {
    fn children(&self) -> &[GasLog] {
        &self.gas_logs
    }

    fn children_mut(&mut self) -> &mut Vec<GasLog> {
        &mut self.gas_logs
    }
}

impl Wallet {
    /// Total gas logged in the given currency.
    pub fn gas_spent(&self, currency: &str) -> f64 {
        self.gas_logs
            .iter()
            .filter(|log| log.currency.eq_ignore_ascii_case(currency))
            .map(|log| log.amount)
            .sum()
    }
}
