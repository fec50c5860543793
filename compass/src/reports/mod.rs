//! # Reports
//!
//! Derived analytics over store snapshots. Every function is pure and never divides by
//! zero: an empty input yields zeroed figures.
//!
//! - [`portfolio`]: yield position totals, P&L and value-weighted APY
//! - [`costs`]: gas per wallet, cost per airdrop, grand total
//! - [`airdrop_rollup`]: participation and status counts, task completion
//! - [`recurring_overview`]: what is due today, overdue, and this month
//! - [`unread_alerts`]

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;
use shared::{
    days_until, same_month, Airdrop, AirdropStatus, ParticipationStatus, RecurringTask, Transaction, UserAlert,
    Wallet, YieldPosition,
};

/// `numerator / denominator`, or 0 when the denominator is 0.
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub positions: usize,
    pub total_staked: f64,
    /// Positions without a known value count at their staked amount
    pub total_current_value: f64,
    pub unrealized_pnl: f64,
    pub pnl_percent: f64,
    /// APY weighted by current value; positions without an APY are left out
    pub weighted_apy: f64,
}

pub fn portfolio(positions: &[YieldPosition]) -> PortfolioSummary {
    let total_staked: f64 = positions.iter().map(|p| p.amount_staked).sum();
    let total_current_value: f64 = positions
        .iter()
        .map(|p| p.current_value.unwrap_or(p.amount_staked))
        .sum();

    let (apy_weight, apy_value) = positions
        .iter()
        .filter_map(|p| p.current_apy.map(|apy| (p.current_value.unwrap_or(p.amount_staked), apy)))
        .fold((0.0, 0.0), |(weight, acc), (value, apy)| (weight + value, acc + value * apy));

    let unrealized_pnl = total_current_value - total_staked;
    PortfolioSummary {
        positions: positions.len(),
        total_staked,
        total_current_value,
        unrealized_pnl,
        pnl_percent: ratio(unrealized_pnl, total_staked) * 100.0,
        weighted_apy: ratio(apy_value, apy_weight),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletGas {
    pub wallet_id: String,
    pub name: String,
    /// Currency → amount
    pub by_currency: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirdropCost {
    pub airdrop_id: String,
    pub project_name: String,
    pub transaction_cost: f64,
    pub task_cost: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CostSummary {
    pub gas_by_wallet: Vec<WalletGas>,
    pub cost_by_airdrop: Vec<AirdropCost>,
    /// Transactions not linked to any airdrop
    pub unassigned_cost: f64,
    /// USD: every transaction plus every task cost
    pub grand_total: f64,
}

pub fn costs(wallets: &[Wallet], airdrops: &[Airdrop], transactions: &[Transaction]) -> CostSummary {
    let gas_by_wallet = wallets
        .iter()
        .filter(|w| !w.gas_logs.is_empty())
        .map(|w| {
            let mut by_currency = BTreeMap::new();
            for log in &w.gas_logs {
                *by_currency.entry(log.currency.to_uppercase()).or_insert(0.0) += log.amount;
            }
            WalletGas {
                wallet_id: w.id.clone(),
                name: w.name.clone(),
                by_currency,
            }
        })
        .collect();

    let mut tx_by_airdrop: HashMap<&str, f64> = HashMap::new();
    let mut unassigned_cost = 0.0;
    for tx in transactions {
        match tx.airdrop_id.as_deref() {
            Some(id) => *tx_by_airdrop.entry(id).or_insert(0.0) += tx.cost,
            None => unassigned_cost += tx.cost,
        }
    }

    let mut cost_by_airdrop: Vec<AirdropCost> = airdrops
        .iter()
        .map(|a| {
            let transaction_cost = tx_by_airdrop.get(a.id.as_str()).copied().unwrap_or(0.0);
            let task_cost: f64 = a.tasks.iter().filter_map(|t| t.cost).sum();
            AirdropCost {
                airdrop_id: a.id.clone(),
                project_name: a.project_name.clone(),
                transaction_cost,
                task_cost,
                total: transaction_cost + task_cost,
            }
        })
        .collect();
    cost_by_airdrop.sort_by(|a, b| b.total.total_cmp(&a.total));

    let task_total: f64 = airdrops.iter().flat_map(|a| &a.tasks).filter_map(|t| t.cost).sum();
    let transaction_total: f64 = transactions.iter().map(|t| t.cost).sum();

    CostSummary {
        gas_by_wallet,
        cost_by_airdrop,
        unassigned_cost,
        grand_total: transaction_total + task_total,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AirdropRollup {
    pub total: usize,
    pub by_my_status: BTreeMap<ParticipationStatus, usize>,
    pub by_status: BTreeMap<AirdropStatus, usize>,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// 0.0..=1.0
    pub completion_ratio: f64,
}

/// Counts over non-archived airdrops.
pub fn airdrop_rollup(airdrops: &[Airdrop]) -> AirdropRollup {
    let mut rollup = AirdropRollup::default();
    for airdrop in airdrops.iter().filter(|a| !a.is_archived) {
        rollup.total += 1;
        *rollup.by_my_status.entry(airdrop.my_status).or_insert(0) += 1;
        *rollup.by_status.entry(airdrop.status).or_insert(0) += 1;
        rollup.total_tasks += airdrop.tasks.len();
        rollup.completed_tasks += airdrop.completed_tasks();
    }
    rollup.completion_ratio = ratio(rollup.completed_tasks as f64, rollup.total_tasks as f64);
    rollup
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecurringOverview {
    pub active: usize,
    pub due_today: usize,
    pub overdue: usize,
    /// Active tasks whose next due date falls in the current month
    pub due_this_month: usize,
}

pub fn recurring_overview(tasks: &[RecurringTask], today: NaiveDate) -> RecurringOverview {
    let mut overview = RecurringOverview::default();
    for task in tasks.iter().filter(|t| t.is_active) {
        overview.active += 1;
        match days_until(task.next_due_date, today) {
            0 => overview.due_today += 1,
            d if d < 0 => overview.overdue += 1,
            _ => {}
        }
        if same_month(task.next_due_date, today) {
            overview.due_this_month += 1;
        }
    }
    overview
}

pub fn unread_alerts(alerts: &[UserAlert]) -> usize {
    alerts.iter().filter(|a| !a.is_read).count()
}
