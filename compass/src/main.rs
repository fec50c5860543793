//! # compass-sync
//!
//! Headless client: logs in (or resumes the persisted session), fetches every store and
//! prints a summary of the reports.

use anyhow::{bail, Context};
use compass::app::App;
use compass::config::CompassConfig;
use compass::reports;
use lib_utils::{get_env, today_utc};
use shared::{format_usd, truncate_address};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = CompassConfig::from_env().context("Invalid configuration")?;
    let _log_guard = compass::debug::init(&config.log);

    let mut app = App::new(config).context("Failed to start client")?;

    let resumed = match app.restore().await {
        Ok(resumed) => resumed,
        Err(e) => {
            tracing::warn!(error = %e, "Could not resume session");
            false
        }
    };

    if !resumed {
        let (Ok(email), Ok(password)) = (get_env("COMPASS_EMAIL"), get_env("COMPASS_PASSWORD")) else {
            bail!("No saved session; set COMPASS_EMAIL and COMPASS_PASSWORD to log in");
        };
        app.login(&email, &password).await.context("Login failed")?;
    }

    print_summary(&app);

    for toast in app.take_toasts() {
        eprintln!("[{:?}] {}", toast.level, toast.message);
    }
    Ok(())
}

fn print_summary(app: &App) {
    let stores = app.stores();
    let user = app
        .user()
        .map(|u| u.username)
        .unwrap_or_else(|| "unknown user".to_string());

    println!("Crypto Airdrop Compass: {}", user);
    if let Some(report) = app.last_sync() {
        println!(
            "Synced {} stores in {} ms ({} failed)",
            report.synced.len(),
            report.elapsed.as_millis(),
            report.failures.len()
        );
    }
    println!();

    let rollup = reports::airdrop_rollup(&stores.airdrops.items());
    println!(
        "Airdrops:   {} tracked, {}/{} tasks done ({:.0}%)",
        rollup.total,
        rollup.completed_tasks,
        rollup.total_tasks,
        rollup.completion_ratio * 100.0
    );
    for (status, count) in &rollup.by_my_status {
        println!("            {:?}: {}", status, count);
    }

    let portfolio = reports::portfolio(&stores.yield_positions.items());
    println!(
        "Portfolio:  {} staked, now {} (P&L {} / {:.2}%), APY {:.2}%",
        format_usd(portfolio.total_staked),
        format_usd(portfolio.total_current_value),
        format_usd(portfolio.unrealized_pnl),
        portfolio.pnl_percent,
        portfolio.weighted_apy
    );

    let wallets = stores.wallets.items();
    let costs = reports::costs(&wallets, &stores.airdrops.items(), &stores.transactions.items());
    println!("Costs:      {} total", format_usd(costs.grand_total));
    for gas in &costs.gas_by_wallet {
        let address = wallets
            .iter()
            .find(|w| w.id == gas.wallet_id)
            .map(|w| truncate_address(&w.address))
            .unwrap_or_default();
        let spent: Vec<String> = gas
            .by_currency
            .iter()
            .map(|(currency, amount)| format!("{:.4} {}", amount, currency))
            .collect();
        println!("            {} {}: {}", gas.name, address, spent.join(", "));
    }

    let recurring = reports::recurring_overview(&stores.recurring_tasks.items(), today_utc());
    println!(
        "Recurring:  {} active, {} due today, {} overdue",
        recurring.active, recurring.due_today, recurring.overdue
    );
    println!("Alerts:     {} unread", reports::unread_alerts(&stores.alerts.items()));
}
