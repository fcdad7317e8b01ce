use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use futures_util::StreamExt;
use tabled::{Table, Tabled};
use tokio::signal;
use tracing::{info, warn};

use vaultscope::config::Config;
use vaultscope::domain::format::format_fiat_balance;
use vaultscope::domain::Address;
use vaultscope::feed::{MemoryFeeds, Redirect, Scenario};
use vaultscope::overview::{create_vaults_overview, PositionVm, VaultsOverview};

/// Live overview of a vault portfolio, rendered per snapshot.
#[derive(Parser, Debug)]
#[command(name = "vaultscope")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Scenario file replayed into the feeds; the built-in demo
    /// portfolio is used when absent
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Address whose portfolio is watched
    #[arg(long)]
    address: Option<String>,

    /// Render the first snapshot and exit
    #[arg(long)]
    once: bool,
}

#[derive(Tabled)]
struct PositionRow {
    #[tabled(rename = "Vault")]
    vault: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Ilk")]
    ilk: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Detail")]
    detail: String,
    #[tabled(rename = "Protection")]
    protection: String,
}

impl From<&PositionVm> for PositionRow {
    fn from(position: &PositionVm) -> Self {
        match position {
            PositionVm::Borrow(vm) => Self {
                vault: vm.vault_id.clone(),
                kind: "borrow",
                ilk: vm.ilk.clone(),
                value: format!("{} DAI", vm.dai_debt),
                detail: format!("ratio {}", vm.collateral_ratio),
                protection: if vm.automation_enabled {
                    vm.protection_amount.clone()
                } else {
                    "-".into()
                },
            },
            PositionVm::Multiply(vm) => Self {
                vault: vm.vault_id.clone(),
                kind: "multiply",
                ilk: vm.ilk.clone(),
                value: vm.net_value.clone(),
                detail: format!("{} at {}", vm.multiple, vm.funding_cost),
                protection: if vm.automation_enabled { "on" } else { "-" }.into(),
            },
            PositionVm::Earn(vm) => Self {
                vault: vm.vault_id.clone(),
                kind: "earn",
                ilk: vm.ilk.clone(),
                value: vm.net_value.clone(),
                detail: format!("pnl {}", vm.pnl),
                protection: "-".into(),
            },
        }
    }
}

fn render(snapshot: &VaultsOverview) {
    if snapshot.positions.is_empty() {
        println!("No open positions");
    } else {
        let rows: Vec<PositionRow> = snapshot.positions.iter().map(PositionRow::from).collect();
        println!("{}", Table::new(rows));
    }

    if let Some(summary) = &snapshot.vault_summary {
        println!(
            "{} vaults ({} at risk), collateral ${}, debt {} DAI",
            summary.number_of_vaults,
            summary.vaults_at_risk,
            format_fiat_balance(summary.total_collateral_price),
            format_fiat_balance(summary.total_dai_debt),
        );
    }
    println!();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = if cli.config.exists() {
        Config::load(&cli.config)
            .with_context(|| format!("loading config {}", cli.config.display()))?
    } else {
        Config::default()
    };
    config.init_logging();
    info!("vaultscope starting");

    let scenario_path = cli
        .scenario
        .clone()
        .or_else(|| config.overview.scenario.as_ref().map(PathBuf::from));
    let scenario = match scenario_path {
        Some(path) => Scenario::load(&path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => Scenario::demo(),
    };

    let address = cli
        .address
        .as_deref()
        .or(config.overview.address.as_deref())
        .map(Address::new)
        .unwrap_or_else(|| scenario.address.clone());

    let feeds = Arc::new(MemoryFeeds::new());
    scenario.apply(&feeds);

    let redirect: Redirect = Arc::new(|vault| info!(vault = %vault.id, "redirect requested"));
    let mut overview = create_vaults_overview(feeds, &address, redirect);

    if cli.once {
        match overview.next().await {
            Some(snapshot) => render(&snapshot),
            None => warn!("overview feed ended before the first snapshot"),
        }
        return Ok(());
    }

    loop {
        tokio::select! {
            snapshot = overview.next() => match snapshot {
                Some(snapshot) => render(&snapshot),
                None => break,
            },
            _ = signal::ctrl_c() => {
                info!("shutdown signal received");
                break;
            }
        }
    }

    info!("vaultscope stopped");
    Ok(())
}
