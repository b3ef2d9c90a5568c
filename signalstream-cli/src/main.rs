//! SignalStream CLI — inspect, broadcast, and export commands.
//!
//! Commands:
//! - `signals` — list the signal feed with the same filters the TUI offers
//! - `strategies` — list the strategy catalog, filtered and sorted
//! - `users` — search the subscriber roster
//! - `dashboard` — print the admin dashboard snapshot
//! - `broadcast` — validate a hand-entered signal and print the result
//! - `export` — write a collection to CSV
//!
//! Every command reads the same deterministic sample provider the TUI uses:
//! identical seed and feed size, identical data.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};

use signalstream_core::config::DemoConfig;
use signalstream_core::data::{DataProvider, SampleProvider};
use signalstream_core::domain::{Direction, StrategyId, TradingSignal, TradingStrategy, User};
use signalstream_core::forms::BroadcastDraft;
use signalstream_core::query::{search_users, SignalQuery, StrategyQuery, StrategySort};
use signalstream_core::store::SessionStore;

#[derive(Parser)]
#[command(
    name = "signalstream",
    about = "SignalStream CLI — trading-signal subscription demo"
)]
struct Cli {
    /// Config file (TOML). Defaults to the user config directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the master seed from the config.
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the signal feed, newest first.
    Signals {
        /// Keep only this asset symbol (exact match).
        #[arg(long)]
        asset: Option<String>,

        /// Keep only signals from this strategy id.
        #[arg(long)]
        strategy: Option<String>,

        /// Keep only signals on or after this date (YYYY-MM-DD).
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Keep only signals on or before this date (YYYY-MM-DD).
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Print JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List the strategy catalog, or look one strategy up by id.
    Strategies {
        /// Print the full record for one strategy id instead of the list.
        #[arg(long)]
        id: Option<String>,

        /// Keep only this category (exact match).
        #[arg(long)]
        category: Option<String>,

        /// Sort order.
        #[arg(long, value_enum, default_value_t = SortArg::Name)]
        sort: SortArg,

        /// Print JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Search the subscriber roster.
    Users {
        /// Case-insensitive substring over name and email.
        #[arg(long, default_value = "")]
        search: String,

        /// Print JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the admin dashboard snapshot.
    Dashboard {
        /// Print JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Validate a signal the way the broadcast form does and print it.
    Broadcast {
        /// Strategy id the signal belongs to.
        #[arg(long)]
        strategy: String,

        /// Asset symbol (uppercased on success).
        #[arg(long)]
        asset: String,

        /// Signal direction.
        #[arg(long, value_enum)]
        direction: DirectionArg,

        /// Entry price.
        #[arg(long)]
        entry: f64,

        /// Stop loss level.
        #[arg(long)]
        stop: f64,

        /// Target price level.
        #[arg(long)]
        target: f64,

        /// Free-form notes.
        #[arg(long)]
        notes: Option<String>,

        /// Print JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Write a collection to CSV.
    Export {
        /// Which collection to export.
        #[arg(value_enum)]
        collection: Collection,

        /// Output file path.
        #[arg(long, short)]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Name,
    WinRate,
    ProfitFactor,
}

impl From<SortArg> for StrategySort {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => StrategySort::Name,
            SortArg::WinRate => StrategySort::WinRate,
            SortArg::ProfitFactor => StrategySort::ProfitFactor,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Buy,
    Sell,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Buy => Direction::Buy,
            DirectionArg::Sell => Direction::Sell,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Collection {
    Signals,
    Strategies,
    Users,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let provider = build_provider(cli.config.as_deref(), cli.seed)?;

    match cli.command {
        Commands::Signals {
            asset,
            strategy,
            start,
            end,
            json,
        } => {
            let query = SignalQuery {
                asset,
                strategy_id: strategy.map(StrategyId::new),
                start_date: start,
                end_date: end,
            };
            run_signals(&provider, &query, json)
        }
        Commands::Strategies {
            id,
            category,
            sort,
            json,
        } => match id {
            Some(id) => run_strategy_detail(&provider, &StrategyId::new(id), json),
            None => {
                let query = StrategyQuery {
                    category,
                    sort: sort.into(),
                };
                run_strategies(&provider, &query, json)
            }
        },
        Commands::Users { search, json } => run_users(&provider, &search, json),
        Commands::Dashboard { json } => run_dashboard(&provider, json),
        Commands::Broadcast {
            strategy,
            asset,
            direction,
            entry,
            stop,
            target,
            notes,
            json,
        } => {
            let draft = BroadcastDraft {
                strategy_id: strategy,
                asset,
                direction: Some(direction.into()),
                entry_price: entry.to_string(),
                stop_loss: stop.to_string(),
                target_price: target.to_string(),
                additional_notes: notes.unwrap_or_default(),
            };
            run_broadcast(&provider, &draft, json)
        }
        Commands::Export { collection, output } => run_export(&provider, collection, &output),
    }
}

/// Build the provider the config describes, with CLI overrides applied.
fn build_provider(config_path: Option<&Path>, seed: Option<u64>) -> Result<SampleProvider> {
    let default_path;
    let path = match config_path {
        Some(path) => path,
        None => {
            default_path = dirs_fallback_config();
            default_path.as_path()
        }
    };
    let mut config = DemoConfig::load_or_default(path).map_err(|e| anyhow::anyhow!(e))?;
    if let Some(seed) = seed {
        config.master_seed = seed;
    }
    Ok(config.provider())
}

fn dirs_fallback_config() -> PathBuf {
    std::env::var_os("SIGNALSTREAM_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("signalstream.toml"))
}

fn run_signals(provider: &SampleProvider, query: &SignalQuery, json: bool) -> Result<()> {
    let signals = provider.fetch_signals()?;
    let rows = query.apply(&signals);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{:<17} {:<7} {:>4} {:>10} {:>10} {:>10}  {}",
        "Time (UTC)", "Asset", "Dir", "Entry", "Stop", "Target", "Strategy"
    );
    println!("{}", "-".repeat(80));
    for signal in &rows {
        println!(
            "{:<17} {:<7} {:>4} {:>10.2} {:>10.2} {:>10.2}  {}",
            signal.timestamp.format("%Y-%m-%d %H:%M"),
            signal.asset,
            signal.direction.label(),
            signal.entry_price,
            signal.stop_loss,
            signal.target_price,
            signal.strategy_id,
        );
    }
    println!("{} signal(s)", rows.len());
    Ok(())
}

fn run_strategies(provider: &SampleProvider, query: &StrategyQuery, json: bool) -> Result<()> {
    let strategies = provider.fetch_strategies()?;
    let rows = query.apply(&strategies);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{:<26} {:<18} {:>6} {:>6} {:>7} {:>7}",
        "Name", "Category", "Win%", "PF", "Sharpe", "MaxDD%"
    );
    println!("{}", "-".repeat(76));
    for strategy in &rows {
        let p = &strategy.performance;
        println!(
            "{:<26} {:<18} {:>6.1} {:>6.2} {:>7} {:>7}",
            strategy.name,
            strategy.category.as_deref().unwrap_or("-"),
            p.win_rate,
            p.profit_factor,
            p.sharpe_ratio.map_or("-".to_string(), |v| format!("{v:.2}")),
            p.max_drawdown.map_or("-".to_string(), |v| format!("{v:.1}")),
        );
    }
    println!("{} strategy(ies)", rows.len());
    Ok(())
}

fn run_strategy_detail(provider: &SampleProvider, id: &StrategyId, json: bool) -> Result<()> {
    let strategy = provider.fetch_strategy(id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&strategy)?);
        return Ok(());
    }

    let p = &strategy.performance;
    println!("{} ({})", strategy.name, strategy.id);
    println!("  Category:      {}", strategy.category.as_deref().unwrap_or("-"));
    println!("  Description:   {}", strategy.description);
    println!(
        "  Indicators:    {}",
        strategy.indicators_used.as_deref().unwrap_or("-")
    );
    println!("  Win Rate:      {:.1}%", p.win_rate);
    println!("  Profit Factor: {:.2}", p.profit_factor);
    println!(
        "  Sharpe Ratio:  {}",
        p.sharpe_ratio.map_or("n/a".to_string(), |v| format!("{v:.2}"))
    );
    println!(
        "  Max Drawdown:  {}",
        p.max_drawdown.map_or("n/a".to_string(), |v| format!("{v:.1}%"))
    );
    Ok(())
}

fn run_users(provider: &SampleProvider, search: &str, json: bool) -> Result<()> {
    let users = provider.fetch_users()?;
    let rows = search_users(&users, search);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{:<12} {:<20} {:<28} {:<9} {:<6} {:<10}",
        "Id", "Name", "Email", "Status", "Admin", "Joined"
    );
    println!("{}", "-".repeat(90));
    for user in &rows {
        println!(
            "{:<12} {:<20} {:<28} {:<9} {:<6} {}",
            user.id,
            user.name,
            user.email,
            user.subscription_status.label(),
            if user.is_admin { "yes" } else { "no" },
            user.joined_date.format("%Y-%m-%d"),
        );
    }
    println!("{} user(s)", rows.len());
    Ok(())
}

fn run_dashboard(provider: &SampleProvider, json: bool) -> Result<()> {
    let snapshot = provider.fetch_dashboard()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let stats = &snapshot.stats;
    println!("=== Dashboard ===");
    println!(
        "Total Users:          {}  ({})",
        stats.total_users, stats.total_users_caption
    );
    println!(
        "Active Subscriptions: {}  ({})",
        stats.active_subscriptions, stats.active_subscriptions_caption
    );
    println!(
        "Signals Sent Today:   {}  ({})",
        stats.signals_sent_today, stats.signals_sent_today_caption
    );
    println!();
    println!("Recent Activity:");
    for entry in &snapshot.recent_activity {
        println!(
            "  {:<22} {}  ({})",
            entry.kind.label(),
            entry.description,
            entry.age
        );
    }
    Ok(())
}

fn run_broadcast(provider: &SampleProvider, draft: &BroadcastDraft, json: bool) -> Result<()> {
    let mut store = SessionStore::seeded(provider)?;
    let valid = match draft.validate(store.strategies()) {
        Ok(valid) => valid,
        Err(errors) => {
            eprintln!("Validation failed:");
            for (field, message) in errors.iter() {
                eprintln!("  {field}: {message}");
            }
            std::process::exit(1);
        }
    };
    let signal = store.broadcast(valid, Utc::now()).clone();

    if json {
        println!("{}", serde_json::to_string_pretty(&signal)?);
        return Ok(());
    }

    println!("Signal validated and broadcast:");
    println!("  Asset:     {}", signal.asset);
    println!("  Direction: {}", signal.direction);
    println!("  Entry:     {:.2}", signal.entry_price);
    println!("  Stop:      {:.2}", signal.stop_loss);
    println!("  Target:    {:.2}", signal.target_price);
    println!("  Strategy:  {}", signal.strategy_id);
    println!("  Time:      {}", signal.timestamp.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("Session feed now holds {} signal(s).", store.signals().len());
    Ok(())
}

fn run_export(provider: &SampleProvider, collection: Collection, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            bail!("output directory does not exist: {}", parent.display());
        }
    }
    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("create {}", output.display()))?;

    let count = match collection {
        Collection::Signals => {
            let signals = provider.fetch_signals()?;
            write_signals(&mut writer, &signals)?;
            signals.len()
        }
        Collection::Strategies => {
            let strategies = provider.fetch_strategies()?;
            write_strategies(&mut writer, &strategies)?;
            strategies.len()
        }
        Collection::Users => {
            let users = provider.fetch_users()?;
            write_users(&mut writer, &users)?;
            users.len()
        }
    };

    writer.flush()?;
    println!("Wrote {count} row(s) to {}", output.display());
    Ok(())
}

fn write_signals<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    signals: &[TradingSignal],
) -> Result<()> {
    writer.write_record([
        "timestamp",
        "asset",
        "direction",
        "entry_price",
        "stop_loss",
        "target_price",
        "strategy_id",
    ])?;
    for signal in signals {
        writer.write_record([
            signal.timestamp.to_rfc3339(),
            signal.asset.clone(),
            signal.direction.label().to_string(),
            signal.entry_price.to_string(),
            signal.stop_loss.to_string(),
            signal.target_price.to_string(),
            signal.strategy_id.to_string(),
        ])?;
    }
    Ok(())
}

fn write_strategies<W: std::io::Write>(
    writer: &mut csv::Writer<W>,
    strategies: &[TradingStrategy],
) -> Result<()> {
    writer.write_record([
        "id",
        "name",
        "category",
        "indicators_used",
        "win_rate",
        "profit_factor",
        "sharpe_ratio",
        "max_drawdown",
    ])?;
    for strategy in strategies {
        let p = &strategy.performance;
        writer.write_record([
            strategy.id.to_string(),
            strategy.name.clone(),
            strategy.category.clone().unwrap_or_default(),
            strategy.indicators_used.clone().unwrap_or_default(),
            p.win_rate.to_string(),
            p.profit_factor.to_string(),
            p.sharpe_ratio.map(|v| v.to_string()).unwrap_or_default(),
            p.max_drawdown.map(|v| v.to_string()).unwrap_or_default(),
        ])?;
    }
    Ok(())
}

fn write_users<W: std::io::Write>(writer: &mut csv::Writer<W>, users: &[User]) -> Result<()> {
    writer.write_record([
        "id",
        "name",
        "email",
        "subscription_status",
        "is_admin",
        "joined_date",
        "plan_name",
    ])?;
    for user in users {
        writer.write_record([
            user.id.to_string(),
            user.name.clone(),
            user.email.clone(),
            user.subscription_status.label().to_string(),
            if user.is_admin { "true" } else { "false" }.to_string(),
            user.joined_date.to_rfc3339(),
            user.plan_name.clone().unwrap_or_default(),
        ])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> SampleProvider {
        SampleProvider::new(42)
    }

    #[test]
    fn signal_export_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signals.csv");
        run_export(&provider(), Collection::Signals, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("timestamp,asset,direction,entry_price,stop_loss,target_price,strategy_id")
        );
        assert_eq!(content.lines().count(), 26); // header + 25 signals
    }

    #[test]
    fn user_export_matches_the_roster() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.csv");
        run_export(&provider(), Collection::Users, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 7); // header + 6 users
        assert!(content.contains("alice.j@example.com"));
    }

    #[test]
    fn export_into_missing_directory_fails_cleanly() {
        let err = run_export(
            &provider(),
            Collection::Strategies,
            Path::new("/nonexistent/dir/out.csv"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn strategy_detail_lookup_resolves_catalog_ids() {
        let strategy = provider()
            .fetch_strategy(&StrategyId::new("SMA_Crossover_1"))
            .unwrap();
        assert_eq!(strategy.name, "Simple Moving Average Crossover");

        let missing = provider().fetch_strategy(&StrategyId::new("nope"));
        assert!(matches!(
            missing,
            Err(signalstream_core::data::DataError::StrategyNotFound { .. })
        ));
    }

    #[test]
    fn seed_override_changes_the_feed() {
        let a = SampleProvider::new(1).fetch_signals().unwrap();
        let b = SampleProvider::new(2).fetch_signals().unwrap();
        let a_again = SampleProvider::new(1).fetch_signals().unwrap();
        assert_eq!(a, a_again);
        assert_ne!(a, b);
    }
}
