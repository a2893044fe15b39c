mod calendar;
mod summary;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Parser;
use fruitlog_core::logging::init_tracing;
use fruitlog_core::{parse_human_date, Config, DateKey, FileLedgerRepository, FruitType, LedgerService};

#[derive(Parser)]
#[command(name = "fruitlog")]
#[command(about = "A calendar diary of the fruit you eat", long_about = None)]
struct Cli {
    /// Directory holding the ledger snapshot (defaults to ~/.fruitlog)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log one fruit (usage: add banana --date yesterday)
    Add {
        /// banana, apple or orange
        fruit: FruitType,
        /// today, yesterday, -Nd or YYYY-MM-DD
        #[arg(short, long, default_value = "today")]
        date: String,
    },
    /// Take back one logged fruit
    Remove {
        fruit: FruitType,
        #[arg(short, long, default_value = "today")]
        date: String,
    },
    /// Today's counts next to this month's totals
    Today,
    /// Monthly totals per fruit
    Month {
        #[arg(short, long)]
        year: Option<i32>,
        #[arg(short, long)]
        month: Option<u32>,
    },
    /// Month grid with the fruit logged on each day
    Calendar {
        #[arg(short, long)]
        year: Option<i32>,
        #[arg(short, long)]
        month: Option<u32>,
    },
    /// Print the raw ledger as JSON
    Dump,
    /// Delete every logged fruit
    Reset {
        /// Required to actually clear the ledger
        #[arg(long)]
        yes: bool,
    },
}

fn resolve_date(input: &str) -> Result<DateKey> {
    let date = parse_human_date(input)?;
    let key = DateKey::from_date(date).with_context(|| format!("Date out of range: {}", input))?;
    Ok(key)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    init_tracing(&config.log_filter);

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => config.resolve_data_dir()?,
    };
    let repo = FileLedgerRepository::with_storage_key(data_dir, &config.storage_key)?;
    let mut service = LedgerService::open(repo);

    let today_key = DateKey::today()?;
    let today = today_key.date();

    match cli.command.unwrap_or(Commands::Today) {
        Commands::Add { fruit, date } => {
            let key = resolve_date(&date)?;
            service.add_fruit(key.as_str(), fruit)?;
            let count = service.day_counts(key.as_str())?.get(fruit);
            println!("Added {} {} on {} ({} that day)", fruit.emoji(), fruit, key, count);
        }
        Commands::Remove { fruit, date } => {
            let key = resolve_date(&date)?;
            if service.day_counts(key.as_str())?.get(fruit) == 0 {
                println!("No {} logged on {}.", fruit, key);
                return Ok(());
            }
            service.remove_fruit(key.as_str(), fruit)?;
            let count = service.day_counts(key.as_str())?.get(fruit);
            println!("Removed {} {} on {} ({} left that day)", fruit.emoji(), fruit, key, count);
        }
        Commands::Today => {
            let counts = service.day_counts(today_key.as_str())?;
            let stats = service.get_monthly_stats(today.year(), today.month())?;
            summary::show_counter(&today_key, &counts, &stats);
        }
        Commands::Month { year, month } => {
            let year = year.unwrap_or(today.year());
            let month = month.unwrap_or(today.month());
            let stats = service.get_monthly_stats(year, month)?;
            summary::show_month(year, month, &stats);
        }
        Commands::Calendar { year, month } => {
            let year = year.unwrap_or(today.year());
            let month = month.unwrap_or(today.month());
            let view = service.calendar_month(year, month)?;
            calendar::show_calendar(&view, &today_key);
        }
        Commands::Dump => {
            println!("{}", serde_json::to_string_pretty(&service.snapshot())?);
        }
        Commands::Reset { yes } => {
            if !yes {
                println!("This deletes every logged fruit. Re-run with --yes to confirm.");
                return Ok(());
            }
            service.reset();
            println!("Ledger cleared.");
        }
    }
    Ok(())
}
