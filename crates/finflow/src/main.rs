use std::collections::HashSet;
use std::path::PathBuf;

use clap::Parser;

mod logging;
mod scenario;
mod table;

use finflow_core::date_math::next_month;

#[derive(Parser, Debug)]
#[command(name = "finflow")]
#[command(about = "Project account balances month by month from a scenario file")]
struct Args {
    /// Path to the scenario YAML file
    scenario: PathBuf,

    /// Number of months to project
    #[arg(short, long, default_value_t = 12)]
    months: usize,

    /// Also print the applied-item log
    #[arg(short, long)]
    log: bool,

    /// Restrict the log to these account names (repeatable)
    #[arg(long = "account")]
    accounts: Vec<String>,

    /// Restrict the log to these handler kinds, e.g. interest, transfer
    /// (repeatable)
    #[arg(long = "handler")]
    handlers: Vec<String>,

    /// Emit history as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Log level (debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn to_filter(names: Vec<String>) -> Option<HashSet<String>> {
    if names.is_empty() {
        None
    } else {
        Some(names.into_iter().collect())
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    logging::init_logging(&args.log_level);

    let scenario = scenario::load_scenario(&args.scenario)?;

    // A scenario without a start month begins the month after today,
    // resolved here rather than stored anywhere.
    let default_start = next_month(jiff::Zoned::now().date());
    let mut timeline = scenario.build(Some(default_start))?;

    tracing::info!(
        start = %timeline.start_date(),
        accounts = timeline.accounts().len(),
        months = args.months,
        "projecting timeline"
    );
    timeline.advance_months(args.months);

    if args.json {
        println!("{}", serde_json::to_string_pretty(timeline.history())?);
        return Ok(());
    }

    println!("{}", table::snapshot_table(timeline.history()));

    if args.log || !args.accounts.is_empty() || !args.handlers.is_empty() {
        let accounts = to_filter(args.accounts);
        let handlers = to_filter(args.handlers);
        let records = timeline.transaction_log(None, accounts.as_ref(), handlers.as_ref());
        println!();
        println!("{}", table::log_table(&records));
    }

    Ok(())
}
