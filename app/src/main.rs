//! FILENAME: app/src/main.rs
// PURPOSE: Command-line front end for the competitor dashboard.
// CONTEXT: Builds the same AppState the UI uses, drives it through the
// command functions and prints the resulting page.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dashboard_lib::commands;
use dashboard_lib::{
    create_app_state, init_logging, AppState, ConfigError, DashboardConfig,
    DashboardError, RowData, ViewResponse,
};
use log::LevelFilter;
use thiserror::Error;

/// Competitor analysis grid with drag-to-group rows.
#[derive(Debug, Parser)]
#[command(name = "dashboard", version, about)]
struct Cli {
    /// JSON config file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of generated competitor rows
    #[arg(long)]
    rows: Option<usize>,

    /// Dataset seed
    #[arg(long)]
    seed: Option<u64>,

    /// Group by a column (repeat for nested levels, outermost first)
    #[arg(long = "group-by", value_name = "FIELD")]
    group_by: Vec<String>,

    /// Start with every group collapsed
    #[arg(long)]
    collapse_all: bool,

    /// Case-insensitive search over competitor, location and product
    #[arg(long)]
    search: Option<String>,

    #[arg(long)]
    location: Option<String>,

    #[arg(long)]
    product: Option<String>,

    #[arg(long)]
    competitor: Option<String>,

    /// 30d, 90d, 180d or 365d
    #[arg(long)]
    time_range: Option<String>,

    /// 1-based page of the display list
    #[arg(long, default_value_t = 1)]
    page: usize,

    #[arg(long)]
    page_size: Option<usize>,

    /// Write the filtered rows as CSV to this path
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// Print detail analytics for a row id (e.g. comp-3)
    #[arg(long, value_name = "ID")]
    detail: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log level on stderr (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dashboard(#[from] DashboardError),

    #[error("Failed to open log file: {0}")]
    Log(#[from] std::io::Error),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<DashboardConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(rows) = cli.rows {
        config.row_count = rows;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(size) = cli.page_size {
        config.page_size = size;
    }
    if !cli.group_by.is_empty() {
        config.group_by = cli.group_by.clone();
    }
    config.validate()?;
    Ok(config)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;
    init_logging(config.log_file.as_deref(), cli.log_level)?;

    let state = create_app_state(&config);
    apply_filters(&state, &cli)?;

    if cli.collapse_all {
        commands::collapse_all_groups(&state)?;
    }

    if let Some(path) = &cli.export {
        let count = commands::export_csv(&state, path)?;
        println!("Exported {} rows to {}", count, path.display());
        return Ok(());
    }

    if let Some(id) = &cli.detail {
        let detail = commands::get_competitor_detail(&state, id)?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&detail)?);
        } else {
            print_detail(&detail);
        }
        return Ok(());
    }

    commands::set_page(&state, cli.page)?;
    let view = commands::get_view(&state)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_view(&view);
    }
    Ok(())
}

fn apply_filters(state: &AppState, cli: &Cli) -> Result<(), DashboardError> {
    let selectors = [
        ("location", &cli.location),
        ("product", &cli.product),
        ("competitor", &cli.competitor),
        ("timeRange", &cli.time_range),
    ];
    for (key, value) in selectors {
        if let Some(value) = value {
            commands::set_filter(state, key, value)?;
        }
    }
    if let Some(query) = &cli.search {
        commands::set_search(state, query)?;
    }
    Ok(())
}

// ============================================================================
// TEXT OUTPUT
// ============================================================================

fn print_view(view: &ViewResponse) {
    if !view.group_by.is_empty() {
        println!("Grouped by: {}", view.group_by.join(" > "));
    }
    for row in &view.rows {
        let indent = "  ".repeat(row.level());
        match row {
            RowData::Group { label, expanded, .. } => {
                let marker = if *expanded { "v" } else { ">" };
                println!("{}{} {}", indent, marker, label);
            }
            RowData::Leaf { data, consistency_category, .. } => {
                println!(
                    "{}{:<10} {:<16} {:<12} {:<9} {:>6.1}% {:>6.1}% {}",
                    indent,
                    data.competitor,
                    data.location,
                    data.product,
                    data.strategy_tag.as_str(),
                    data.capture_rate,
                    data.predictability,
                    consistency_category
                );
            }
        }
    }
    let page = &view.page_info;
    println!(
        "Showing {} to {} of {} rows (page {} of {}, {} competitors)",
        page.start_item, page.end_item, page.total_items, page.page, page.total_pages, view.total_rows
    );
}

fn print_detail(detail: &competitor_data::CompetitorDetail) {
    println!("{} ({}) - {} @ {}", detail.name, detail.id, detail.product, detail.location);
    println!(
        "  Spot {:.4}  Up {:.1}%  Down {:.1}%  Large moves {}",
        detail.metrics.spot,
        detail.metrics.up_percentage,
        detail.metrics.down_percentage,
        detail.metrics.large_movements
    );
    let profile = &detail.behavioral_profile;
    println!(
        "  Strategy {}  Position {}  Responsiveness {}  Consistency {}",
        profile.strategy, profile.position, profile.responsiveness, profile.consistency
    );
    println!(
        "  Intraday {:?}{}",
        detail.intraday_behavior.frequency,
        detail
            .intraday_behavior
            .typical_time
            .as_deref()
            .map(|t| format!(" around {}", t))
            .unwrap_or_default()
    );
    println!(
        "  Pricing lag {} day(s), prediction {:.4}",
        detail.pricing_lag.days, detail.pricing_lag.prediction
    );
    if let Some(last) = detail.consistency_trend.last() {
        println!(
            "  Consistency (7-day avg) {:.1}% on {}",
            last.rolling_average, last.date
        );
    }
    println!(
        "  Series: {} price moves, {} capture points, {} trend days",
        detail.price_movements.len(),
        detail.capture_rates.len(),
        detail.consistency_trend.len()
    );
}
