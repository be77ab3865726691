mod insights;
mod render;
mod report_tui;

use std::collections::HashMap;
use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;

use riderlog_core::{
    expand_key, parse_args, parse_count, parse_entry_date, parse_period, EntryFilter, EntryService,
    FileDashboardStore, InsightsService, Period, DEFAULT_TOP_N, EXTENDED_TOP_N,
};

use insights::{OllamaGenerator, DEFAULT_MODEL, DEFAULT_OLLAMA_URL};

#[derive(Parser)]
#[command(name = "riderlog")]
#[command(about = "Delivery team performance tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Record a day's counts (usage: add "Alex Green" s:12 f:1 r:0 date:yesterday)
    Add {
        /// Rider name followed by key:value counts (successful/failed/returned/date)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List entries, newest first
    List {
        /// Only entries for this rider
        #[arg(long)]
        rider: Option<String>,
        /// Only entries on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Only entries on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// List registered riders with lifetime totals
    Riders,
    /// Register a new rider
    AddRider {
        /// Rider name
        name: Vec<String>,
    },
    /// Delete an entry by ID prefix
    Delete {
        /// Entry ID or unique prefix (see `list`)
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Overall dashboard metrics
    Metrics,
    /// Monthly leaderboard report
    Report {
        /// Period: YYYY-MM, M/YYYY, 'this' or 'last'
        #[arg(long, default_value = "this")]
        period: String,
        /// Show the top 10 instead of the top 6
        #[arg(long)]
        top10: bool,
        /// Append an AI-generated summary of the report
        #[arg(long)]
        insights: bool,
        /// Ollama base URL for --insights
        #[arg(long, default_value = DEFAULT_OLLAMA_URL)]
        ollama_url: String,
        /// Model name for --insights
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,
    },
    /// Browse monthly reports in the terminal
    Tui {
        /// Starting period: YYYY-MM, M/YYYY, 'this' or 'last'
        #[arg(long)]
        period: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let store = FileDashboardStore::new(None)?;
    let service = EntryService::new(store.clone());

    match cli.command {
        Some(Commands::Add { args }) => add_entry(&service, &args)?,
        Some(Commands::List { rider, from, to }) => list_entries(&service, rider, from, to)?,
        Some(Commands::Riders) => {
            let riders = service.list_riders()?;
            let entries = service.list_entries(&EntryFilter::default())?;
            render::print_riders(&riders, &entries);
        }
        Some(Commands::AddRider { name }) => {
            let rider = service.add_rider(&name.join(" "))?;
            println!("Rider added: {} (ID: {})", rider.name, rider.id);
        }
        Some(Commands::Delete { id, yes }) => delete_entry(&service, &id, yes)?,
        Some(Commands::Metrics) => {
            let metrics = service.metrics()?;
            println!("Success ratio: {}", render::format_ratio(metrics.success_ratio));
            println!("Failed ratio:  {}", render::format_ratio(metrics.fail_ratio));
            println!("Return ratio:  {}", render::format_ratio(metrics.return_ratio));
            println!("Riders:        {}", metrics.rider_count);
        }
        Some(Commands::Report {
            period,
            top10,
            insights,
            ollama_url,
            model,
        }) => {
            let period = parse_period(&period)?;
            let top_n = if top10 { EXTENDED_TOP_N } else { DEFAULT_TOP_N };
            let usecase = riderlog_core::MonthlyReportUseCase::new(&store);
            let report = usecase.generate(period, top_n)?;

            render::print_report(&report);

            // The report above stands on its own; a failed insights call
            // only costs the summary.
            if insights && !report.rider_stats.is_empty() {
                println!("\nGenerating insights with {}...", model);
                let generator = OllamaGenerator::new(ollama_url, model)?;
                match InsightsService::new(generator).summarize(&report) {
                    Ok(Some(text)) => println!("\n{}", text),
                    Ok(None) => {}
                    Err(e) => eprintln!("Warning: insights unavailable: {}", e),
                }
            }
        }
        Some(Commands::Tui { period }) => {
            let period = match period {
                Some(p) => parse_period(&p)?,
                None => Period::current(),
            };
            report_tui::run(&store, period, DEFAULT_TOP_N)?;
        }
        None => {
            report_tui::run(&store, Period::current(), DEFAULT_TOP_N)?;
        }
    }
    Ok(())
}

fn add_entry(service: &EntryService<FileDashboardStore>, args: &[String]) -> Result<()> {
    if args.is_empty() {
        println!("Error: Rider name is required.");
        return Ok(());
    }

    let parsed = parse_args(args);
    if parsed.name.is_empty() {
        println!("Error: Rider name is required.");
        return Ok(());
    }

    let known_keys = vec!["successful", "failed", "returned", "date"];
    let mut normalized: HashMap<String, String> = HashMap::new();
    for (key, value) in parsed.metadata {
        match expand_key(&key, &known_keys) {
            Ok(full_key) => {
                normalized.insert(full_key, value);
            }
            Err(e) => {
                println!("Warning: {}", e);
            }
        }
    }

    let rider = match service.find_rider_by_name(&parsed.name)? {
        Some(r) => r,
        None => {
            println!(
                "Error: Unknown rider '{}'. Register them first with `riderlog add-rider \"{}\"`.",
                parsed.name, parsed.name
            );
            return Ok(());
        }
    };

    let successful = match normalized.get("successful") {
        Some(v) => parse_count("successful", v)?,
        None => 0,
    };
    let failed = match normalized.get("failed") {
        Some(v) => parse_count("failed", v)?,
        None => 0,
    };
    let returned = match normalized.get("returned") {
        Some(v) => parse_count("returned", v)?,
        None => 0,
    };
    let date = match normalized.get("date") {
        Some(d) => parse_entry_date(d)?,
        None => parse_entry_date("today")?,
    };

    let entry = service.add_entry(date, rider.id, successful, failed, returned)?;
    println!("Entry added: {} on {} (ID: {})", rider.name, entry.date, entry.id);
    println!(
        "  Successful: {}, Failed: {}, Returned: {} (total {})",
        entry.successful, entry.failed, entry.returned, entry.total()
    );
    Ok(())
}

fn list_entries(
    service: &EntryService<FileDashboardStore>,
    rider: Option<String>,
    from: Option<String>,
    to: Option<String>,
) -> Result<()> {
    let rider_id = match rider {
        Some(name) => match service.find_rider_by_name(&name)? {
            Some(r) => Some(r.id),
            None => {
                println!("Unknown rider: '{}'", name);
                return Ok(());
            }
        },
        None => None,
    };

    let filter = EntryFilter {
        rider_id,
        from: from.map(|d| parse_entry_date(&d)).transpose()?,
        to: to.map(|d| parse_entry_date(&d)).transpose()?,
    };

    let entries = service.list_entries(&filter)?;
    render::print_entries(&entries);
    Ok(())
}

fn delete_entry(service: &EntryService<FileDashboardStore>, id: &str, yes: bool) -> Result<()> {
    let entry = service.find_entry_by_id_prefix(id)?;
    println!(
        "Entry {}: {} successful, {} failed, {} returned on {}",
        entry.id, entry.successful, entry.failed, entry.returned, entry.date
    );

    // Plain confirmation prompt. Not an access-control mechanism, just a
    // guard against fat-fingered deletes.
    if !yes {
        print!("Delete this entry? [y/N] ");
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            println!("Aborted.");
            return Ok(());
        }
    }

    service.delete_entry(&entry.id)?;
    println!("Entry deleted.");
    Ok(())
}
