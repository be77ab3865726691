use std::collections::HashMap;

use tabled::settings::Style;
use tabled::{Table, Tabled};
use uuid::Uuid;

use riderlog_core::{EnrichedEntry, ReportData, Rider};

pub fn format_ratio(ratio: f64) -> String {
    if !ratio.is_finite() {
        return "0.0%".to_string();
    }
    format!("{:.1}%", ratio * 100.0)
}

fn short_id(id: &Uuid) -> String {
    id.to_string()[..8].to_string()
}

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Rider")]
    rider: String,
    #[tabled(rename = "Success")]
    successful: u32,
    #[tabled(rename = "Failed")]
    failed: u32,
    #[tabled(rename = "Returned")]
    returned: u32,
    #[tabled(rename = "Total")]
    total: u32,
    #[tabled(rename = "Success %")]
    success_ratio: String,
}

pub fn print_entries(entries: &[EnrichedEntry]) {
    if entries.is_empty() {
        println!("No entries found.");
        return;
    }

    let rows: Vec<EntryRow> = entries
        .iter()
        .map(|e| EntryRow {
            date: e.date.format("%Y-%m-%d").to_string(),
            id: short_id(&e.id),
            rider: e.rider_name.clone(),
            successful: e.successful,
            failed: e.failed,
            returned: e.returned,
            total: e.total,
            success_ratio: format_ratio(e.success_ratio),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

#[derive(Tabled)]
struct RiderRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Lifetime Deliveries")]
    total: u32,
}

pub fn print_riders(riders: &[Rider], entries: &[EnrichedEntry]) {
    if riders.is_empty() {
        println!("No riders registered.");
        return;
    }

    let mut totals: HashMap<Uuid, u32> = HashMap::new();
    for entry in entries {
        *totals.entry(entry.rider_id).or_default() += entry.total;
    }

    let rows: Vec<RiderRow> = riders
        .iter()
        .map(|r| RiderRow {
            id: short_id(&r.id),
            name: r.name.clone(),
            total: totals.get(&r.id).copied().unwrap_or(0),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

#[derive(Tabled)]
struct LeaderboardRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Rider")]
    rider: String,
    #[tabled(rename = "Success %")]
    success_ratio: String,
    #[tabled(rename = "Total")]
    total: u32,
    #[tabled(rename = "Successful")]
    successful: u32,
    #[tabled(rename = "Failed")]
    failed: u32,
    #[tabled(rename = "Returned")]
    returned: u32,
    #[tabled(rename = "Active Days")]
    active_days: u32,
}

pub fn print_report(report: &ReportData) {
    println!(
        "\n{} {} — {} top performers ({} total entries)",
        report.period.month_name(),
        report.period.year,
        report.rider_stats.len(),
        report.total_entries
    );

    if report.rider_stats.is_empty() {
        println!("No rider activity recorded for this period.");
        return;
    }

    let rows: Vec<LeaderboardRow> = report
        .rider_stats
        .iter()
        .enumerate()
        .map(|(i, s)| LeaderboardRow {
            rank: i + 1,
            rider: s.rider_name.clone(),
            success_ratio: format_ratio(s.success_ratio),
            total: s.total,
            successful: s.successful,
            failed: s.failed,
            returned: s.returned,
            active_days: s.active_days,
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}
