//! Offline look at the roster: what each guest would get, and what would
//! trip up an order run (duplicate names, product pages missing from the
//! configuration).

use crate::OutputFormat;
use anyhow::{Context, Result};
use outfitter_core::config::Config;
use outfitter_core::roster::{CartLine, Roster, RosterReader};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct RosterReport {
    pub guests: Vec<GuestSummary>,
    /// Names that cannot be looked up because they appear more than once
    pub duplicate_names: Vec<String>,
    /// Product page keys the guests need but the configuration lacks
    pub missing_pages: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct GuestSummary {
    pub index: usize,
    pub reservation: u64,
    pub name: String,
    pub country: String,
    pub sex: String,
    pub items: Vec<CartLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

pub fn summarize(roster: &Roster, config: Option<&Config>) -> RosterReport {
    let guests: Vec<GuestSummary> = roster
        .guests()
        .iter()
        .map(|g| GuestSummary {
            index: g.index,
            reservation: g.reservation,
            name: g.name.clone(),
            country: g.country.clone(),
            sex: g.sex.clone(),
            items: g.cart_lines(),
            notes: g.notes.clone(),
        })
        .collect();

    let mut name_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for guest in roster.guests() {
        *name_counts.entry(guest.name.as_str()).or_default() += 1;
    }
    let duplicate_names = name_counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name.to_string())
        .collect();

    let missing_pages = match config {
        Some(config) => guests
            .iter()
            .flat_map(|g| g.items.iter())
            .filter(|line| config.product_page(&line.page_key).is_none())
            .map(|line| line.page_key.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
        None => Vec::new(),
    };

    RosterReport {
        guests,
        duplicate_names,
        missing_pages,
    }
}

pub fn execute(
    roster_path: &Path,
    config_path: Option<&Path>,
    guest: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    tracing::info!("Summarizing roster {} as {}", roster_path.display(), format.as_str());

    let roster = RosterReader::from_file(roster_path)
        .with_context(|| format!("Failed to load roster from {}", roster_path.display()))?;
    let config = config_path
        .map(|path| {
            Config::from_file(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))
        })
        .transpose()?;

    let mut report = summarize(&roster, config.as_ref());
    if let Some(name) = guest {
        report.guests.retain(|g| g.name == name);
        if report.guests.is_empty() {
            anyhow::bail!("Name not found: '{}'", name);
        }
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Pretty => print_pretty(&report, config.is_some()),
    }

    Ok(())
}

fn print_pretty(report: &RosterReport, checked_pages: bool) {
    use console::style;

    println!("\n{}", style("Guest Roster").bold().cyan());
    println!("{}", style("============").cyan());

    for guest in &report.guests {
        let items = if guest.items.is_empty() {
            style("no items".to_string()).dim().to_string()
        } else {
            guest
                .items
                .iter()
                .map(|line| format!("{} {}", line.category, line.size_code))
                .collect::<Vec<_>>()
                .join(", ")
        };

        println!(
            "{:>4}  {:<8} {:<28} {:<8} {}",
            guest.index,
            guest.reservation,
            guest.name,
            guest.country,
            items
        );
        if let Some(notes) = &guest.notes {
            println!("      {}", style(notes).dim());
        }
    }

    println!("\n{} guests", report.guests.len());

    if !report.duplicate_names.is_empty() {
        println!(
            "\n{} names appear more than once and cannot be looked up by name:",
            style("⚠️ ").yellow()
        );
        for name in &report.duplicate_names {
            println!("  - {}", name);
        }
    }

    if checked_pages {
        if report.missing_pages.is_empty() {
            println!("\n✅ Every item has a product page configured");
        } else {
            println!("\n{} Missing product pages:", style("❌").red());
            for key in &report.missing_pages {
                println!("  - {}", key);
            }
        }
    }
}
