//! Command-line interface: argument parsing and subcommand handlers.

use std::io::{BufRead, Write as _};
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::bible::Bible;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::esv::api::EsvClient;
use crate::esv::cache::{CachedPassage, EsvCache};
use crate::esv::{audit, clean};
use crate::report;
use crate::store::{self, load_entries, Entry};
use crate::verify::Verifier;

/// Verify and maintain the devotional scripture corpus.
#[derive(Debug, Parser)]
#[command(name = "versecheck", version, about)]
pub struct Cli {
    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify quoted passages against the canonical text and repair drift
    Verify,
    /// Fetch ESV passage text into the local cache
    Fetch {
        /// Fetch a single date (MMDD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Fetch an entire month (1-12)
        #[arg(long, conflicts_with = "date")]
        month: Option<u32>,
        /// Fetch every entry (asks for confirmation)
        #[arg(long, conflicts_with_all = ["date", "month"])]
        all: bool,
        /// Re-fetch entries that are already cached
        #[arg(long)]
        force: bool,
    },
    /// Audit the ESV cache for suspicious passages
    Audit,
    /// Repair trailing punctuation and capitalization in the ESV cache
    Clean,
}

/// Dispatch a parsed command.
pub async fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Verify => run_verify(config),
        Command::Fetch { date, month, all, force } => {
            run_fetch(config, date, month, all, force).await
        }
        Command::Audit => run_audit(config),
        Command::Clean => run_clean(config),
    }
}

/// Verify the whole entry collection, write the review report, and
/// persist any repairs.
fn run_verify(config: &Config) -> Result<()> {
    // A broken canonical source would misclassify everything; stop here
    let bible = Bible::load(&config.bible_path)?;
    let mut entries = load_entries(&config.entries_path)?;
    println!("Processing {} entries...", entries.len());

    let verifier = Verifier::new(&bible);
    let (stats, review) = verifier.verify_all(&mut entries);

    println!("Verified: {}", stats.verified);
    println!("Corrected: {}", stats.corrected);
    println!("Expanded: {}", stats.expanded);
    println!("Manual review: {}", stats.manual_review);

    report::write_report(&config.report_path, &stats, &review)?;
    println!("Report written to {}", config.report_path.display());

    store::save_entries(&config.entries_path, &entries)?;
    Ok(())
}

/// Fetch ESV text for the selected entries, persisting the cache after
/// every successful fetch.
async fn run_fetch(
    config: &Config,
    date: Option<String>,
    month: Option<u32>,
    all: bool,
    force: bool,
) -> Result<()> {
    if !config.has_esv_key() {
        return Err(Error::config(
            "ESV_API_KEY not set",
            "Create a .env file in the project root with ESV_API_KEY=your_key",
        ));
    }

    let entries = load_entries(&config.entries_path)?;
    let mut cache = EsvCache::load(&config.cache_path)?;

    let targets: Vec<&Entry> = if all {
        if !confirm(&format!("Fetch up to {} entries? (y/N) ", entries.len()))? {
            println!("Aborted.");
            return Ok(());
        }
        entries.iter().collect()
    } else if let Some(month) = month {
        let prefix = format!("{month:02}");
        let selected: Vec<&Entry> =
            entries.iter().filter(|e| e.mmdd.starts_with(&prefix)).collect();
        if selected.is_empty() {
            println!("No entries found for month {month}");
            return Ok(());
        }
        selected
    } else {
        let date = date.unwrap_or_else(|| chrono::Local::now().format("%m%d").to_string());
        let selected: Vec<&Entry> = entries.iter().filter(|e| e.mmdd == date).collect();
        if selected.is_empty() {
            println!("No entry found for date {date}");
            return Ok(());
        }
        selected
    };

    let client = EsvClient::new(config.esv_api_key.clone());
    println!("Targeting {} entries...", targets.len());

    let mut updated = 0;
    for (i, entry) in targets.iter().enumerate() {
        if !force && cache.contains(&entry.mmdd) {
            if targets.len() == 1 {
                println!("{} already cached. Use --force to refetch.", entry.mmdd);
            }
            continue;
        }
        if entry.verse_ref.is_empty() {
            tracing::warn!(mmdd = %entry.mmdd, "entry has no reference, skipping");
            continue;
        }

        println!("[{}/{}] Fetching {}: {}", i + 1, targets.len(), entry.mmdd, entry.verse_ref);
        match client.fetch_passage(&entry.verse_ref).await {
            Ok(text) if !text.is_empty() => {
                cache.insert(
                    entry.mmdd.clone(),
                    CachedPassage { reference: entry.verse_ref.clone(), text },
                );
                updated += 1;
                cache.save(&config.cache_path)?;
                // ESV allows 60 requests a minute; one a second is safe
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
            Ok(_) => {
                tracing::warn!(reference = %entry.verse_ref, "API returned no passage text");
            }
            Err(e) => {
                tracing::warn!(reference = %entry.verse_ref, error = %e, "fetch failed");
            }
        }
    }

    println!("Done. Added/updated {updated} passages.");
    Ok(())
}

/// Print the audit table for the current cache.
fn run_audit(config: &Config) -> Result<()> {
    let entries = load_entries(&config.entries_path)?;
    let cache = EsvCache::load(&config.cache_path)?;

    let issues = audit::audit(&entries, &cache);

    println!("{:<6} | {:<20} | {}", "MMDD", "Issue Type", "Details");
    println!("{}", "-".repeat(80));
    for issue in &issues {
        println!("{:<6} | {:<20} | {}", issue.mmdd, issue.kind.label(), issue.detail);
    }
    println!("{}", "-".repeat(80));
    println!("Audit complete. Found {} potential issues.", issues.len());
    Ok(())
}

/// Touch up cached passage text, saving only when something changed.
fn run_clean(config: &Config) -> Result<()> {
    let mut cache = EsvCache::load(&config.cache_path)?;
    let fixed = clean::clean(&mut cache);
    if fixed > 0 {
        cache.save(&config.cache_path)?;
        println!("Fixed {fixed} passages.");
    } else {
        println!("No passages needed fixing.");
    }
    Ok(())
}

/// Ask a y/N question on stdout/stdin.
fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn fetch_flags_parse() {
        let cli = Cli::parse_from(["versecheck", "fetch", "--date", "0316", "--force"]);
        match cli.command {
            Command::Fetch { date, month, all, force } => {
                assert_eq!(date.as_deref(), Some("0316"));
                assert_eq!(month, None);
                assert!(!all);
                assert!(force);
            }
            _ => panic!("expected fetch"),
        }
    }
}
