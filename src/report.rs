//! Human-readable review report.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::Result;
use crate::verify::{ReviewItem, VerifyStats};

/// Render the run summary and manual-review queue as Markdown.
pub fn render_report(stats: &VerifyStats, items: &[ReviewItem]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Verse Review Report");
    let _ = writeln!(out);
    let _ = writeln!(out, "Generated {}.", chrono::Local::now().format("%Y-%m-%d"));
    let _ = writeln!(out);
    let _ = writeln!(out, "- Verified: {}", stats.verified);
    let _ = writeln!(out, "- Corrected: {}", stats.corrected);
    let _ = writeln!(out, "- Expanded: {}", stats.expanded);
    let _ = writeln!(out, "- Manual review: {}", stats.manual_review);
    let _ = writeln!(out);
    let _ = writeln!(out, "## Manual Review Items");

    for item in items {
        let _ = writeln!(out);
        let _ = writeln!(out, "### {} - {}", item.mmdd, item.title);
        let _ = writeln!(out, "- Ref: `{}`", item.verse_ref);
        let _ = writeln!(out, "- Reason: {}", item.reason);
        let _ = writeln!(out, "- Entry Text: {}", item.text);
        if let (Some(target), Some(entry)) = (item.target_len, item.entry_len) {
            let _ = writeln!(out, "- Lengths: target {target} / entry {entry} chars");
        }
    }

    out
}

/// Write the report to disk.
pub fn write_report(path: &Path, stats: &VerifyStats, items: &[ReviewItem]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs_err::create_dir_all(parent)?;
        }
    }
    fs_err::write(path, render_report(stats, items))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn sample_item() -> ReviewItem {
        ReviewItem {
            mmdd: "0214".to_string(),
            title: "Love".to_string(),
            verse_ref: "1 Cor 13:4".to_string(),
            text: "Charity suffereth long.".to_string(),
            reason: "unknown book: 1 Cor".to_string(),
            target_len: None,
            entry_len: None,
        }
    }

    #[test]
    fn report_carries_counters_and_items() {
        let stats = VerifyStats { verified: 3, corrected: 1, expanded: 1, manual_review: 1 };
        let report = render_report(&stats, &[sample_item()]);
        assert!(report.contains("- Verified: 3"));
        assert!(report.contains("- Manual review: 1"));
        assert!(report.contains("### 0214 - Love"));
        assert!(report.contains("- Reason: unknown book: 1 Cor"));
        assert!(!report.contains("- Lengths:"));
    }

    #[test]
    fn report_includes_diagnostic_lengths_when_present() {
        let mut item = sample_item();
        item.reason = "low match (0.32)".to_string();
        item.target_len = Some(120);
        item.entry_len = Some(48);
        let report = render_report(&VerifyStats::default(), &[item]);
        assert!(report.contains("- Lengths: target 120 / entry 48 chars"));
    }

    #[test]
    fn writes_and_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs").join("verse_review.md");
        write_report(&path, &VerifyStats::default(), &[]).unwrap();
        let content = fs_err::read_to_string(&path).unwrap();
        assert!(content.starts_with("# Verse Review Report"));
    }
}
