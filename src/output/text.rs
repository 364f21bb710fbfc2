//! Text output formatter for human-readable display
//!
//! This module provides:
//! - A dependency health table, stalest first, failed lookups last
//! - Staleness colouring and version drift markers
//! - A one-line summary

use crate::domain::{AuditReport, DependencyHealth};
use crate::health::{Staleness, StalenessThresholds, VersionStatus};
use crate::output::OutputFormatter;
use colored::Colorize;
use std::io::Write;

/// Cell colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Plain,
    Dim,
    Green,
    Yellow,
    Red,
    Cyan,
}

impl From<Staleness> for Tone {
    fn from(staleness: Staleness) -> Self {
        match staleness {
            Staleness::Unknown => Tone::Dim,
            Staleness::Fresh => Tone::Green,
            Staleness::Stale => Tone::Yellow,
            Staleness::VeryStale => Tone::Red,
        }
    }
}

struct Cell {
    text: String,
    tone: Tone,
}

impl Cell {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    fn width(&self) -> usize {
        self.text.chars().count()
    }
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Thresholds shown in the summary line
    thresholds: StalenessThresholds,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(thresholds: StalenessThresholds) -> Self {
        Self::with_color(thresholds, true)
    }

    /// Create a new text formatter with color option
    pub fn with_color(thresholds: StalenessThresholds, color: bool) -> Self {
        Self { thresholds, color }
    }

    fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.color {
            return text.to_string();
        }
        match tone {
            Tone::Plain => text.to_string(),
            Tone::Dim => text.dimmed().to_string(),
            Tone::Green => text.green().to_string(),
            Tone::Yellow => text.yellow().to_string(),
            Tone::Red => text.red().to_string(),
            Tone::Cyan => text.cyan().to_string(),
        }
    }

    /// Build the table cells for one record
    fn row(&self, record: &DependencyHealth, show_imported: bool) -> Vec<Cell> {
        let name = format!("{} [{}]", record.name, record.ecosystem);
        let pinned = match &record.pinned_version {
            Some(pin) => Cell::new(pin.as_str(), Tone::Plain),
            None => Cell::new("none", Tone::Dim),
        };

        let mut cells = match (record.assessment(), record.error()) {
            (Some(assessment), _) => {
                let tone = Tone::from(assessment.staleness);
                let date = assessment
                    .last_release_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                let days = assessment
                    .days_since_update
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "?".to_string());

                vec![
                    Cell::new(name, tone),
                    pinned,
                    Cell::new(assessment.latest_version.as_str(), Tone::Plain),
                    Cell::new(date, tone),
                    Cell::new(days, tone),
                    version_status_cell(&assessment.version_status, &assessment.latest_version),
                ]
            }
            (None, error) => vec![
                Cell::new(name, Tone::Plain),
                pinned,
                Cell::new("-", Tone::Dim),
                Cell::new("-", Tone::Dim),
                Cell::new("-", Tone::Dim),
                Cell::new(error.unwrap_or_default(), Tone::Dim),
            ],
        };

        if show_imported {
            cells.push(match record.imported() {
                Some(true) => Cell::new("✓", Tone::Green),
                Some(false) => Cell::new("✗", Tone::Yellow),
                None => Cell::new("?", Tone::Dim),
            });
        }
        cells
    }

    fn write_row(
        &self,
        cells: &[Cell],
        widths: &[usize],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let mut line = String::from(" ");
        for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
            let pad = width.saturating_sub(cell.width());
            // days column is right-aligned
            let padded = if i == 4 {
                format!("{}{}", " ".repeat(pad), cell.text)
            } else {
                format!("{}{}", cell.text, " ".repeat(pad))
            };
            line.push(' ');
            line.push_str(&self.paint(&padded, cell.tone));
            line.push(' ');
        }
        writeln!(writer, "{}", line.trim_end())
    }

    /// Format the summary line
    fn format_summary(&self, report: &AuditReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let summary = &report.summary;
        let mut parts = vec![
            format!("{} packages scanned", summary.total),
            self.paint(
                &format!(
                    "{} very stale (>{}d)",
                    summary.very_stale, self.thresholds.very_stale_days
                ),
                Tone::Red,
            ),
            self.paint(
                &format!("{} stale (>{}d)", summary.stale, self.thresholds.stale_days),
                Tone::Yellow,
            ),
        ];
        if summary.major_behind > 0 {
            parts.push(self.paint(
                &format!("{} major version behind", summary.major_behind),
                Tone::Red,
            ));
        }
        if report.usage_checked && summary.not_imported > 0 {
            parts.push(self.paint(
                &format!("{} possibly unused", summary.not_imported),
                Tone::Yellow,
            ));
        }
        if summary.fetch_errors > 0 {
            parts.push(self.paint(
                &format!("{} fetch error(s)", summary.fetch_errors),
                Tone::Dim,
            ));
        }

        writeln!(writer)?;
        writeln!(writer, "  {}", parts.join(" · "))
    }
}

fn version_status_cell(status: &VersionStatus, latest: &str) -> Cell {
    match status {
        VersionStatus::UpToDate => Cell::new(format!("✓ {}", status), Tone::Green),
        VersionStatus::Unpinned => Cell::new(format!("unpinned (latest: {})", latest), Tone::Dim),
        VersionStatus::Major { .. } => Cell::new(format!("⚠ {}", status), Tone::Red),
        VersionStatus::Minor { .. } => Cell::new(format!("↑ {}", status), Tone::Yellow),
        VersionStatus::Patch { .. } => Cell::new(format!("↑ {}", status), Tone::Cyan),
        VersionStatus::Behind { .. } => Cell::new(status.to_string(), Tone::Dim),
    }
}

/// Failed lookups last, then stalest first (unknown age counts as zero)
fn display_order(records: &[DependencyHealth]) -> Vec<&DependencyHealth> {
    let mut sorted: Vec<&DependencyHealth> = records.iter().collect();
    sorted.sort_by_key(|r| (r.is_error(), std::cmp::Reverse(r.days_since_update().unwrap_or(0))));
    sorted
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &AuditReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if report.is_empty() {
            let message = "No dependencies found in manifests.";
            return writeln!(writer, "{}", self.paint(message, Tone::Yellow));
        }

        let mut header = vec!["Package", "Pinned", "Latest", "Last Release", "Days Old", "Version Status"];
        if report.usage_checked {
            header.push("Imported?");
        }
        let header: Vec<Cell> = header.into_iter().map(|h| Cell::new(h, Tone::Cyan)).collect();

        let rows: Vec<Vec<Cell>> = display_order(&report.records)
            .into_iter()
            .map(|record| self.row(record, report.usage_checked))
            .collect();

        let mut widths: Vec<usize> = header.iter().map(Cell::width).collect();
        widths[0] = widths[0].max(22);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }

        writeln!(writer)?;
        if self.color {
            writeln!(writer, "  {}", "Dependency Health Report".bold())?;
        } else {
            writeln!(writer, "  Dependency Health Report")?;
        }
        self.write_row(&header, &widths, writer)?;
        let rule: usize = widths.iter().map(|w| w + 2).sum();
        writeln!(writer, "  {}", self.paint(&"─".repeat(rule), Tone::Dim))?;
        for row in &rows {
            self.write_row(row, &widths, writer)?;
        }

        self.format_summary(report, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Assessment, RawDependency};

    fn assessed(name: &str, days: Option<i64>, staleness: Staleness, imported: Option<bool>) -> DependencyHealth {
        DependencyHealth::assessed(
            &RawDependency::pypi(name, Some("1.0.0".to_string())),
            Assessment {
                latest_version: "2.0.0".to_string(),
                last_release_date: None,
                days_since_update: days,
                version_status: VersionStatus::Major {
                    from: "1.0.0".to_string(),
                    to: "2.0.0".to_string(),
                },
                staleness,
                imported,
            },
        )
    }

    fn render(report: &AuditReport) -> String {
        let formatter = TextFormatter::with_color(StalenessThresholds::default(), false);
        let mut out = Vec::new();
        formatter.format(report, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_display_order() {
        let records = vec![
            DependencyHealth::failed(&RawDependency::pypi("broken", None), "not found on PyPI"),
            assessed("young", Some(10), Staleness::Fresh, None),
            assessed("unknown", None, Staleness::Unknown, None),
            assessed("old", Some(900), Staleness::VeryStale, None),
        ];
        let names: Vec<&str> = display_order(&records).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["old", "young", "unknown", "broken"]);
    }

    #[test]
    fn test_table_contents() {
        let records = vec![
            assessed("requests", Some(400), Staleness::Stale, None),
            DependencyHealth::failed(&RawDependency::npm("ghost", None), "not found on npm"),
        ];
        let output = render(&AuditReport::new(records, Vec::new(), false));

        assert!(output.contains("Dependency Health Report"));
        assert!(output.contains("requests [PyPI]"));
        assert!(output.contains("⚠ major (1.0.0 → 2.0.0)"));
        assert!(output.contains("not found on npm"));
        assert!(!output.contains("Imported?"));
        assert!(output.contains("2 packages scanned · 0 very stale (>730d) · 1 stale (>365d)"));
        assert!(output.contains("1 major version behind"));
        assert!(output.contains("1 fetch error(s)"));
    }

    #[test]
    fn test_imported_column() {
        let records = vec![
            assessed("numpy", Some(5), Staleness::Fresh, Some(false)),
            assessed("pillow", Some(5), Staleness::Fresh, Some(true)),
        ];
        let output = render(&AuditReport::new(records, Vec::new(), true));
        assert!(output.contains("Imported?"));
        assert!(output.contains("✗"));
        assert!(output.contains("1 possibly unused"));
    }

    #[test]
    fn test_empty_report() {
        let output = render(&AuditReport::default());
        assert_eq!(output.trim(), "No dependencies found in manifests.");
    }
}
