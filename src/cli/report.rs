//! `spendlog report` subcommand

use std::fmt::Write as _;

use clap::Args;

use crate::services::{
    format_money, format_percentage_bar, format_sparkline, percent_of, Config, Journal,
};
use crate::types::{Granularity, SpendingReport, Window};

const BAR_WIDTH: usize = 20;

/// Show totals, spending over time and spending by category
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Restrict to one month (YYYY-MM) or `all`
    #[arg(long, default_value = "all", value_name = "YYYY-MM|all")]
    pub month: Window,

    /// Time-series bucket size: daily, weekly or monthly
    #[arg(short, long, default_value = "monthly")]
    pub granularity: Granularity,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ReportArgs {
    pub fn run(self, journal: &Journal, config: &Config) -> anyhow::Result<()> {
        // A corrupted store is reported through the warn-level log on stderr
        let report = journal.report(self.month, self.granularity);
        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{}", render_report(&report, &config.currency));
        }
        Ok(())
    }
}

/// Plain-text rendering: totals, then the series, then the breakdown
pub fn render_report(report: &SpendingReport, currency: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Total spending (all time): {}",
        format_money(currency, report.global_total)
    );
    if let Window::Month(month) = report.window {
        let _ = writeln!(
            out,
            "Total spending ({}): {}",
            month,
            format_money(currency, report.filtered_total)
        );
    }

    if report.entry_count == 0 {
        let _ = writeln!(out, "\nNo expenses in {}.", report.window);
        return out;
    }

    let _ = writeln!(
        out,
        "\nSpending over time ({})",
        report.granularity.label().to_lowercase()
    );
    let label_width = report
        .series
        .iter()
        .map(|r| r.label.chars().count())
        .max()
        .unwrap_or(0);
    let peak = report.peak_bucket_total();
    for row in &report.series {
        let _ = writeln!(
            out,
            "  {:<lw$}  {}  {}",
            row.label,
            format_sparkline(row.total, peak, BAR_WIDTH),
            format_money(currency, row.total),
            lw = label_width
        );
    }

    let _ = writeln!(out, "\nSpending by category");
    let name_width = report
        .breakdown
        .iter()
        .map(|r| r.category.chars().count())
        .max()
        .unwrap_or(0);
    for row in &report.breakdown {
        let percent = percent_of(row.total, report.filtered_total);
        let _ = writeln!(
            out,
            "  {:<nw$}  {}  {:>5.1}%  {}",
            row.category,
            format_percentage_bar(percent, BAR_WIDTH),
            percent,
            format_money(currency, row.total),
            nw = name_width
        );
    }

    out
}
