//! `spendlog list` and `spendlog delete`

use std::fmt::Write as _;

use crate::services::{format_amount, format_money, Aggregator, Config, Journal};
use crate::types::Entry;

pub fn list(journal: &Journal, config: &Config, json: bool) -> anyhow::Result<()> {
    let (entries, warning) = journal.load_entries();
    if let Some(warning) = warning {
        eprintln!("[spendlog] Warning: {}", warning.message());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print!("{}", render_entries(&entries, &config.currency));
    }
    Ok(())
}

pub fn delete(journal: &Journal, config: &Config, id: u64) -> anyhow::Result<()> {
    let entry = journal.delete_entry(id)?;
    println!(
        "Deleted #{}  {}  {}  {}",
        entry.id,
        entry.date,
        entry.category,
        format_money(&config.currency, entry.amount)
    );
    Ok(())
}

/// Plain-text table of entries in stored order, with a total line
pub fn render_entries(entries: &[Entry], currency: &str) -> String {
    if entries.is_empty() {
        return "No expenses recorded yet.\n".to_string();
    }

    let category_width = entries
        .iter()
        .map(|e| e.category.chars().count())
        .max()
        .unwrap_or(0)
        .max("Category".len());
    let amount_width = entries
        .iter()
        .map(|e| format_amount(e.amount).len())
        .max()
        .unwrap_or(0)
        .max("Amount".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<13}  {:<10}  {:<cw$}  {:>aw$}  Description",
        "ID",
        "Date",
        "Category",
        "Amount",
        cw = category_width,
        aw = amount_width
    );
    for entry in entries {
        let _ = writeln!(
            out,
            "{:<13}  {:<10}  {:<cw$}  {:>aw$}  {}",
            entry.id,
            entry.date.format("%Y-%m-%d"),
            entry.category,
            format_amount(entry.amount),
            entry.description.as_deref().unwrap_or(""),
            cw = category_width,
            aw = amount_width
        );
    }
    let _ = writeln!(
        out,
        "\n{} entries, total {}",
        entries.len(),
        format_money(currency, Aggregator::total(entries.iter()))
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_entry(id: u64, category: &str, amount: f64, description: Option<&str>) -> Entry {
        Entry {
            id,
            category: category.to_string(),
            description: description.map(String::from),
            amount,
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        }
    }

    #[test]
    fn test_render_entries_empty() {
        assert_eq!(render_entries(&[], "THB"), "No expenses recorded yet.\n");
    }

    #[test]
    fn test_render_entries_rows_and_total() {
        let entries = vec![
            make_entry(1, "Food", 100.0, Some("lunch")),
            make_entry(2, "Transport", 1234.5, None),
        ];

        let out = render_entries(&entries, "THB");
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].contains("2024-01-05"));
        assert!(lines[1].contains("lunch"));
        assert!(lines[2].contains("1,234.50"));
        assert!(out.contains("2 entries, total THB 1,334.50"));
    }

    #[test]
    fn test_delete_unknown_id_errors() {
        let journal = Journal::in_memory(vec![make_entry(1, "Food", 10.0, None)]);
        let config = Config {
            data_dir: std::env::temp_dir(),
            currency: "THB".into(),
        };

        assert!(delete(&journal, &config, 42).is_err());
        assert_eq!(journal.entries().len(), 1);
    }

    #[test]
    fn test_delete_removes_entry() {
        let journal = Journal::in_memory(vec![make_entry(1, "Food", 10.0, None)]);
        let config = Config {
            data_dir: std::env::temp_dir(),
            currency: "THB".into(),
        };

        delete(&journal, &config, 1).unwrap();

        assert!(journal.entries().is_empty());
    }
}
