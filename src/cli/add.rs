//! `spendlog add` subcommand for recording an expense

use chrono::Local;
use clap::Args;

use crate::services::{format_money, Config, Journal};
use crate::types::{Category, NewEntry};

/// Record a new expense
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Amount spent (must be positive)
    #[arg(allow_negative_numbers = true)]
    pub amount: f64,

    /// Category name (built-in or custom)
    #[arg(short, long)]
    pub category: String,

    /// Date of the expense as YYYY-MM-DD (default: today)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Optional free-text note
    #[arg(short = 'm', long)]
    pub description: Option<String>,
}

impl AddArgs {
    pub fn run(self, journal: &Journal, config: &Config) -> anyhow::Result<()> {
        let categories = journal.categories();
        let new = self.into_new_entry(&categories);
        let entry = journal.add_entry(new)?;

        println!(
            "Added #{}  {}  {}  {}",
            entry.id,
            entry.date,
            entry.category,
            format_money(&config.currency, entry.amount)
        );
        if !categories.iter().any(|c| c.name == entry.category) {
            println!("Note: '{}' is not a known category", entry.category);
        }
        Ok(())
    }

    /// Fill defaults and match the category against known names
    fn into_new_entry(self, categories: &[Category]) -> NewEntry {
        let date = self
            .date
            .unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string());
        let category = canonical_category(&self.category, categories);

        NewEntry {
            date: Some(date),
            category: Some(category),
            amount: Some(self.amount),
            description: self.description,
        }
    }
}

/// Known category name matching `input` case-insensitively, else `input` as typed
fn canonical_category(input: &str, categories: &[Category]) -> String {
    let trimmed = input.trim();
    categories
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(trimmed))
        .map(|c| c.name.clone())
        .unwrap_or_else(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(amount: f64, category: &str, date: Option<&str>) -> AddArgs {
        AddArgs {
            amount,
            category: category.to_string(),
            date: date.map(String::from),
            description: None,
        }
    }

    #[test]
    fn test_canonical_category_matches_case_insensitively() {
        let categories = Category::builtin();
        assert_eq!(canonical_category("food", &categories), "Food");
        assert_eq!(canonical_category(" TRANSPORT ", &categories), "Transport");
    }

    #[test]
    fn test_canonical_category_keeps_unknown_names() {
        let categories = Category::builtin();
        assert_eq!(canonical_category("Pets", &categories), "Pets");
    }

    #[test]
    fn test_into_new_entry_keeps_explicit_date() {
        let new = args(12.5, "food", Some("2024-01-05")).into_new_entry(&Category::builtin());

        assert_eq!(new.date.as_deref(), Some("2024-01-05"));
        assert_eq!(new.category.as_deref(), Some("Food"));
        assert_eq!(new.amount, Some(12.5));
    }

    #[test]
    fn test_into_new_entry_defaults_to_today() {
        let new = args(1.0, "Food", None).into_new_entry(&Category::builtin());
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        assert_eq!(new.date, Some(today));
    }

    #[test]
    fn test_run_persists_entry() {
        let journal = Journal::in_memory(Vec::new());
        let config = Config {
            data_dir: std::env::temp_dir(),
            currency: "THB".into(),
        };

        args(100.0, "food", Some("2024-01-05"))
            .run(&journal, &config)
            .unwrap();

        let entries = journal.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, "Food");
    }

    #[test]
    fn test_run_rejects_negative_amount() {
        let journal = Journal::in_memory(Vec::new());
        let config = Config {
            data_dir: std::env::temp_dir(),
            currency: "THB".into(),
        };

        let result = args(-5.0, "Food", Some("2024-01-05")).run(&journal, &config);

        assert!(result.is_err());
        assert!(journal.entries().is_empty());
    }
}
