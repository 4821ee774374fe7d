//! `spendlog categories` subcommand

use std::fmt::Write as _;

use clap::{Args, Subcommand};

use crate::services::Journal;
use crate::types::Category;

/// List categories or add a custom one
#[derive(Args, Debug)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub action: Option<CategoryAction>,

    /// Output the list as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum CategoryAction {
    /// Add a custom category
    Add {
        /// Category name
        name: String,
        /// Short description
        description: String,
    },
}

impl CategoriesArgs {
    pub fn run(self, journal: &Journal) -> anyhow::Result<()> {
        match self.action {
            Some(CategoryAction::Add { name, description }) => {
                let category = journal.add_category(&name, &description)?;
                println!("Added category '{}'", category.name);
            }
            None => {
                let categories = journal.categories();
                if self.json {
                    println!("{}", serde_json::to_string_pretty(&categories)?);
                } else {
                    print!("{}", render_categories(&categories));
                }
            }
        }
        Ok(())
    }
}

/// One line per category: name, description and a marker for custom ones
pub fn render_categories(categories: &[Category]) -> String {
    let builtin_count = Category::builtin().len();
    let width = categories
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (i, category) in categories.iter().enumerate() {
        let marker = if i >= builtin_count { "  (custom)" } else { "" };
        let _ = writeln!(
            out,
            "{:<w$}  {}{}",
            category.name,
            category.description,
            marker,
            w = width
        );
    }
    out
}
