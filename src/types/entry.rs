//! Spending entry and category types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::YearMonth;

/// Built-in categories offered ahead of user-defined ones: (name, description)
const BUILTIN_CATEGORIES: &[(&str, &str)] = &[
    ("Food", "Meals, groceries and snacks"),
    ("Transport", "Fares, fuel and parking"),
    ("Shopping", "Clothes, gadgets and household items"),
    ("Bills", "Rent, utilities and subscriptions"),
    ("Entertainment", "Movies, games and outings"),
    ("Health", "Pharmacy, clinic and fitness"),
    ("Other", "Anything else"),
];

/// One recorded expense
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub id: u64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: f64,
    /// Serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
}

impl Entry {
    /// Calendar month this entry falls in
    pub fn month(&self) -> YearMonth {
        YearMonth::from_date(self.date)
    }
}

/// Raw entry fields as submitted by the user, validated by the journal
/// before an [`Entry`] is built from them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewEntry {
    pub date: Option<String>,
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub description: Option<String>,
}

/// A reusable category label offered when creating an entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub description: String,
}

impl Category {
    /// The fixed built-in set, ids 1..=N
    pub fn builtin() -> Vec<Category> {
        BUILTIN_CATEGORIES
            .iter()
            .enumerate()
            .map(|(i, (name, description))| Category {
                id: i as u64 + 1,
                name: (*name).to_string(),
                description: (*description).to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_json_shape() {
        let entry = Entry {
            id: 1704412800000,
            category: "Food".into(),
            description: Some("lunch".into()),
            amount: 120.5,
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["category"], "Food");
        assert_eq!(json["date"], "2024-01-05");
        assert_eq!(json["amount"], 120.5);
        assert_eq!(json["description"], "lunch");
    }

    #[test]
    fn test_entry_without_description() {
        let json = r#"{"id":7,"category":"Transport","amount":30,"date":"2024-02-01"}"#;
        let entry: Entry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.description, None);
        assert_eq!(entry.amount, 30.0);
        assert_eq!(entry.month().to_string(), "2024-02");

        // Absent description is not written back out
        let out = serde_json::to_string(&entry).unwrap();
        assert!(!out.contains("description"));
    }

    #[test]
    fn test_entry_rejects_invalid_date() {
        let json = r#"{"id":7,"category":"Transport","amount":30,"date":"2024-02-30"}"#;
        assert!(serde_json::from_str::<Entry>(json).is_err());
    }

    #[test]
    fn test_builtin_categories() {
        let builtin = Category::builtin();
        assert_eq!(builtin.len(), BUILTIN_CATEGORIES.len());
        assert_eq!(builtin[0].id, 1);
        assert_eq!(builtin[0].name, "Food");
        assert_eq!(builtin.last().unwrap().name, "Other");
    }
}
