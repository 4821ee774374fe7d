//! Journal service: the creation boundary for entries and categories
//!
//! All writes go through here. Input is validated before anything is
//! persisted, so a rejected entry leaves the store untouched.

use std::path::Path;

use chrono::{NaiveDate, Utc};

use crate::services::store::{JsonFileStore, MemoryStore, Store, CATEGORIES_KEY, ENTRIES_KEY};
use crate::services::Aggregator;
use crate::types::{
    Category, Entry, Granularity, NewEntry, Result, SpendingReport, SpendlogError, StoreWarning,
    Window,
};

/// Entry and category collections behind their stores
pub struct Journal {
    entries: Box<dyn Store<Entry>>,
    categories: Box<dyn Store<Category>>,
}

impl Journal {
    pub fn new(entries: Box<dyn Store<Entry>>, categories: Box<dyn Store<Category>>) -> Self {
        Self {
            entries,
            categories,
        }
    }

    /// Journal backed by JSON files in `data_dir`
    pub fn open(data_dir: &Path) -> Self {
        Self::new(
            Box::new(JsonFileStore::open(data_dir, ENTRIES_KEY)),
            Box::new(JsonFileStore::open(data_dir, CATEGORIES_KEY)),
        )
    }

    /// Journal that keeps everything in memory
    pub fn in_memory(entries: Vec<Entry>) -> Self {
        Self::new(
            Box::new(MemoryStore::new(entries)),
            Box::new(MemoryStore::default()),
        )
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.entries.get()
    }

    /// Entries plus the store warning, for callers that surface it
    pub fn load_entries(&self) -> (Vec<Entry>, Option<StoreWarning>) {
        self.entries.load()
    }

    /// Validate and append a new entry
    pub fn add_entry(&self, new: NewEntry) -> Result<Entry> {
        let (date, category, amount, description) = validate_entry(new)?;

        let _lock = self.entries.lock()?;
        let mut entries = writable(self.entries.as_ref())?;
        let entry = Entry {
            id: next_id(entries.iter().map(|e| e.id))?,
            category,
            description,
            amount,
            date,
        };
        entries.push(entry.clone());
        self.entries.set(&entries)?;

        tracing::info!(
            id = entry.id,
            category = %entry.category,
            amount = entry.amount,
            "added entry"
        );
        Ok(entry)
    }

    /// Remove the entry with `id`, returning it
    pub fn delete_entry(&self, id: u64) -> Result<Entry> {
        let _lock = self.entries.lock()?;
        let mut entries = writable(self.entries.as_ref())?;
        let pos = entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(SpendlogError::NotFound(id))?;
        let removed = entries.remove(pos);
        self.entries.set(&entries)?;

        tracing::info!(id, "deleted entry");
        Ok(removed)
    }

    /// Built-in categories followed by custom ones
    pub fn categories(&self) -> Vec<Category> {
        let mut all = Category::builtin();
        all.extend(self.categories.get());
        all
    }

    pub fn custom_categories(&self) -> Vec<Category> {
        self.categories.get()
    }

    /// Append a custom category. Both fields are required; names may repeat.
    pub fn add_category(&self, name: &str, description: &str) -> Result<Category> {
        let name = name.trim();
        let description = description.trim();
        if name.is_empty() {
            return Err(SpendlogError::Validation("category name is required".into()));
        }
        if description.is_empty() {
            return Err(SpendlogError::Validation(
                "category description is required".into(),
            ));
        }

        let _lock = self.categories.lock()?;
        let mut custom = writable(self.categories.as_ref())?;
        let builtin = Category::builtin();
        let category = Category {
            id: next_id(builtin.iter().chain(custom.iter()).map(|c| c.id))?,
            name: name.to_string(),
            description: description.to_string(),
        };
        custom.push(category.clone());
        self.categories.set(&custom)?;

        tracing::info!(id = category.id, name = %category.name, "added category");
        Ok(category)
    }

    /// Aggregate the current entries
    pub fn report(&self, window: Window, granularity: Granularity) -> SpendingReport {
        Aggregator::report(&self.entries(), window, granularity)
    }
}

/// Load a collection that is about to be rewritten. Refuses when the
/// stored data could not be read, so a corrupted file is never overwritten.
fn writable<T>(store: &dyn Store<T>) -> Result<Vec<T>> {
    match store.load() {
        (items, None) => Ok(items),
        (_, Some(warning)) => Err(SpendlogError::Store(warning.message().to_string())),
    }
}

/// Check presence and shape of every field, normalizing text
fn validate_entry(new: NewEntry) -> Result<(NaiveDate, String, f64, Option<String>)> {
    let date = new
        .date
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| SpendlogError::Validation("date is required".into()))?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
        SpendlogError::Validation(format!("invalid date '{}', expected YYYY-MM-DD", date))
    })?;

    let category = new
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| SpendlogError::Validation("category is required".into()))?
        .to_string();

    // Zero counts as missing, like an empty amount field
    let amount = new
        .amount
        .filter(|a| *a != 0.0)
        .ok_or_else(|| SpendlogError::Validation("amount is required".into()))?;
    if !amount.is_finite() {
        return Err(SpendlogError::Validation(
            "amount must be a finite number".into(),
        ));
    }
    if amount < 0.0 {
        return Err(SpendlogError::Validation(
            "amount must not be negative".into(),
        ));
    }

    let description = new
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    Ok((date, category, amount, description))
}

/// Time-derived id (epoch millis), bumped past every existing id
fn next_id(existing: impl Iterator<Item = u64>) -> Result<u64> {
    let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
    match existing.max() {
        Some(max) if max >= now => max
            .checked_add(1)
            .ok_or_else(|| SpendlogError::Store("id space exhausted".into())),
        _ => Ok(now),
    }
}
