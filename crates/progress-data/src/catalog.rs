//! Book catalog: the distinct titles found in a clippings export.

use std::collections::HashSet;
use std::path::Path;

use progress_core::error::Result;
use progress_core::models::ClippingRecord;
use progress_core::timestamp::MonthTable;
use tracing::debug;

use crate::reader::open_records;

/// Unique book titles in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookCatalog {
    titles: Vec<String>,
    seen: HashSet<String>,
}

impl BookCatalog {
    /// Build a catalog from a record stream, stopping at the first error.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<ClippingRecord>>,
    {
        let mut catalog = Self::default();
        for record in records {
            catalog.insert(record?.book_title);
        }
        Ok(catalog)
    }

    /// Scan `path` and collect its titles.
    pub fn load(path: &Path, months: MonthTable) -> Result<Self> {
        let catalog = Self::from_records(open_records(path, months)?)?;
        debug!(
            "Catalog of {} built with {} books",
            path.display(),
            catalog.len()
        );
        Ok(catalog)
    }

    /// Add `title` unless it is already present.
    fn insert(&mut self, title: String) {
        if self.seen.insert(title.clone()) {
            self.titles.push(title);
        }
    }

    pub fn contains(&self, title: &str) -> bool {
        self.seen.contains(title)
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn into_titles(self) -> Vec<String> {
        self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// List every book with at least one record in `path`, in first-seen order.
pub fn list_books(path: &Path) -> Result<Vec<String>> {
    list_books_with(path, MonthTable::Standard)
}

/// [`list_books`] with an explicit month table.
pub fn list_books_with(path: &Path, months: MonthTable) -> Result<Vec<String>> {
    Ok(BookCatalog::load(path, months)?.into_titles())
}
