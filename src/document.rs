//! Section-keyed documents that flow through the pipeline.
//!
//! A document is a mapping from section title to an ordered list of items.
//! Section order is significant everywhere (it is the order the page is
//! rendered in), so documents are stored in a [`SectionMap`], which keeps
//! first-seen key order alongside the lookup table.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// Reserved section title for the article introduction.
pub const LEAD_SECTION: &str = "Lead";

/// Order-preserving map from section title to its items.
///
/// Inserting an existing title replaces its items but keeps its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMap<T> {
    order: Vec<String>,
    sections: HashMap<String, Vec<T>>,
}

impl<T> Default for SectionMap<T> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            sections: HashMap::new(),
        }
    }
}

impl<T> SectionMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains_key(&self, title: &str) -> bool {
        self.sections.contains_key(title)
    }

    pub fn get(&self, title: &str) -> Option<&[T]> {
        self.sections.get(title).map(Vec::as_slice)
    }

    /// Sets the items for `title`, returning the previous items if the
    /// section already existed.
    pub fn insert(&mut self, title: impl Into<String>, items: Vec<T>) -> Option<Vec<T>> {
        let title = title.into();
        if !self.sections.contains_key(&title) {
            self.order.push(title.clone());
        }
        self.sections.insert(title, items)
    }

    /// Returns the items for `title`, appending an empty section first if
    /// it does not exist yet.
    pub fn section_mut(&mut self, title: &str) -> &mut Vec<T> {
        if !self.sections.contains_key(title) {
            self.order.push(title.to_string());
        }
        self.sections.entry(title.to_string()).or_default()
    }

    /// Section titles in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// `(title, items)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.order.iter().filter_map(|title| {
            self.sections
                .get(title)
                .map(|items| (title.as_str(), items.as_slice()))
        })
    }

    /// Total number of items across all sections.
    pub fn total_items(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }
}

impl<T: Serialize> Serialize for SectionMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (title, items) in self.iter() {
            map.serialize_entry(title, items)?;
        }
        map.end()
    }
}

/// One translated paragraph together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphRecord {
    pub lang: String,
    pub original: String,
    pub translated: String,
    /// Zero-based position of the paragraph within its source section.
    pub idx: usize,
}

/// Article text as retrieved: section title to paragraph texts.
pub type RawDocument = SectionMap<String>;

/// Article after translation: one record per source paragraph.
pub type TranslatedDocument = SectionMap<ParagraphRecord>;

/// Two translated articles combined section by section.
pub type MergedDocument = SectionMap<ParagraphRecord>;
