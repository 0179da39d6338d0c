//! Combining two translated articles into one document.
//!
//! Section order: `Lead` first when either side has it, then the first
//! document's sections in order, then sections only the second document has.
//! Within a section, the first document's records come before the second's.
//! Titles are matched exactly; records are copied, never renumbered or
//! deduplicated.

use log::debug;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

use crate::document::{LEAD_SECTION, MergedDocument, ParagraphRecord, TranslatedDocument};
use crate::error::{Error, Result};

/// Which input of a merge a problem was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => f.write_str("first"),
            Self::Second => f.write_str("second"),
        }
    }
}

/// Merges two translated documents. The inputs are left untouched.
pub fn merge(first: &TranslatedDocument, second: &TranslatedDocument) -> MergedDocument {
    let mut titles: Vec<&str> = Vec::with_capacity(first.len() + second.len());
    if first.contains_key(LEAD_SECTION) || second.contains_key(LEAD_SECTION) {
        titles.push(LEAD_SECTION);
    }
    for title in first.keys().chain(second.keys()) {
        if title != LEAD_SECTION && !titles.contains(&title) {
            titles.push(title);
        }
    }

    let mut merged = MergedDocument::new();
    for title in titles {
        let records: Vec<ParagraphRecord> = first
            .get(title)
            .into_iter()
            .chain(second.get(title))
            .flatten()
            .cloned()
            .collect();
        merged.insert(title, records);
    }

    debug!(
        "merged {} + {} section(s) into {} ({} paragraph(s))",
        first.len(),
        second.len(),
        merged.len(),
        merged.total_items()
    );
    merged
}

/// Merges two documents given as untyped JSON.
///
/// Each input must be an object mapping section titles to arrays of
/// paragraph records; anything else is rejected as invalid input naming
/// the offending section and side.
pub fn merge_json(first: &Value, second: &Value) -> Result<MergedDocument> {
    let first = document_from_json(first, Side::First)?;
    let second = document_from_json(second, Side::Second)?;
    Ok(merge(&first, &second))
}

/// Validates and converts one JSON document.
pub fn document_from_json(value: &Value, side: Side) -> Result<TranslatedDocument> {
    let sections = match value {
        Value::Null => {
            return Err(Error::invalid_input(format!("{side} document is missing")));
        }
        Value::Object(sections) => sections,
        _ => {
            return Err(Error::invalid_input(format!(
                "{side} document is not a mapping of sections"
            )));
        }
    };

    let mut document = TranslatedDocument::new();
    for (title, paragraphs) in sections {
        let Some(items) = paragraphs.as_array() else {
            return Err(Error::invalid_input(format!(
                "section '{title}' in {side} document is not a list"
            )));
        };

        let mut records = Vec::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if !item.is_object() {
                return Err(Error::invalid_input(format!(
                    "paragraph {position} in section '{title}' of {side} document is not a record"
                )));
            }
            let record = ParagraphRecord::deserialize(item).map_err(|e| {
                Error::invalid_input(format!(
                    "paragraph {position} in section '{title}' of {side} document is malformed: {e}"
                ))
            })?;
            records.push(record);
        }
        document.insert(title.clone(), records);
    }

    Ok(document)
}
