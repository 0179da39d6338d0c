//! Batched translation of a whole article.
//!
//! The article is flattened into `(section, index, text)` items, cut into
//! batches no larger than the service accepts, translated batch by batch,
//! and reassembled by section using each item's original index.

use log::debug;

use super::client::BatchTranslate;
use super::language::normalize_target_lang;
use crate::document::{ParagraphRecord, RawDocument, TranslatedDocument};
use crate::error::{Error, Result};

/// Maximum number of texts per translation request.
pub const MAX_BATCH_ITEMS: usize = 50;

/// A paragraph waiting for translation, with its position in the source.
#[derive(Debug)]
struct PendingParagraph<'a> {
    section: &'a str,
    index: usize,
    text: &'a str,
}

/// Translates every paragraph of a [`RawDocument`] into one target language.
pub struct ArticleTranslator<'a, T> {
    translator: &'a T,
    target_lang: String,
}

impl<'a, T: BatchTranslate> ArticleTranslator<'a, T> {
    pub fn new(translator: &'a T, target_lang: &str) -> Self {
        Self {
            translator,
            target_lang: normalize_target_lang(target_lang),
        }
    }

    /// Translates `document` from `source_lang`.
    ///
    /// Batches are sent strictly one after another. The first failing batch
    /// aborts the whole article; no partial document is returned.
    pub async fn translate(
        &self,
        document: &RawDocument,
        source_lang: &str,
    ) -> Result<TranslatedDocument> {
        let mut translated = TranslatedDocument::new();
        for title in document.keys() {
            translated.insert(title, Vec::new());
        }

        let pending = flatten(document);
        if pending.is_empty() {
            return Ok(translated);
        }

        let batch_count = pending.len().div_ceil(MAX_BATCH_ITEMS);
        for (batch_index, batch) in pending.chunks(MAX_BATCH_ITEMS).enumerate() {
            debug!(
                "translating batch {}/{batch_count} ({} paragraph(s), {source_lang} -> {})",
                batch_index + 1,
                batch.len(),
                self.target_lang
            );

            let texts: Vec<String> = batch.iter().map(|item| item.text.to_string()).collect();
            let outputs = self
                .translator
                .translate_many(&texts, source_lang, &self.target_lang)
                .await?;

            if outputs.len() != batch.len() {
                return Err(Error::decode(format!(
                    "batch {} returned {} translation(s) for {} text(s)",
                    batch_index + 1,
                    outputs.len(),
                    batch.len()
                )));
            }

            for (item, output) in batch.iter().zip(outputs) {
                translated.section_mut(item.section).push(ParagraphRecord {
                    lang: self.target_lang.clone(),
                    original: item.text.to_string(),
                    translated: output,
                    idx: item.index,
                });
            }
        }

        Ok(translated)
    }
}

fn flatten(document: &RawDocument) -> Vec<PendingParagraph<'_>> {
    document
        .iter()
        .flat_map(|(section, paragraphs)| {
            paragraphs
                .iter()
                .enumerate()
                .map(move |(index, text)| PendingParagraph {
                    section,
                    index,
                    text,
                })
        })
        .collect()
}
