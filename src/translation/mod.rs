mod article;
mod client;
mod language;

pub use article::{ArticleTranslator, MAX_BATCH_ITEMS};
pub(crate) use client::error_body;
pub use client::{BatchTranslate, DEFAULT_ENDPOINT, MAX_TEXT_CHARS, TranslationClient};
pub use language::{
    DEFAULT_TARGET_LANGUAGE, SOURCE_LANGUAGES, TARGET_VARIANTS, normalize_source_lang,
    normalize_target_lang, print_languages, validate_source_language, validate_target_language,
};
