//! Language codes accepted by the translation service.

use crate::error::{Error, Result};
use crate::ui::Style;

/// Languages that can be translated from (ISO 639-1) and their names.
///
/// Wikipedia editions use `no` for Norwegian Bokmål where the translation
/// service expects `nb`; both are accepted.
pub const SOURCE_LANGUAGES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("bg", "Bulgarian"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("nb", "Norwegian (Bokmål)"),
    ("no", "Norwegian (Bokmål)"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sv", "Swedish"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("zh", "Chinese"),
];

/// Regional target variants in addition to the plain source codes.
pub const TARGET_VARIANTS: &[(&str, &str)] = &[
    ("en-gb", "English (British)"),
    ("en-us", "English (American)"),
    ("pt-br", "Portuguese (Brazilian)"),
    ("pt-pt", "Portuguese (European)"),
    ("zh-hans", "Chinese (Simplified)"),
    ("zh-hant", "Chinese (Traditional)"),
];

/// Default target language for both articles.
pub const DEFAULT_TARGET_LANGUAGE: &str = "EN-US";

/// Normalizes a source language code to the casing the service expects.
///
/// Source codes carry no region, so `pt-BR` becomes `PT`.
pub fn normalize_source_lang(code: &str) -> String {
    let base = code.trim().split(['-', '_']).next().unwrap_or_default();
    if base.eq_ignore_ascii_case("no") {
        return "NB".to_string();
    }
    base.to_ascii_uppercase()
}

/// Normalizes a target language code, keeping any regional variant.
pub fn normalize_target_lang(code: &str) -> String {
    code.trim().replace('_', "-").to_ascii_uppercase()
}

fn is_source_language(code: &str) -> bool {
    SOURCE_LANGUAGES
        .iter()
        .any(|(known, _)| known.eq_ignore_ascii_case(code))
}

fn is_target_language(code: &str) -> bool {
    let code = code.replace('_', "-");
    (is_source_language(&code) && !code.eq_ignore_ascii_case("no"))
        || TARGET_VARIANTS
            .iter()
            .any(|(known, _)| known.eq_ignore_ascii_case(&code))
}

/// Prints all supported language codes to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Source languages (article language)"));
    for (code, name) in SOURCE_LANGUAGES {
        println!("  {:8} {}", Style::code(code), Style::secondary(name));
    }
    println!();
    println!("{}", Style::header("Additional target variants"));
    for (code, name) in TARGET_VARIANTS {
        println!("  {:8} {}", Style::code(code), Style::secondary(name));
    }
}

/// Validates that `lang` can be used as an article (source) language.
///
/// # Errors
///
/// Returns an error if the code is not in the supported list.
pub fn validate_source_language(lang: &str) -> Result<()> {
    if is_source_language(lang.trim()) {
        Ok(())
    } else {
        Err(Error::invalid_input(format!(
            "Invalid source language code: '{lang}'\n\n\
             Valid codes (ISO 639-1): es, fr, de, it, ja, ...\n\
             Run 'wikimerge languages' to see all supported codes."
        )))
    }
}

/// Validates that `lang` can be used as the target language.
///
/// # Errors
///
/// Returns an error if the code is neither a plain language nor a known variant.
pub fn validate_target_language(lang: &str) -> Result<()> {
    if is_target_language(lang.trim()) {
        Ok(())
    } else {
        Err(Error::invalid_input(format!(
            "Invalid target language code: '{lang}'\n\n\
             Valid codes: en-us, en-gb, de, fr, pt-br, ...\n\
             Run 'wikimerge languages' to see all supported codes."
        )))
    }
}
