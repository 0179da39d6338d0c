//! Static HTML rendering of a merged document.
//!
//! The page is self-contained: the stylesheet is inlined and every piece of
//! article text is escaped here, since the core passes text through as-is.

use anyhow::Result;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::document::MergedDocument;
use crate::fs::atomic_write;

const TEMPLATE: &str = include_str!("../templates/article.html");
const STYLESHEET: &str = include_str!("../templates/wikipedia-style.css");

/// File name used when no output name is given.
pub const DEFAULT_OUTPUT_FILE: &str = "merged_article.html";

/// Works out where the page is written.
///
/// Empty names fall back to [`DEFAULT_OUTPUT_FILE`] and absolute paths are
/// kept. Anything else is placed in `output_dir` by file name. A missing
/// extension becomes `.html`.
pub fn resolve_output_path(outfile: &str, output_dir: &Path) -> PathBuf {
    let outfile = outfile.trim();
    if outfile.is_empty() {
        return output_dir.join(DEFAULT_OUTPUT_FILE);
    }

    let mut path = PathBuf::from(outfile);
    if path.extension().is_none() {
        path.set_extension("html");
    }
    if path.is_absolute() {
        return path;
    }

    path.file_name()
        .map_or_else(|| output_dir.join(DEFAULT_OUTPUT_FILE), |name| output_dir.join(name))
}

/// Escapes text for use in HTML content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Substitutes `{{name}}` placeholders in one pass, so values are never
/// re-scanned for placeholders.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = &after[..end];
        match values.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

fn page_lang(merged: &MergedDocument) -> String {
    merged
        .iter()
        .flat_map(|(_, records)| records.first())
        .next()
        .and_then(|record| record.lang.split('-').next())
        .filter(|lang| !lang.is_empty())
        .map_or_else(|| "en".to_string(), str::to_ascii_lowercase)
}

/// Renders the complete page.
pub fn render_document(title: &str, merged: &MergedDocument) -> String {
    let mut toc = String::new();
    let mut sections = String::new();

    for (position, (section, records)) in merged.iter().enumerate() {
        let anchor = format!("section-{}", position + 1);
        let heading = escape_html(section);

        let _ = writeln!(
            toc,
            "        <li><a href=\"#{anchor}\">{heading}</a></li>"
        );

        let _ = writeln!(sections, "    <section id=\"{anchor}\">");
        let _ = writeln!(sections, "      <h2>{heading}</h2>");
        for record in records {
            let _ = writeln!(
                sections,
                "      <p class=\"para\" data-lang=\"{lang}\" data-idx=\"{idx}\" title=\"{original}\">\
                 <span class=\"lang-badge\">{lang}</span>{translated}</p>",
                lang = escape_html(&record.lang),
                idx = record.idx,
                original = escape_html(&record.original),
                translated = escape_html(&record.translated),
            );
        }
        let _ = writeln!(sections, "    </section>");
    }

    let title = escape_html(title);
    let lang = page_lang(merged);
    fill_template(
        TEMPLATE,
        &[
            ("title", title.as_str()),
            ("lang", lang.as_str()),
            ("generator", concat!("wikimerge ", env!("CARGO_PKG_VERSION"))),
            ("stylesheet", STYLESHEET),
            ("toc", toc.trim_end_matches('\n')),
            ("sections", sections.trim_end_matches('\n')),
        ],
    )
}

/// Renders `merged` and writes it to `out_path`.
///
/// The file only appears once fully written.
pub fn render_html(title: &str, merged: &MergedDocument, out_path: &Path) -> Result<()> {
    let html = render_document(title, merged);
    atomic_write(out_path, &html)
}
