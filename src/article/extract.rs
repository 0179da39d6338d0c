use crate::document::{LEAD_SECTION, RawDocument};

/// Splits text into paragraphs on blank lines.
///
/// Each paragraph is trimmed and its line breaks joined with spaces; empty
/// blocks are dropped.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| block.replace('\n', " "))
        .collect()
}

/// Returns the title of a `== Heading ==` line (levels 2 to 6).
fn heading_title(line: &str) -> Option<&str> {
    let line = line.trim();
    let level = line.bytes().take_while(|b| *b == b'=').count();
    if !(2..=6).contains(&level) || line.len() <= level * 2 {
        return None;
    }

    let closing = line.bytes().rev().take_while(|b| *b == b'=').count();
    if closing != level {
        return None;
    }

    let title = line[level..line.len() - level].trim();
    (!title.is_empty()).then_some(title)
}

/// Builds a [`RawDocument`] from a plain-text extract with wiki-style headings.
///
/// Text before the first heading becomes the `Lead` section. Sections
/// without paragraphs are left out, and a heading that repeats adds to the
/// section it first opened.
pub fn parse_extract(text: &str) -> RawDocument {
    let mut document = RawDocument::new();
    let mut current = LEAD_SECTION.to_string();
    let mut buffer = String::new();

    for line in text.lines() {
        if let Some(title) = heading_title(line) {
            flush_section(&mut document, &current, &buffer);
            current = title.to_string();
            buffer.clear();
        } else {
            buffer.push_str(line);
            buffer.push('\n');
        }
    }
    flush_section(&mut document, &current, &buffer);

    document
}

fn flush_section(document: &mut RawDocument, title: &str, text: &str) {
    let paragraphs = split_paragraphs(text);
    if !paragraphs.is_empty() {
        document.section_mut(title).extend(paragraphs);
    }
}
