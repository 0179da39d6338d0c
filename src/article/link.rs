use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::{Error, Result};

fn parse_wikipedia_url(raw: &str) -> Result<Url> {
    if !raw.contains("://") {
        return Err(Error::invalid_input(
            "Expected a full Wikipedia article URL: http(s)://...",
        ));
    }

    let url = Url::parse(raw.trim())
        .map_err(|e| Error::invalid_input(format!("Malformed URL '{raw}': {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::invalid_input("Scheme must be http or https"));
    }

    let host = url.host_str().unwrap_or_default();
    if host != "wikipedia.org" && !host.ends_with(".wikipedia.org") {
        return Err(Error::invalid_input(
            "Host must be wikipedia.org or a subdomain",
        ));
    }

    Ok(url)
}

/// Extracts the article title from a Wikipedia link.
///
/// `https://es.wikipedia.org/wiki/Inteligencia_artificial` yields
/// `Inteligencia artificial`.
pub fn url_to_title(raw: &str) -> Result<String> {
    let url = parse_wikipedia_url(raw)?;

    let path = url.path();
    if !path.starts_with("/wiki/") {
        return Err(Error::invalid_input("Path must begin with /wiki/"));
    }

    let segments: Vec<&str> = path
        .trim_end_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();
    let Some(last) = segments.get(1..).and_then(<[&str]>::last) else {
        return Err(Error::invalid_input(
            "URL does not contain an article title",
        ));
    };

    let decoded = percent_decode_str(last)
        .decode_utf8()
        .map_err(|e| Error::invalid_input(format!("Article title is not valid UTF-8: {e}")))?;

    let title = decoded.replace('_', " ").trim().to_string();
    if title.is_empty() {
        return Err(Error::invalid_input(
            "URL does not contain an article title",
        ));
    }
    Ok(title)
}

/// Returns the edition language of a Wikipedia link, if the host names one.
///
/// `es.wikipedia.org` and `es.m.wikipedia.org` both yield `es`.
pub fn language_from_url(raw: &str) -> Option<String> {
    let url = parse_wikipedia_url(raw).ok()?;
    let host = url.host_str()?;
    let label = host.strip_suffix(".wikipedia.org")?.split('.').next()?;

    let is_code = !label.is_empty() && label.chars().all(|c| c.is_ascii_lowercase() || c == '-');
    if !is_code || matches!(label, "www" | "m") {
        return None;
    }
    Some(label.to_string())
}
