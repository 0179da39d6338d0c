use log::debug;
use reqwest::Client;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use url::Url;

use super::extract::parse_extract;
use crate::document::RawDocument;
use crate::error::{Error, Result};
use crate::translation::error_body;

pub const DEFAULT_USER_AGENT: &str = concat!("Wikimerge/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Query,
}

#[derive(Debug, Deserialize)]
struct Query {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    extract: Option<String>,
}

/// Fetches article text through the MediaWiki Action API.
pub struct WikipediaClient {
    client: Client,
    user_agent: String,
    base_url: Option<String>,
}

impl WikipediaClient {
    pub fn new(user_agent: String) -> Self {
        Self {
            client: Client::new(),
            user_agent,
            base_url: None,
        }
    }

    /// Sends every request to `base_url` instead of `https://<lang>.wikipedia.org`.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    fn api_url(&self, lang: &str) -> String {
        self.base_url.as_ref().map_or_else(
            || format!("https://{lang}.wikipedia.org/w/api.php"),
            |base| format!("{}/w/api.php", base.trim_end_matches('/')),
        )
    }

    /// Retrieves `title` from the `lang` edition as a [`RawDocument`].
    pub async fn get_article(&self, lang: &str, title: &str) -> Result<RawDocument> {
        let lang = lang.trim().to_ascii_lowercase();
        let title = title.trim();

        if lang.is_empty() || !lang.chars().all(|c| c.is_ascii_lowercase() || c == '-') {
            return Err(Error::invalid_input(format!(
                "Invalid Wikipedia language code: '{lang}'"
            )));
        }
        if title.is_empty() {
            return Err(Error::invalid_input("Article title is empty"));
        }

        let url = Url::parse_with_params(
            &self.api_url(&lang),
            &[
                ("action", "query"),
                ("prop", "extracts"),
                ("explaintext", "1"),
                ("exsectionformat", "wiki"),
                ("redirects", "1"),
                ("format", "json"),
                ("formatversion", "2"),
                ("titles", title),
            ],
        )
        .map_err(|e| Error::invalid_input(format!("Cannot build request URL: {e}")))?;

        debug!("GET {url}");

        let response = self
            .client
            .get(url.clone())
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|source| Error::Connection {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response, url.as_str()).await;
            return Err(Error::Service {
                status: status.as_u16(),
                body,
            });
        }

        let payload = response.text().await.map_err(|source| Error::Connection {
            url: url.to_string(),
            source,
        })?;

        let extract = parse_query_response(&payload, title)?;
        let document = parse_extract(&extract);
        debug!(
            "fetched '{title}' ({lang}): {} section(s), {} paragraph(s)",
            document.len(),
            document.total_items()
        );
        Ok(document)
    }
}

fn parse_query_response(payload: &str, title: &str) -> Result<String> {
    let response: QueryResponse =
        serde_json::from_str(payload).map_err(|e| Error::decode(e.to_string()))?;

    let page = response
        .query
        .pages
        .into_iter()
        .next()
        .ok_or_else(|| Error::decode("query returned no pages"))?;

    if page.missing || page.invalid {
        return Err(Error::invalid_input(format!("Article not found: {title}")));
    }

    page.extract
        .ok_or_else(|| Error::decode("page has no extract"))
}
