use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::language::{normalize_source_lang, normalize_target_lang};
use crate::error::{Error, Result};

/// Largest text `translate_one` will submit, in characters.
pub const MAX_TEXT_CHARS: usize = 128 * 1024;

/// DeepL API Free endpoint. Pro accounts use `https://api.deepl.com`.
pub const DEFAULT_ENDPOINT: &str = "https://api-free.deepl.com";

/// Stands in for an error body that could not be read.
const UNREADABLE_BODY: &str = "<unreadable body>";

/// Translates an ordered batch of texts in a single request.
///
/// This is the seam the article translator batches against; results must
/// come back in input order, one per text.
pub trait BatchTranslate {
    fn translate_many(
        &self,
        texts: &[String],
        source_lang: &str,
        target_lang: &str,
    ) -> impl Future<Output = Result<Vec<String>>>;
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: Vec<&'a str>,
    source_lang: String,
    target_lang: String,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

/// Client for the DeepL v2 text translation endpoint.
///
/// Every public call performs at most one HTTP request and never retries.
pub struct TranslationClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl TranslationClient {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
        }
    }

    /// Translates a single text.
    ///
    /// Whitespace-only input short-circuits to an empty string without
    /// contacting the service.
    pub async fn translate_one(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String> {
        if text.is_empty() {
            return Err(Error::invalid_input("text to translate is empty"));
        }
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let len = text.chars().count();
        if len > MAX_TEXT_CHARS {
            return Err(Error::InputTooLarge {
                len,
                max: MAX_TEXT_CHARS,
            });
        }

        self.request(vec![text], source_lang, target_lang)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::decode("response contained no translations"))
    }

    /// Translates a batch of texts, preserving order.
    ///
    /// Every text is held to [`MAX_TEXT_CHARS`]. The caller is responsible
    /// for the service's per-request item limit.
    pub async fn translate_many(
        &self,
        texts: &[String],
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Vec<String>> {
        let texts: Vec<&str> = texts.iter().map(String::as_str).collect();
        validate_batch(&texts)?;
        self.request(texts, source_lang, target_lang).await
    }

    /// Like [`Self::translate_many`], with missing entries sent as empty strings.
    pub async fn translate_many_opt(
        &self,
        texts: &[Option<&str>],
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Vec<String>> {
        let texts: Vec<&str> = texts.iter().map(|text| text.unwrap_or_default()).collect();
        validate_batch(&texts)?;
        self.request(texts, source_lang, target_lang).await
    }

    async fn request(
        &self,
        texts: Vec<&str>,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Vec<String>> {
        let url = format!("{}/v2/translate", self.endpoint.trim_end_matches('/'));
        let expected = texts.len();

        let body = TranslateRequest {
            text: texts,
            source_lang: normalize_source_lang(source_lang),
            target_lang: normalize_target_lang(target_lang),
        };
        debug!(
            "POST {url}: {expected} text(s), {} -> {}",
            body.source_lang, body.target_lang
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|source| Error::Connection {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response, &url).await;
            return Err(Error::Service {
                status: status.as_u16(),
                body,
            });
        }

        let payload = response
            .text()
            .await
            .map_err(|source| Error::Connection { url, source })?;

        parse_response(&payload, expected)
    }
}

impl BatchTranslate for TranslationClient {
    async fn translate_many(
        &self,
        texts: &[String],
        source_lang: &str,
        target_lang: &str,
    ) -> Result<Vec<String>> {
        Self::translate_many(self, texts, source_lang, target_lang).await
    }
}

/// Reads the body of a non-success response for the error message.
pub(crate) async fn error_body(response: reqwest::Response, url: &str) -> String {
    response.text().await.unwrap_or_else(|e| {
        debug!("failed to read error body from {url}: {e}");
        UNREADABLE_BODY.to_string()
    })
}

fn validate_batch(texts: &[&str]) -> Result<()> {
    if texts.is_empty() {
        return Err(Error::invalid_input("no texts to translate"));
    }
    if let Some(len) = texts
        .iter()
        .map(|text| text.chars().count())
        .find(|len| *len > MAX_TEXT_CHARS)
    {
        return Err(Error::InputTooLarge {
            len,
            max: MAX_TEXT_CHARS,
        });
    }
    if texts.iter().all(|text| text.trim().is_empty()) {
        return Err(Error::invalid_input(
            "all texts to translate are empty or whitespace",
        ));
    }
    Ok(())
}

fn parse_response(payload: &str, expected: usize) -> Result<Vec<String>> {
    let response: TranslateResponse =
        serde_json::from_str(payload).map_err(|e| Error::decode(e.to_string()))?;

    if response.translations.len() != expected {
        return Err(Error::decode(format!(
            "expected {expected} translation(s), got {}",
            response.translations.len()
        )));
    }

    Ok(response.translations.into_iter().map(|t| t.text).collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn offline_client() -> TranslationClient {
        // Nothing listens here; these calls must resolve before any request.
        TranslationClient::new("http://127.0.0.1:9".to_string(), "test".to_string())
    }

    #[test]
    fn test_parse_response_in_order() {
        let payload = r#"{"translations":[
            {"detected_source_language":"ES","text":"Hello"},
            {"detected_source_language":"ES","text":"World"}
        ]}"#;
        let parsed = parse_response(payload, 2).unwrap();
        assert_eq!(parsed, ["Hello", "World"]);
    }

    #[test]
    fn test_parse_response_length_mismatch() {
        let payload = r#"{"translations":[{"text":"Hello"}]}"#;
        let err = parse_response(payload, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_parse_response_missing_field() {
        let err = parse_response(r#"{"message":"nope"}"#, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_parse_response_not_json() {
        let err = parse_response("<html>oops</html>", 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_request_body_shape() {
        let body = TranslateRequest {
            text: vec!["Hola", ""],
            source_lang: normalize_source_lang("es"),
            target_lang: normalize_target_lang("en-us"),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "text": ["Hola", ""],
                "source_lang": "ES",
                "target_lang": "EN-US"
            })
        );
    }

    #[tokio::test]
    async fn test_translate_one_whitespace_short_circuits() {
        let result = offline_client().translate_one("   ", "es", "en-us").await;
        assert_eq!(result.unwrap(), "");
    }

    #[tokio::test]
    async fn test_translate_one_empty_is_invalid() {
        let err = offline_client()
            .translate_one("", "es", "en-us")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_translate_one_too_large() {
        let text = "a".repeat(MAX_TEXT_CHARS + 1);
        let err = offline_client()
            .translate_one(&text, "es", "en-us")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputTooLarge);
    }

    #[tokio::test]
    async fn test_translate_many_rejects_empty_batch() {
        let err = offline_client()
            .translate_many(&[], "es", "en-us")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_translate_many_rejects_all_whitespace() {
        let texts = vec![" ".to_string(), "\n\t".to_string()];
        let err = offline_client()
            .translate_many(&texts, "es", "en-us")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_translate_many_oversized_text_fails_before_request() {
        let texts = vec!["Hola".to_string(), "a".repeat(MAX_TEXT_CHARS + 1)];
        let err = offline_client()
            .translate_many(&texts, "es", "en-us")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputTooLarge);
    }

    #[test]
    fn test_validate_batch_accepts_text_at_the_limit() {
        let text = "a".repeat(MAX_TEXT_CHARS);
        assert!(validate_batch(&[text.as_str(), ""]).is_ok());
    }

    #[tokio::test]
    async fn test_translate_many_opt_oversized_text_fails_before_request() {
        let text = "é".repeat(MAX_TEXT_CHARS + 1);
        let err = offline_client()
            .translate_many_opt(&[Some(text.as_str()), None], "es", "en-us")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputTooLarge);
    }

    #[tokio::test]
    async fn test_translate_many_opt_rejects_only_missing_entries() {
        let err = offline_client()
            .translate_many_opt(&[None, None], "es", "en-us")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
