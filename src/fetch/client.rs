use crate::error::{RefugeError, Result};
use crate::models::Record;
use crate::settings::FetchSettings;
use crate::utils::constants::{DIAGNOSTIC_PREVIEW_CHARS, PAGE_PARAM, PER_PAGE_PARAM};
use serde_json::Value;
use url::Url;

/// A decoded listing page
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Records(Vec<Record>),
    /// The body parsed as JSON but was not an array of objects
    Unexpected(Value),
}

impl Page {
    /// Decode a response body
    ///
    /// Invalid JSON is an error; valid JSON of the wrong shape is not.
    pub fn parse(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)?;

        match value {
            Value::Array(items) if items.iter().all(Value::is_object) => Ok(Page::Records(
                items.into_iter().filter_map(Record::from_value).collect(),
            )),
            other => Ok(Page::Unexpected(other)),
        }
    }
}

/// Pretty-printed JSON cut down to a diagnostic-sized preview
pub fn preview(value: &Value) -> String {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    pretty.chars().take(DIAGNOSTIC_PREVIEW_CHARS).collect()
}

/// HTTP access to the paginated restroom listing
pub struct RefugeClient {
    http: reqwest::Client,
    base_url: Url,
    per_page: u32,
}

impl RefugeClient {
    pub fn new(settings: &FetchSettings) -> Result<Self> {
        let base_url = Url::parse(&settings.base_url)?;
        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .user_agent(concat!("refuge-fetch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RefugeError::from_request(base_url.as_str(), e))?;

        Ok(Self {
            http,
            base_url,
            per_page: settings.per_page,
        })
    }

    /// `{base_url}?page={page}&per_page={per_page}`, keeping any existing query
    pub fn page_url(&self, page: u32) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair(PAGE_PARAM, &page.to_string())
            .append_pair(PER_PAGE_PARAM, &self.per_page.to_string());
        url
    }

    /// Download the raw body of one page
    ///
    /// Non-2xx statuses are reported as request errors.
    pub async fn fetch_page_body(&self, page: u32) -> Result<Vec<u8>> {
        let url = self.page_url(page);

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| RefugeError::from_request(url.as_str(), e))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| RefugeError::from_request(url.as_str(), e))?;

        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(base_url: &str) -> RefugeClient {
        RefugeClient::new(&FetchSettings::default().with_base_url(base_url)).unwrap()
    }

    #[test]
    fn test_page_url() {
        let client = client("https://www.refugerestrooms.org/api/v1/restrooms");
        assert_eq!(
            client.page_url(3).as_str(),
            "https://www.refugerestrooms.org/api/v1/restrooms?page=3&per_page=100"
        );
    }

    #[test]
    fn test_page_url_keeps_existing_query() {
        let client = client("https://example.org/api/restrooms?ada=true");
        assert_eq!(
            client.page_url(1).as_str(),
            "https://example.org/api/restrooms?ada=true&page=1&per_page=100"
        );
    }

    #[test]
    fn test_parse_record_page() -> Result<()> {
        let body = br#"[{"name": "A", "street": "1 St"}, {"name": "B", "street": "2 St"}]"#;

        match Page::parse(body)? {
            Page::Records(records) => {
                assert_eq!(records.len(), 2);
                assert_eq!(records[1].name(), "B");
            }
            other => panic!("expected records, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_parse_empty_page() -> Result<()> {
        assert_eq!(Page::parse(b"[]")?, Page::Records(Vec::new()));
        Ok(())
    }

    #[test]
    fn test_parse_unexpected_shapes() -> Result<()> {
        let error_body = br#"{"error": "rate limited"}"#;
        assert_eq!(
            Page::parse(error_body)?,
            Page::Unexpected(json!({"error": "rate limited"}))
        );

        assert!(matches!(Page::parse(b"[1, 2, 3]")?, Page::Unexpected(_)));
        assert!(matches!(Page::parse(b"\"text\"")?, Page::Unexpected(_)));
        Ok(())
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            Page::parse(b"<html>maintenance</html>"),
            Err(RefugeError::Json(_))
        ));
    }

    #[test]
    fn test_preview_is_truncated() {
        let long = json!({ "message": "x".repeat(2000) });
        let text = preview(&long);

        assert_eq!(text.chars().count(), DIAGNOSTIC_PREVIEW_CHARS);
        assert!(text.starts_with("{\n  \"message\""));
    }
}
