//! JSON-over-GET adapter around the injected transport.
//!
//! Each call makes exactly one request and checks, in order: the transport
//! succeeded, the status is 200, the content type is `application/json`,
//! and the body parses. The first failing check decides the error.

use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::{BodyMode, ClientConfig};
use crate::error::QueryError;
use crate::transport::{Fetch, HttpRequest, HttpResponse};

/// Characters left as-is by JavaScript's `encodeURIComponent`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const JSON_MEDIA_TYPE: &str = "application/json";

/// Issues GET requests against the directory service and decodes JSON.
pub struct JsonAdapter {
    fetch: Arc<dyn Fetch>,
    base_url: String,
    headers: Vec<(String, String)>,
    body: BodyMode,
}

impl JsonAdapter {
    pub fn new(fetch: Arc<dyn Fetch>, config: &ClientConfig) -> Self {
        Self {
            fetch,
            base_url: config.normalized_base_url().to_string(),
            headers: config
                .headers
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
            body: config.body,
        }
    }

    /// Builds the absolute URL for `path` with percent-encoded query pairs.
    pub fn url(&self, path: &str, query: &[(&str, &str)]) -> String {
        let mut url = format!("{}{}", self.base_url, path);
        for (i, (key, value)) in query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.extend(utf8_percent_encode(key, QUERY_COMPONENT));
            url.push('=');
            url.extend(utf8_percent_encode(value, QUERY_COMPONENT));
        }
        url
    }

    /// Fetches `path` and returns the parsed JSON body.
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<serde_json::Value, QueryError> {
        let url = self.url(path, query);
        self.get_url(&url).await
    }

    /// Fetches `path` and decodes one top-level field of the body.
    ///
    /// A body that is not an object, lacks `field`, or whose field has the
    /// wrong shape is a [`QueryError::MalformedResponse`].
    pub async fn get_field<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        field: &str,
    ) -> Result<T, QueryError> {
        let url = self.url(path, query);
        let body = self.get_url(&url).await?;

        let value = match body {
            serde_json::Value::Object(mut map) => map.remove(field),
            _ => None,
        }
        .ok_or_else(|| QueryError::malformed(&url, format!("missing top-level field `{field}`")))
        .inspect_err(|err| warn!(%url, error = %err, "response rejected"))?;

        serde_json::from_value(value)
            .map_err(|e| QueryError::malformed(&url, format!("field `{field}`: {e}")))
            .inspect_err(|err| warn!(%url, error = %err, "response rejected"))
    }

    async fn get_url(&self, url: &str) -> Result<serde_json::Value, QueryError> {
        let request = HttpRequest {
            url: url.to_string(),
            headers: self.headers.clone(),
        };
        debug!(%url, "GET");

        let result = match self.fetch.fetch(request).await {
            Ok(response) => self.decode(url, response),
            Err(source) => Err(QueryError::Transport {
                url: url.to_string(),
                source,
            }),
        };
        result.inspect_err(|err| warn!(%url, error = %err, "request failed"))
    }

    fn decode(&self, url: &str, response: HttpResponse) -> Result<serde_json::Value, QueryError> {
        if response.status != 200 {
            return Err(QueryError::HttpStatus {
                url: url.to_string(),
                status: response.status,
            });
        }

        let content_type = response.header("content-type");
        if !content_type.is_some_and(is_json_media_type) {
            return Err(QueryError::UnexpectedContentType {
                url: url.to_string(),
                content_type: content_type.map(str::to_string),
            });
        }

        match self.body {
            BodyMode::Json => serde_json::from_slice(&response.body)
                .map_err(|e| QueryError::malformed(url, format!("invalid JSON: {e}"))),
            BodyMode::Text => {
                let text = std::str::from_utf8(&response.body)
                    .map_err(|e| QueryError::malformed(url, format!("body is not UTF-8: {e}")))?;
                serde_json::from_str(text)
                    .map_err(|e| QueryError::malformed(url, format!("invalid JSON: {e}")))
            }
        }
    }
}

// Parameters such as `; charset=utf-8` are allowed.
fn is_json_media_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|media| media.trim().eq_ignore_ascii_case(JSON_MEDIA_TYPE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockFetch;
    use serde_json::json;

    fn adapter(fetch: MockFetch, config: ClientConfig) -> (Arc<MockFetch>, JsonAdapter) {
        let fetch = Arc::new(fetch);
        let adapter = JsonAdapter::new(fetch.clone(), &config);
        (fetch, adapter)
    }

    #[test]
    fn url_encodes_like_encode_uri_component() {
        let (_, adapter) = adapter(MockFetch::new(), ClientConfig::new("https://dir.example/"));

        assert_eq!(
            adapter.url("/search", &[("q", "open source")]),
            "https://dir.example/search?q=open%20source"
        );
        assert_eq!(
            adapter.url("/search", &[("q", "a&b=c/d?é")]),
            "https://dir.example/search?q=a%26b%3Dc%2Fd%3F%C3%A9"
        );
        assert_eq!(
            adapter.url("/search", &[("q", "keep-_.!~*'()")]),
            "https://dir.example/search?q=keep-_.!~*'()"
        );
        assert_eq!(adapter.url("/applications", &[]), "https://dir.example/applications");
    }

    #[test]
    fn media_type_parameters_allowed() {
        assert!(is_json_media_type("application/json"));
        assert!(is_json_media_type("Application/JSON; charset=utf-8"));
        assert!(!is_json_media_type("text/html"));
        assert!(!is_json_media_type("application/jsonp"));
    }

    #[tokio::test]
    async fn configured_headers_are_sent() {
        let config = ClientConfig::new("https://dir.example").accept_json();
        let (fetch, adapter) = adapter(MockFetch::always(HttpResponse::json(&json!({}))), config);

        adapter.get("/applications", &[]).await.unwrap();

        let requests = fetch.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].header("accept"), Some("application/json"));
    }

    #[tokio::test]
    async fn no_headers_by_default() {
        let config = ClientConfig::new("https://dir.example");
        let (fetch, adapter) = adapter(MockFetch::always(HttpResponse::json(&json!({}))), config);

        adapter.get("/applications", &[]).await.unwrap();
        assert!(fetch.requests()[0].headers.is_empty());
    }

    #[tokio::test]
    async fn headers_are_sent_sorted_by_name() {
        let config = ClientConfig::new("https://dir.example")
            .with_header("X-Trace", "abc")
            .accept_json()
            .with_header("Authorization", "Bearer t");
        let (fetch, adapter) = adapter(MockFetch::always(HttpResponse::json(&json!({}))), config);

        adapter.get("/applications", &[]).await.unwrap();

        let names: Vec<String> = fetch.requests()[0]
            .headers
            .iter()
            .map(|(name, _)| name.clone())
            .collect();
        assert_eq!(names, vec!["Accept", "Authorization", "X-Trace"]);
    }

    #[tokio::test]
    async fn text_mode_parses_utf8_json() {
        let config = ClientConfig::new("https://dir.example").with_body_mode(BodyMode::Text);
        let response = HttpResponse::new(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{ "results": ["café", "naïve"] }"#);
        let (_, adapter) = adapter(MockFetch::always(response), config);

        let results: Vec<String> = adapter.get_field("/search", &[], "results").await.unwrap();
        assert_eq!(results, vec!["café", "naïve"]);
    }

    #[tokio::test]
    async fn text_mode_rejects_invalid_utf8() {
        let config = ClientConfig::new("https://dir.example").with_body_mode(BodyMode::Text);
        let response = HttpResponse::new(200)
            .with_header("content-type", "application/json")
            .with_body(vec![0xff, 0xfe]);
        let (_, adapter) = adapter(MockFetch::always(response), config);

        let err = adapter.get("/applications", &[]).await.unwrap_err();
        assert!(matches!(err, QueryError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn get_field_requires_the_field() {
        let config = ClientConfig::new("https://dir.example");
        let body = HttpResponse::json(&json!({ "somethingElse": [] }));
        let (_, adapter) = adapter(MockFetch::always(body), config);

        let err = adapter
            .get_field::<Vec<serde_json::Value>>("/applications", &[], "applicationSummaries")
            .await
            .unwrap_err();
        match err {
            QueryError::MalformedResponse { reason, .. } => {
                assert!(reason.contains("applicationSummaries"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
