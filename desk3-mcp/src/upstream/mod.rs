// Upstream client
//
// Performs the single outbound HTTP call behind every tool and resource
// invocation. Responses are parsed as JSON and handed back untouched;
// failures are never retried.

use std::time::Duration;
use reqwest::{Client, RequestBuilder};
use serde_json::{Map, Value};
use log::{error, info};

use crate::catalog::{HttpMethod, Operation};
use crate::config::Settings;
use crate::errors::UpstreamError;

/// Header carrying the Desk3 API key
pub const API_KEY_HEADER: &str = "X-DESK3_PRO_API_KEY";

/// Longest upstream error body echoed back to the caller
const MAX_ERROR_BODY: usize = 512;

/// HTTP client bound to one upstream base URL and API key
pub struct UpstreamClient {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl UpstreamClient {
    /// Create a client from the startup settings
    pub fn new(settings: &Settings) -> Result<Self, UpstreamError> {
        let mut builder = Client::builder()
            .user_agent(concat!("desk3-mcp/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = settings.upstream.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build().map_err(|e| UpstreamError::Transport {
            url: settings.upstream.base_url.clone(),
            message: format!("Failed to create HTTP client: {}", e),
        })?;

        Ok(Self {
            http_client,
            base_url: settings.upstream.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        })
    }

    /// Absolute URL for an operation path
    pub fn url_for(&self, path: &str) -> Result<String, UpstreamError> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        url::Url::parse(&raw)
            .map(String::from)
            .map_err(|e| UpstreamError::InvalidUrl(format!("{}: {}", raw, e)))
    }

    /// Invoke a catalog operation with already-validated parameters.
    ///
    /// GET operations send the parameters as the query string; POST
    /// operations send them as a JSON object body.
    pub async fn invoke(
        &self,
        operation: &Operation,
        params: &[(String, String)],
    ) -> Result<Value, UpstreamError> {
        match operation.method {
            HttpMethod::Get => self.request(HttpMethod::Get, operation.path, params, None).await,
            HttpMethod::Post => {
                let body: Map<String, Value> = params
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect();
                self.request(HttpMethod::Post, operation.path, &[], Some(&Value::Object(body)))
                    .await
            }
        }
    }

    /// Issue one request and parse the JSON response
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Value, UpstreamError> {
        let url = self.url_for(path)?;
        info!("Requesting {} {} params={:?} data={:?}", method, url, query, body);

        let request = match method {
            HttpMethod::Get => self.http_client.get(&url).query(query),
            HttpMethod::Post => {
                let request = self.http_client.post(&url);
                match body {
                    Some(body) => request.json(body),
                    None => request,
                }
            }
        };

        let result = self.send(request, &url).await;
        if let Err(e) = &result {
            error!("Error during {} {}: {}", method, url, e);
        }
        result
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Value, UpstreamError> {
        let response = request
            .header("Accepts", "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| UpstreamError::Transport {
            url: url.to_string(),
            message: format!("Failed to read response body: {}", e),
        })?;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                message: truncate(&text, MAX_ERROR_BODY),
            });
        }

        info!("Response {} for {}", status.as_u16(), url);

        serde_json::from_str(&text).map_err(|e| UpstreamError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::testing::settings_for;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_sends_api_key_and_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/price/getSuggestGas")
            .match_query(Matcher::UrlEncoded("chainid".into(), "1".into()))
            .match_header("x-desk3_pro_api_key", "test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"code":0,"data":{"fast":"12"}}"#)
            .expect(1)
            .create_async()
            .await;

        let client = UpstreamClient::new(&settings_for(&server.url())).unwrap();
        let catalog = Catalog::builtin().unwrap();
        let op = catalog.operations().iter().find(|op| op.id == "suggest_gas").unwrap();

        let value = client
            .invoke(op, &[("chainid".to_string(), "1".to_string())])
            .await
            .unwrap();

        assert_eq!(value, json!({"code": 0, "data": {"fast": "12"}}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/market/fear-greed")
            .with_status(500)
            .with_body("internal failure")
            .create_async()
            .await;

        let client = UpstreamClient::new(&settings_for(&server.url())).unwrap();
        let err = client
            .request(HttpMethod::Get, "/market/fear-greed", &[], None)
            .await
            .unwrap_err();

        match err {
            UpstreamError::Status { status, message, .. } => {
                assert_eq!(status, 500);
                assert_eq!(message, "internal failure");
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/market/rainbow")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = UpstreamClient::new(&settings_for(&server.url())).unwrap();
        let err = client
            .request(HttpMethod::Get, "/market/rainbow", &[], None)
            .await
            .unwrap_err();

        assert!(matches!(err, UpstreamError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/market/price")
            .match_header("x-desk3_pro_api_key", "test-key")
            .match_body(Matcher::Json(json!({"symbol": "BTCUSDT"})))
            .with_status(201)
            .with_body(r#"{"ok":true}"#)
            .create_async()
            .await;

        let client = UpstreamClient::new(&settings_for(&server.url())).unwrap();
        let value = client
            .request(
                HttpMethod::Post,
                "/market/price",
                &[],
                Some(&json!({"symbol": "BTCUSDT"})),
            )
            .await
            .unwrap();

        assert_eq!(value, json!({"ok": true}));
        mock.assert_async().await;
    }

    #[test]
    fn test_url_for_joins_base_and_path() {
        let client = UpstreamClient::new(&settings_for("https://mcp.desk3.io/v1/")).unwrap();
        assert_eq!(
            client.url_for("/market/price").unwrap(),
            "https://mcp.desk3.io/v1/market/price"
        );
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("héllo", 2), "h...");
    }
}
