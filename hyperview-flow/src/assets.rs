use crate::ApiClient;
use hyperview_core::{AccessToken, AssetPage, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, info};

/// Asset list endpoint, relative to the instance URL.
pub const ASSETS_PATH: &str = "/api/asset/assets";

/// First page of CRAC units, sorted by id.
static QUERY: [(&str, &str); 5] = [
    ("assetType", "crac"),
    ("includeDimensions", "false"),
    ("(after)", "0"),
    ("(limit)", "10"),
    ("(sort)", "+Id"),
];

/// Fetches one page of assets.
///
/// The query is fixed: at most 10 CRAC assets starting at offset 0. Further
/// pages are never requested.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetLister;

impl AssetLister {
    /// Creates the lister.
    pub fn new() -> Self {
        Self
    }

    /// The query parameters, in the order they are sent.
    pub fn query_params(&self) -> &'static [(&'static str, &'static str)] {
        &QUERY
    }

    /// The encoded query string. Keys and values are form-urlencoded one by one.
    pub fn query_string(&self) -> String {
        self.query_params()
            .iter()
            .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Full URL of the asset list request.
    pub fn url(&self, client: &ApiClient) -> String {
        format!("{}?{}", client.endpoint(ASSETS_PATH), self.query_string())
    }

    /// Requests the asset page. The body must carry `_metadata` and `data`.
    pub async fn list(&self, client: &ApiClient, token: &AccessToken) -> Result<AssetPage> {
        let url = self.url(client);
        info!("Requesting asset list from: {}", url);

        let request = client
            .http()
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, token.bearer());

        let page: AssetPage = client.send_json(request, "asset list").await?;
        debug!(
            metadata = %serde_json::Value::Object(page.metadata.clone()),
            assets = page.data.len(),
            "Asset list received"
        );

        Ok(page)
    }
}

fn encode(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperview_core::HyperviewError;
    use mockito::{Matcher, Server};

    #[test]
    fn test_query_string_encodes_each_pair() {
        assert_eq!(
            AssetLister::new().query_string(),
            "assetType=crac&includeDimensions=false&%28after%29=0&%28limit%29=10&%28sort%29=%2BId"
        );
    }

    #[test]
    fn test_query_params_order() {
        let keys: Vec<&str> = AssetLister::new()
            .query_params()
            .iter()
            .map(|(key, _)| *key)
            .collect();
        assert_eq!(
            keys,
            ["assetType", "includeDimensions", "(after)", "(limit)", "(sort)"]
        );
    }

    #[test]
    fn test_url() {
        let client = ApiClient::new("https://example.hyperviewhq.com").unwrap();
        let url = AssetLister::new().url(&client);
        assert!(url.starts_with("https://example.hyperviewhq.com/api/asset/assets?assetType=crac&"));
    }

    #[tokio::test]
    async fn test_list_sends_bearer_and_fixed_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/asset/assets")
            .match_header("authorization", "Bearer abc123")
            .match_header("content-type", "application/json")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("assetType".into(), "crac".into()),
                Matcher::UrlEncoded("includeDimensions".into(), "false".into()),
                Matcher::UrlEncoded("(after)".into(), "0".into()),
                Matcher::UrlEncoded("(limit)".into(), "10".into()),
                Matcher::UrlEncoded("(sort)".into(), "+Id".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"_metadata": {"total": 1}, "data": [{"id": "A1", "name": "CRAC 1"}]}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url()).unwrap();
        let page = AssetLister::new()
            .list(&client, &AccessToken::new("abc123"))
            .await
            .unwrap();

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].id, "A1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_data_is_parse_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/asset/assets")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"_metadata": {}}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url()).unwrap();
        let err = AssetLister::new()
            .list(&client, &AccessToken::new("t"))
            .await
            .unwrap_err();
        assert!(matches!(err, HyperviewError::Parse(_)));
    }

    #[tokio::test]
    async fn test_server_error_keeps_status_and_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/asset/assets")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("upstream unavailable")
            .create_async()
            .await;

        let client = ApiClient::new(server.url()).unwrap();
        let err = AssetLister::new()
            .list(&client, &AccessToken::new("t"))
            .await
            .unwrap_err();
        match err {
            HyperviewError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "upstream unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
