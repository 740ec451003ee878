use crate::ApiClient;
use hyperview_core::{AccessToken, BusinessEntityPage, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, info};

/// Business-entity collection endpoint, relative to the instance URL.
pub const BUSINESS_ENTITIES_PATH: &str = "/api/asset/businessEntities/advancedCollection";

/// First 100 entities.
static QUERY: [(&str, &str); 2] = [("skip", "0"), ("take", "100")];

/// Fetches the first page of business entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct BusinessEntityLister;

impl BusinessEntityLister {
    /// Creates the lister.
    pub fn new() -> Self {
        Self
    }

    /// Full URL of the collection request.
    pub fn url(&self, client: &ApiClient) -> String {
        let query = QUERY
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", client.endpoint(BUSINESS_ENTITIES_PATH), query)
    }

    /// Requests the collection. The body must carry `data`.
    pub async fn list(
        &self,
        client: &ApiClient,
        token: &AccessToken,
    ) -> Result<BusinessEntityPage> {
        let url = self.url(client);
        info!("Requesting business entity list from: {}", url);

        let request = client
            .http()
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, token.bearer());

        let page: BusinessEntityPage = client.send_json(request, "business entity list").await?;
        debug!(
            metadata = %serde_json::Value::Object(page.metadata.clone()),
            entities = page.data.len(),
            "Business entity list received"
        );

        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperview_core::HyperviewError;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[test]
    fn test_url() {
        let client = ApiClient::new("https://example.hyperviewhq.com").unwrap();
        assert_eq!(
            BusinessEntityLister::new().url(&client),
            "https://example.hyperviewhq.com/api/asset/businessEntities/advancedCollection?skip=0&take=100"
        );
    }

    #[tokio::test]
    async fn test_list() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", BUSINESS_ENTITIES_PATH)
            .match_header("authorization", "Bearer abc123")
            .match_header("content-type", "application/json")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("skip".into(), "0".into()),
                Matcher::UrlEncoded("take".into(), "100".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"_metadata": {"total": 2}, "data": [{"id": "be-1", "name": "Site A"}, {"id": "be-2", "name": "Site B"}]}"#,
            )
            .create_async()
            .await;

        let client = ApiClient::new(server.url()).unwrap();
        let page = BusinessEntityLister::new()
            .list(&client, &AccessToken::new("abc123"))
            .await
            .unwrap();

        assert_eq!(page.metadata.get("total"), Some(&json!(2)));
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[1]["id"], json!("be-2"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unauthorized_is_auth_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", BUSINESS_ENTITIES_PATH)
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body("expired")
            .create_async()
            .await;

        let client = ApiClient::new(server.url()).unwrap();
        let err = BusinessEntityLister::new()
            .list(&client, &AccessToken::new("t"))
            .await
            .unwrap_err();
        assert!(matches!(err, HyperviewError::Auth { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_missing_data_is_parse_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", BUSINESS_ENTITIES_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"_metadata": {}}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url()).unwrap();
        let err = BusinessEntityLister::new()
            .list(&client, &AccessToken::new("t"))
            .await
            .unwrap_err();
        assert!(matches!(err, HyperviewError::Parse(_)));
    }
}
