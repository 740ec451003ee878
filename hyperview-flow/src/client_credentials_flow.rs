use crate::ApiClient;
use hyperview_core::{AccessToken, Credentials, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;
use tracing::{debug, info};

/// Token endpoint, relative to the instance URL.
pub const TOKEN_PATH: &str = "/connect/token";

/// The token endpoint response. Only `access_token` is required.
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthToken {
    /// The access token used for API requests
    pub access_token: String,
    /// The type of token (usually "Bearer")
    pub token_type: Option<String>,
    /// Seconds until the access token expires
    pub expires_in: Option<u64>,
    /// The scopes granted to the client
    pub scope: Option<String>,
}

/// Orchestrates the Client Credentials Flow (RFC 6749 Section 4.4).
///
/// Every call to [`get_token`](Self::get_token) performs a fresh round trip;
/// nothing is cached.
pub struct ClientCredentialsFlow {
    client_id: String,
    client_secret: String,
}

impl ClientCredentialsFlow {
    /// Creates a new `ClientCredentialsFlow` instance.
    ///
    /// # Arguments
    ///
    /// * `client_id` - The client ID assigned to the integration.
    /// * `client_secret` - The client secret assigned to the integration.
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client_id,
            client_secret,
        }
    }

    /// Creates a flow from loaded [`Credentials`].
    pub fn from_credentials(credentials: &Credentials) -> Self {
        Self::new(
            credentials.client_id.clone(),
            credentials.client_secret.clone(),
        )
    }

    /// The form body sent to the token endpoint.
    ///
    /// Id and secret are concatenated verbatim, without percent-encoding.
    pub fn request_body(&self) -> String {
        format!(
            "grant_type=client_credentials&client_id={}&client_secret={}",
            self.client_id, self.client_secret
        )
    }

    /// Obtains an access token using the client credentials.
    ///
    /// # Returns
    ///
    /// The bearer token on success. A body that is not JSON or lacks
    /// `access_token` is a parse error; 401/403 is an auth error.
    pub async fn get_token(&self, client: &ApiClient) -> Result<AccessToken> {
        let token_url = client.endpoint(TOKEN_PATH);
        info!("Requesting access token from: {}", token_url);

        let request = client
            .http()
            .post(&token_url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(ACCEPT, "application/json")
            .body(self.request_body());

        let token: OAuthToken = client.send_json(request, "token").await?;
        info!("Successfully authenticated");
        debug!(
            token_type = ?token.token_type,
            expires_in = ?token.expires_in,
            scope = ?token.scope,
            "Token response received"
        );

        Ok(AccessToken::new(token.access_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperview_core::HyperviewError;
    use mockito::Server;

    #[test]
    fn test_request_body_is_not_escaped() {
        let flow = ClientCredentialsFlow::new("my id".to_string(), "a&b=c+d".to_string());
        assert_eq!(
            flow.request_body(),
            "grant_type=client_credentials&client_id=my id&client_secret=a&b=c+d"
        );
    }

    #[tokio::test]
    async fn test_get_token() {
        let mut server = Server::new_async().await;

        let token_mock = server
            .mock("POST", "/connect/token")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_header("accept", "application/json")
            .match_body("grant_type=client_credentials&client_id=client&client_secret=s3cr3t")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "abc123", "token_type": "Bearer", "expires_in": 3600}"#)
            .expect(1)
            .create_async()
            .await;

        let client = ApiClient::new(server.url()).unwrap();
        let flow = ClientCredentialsFlow::new("client".to_string(), "s3cr3t".to_string());
        let token = flow.get_token(&client).await.unwrap();

        assert_eq!(token.secret(), "abc123");
        token_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_access_token_is_parse_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/connect/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token_type": "Bearer"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url()).unwrap();
        let flow = ClientCredentialsFlow::new("client".to_string(), "secret".to_string());
        let err = flow.get_token(&client).await.unwrap_err();

        assert!(matches!(err, HyperviewError::Parse(_)));
    }

    #[tokio::test]
    async fn test_non_json_body_is_parse_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/connect/token")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let client = ApiClient::new(server.url()).unwrap();
        let flow = ClientCredentialsFlow::new("client".to_string(), "secret".to_string());
        let err = flow.get_token(&client).await.unwrap_err();

        assert!(matches!(err, HyperviewError::Parse(_)));
    }

    #[tokio::test]
    async fn test_rejected_credentials_are_auth_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/connect/token")
            .with_status(401)
            .with_body(r#"{"error": "invalid_client"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(server.url()).unwrap();
        let flow = ClientCredentialsFlow::new("client".to_string(), "wrong".to_string());
        let err = flow.get_token(&client).await.unwrap_err();

        match err {
            HyperviewError::Auth { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("invalid_client"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
