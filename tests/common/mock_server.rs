use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A mock Discord API built on `wiremock`. Simulates the token endpoint
/// and the authenticated resource endpoints with configurable behavior.
pub struct MockDiscordServer {
    server: MockServer,
}

impl MockDiscordServer {
    /// Start a new mock server on a random available port.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL of the mock server (e.g. "http://127.0.0.1:PORT").
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Mount a handler for a successful code exchange at
    /// `POST /oauth2/token`.
    pub async fn mock_exchange_success(&self, response: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response))
            .mount(&self.server)
            .await;
    }

    /// Mount a handler for a successful token refresh at
    /// `POST /oauth2/token`.
    pub async fn mock_refresh_success(&self, response: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response))
            .mount(&self.server)
            .await;
    }

    /// Mount a handler that returns a structured OAuth2 error response
    /// at `POST /oauth2/token`.
    pub async fn mock_token_error(&self, error_code: &str, description: &str) {
        let body = serde_json::json!({
            "error": error_code,
            "error_description": description,
        });
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(&body))
            .mount(&self.server)
            .await;
    }

    /// Mount a handler that returns a bare HTTP status at
    /// `POST /oauth2/token`.
    pub async fn mock_token_status(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Mount `GET /users/@me`, requiring the expected bearer credential.
    pub async fn mock_user_success(&self, access_token: &str, body: serde_json::Value) {
        self.mock_resource("/users/@me", access_token, body).await;
    }

    /// Mount `GET /users/@me/guilds`, requiring the expected bearer
    /// credential.
    pub async fn mock_guilds_success(&self, access_token: &str, body: serde_json::Value) {
        self.mock_resource("/users/@me/guilds", access_token, body)
            .await;
    }

    /// Mount `GET /users/@me/connections`, requiring the expected bearer
    /// credential.
    pub async fn mock_connections_success(&self, access_token: &str, body: serde_json::Value) {
        self.mock_resource("/users/@me/connections", access_token, body)
            .await;
    }

    /// Mount a resource handler that returns a bare HTTP status.
    pub async fn mock_resource_status(&self, resource_path: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(resource_path))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    async fn mock_resource(&self, resource_path: &str, access_token: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(resource_path))
            .and(header("Authorization", format!("Bearer {access_token}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&self.server)
            .await;
    }

    /// Assert that the last request to the mock server contained
    /// the expected form-urlencoded parameters in its body.
    pub async fn verify_token_request(&self, expected_params: &[(&str, &str)]) {
        let requests = self
            .server
            .received_requests()
            .await
            .expect("request recording enabled");
        let last = requests
            .iter()
            .filter(|r| r.url.path() == "/oauth2/token")
            .next_back()
            .expect("expected at least one token request");
        let body_str = String::from_utf8(last.body.clone()).expect("body should be UTF-8");
        let parsed: Vec<(String, String)> = url::form_urlencoded::parse(body_str.as_bytes())
            .into_owned()
            .collect();

        for (key, value) in expected_params {
            let found = parsed.iter().any(|(k, v)| k == key && v == value);
            assert!(
                found,
                "expected form param {}={} in request body, got: {}",
                key, value, body_str
            );
        }
    }
}
