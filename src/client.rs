use indexmap::IndexMap;
use serde::Deserialize;
use url::Url;

use crate::envelope::{TokenEnvelope, TokenRecord};
use crate::error::Error;
use crate::http::HttpClient;
use crate::models::{Connection, Guild, GuildPayload, User, UserPayload};
use crate::request::{create_api_request, create_token_request, send_request};
use crate::scope::{join_scopes, Scope};
use crate::state::generate_state;

const DEFAULT_BASE_URL: &str = "https://discord.com/api";

/// Configuration for creating a [`Client`] with a custom HTTP client.
///
/// Use this when you need to provide your own [`HttpClient`] implementation
/// (e.g. a pre-configured `reqwest::Client` with custom timeouts or proxies).
/// For the common case, use [`Client::new`] which uses the built-in default
/// client.
pub struct ClientOptions<'a, H: HttpClient> {
    /// Discord application client id.
    pub client_id: String,
    /// Discord application client secret. Also keys the token envelopes.
    pub client_secret: String,
    /// OAuth redirect URI that receives the authorization code.
    pub redirect_uri: String,
    /// Scopes to request; must be non-empty to build authorization URLs.
    pub scopes: Vec<Scope>,
    pub http_client: &'a H,
}

/// An authorization URL paired with the anti-forgery state embedded in it.
///
/// Redirect the end user to `url` and keep `state` in their session; the
/// caller is responsible for checking the round-tripped state value.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub url: Url,
    pub state: String,
}

/// OAuth2 client for [Discord](https://discord.com/developers/docs/topics/oauth2).
///
/// Completes the authorization-code flow, wraps the received token pair in
/// a signed [`TokenEnvelope`], and uses that envelope for authenticated
/// resource fetches. The client holds only immutable configuration, so
/// concurrent calls on one instance are independent.
///
/// # Example
///
/// ```rust
/// use disco_oauth::{Client, Scope};
///
/// # async fn example() -> Result<(), disco_oauth::Error> {
/// let client = Client::new(
///     "your-client-id",
///     "your-client-secret",
///     "https://example.com/callback",
///     vec![Scope::Identify, Scope::Guilds],
/// );
///
/// // Step 1: redirect the user to the authorization URL.
/// let auth = client.authorization_request()?;
/// // Store `auth.state` in the user's session, then redirect to `auth.url`.
///
/// // Step 2: in the callback handler, exchange the code for an envelope.
/// let envelope = client.exchange_code("authorization-code").await?;
///
/// // Step 3: use the envelope for authenticated calls.
/// let user = client.fetch_user(&envelope).await?;
/// println!("signed in as {}", user.tag);
///
/// // Step 4: refresh when the envelope expires.
/// let envelope = client.refresh(&envelope).await?;
/// # let _ = envelope;
/// # Ok(())
/// # }
/// ```
pub struct Client<'a, H: HttpClient> {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    scopes: Vec<Scope>,
    http_client: &'a H,
    base_url: String,
}

impl<'a, H: HttpClient> Client<'a, H> {
    /// Creates a client from a [`ClientOptions`] struct, using the
    /// production API base URL.
    pub fn from_options(options: ClientOptions<'a, H>) -> Self {
        Self::with_base_url(options, DEFAULT_BASE_URL)
    }

    /// Creates a client pointed at a non-default API base URL. Intended
    /// for tests against a local mock provider.
    pub fn with_base_url(options: ClientOptions<'a, H>, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client_id: options.client_id,
            client_secret: options.client_secret,
            redirect_uri: options.redirect_uri,
            scopes: options.scopes,
            http_client: options.http_client,
            base_url,
        }
    }

    /// Builds the authorization URL the user should be redirected to,
    /// with a fresh anti-forgery state value.
    ///
    /// The URL embeds `response_type=code`, the client id, the
    /// `%20`-joined scopes, the state, the redirect URI and `prompt=none`.
    /// No network call is made.
    pub fn authorization_request(&self) -> Result<AuthorizationRequest, Error> {
        if self.scopes.is_empty() {
            return Err(Error::Configuration("scopes are not defined"));
        }

        let state = generate_state();
        let scope = join_scopes(&self.scopes, "%20");
        let redirect_uri: String =
            url::form_urlencoded::byte_serialize(self.redirect_uri.as_bytes()).collect();
        let raw = format!(
            "{}/oauth2/authorize?response_type=code&client_id={}&scope={scope}&state={state}&redirect_uri={redirect_uri}&prompt=none",
            self.base_url, self.client_id
        );
        let url = Url::parse(&raw).map_err(|_| Error::Configuration("invalid authorization URL"))?;

        Ok(AuthorizationRequest { url, state })
    }

    /// Exchanges an authorization code for a signed [`TokenEnvelope`].
    ///
    /// Call this in your redirect URI handler with the `code` query
    /// parameter. The returned envelope is opaque; store it verbatim and
    /// present it to the other operations.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenEnvelope, Error> {
        if code.is_empty() {
            return Err(Error::Configuration("authorization code not provided"));
        }

        let form = self.token_form(&[
            ("grant_type".to_string(), "authorization_code".to_string()),
            ("code".to_string(), code.to_string()),
        ]);
        self.request_envelope(form).await
    }

    /// Obtains a new envelope for a user whose access token has expired,
    /// using the refresh token inside the supplied envelope.
    ///
    /// The supplied envelope must still verify; a bad signature,
    /// malformed payload or expired envelope fails with
    /// [`Error::InvalidToken`] before any network call.
    pub async fn refresh(&self, envelope: &TokenEnvelope) -> Result<TokenEnvelope, Error> {
        let record = envelope.open(&self.client_secret)?;

        let form = self.token_form(&[
            ("grant_type".to_string(), "refresh_token".to_string()),
            ("refresh_token".to_string(), record.refresh_token),
        ]);
        self.request_envelope(form).await
    }

    /// Fetches the profile of the user who authorized via the flow.
    pub async fn fetch_user(&self, envelope: &TokenEnvelope) -> Result<User, Error> {
        let json = self.fetch_resource(envelope, "users/@me").await?;
        let payload = UserPayload::deserialize(&json).map_err(|_| malformed(&json))?;
        Ok(User::from_payload(payload))
    }

    /// Fetches the authorized user's guilds, keyed by guild id in
    /// provider response order.
    pub async fn fetch_guilds(
        &self,
        envelope: &TokenEnvelope,
    ) -> Result<IndexMap<String, Guild>, Error> {
        let json = self.fetch_resource(envelope, "users/@me/guilds").await?;
        let payloads = Vec::<GuildPayload>::deserialize(&json).map_err(|_| malformed(&json))?;

        let mut guilds = IndexMap::with_capacity(payloads.len());
        for payload in payloads {
            let guild = Guild::from_payload(payload);
            guilds.insert(guild.id.clone(), guild);
        }
        Ok(guilds)
    }

    /// Fetches the authorized user's linked third-party accounts, keyed
    /// by connection id in provider response order.
    pub async fn fetch_connections(
        &self,
        envelope: &TokenEnvelope,
    ) -> Result<IndexMap<String, Connection>, Error> {
        let json = self.fetch_resource(envelope, "users/@me/connections").await?;
        let connections = Vec::<Connection>::deserialize(&json).map_err(|_| malformed(&json))?;

        Ok(connections
            .into_iter()
            .map(|connection| (connection.id.clone(), connection))
            .collect())
    }

    /// Form parameters common to both token-endpoint grants.
    fn token_form(&self, grant: &[(String, String)]) -> Vec<(String, String)> {
        let mut form = vec![
            ("client_id".to_string(), self.client_id.clone()),
            ("client_secret".to_string(), self.client_secret.clone()),
        ];
        form.extend_from_slice(grant);
        form.push(("redirect_uri".to_string(), self.redirect_uri.clone()));
        form.push(("scope".to_string(), join_scopes(&self.scopes, " ")));
        form
    }

    async fn request_envelope(&self, form: Vec<(String, String)>) -> Result<TokenEnvelope, Error> {
        let request = create_token_request(&format!("{}/oauth2/token", self.base_url), &form);
        let json = send_request(self.http_client, request).await?;
        let record = TokenRecord::from_response(&json)?;
        TokenEnvelope::seal(&record, &self.client_secret)
    }

    async fn fetch_resource(
        &self,
        envelope: &TokenEnvelope,
        path: &str,
    ) -> Result<serde_json::Value, Error> {
        let record = envelope.open(&self.client_secret)?;
        let request = create_api_request(
            &format!("{}/{path}", self.base_url),
            &record.token_type,
            &record.access_token,
        );
        send_request(self.http_client, request).await
    }
}

#[cfg(feature = "reqwest-client")]
impl Client<'static, reqwest::Client> {
    /// Creates a new Discord OAuth2 client using the default HTTP client.
    ///
    /// To provide a custom transport, use [`Client::from_options`] instead.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
        scopes: Vec<Scope>,
    ) -> Self {
        Self::from_options(ClientOptions {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            scopes,
            http_client: crate::http::default_client(),
        })
    }
}

fn malformed(json: &serde_json::Value) -> Error {
    Error::UnexpectedBody {
        status: 200,
        body: json.to_string(),
    }
}
