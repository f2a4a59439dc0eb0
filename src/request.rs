use crate::error::Error;
use crate::http::{HttpClient, HttpRequest, HttpResponse, Method};

/// Build a token-endpoint request: form-encoded POST with
/// Content-Type, Accept: application/json, User-Agent: disco-oauth.
pub(crate) fn create_token_request(endpoint: &str, form: &[(String, String)]) -> HttpRequest {
    let encoded_body = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(form)
        .finish();

    HttpRequest {
        method: Method::Post,
        url: endpoint.to_string(),
        headers: vec![
            (
                "Content-Type".to_string(),
                "application/x-www-form-urlencoded".to_string(),
            ),
            ("Accept".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), "disco-oauth".to_string()),
        ],
        body: encoded_body.into_bytes(),
    }
}

/// Build an authenticated resource request: GET with the unwrapped token
/// pair as a bearer credential.
pub(crate) fn create_api_request(endpoint: &str, token_type: &str, access_token: &str) -> HttpRequest {
    HttpRequest {
        method: Method::Get,
        url: endpoint.to_string(),
        headers: vec![
            (
                "Authorization".to_string(),
                format!("{token_type} {access_token}"),
            ),
            ("Accept".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), "disco-oauth".to_string()),
        ],
        body: Vec::new(),
    }
}

/// Send a request and interpret the response.
/// - 2xx with valid JSON -> Ok(body)
/// - 2xx with invalid JSON -> Err(UnexpectedBody)
/// - non-2xx with an error description in the body -> Err(ProviderValidation)
/// - other non-2xx -> Err(Provider)
/// - transport failure -> Err(Transport)
pub(crate) async fn send_request(
    client: &(impl HttpClient + ?Sized),
    request: HttpRequest,
) -> Result<serde_json::Value, Error> {
    let response: HttpResponse = client.send(request).await?;

    match response.status {
        status @ 200..=299 => {
            serde_json::from_slice(&response.body).map_err(|_| Error::UnexpectedBody {
                status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            })
        }
        status => Err(interpret_failure(status, &response.body)),
    }
}

/// Map a non-2xx response to the error taxonomy. A provider-supplied
/// error description wins over the status-code table.
fn interpret_failure(status: u16, body: &[u8]) -> Error {
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(body) {
        let description = json
            .get("error_description")
            .and_then(|v| v.as_str())
            .or_else(|| json.get("error").and_then(|v| v.as_str()));
        if let Some(description) = description {
            return Error::ProviderValidation {
                description: description.to_string(),
            };
        }
    }
    Error::Provider { status }
}
