use disco_oauth::{HttpClient, HttpRequest, HttpResponse};
use std::sync::Mutex;

/// What the mock should do for one request.
pub enum MockOutcome {
    Respond(HttpResponse),
    Fail(String),
}

/// An `HttpClient` implementation that records requests and returns
/// pre-configured outcomes. Used for exercising the transport seam
/// without a network server.
pub struct MockHttpClient {
    /// Pre-configured outcomes, consumed in FIFO order.
    outcomes: Mutex<Vec<MockOutcome>>,
    /// Recorded requests for assertion.
    recorded: Mutex<Vec<HttpRequest>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(Vec::new()),
            recorded: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response.
    pub fn enqueue_response(&self, response: HttpResponse) {
        self.outcomes
            .lock()
            .unwrap()
            .push(MockOutcome::Respond(response));
    }

    /// Queue a transport-level failure.
    pub fn enqueue_failure(&self, message: impl Into<String>) {
        self.outcomes
            .lock()
            .unwrap()
            .push(MockOutcome::Fail(message.into()));
    }

    /// Drain and return all recorded requests.
    pub fn take_requests(&self) -> Vec<HttpRequest> {
        self.recorded.lock().unwrap().drain(..).collect()
    }
}

impl HttpClient for MockHttpClient {
    async fn send(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, Box<dyn std::error::Error + Send + Sync>> {
        self.recorded.lock().unwrap().push(request);
        match self.outcomes.lock().unwrap().remove(0) {
            MockOutcome::Respond(response) => Ok(response),
            MockOutcome::Fail(message) => Err(message.into()),
        }
    }
}
