use std::io;
use std::sync::Mutex;

use super::*;

#[derive(Debug, Clone)]
pub(super) struct FakeTransport {
    state: Arc<Mutex<FakeTransportState>>,
}

#[derive(Debug)]
struct FakeTransportState {
    last_request: Option<HttpRequest>,
    response: Option<HttpResponse>,
}

impl FakeTransport {
    pub(super) fn new(response_status: u16, response_body: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeTransportState {
                last_request: None,
                response: Some(HttpResponse {
                    status: response_status,
                    body: response_body.into(),
                }),
            })),
        }
    }

    /// A transport whose every call fails before reaching a server.
    pub(super) fn failing() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeTransportState {
                last_request: None,
                response: None,
            })),
        }
    }

    pub(super) fn last_request(&self) -> Option<HttpRequest> {
        self.state.lock().unwrap().last_request.clone()
    }

    pub(super) fn header(&self, name: &str) -> Option<String> {
        self.last_request().and_then(|request| {
            request
                .headers
                .into_iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
    }

    pub(super) fn assert_header(&self, name: &str, value: &str) {
        let headers = self
            .last_request()
            .map(|request| request.headers)
            .unwrap_or_default();
        assert!(
            headers.iter().any(|(k, v)| k == &name && v == value),
            "missing header {name}: {value}; got: {headers:?}"
        );
    }

    pub(super) fn body_json(&self) -> serde_json::Value {
        let body = self
            .last_request()
            .and_then(|request| request.body)
            .expect("request had no body");
        serde_json::from_str(&body).unwrap()
    }
}

impl HttpTransport for FakeTransport {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = {
                let mut state = self.state.lock().unwrap();
                state.last_request = Some(request);
                state.response.clone()
            };
            response.ok_or_else(|| {
                Box::new(io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"))
                    as Box<dyn StdError + Send + Sync>
            })
        })
    }
}

pub(super) fn make_client(transport: FakeTransport) -> MonimeClient {
    MonimeClient {
        auth: Auth::new("mon_test", "spc-test").unwrap(),
        base_url: "https://example.invalid/v1".to_owned(),
        api_version: None,
        http: Arc::new(transport),
    }
}
