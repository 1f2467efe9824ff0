use anyhow::Result;
use axum::{
    extract::State,
    http::{header::LOCATION, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use board::api_client::{client_builder, ApiClient};
use log::LevelFilter;
use std::{
    net::SocketAddr,
    sync::{Arc, Mutex, Once},
};
use tokio::{net::TcpListener, task::JoinHandle};
use url::Url;

/// A request as it arrived at the mock server.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

struct MockState {
    status: StatusCode,
    response: String,
    /// When set, every other path is redirected here and this path answers 200
    redirect_to: Option<String>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Api server which answers every request with the same status and body, and remembers
/// what it received.
pub struct MockServer {
    pub addr: SocketAddr,
    state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start(status: StatusCode) -> Result<Self> {
        Self::start_with_body(status, "{}").await
    }

    pub async fn start_with_body(status: StatusCode, response: &str) -> Result<Self> {
        Self::serve(MockState {
            status,
            response: response.to_string(),
            redirect_to: None,
            requests: Mutex::new(vec![]),
        })
        .await
    }

    /// Answers with 302 pointing to `target`, and with 200 on `target` itself.
    pub async fn start_redirect(target: &str) -> Result<Self> {
        Self::serve(MockState {
            status: StatusCode::FOUND,
            response: "{}".to_string(),
            redirect_to: Some(target.to_string()),
            requests: Mutex::new(vec![]),
        })
        .await
    }

    async fn serve(state: MockState) -> Result<Self> {
        init_logger();
        let state = Arc::new(state);
        let app = Router::new()
            .fallback(record_request)
            .with_state(state.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    pub fn client(&self) -> Result<ApiClient> {
        self.client_with_token(None)
    }

    pub fn client_with_token(&self, token: Option<&str>) -> Result<ApiClient> {
        let base_url = Url::parse(&format!("http://{}", self.addr))?;
        Ok(ApiClient::new(
            http_client()?,
            base_url,
            token.map(str::to_string),
        ))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn stop(self) {
        self.handle.abort();
    }
}

async fn record_request(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let path = match uri.query() {
        Some(query) => format!("{}?{query}", uri.path()),
        None => uri.path().to_string(),
    };
    let response = match &state.redirect_to {
        Some(target) if *target != uri.path() => {
            let headers = [(LOCATION, target.clone())];
            (state.status, headers, String::new()).into_response()
        }
        Some(_) => (StatusCode::OK, state.response.clone()).into_response(),
        None => (state.status, state.response.clone()).into_response(),
    };
    state.requests.lock().unwrap().push(RecordedRequest {
        method,
        path,
        content_type: header("content-type"),
        authorization: header("authorization"),
        body,
    });
    response
}

/// Same settings as the library client, but ignoring proxy settings from the environment.
pub fn http_client() -> Result<reqwest::Client> {
    Ok(client_builder().no_proxy().build()?)
}

/// Address where nothing is listening, for testing transport failures.
pub async fn closed_address() -> Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(addr)
}

fn init_logger() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = env_logger::builder()
            .filter_level(LevelFilter::Warn)
            .filter_module("board", LevelFilter::Info)
            .is_test(true)
            .try_init();
    });
}
