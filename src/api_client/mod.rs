use crate::{
    common::ErrorResult,
    config::BoardConfig,
    error::{ClientError, ClientResult},
};
use http::{header::CONTENT_TYPE, Method, StatusCode};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};
use url::Url;

pub mod article;
pub mod comment;

/// A single request as built by an action. The body is already JSON encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub body: Option<String>,
}

/// Result of one dispatch. Exactly one of these is produced per request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    Success,
    Failure(FailureReason),
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DispatchOutcome::Success)
    }
}

/// Why a dispatch failed. Only used for logging, callers handle all reasons the same way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailureReason {
    /// The server responded, but not with 200 or 201
    Status(StatusCode),
    /// No response was received, eg connection refused or invalid url
    Transport(String),
}

impl Display for FailureReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::Status(status) => write!(f, "status {status}"),
            FailureReason::Transport(e) => write!(f, "transport error: {e}"),
        }
    }
}

/// Only 200 and 201 count as success, every other status is a failure.
pub fn is_success(status: StatusCode) -> bool {
    status == StatusCode::OK || status == StatusCode::CREATED
}

/// Error bodies longer than this are cut off before logging.
const MAX_ERROR_BODY: usize = 16 * 1024;

/// Client settings required by [ApiClient]. Redirects must not be followed, otherwise a
/// single dispatch could send more than one request and a 3xx would end up as success.
pub fn client_builder() -> reqwest::ClientBuilder {
    reqwest::Client::builder().redirect(reqwest::redirect::Policy::none())
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
    access_token: Option<String>,
}

impl ApiClient {
    /// The client must not follow redirects, build it with [client_builder].
    pub fn new(client: reqwest::Client, base_url: Url, access_token: Option<String>) -> Self {
        Self {
            client,
            base_url,
            access_token,
        }
    }

    pub fn from_config(config: &BoardConfig) -> ClientResult<Self> {
        let base_url = Url::parse(&config.api.base_url)?;
        Ok(Self::new(
            client_builder().build()?,
            base_url,
            config.api.access_token.clone(),
        ))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends exactly one request and classifies the response by status code. Transport
    /// errors are reported as failure so that the caller always gets an outcome.
    pub async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> DispatchOutcome {
        let req = match self.request_builder(method.clone(), path, body) {
            Ok(req) => req,
            Err(e) => {
                warn!("Failed to build {method} request for {path}: {e}");
                return DispatchOutcome::Failure(FailureReason::Transport(e.message()));
            }
        };
        let res = match req.send().await {
            Ok(res) => res,
            Err(e) => {
                warn!("{method} {path} failed without response: {e}");
                return DispatchOutcome::Failure(FailureReason::Transport(e.to_string()));
            }
        };
        let status = res.status();
        if is_success(status) {
            info!("{method} {path} succeeded with status {status}");
            return DispatchOutcome::Success;
        }
        // Body is only read to improve the log message
        match Self::error_body(res).await {
            Ok(text) => match serde_json::from_str::<ErrorResult>(&text) {
                Ok(error) => info!(
                    "{method} {path} failed with status {status}: {}",
                    error.summary()
                ),
                Err(_) => info!("{method} {path} failed with status {status}: {text}"),
            },
            Err(e) => debug!("Failed to read error body of {method} {path}: {e}"),
        }
        DispatchOutcome::Failure(FailureReason::Status(status))
    }

    /// Reads at most [MAX_ERROR_BODY] bytes of the response, the rest is discarded.
    async fn error_body(mut res: reqwest::Response) -> reqwest::Result<String> {
        let mut body = Vec::new();
        while let Some(chunk) = res.chunk().await? {
            body.extend_from_slice(&chunk);
            if body.len() >= MAX_ERROR_BODY {
                body.truncate(MAX_ERROR_BODY);
                break;
            }
        }
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    pub async fn dispatch_request(&self, request: &Request) -> DispatchOutcome {
        self.dispatch(request.method.clone(), &request.path, request.body.clone())
            .await
    }

    async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> ClientResult<T>
    where
        T: for<'de> Deserialize<'de>,
        Q: Serialize + Debug,
    {
        let path = match query {
            Some(query) => format!("{path}?{}", serde_urlencoded::to_string(query)?),
            None => path.to_string(),
        };
        self.send(Method::GET, &path, None).await
    }

    async fn post<T, P>(&self, path: &str, params: &P) -> ClientResult<T>
    where
        T: for<'de> Deserialize<'de>,
        P: Serialize + Debug,
    {
        let body = serde_json::to_string(params)?;
        self.send(Method::POST, path, Some(body)).await
    }

    async fn put<T, P>(&self, path: &str, params: &P) -> ClientResult<T>
    where
        T: for<'de> Deserialize<'de>,
        P: Serialize + Debug,
    {
        let body = serde_json::to_string(params)?;
        self.send(Method::PUT, path, Some(body)).await
    }

    async fn send<T>(&self, method: Method, path: &str, body: Option<String>) -> ClientResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let res = self.request_builder(method, path, body)?.send().await?;
        let status = res.status();
        let url = res.url().to_string();
        let text = res.text().await?;
        Self::response(status, text, &url)
    }

    fn response<T>(status: StatusCode, text: String, url: &str) -> ClientResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        if !is_success(status) {
            info!("API error: {text} on {url} status {status}");
            return Err(match serde_json::from_str::<ErrorResult>(&text) {
                Ok(error) => ClientError::new(error.summary()),
                Err(_) => ClientError::new(format!("status {status}: {text}")),
            });
        }
        serde_json::from_str(&text).map_err(|e| {
            info!("Failed to deserialize api response: {e} from {text} on {url}");
            ClientError::new(text)
        })
    }

    fn request_builder(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> ClientResult<reqwest::RequestBuilder> {
        let mut req = self.client.request(method, self.request_endpoint(path)?);
        if let Some(token) = &self.access_token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.header(CONTENT_TYPE, "application/json").body(body);
        }
        Ok(req)
    }

    fn request_endpoint(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base_url.join(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_client(base: &str) -> ClientResult<ApiClient> {
        Ok(ApiClient::new(
            client_builder().build()?,
            Url::parse(base)?,
            None,
        ))
    }

    #[test]
    fn test_status_classification() {
        assert!(is_success(StatusCode::OK));
        assert!(is_success(StatusCode::CREATED));
        for status in [
            StatusCode::NO_CONTENT,
            StatusCode::FOUND,
            StatusCode::BAD_REQUEST,
            StatusCode::UNAUTHORIZED,
            StatusCode::FORBIDDEN,
            StatusCode::NOT_FOUND,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            assert!(!is_success(status), "{status} should be a failure");
        }
    }

    #[test]
    fn test_request_endpoint() -> ClientResult<()> {
        let client = test_client("http://localhost:8080")?;
        assert_eq!(
            "http://localhost:8080/api/articles/42/comments",
            client.request_endpoint("/api/articles/42/comments")?.as_str()
        );
        // an absolute path replaces any path on the base url
        let client = test_client("http://example.com/ignored/")?;
        assert_eq!(
            "http://example.com/api/articles?page=1&size=10",
            client.request_endpoint("/api/articles?page=1&size=10")?.as_str()
        );
        Ok(())
    }

    #[test]
    fn test_content_type_only_with_body() -> ClientResult<()> {
        let client = test_client("http://localhost:8080")?;
        let req = client
            .request_builder(Method::DELETE, "/api/articles/1", None)?
            .build()?;
        assert_eq!(None, req.headers().get(CONTENT_TYPE));
        assert!(req.body().is_none());

        let req = client
            .request_builder(Method::PUT, "/api/articles/1", Some("{}".to_string()))?
            .build()?;
        assert_eq!(
            Some("application/json"),
            req.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_error_body_is_capped() -> ClientResult<()> {
        let long = "x".repeat(MAX_ERROR_BODY * 4);
        let res = reqwest::Response::from(http::Response::new(long));
        assert_eq!(MAX_ERROR_BODY, ApiClient::error_body(res).await?.len());

        let res = reqwest::Response::from(http::Response::new("short".to_string()));
        assert_eq!("short", ApiClient::error_body(res).await?);
        Ok(())
    }

    #[test]
    fn test_bearer_token() -> ClientResult<()> {
        let client = ApiClient::new(
            client_builder().build()?,
            Url::parse("http://localhost:8080")?,
            Some("secret".to_string()),
        );
        let req = client
            .request_builder(Method::GET, "/api/articles/1", None)?
            .build()?;
        assert_eq!(
            Some("Bearer secret"),
            req.headers()
                .get(http::header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
        );
        Ok(())
    }

    #[test]
    fn test_error_response() {
        let res: ClientResult<()> = ApiClient::response(
            StatusCode::NOT_FOUND,
            r#"{"code":"BAD","message":"no such article"}"#.to_string(),
            "http://localhost/api/articles/9",
        );
        assert_eq!(Err(ClientError::new("BAD no such article")), res);

        let res: ClientResult<()> = ApiClient::response(
            StatusCode::BAD_GATEWAY,
            "oops".to_string(),
            "http://localhost/api/articles/9",
        );
        assert_eq!(
            Err(ClientError::new("status 502 Bad Gateway: oops")),
            res
        );
    }
}
