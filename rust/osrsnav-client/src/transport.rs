use std::future::Future;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use crate::config::ClientConfig;
use crate::error::NavError;

pub const SELECT_PATH: &str = "/select";
pub const PATH_PATH: &str = "/path";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub path: &'static str,
    /// JSON body, POST only.
    pub body: Option<Vec<u8>>,
}

impl Request {
    pub fn get(path: &'static str) -> Self { Self { method: Method::Get, path, body: None } }

    pub fn post_json(path: &'static str, body: Vec<u8>) -> Self {
        Self { method: Method::Post, path, body: Some(body) }
    }
}

#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_ok(&self) -> bool { self.status == 200 }

    pub fn text(&self) -> String { String::from_utf8_lossy(&self.body).into_owned() }
}

/// One HTTP exchange with the path service. Non-200 statuses are returned, not raised.
pub trait Transport: Send + Sync {
    fn send(&self, request: Request) -> impl Future<Output = Result<Response, NavError>> + Send;
}

#[derive(Clone, Debug)]
pub struct HttpTransport {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Result<Self, NavError> {
        let mut builder = reqwest::Client::builder();
        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        Ok(Self { http: builder.build()?, config })
    }

    pub fn config(&self) -> &ClientConfig { &self.config }
}

impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, NavError> {
        let url = self.config.url(request.path);
        let builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self
                .http
                .post(&url)
                .header(CONTENT_TYPE, "application/json")
                .body(request.body.unwrap_or_default()),
        };
        let res = builder.send().await?;
        let status = res.status().as_u16();
        let body = res.bytes().await?.to_vec();
        Ok(Response { status, body })
    }
}
