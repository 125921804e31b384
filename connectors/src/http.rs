//! Minimal HTTP capability the ticker needs, so it can run against
//! `reqwest` in production and canned responses in tests.

use async_trait::async_trait;
use common::BoxError;
use reqwest::StatusCode;

/// A GET request against a quote endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub query: Vec<(&'static str, &'static str)>,
}

/// Sends requests. Errors mean no response was received.
#[async_trait]
pub trait HttpClient: Send + Sync {
    type Response: HttpResponse;

    async fn send(&self, request: &TickerRequest) -> Result<Self::Response, BoxError>;
}

/// A received response whose body has not been read yet.
#[async_trait]
pub trait HttpResponse: Send {
    fn status(&self) -> StatusCode;

    /// Read the whole body.
    async fn bytes(self) -> Result<Vec<u8>, BoxError>;
}

#[async_trait]
impl HttpClient for reqwest::Client {
    type Response = reqwest::Response;

    async fn send(&self, request: &TickerRequest) -> Result<reqwest::Response, BoxError> {
        let mut builder = self.get(request.url.as_str()).query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }

        let response = builder.send().await?;
        Ok(response)
    }
}

#[async_trait]
impl HttpResponse for reqwest::Response {
    fn status(&self) -> StatusCode {
        reqwest::Response::status(self)
    }

    async fn bytes(self) -> Result<Vec<u8>, BoxError> {
        let body = reqwest::Response::bytes(self).await?;
        Ok(body.to_vec())
    }
}
