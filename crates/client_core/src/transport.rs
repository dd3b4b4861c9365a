//! HTTP seam between form controllers and the scoring backend.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::RequestFailed;

#[async_trait]
pub trait ScoringTransport: Send + Sync {
    /// POST `body` as JSON to `path` and return the decoded JSON reply.
    ///
    /// Any non-2xx status is a failure; its body is never read.
    async fn post_json(&self, path: &str, body: Value) -> Result<Value, RequestFailed>;
}

pub struct MissingScoringTransport;

#[async_trait]
impl ScoringTransport for MissingScoringTransport {
    async fn post_json(&self, path: &str, _body: Value) -> Result<Value, RequestFailed> {
        Err(RequestFailed::Network(format!(
            "no scoring server configured for {path}"
        )))
    }
}

pub struct HttpScoringTransport {
    http: Client,
    base_url: Url,
}

impl HttpScoringTransport {
    pub fn new(server_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = Url::parse(server_url.trim())
            .with_context(|| format!("invalid scoring server url '{server_url}'"))?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build http client")?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl ScoringTransport for HttpScoringTransport {
    async fn post_json(&self, path: &str, body: Value) -> Result<Value, RequestFailed> {
        let url = self
            .base_url
            .join(path)
            .map_err(|err| RequestFailed::Network(format!("invalid endpoint '{path}': {err}")))?;
        debug!(%url, "posting scoring request");

        let res = self
            .http
            .post(url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(RequestFailed::from_reqwest)?;

        let status = res.status();
        if !status.is_success() {
            return Err(RequestFailed::Status(status.as_u16()));
        }

        res.json::<Value>().await.map_err(RequestFailed::from_reqwest)
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
