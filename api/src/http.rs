// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client wrapper with status normalization and abort handling.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::config::ApiConfig;
use crate::error::ApiError;

/// HTTP client for the events backend.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or HTTP client creation fails.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(config.base_url.clone()));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Builds an absolute URL by appending path segments to the base URL.
    ///
    /// Segments are percent-encoded, so ids containing `/` or `?` stay a single segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot carry a path.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Builds a request for the given URL.
    pub fn build_request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Sends a request and decodes a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server answers with a non-success
    /// status, the body cannot be decoded, or `signal` fires first.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        signal: Option<&CancellationToken>,
    ) -> Result<T, ApiError> {
        let fut = async {
            let resp = Self::execute(req).await?;
            let bytes = resp.bytes().await?;
            Ok(serde_json::from_slice(&bytes)?)
        };
        abortable(fut, signal).await
    }

    /// Sends a request and discards the body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or returns a non-success status.
    pub async fn send(
        &self,
        req: RequestBuilder,
        signal: Option<&CancellationToken>,
    ) -> Result<(), ApiError> {
        abortable(async { Self::execute(req).await.map(drop) }, signal).await
    }

    /// Executes a request and turns a non-success status into [`ApiError::Status`].
    async fn execute(req: RequestBuilder) -> Result<Response, ApiError> {
        let resp = req.send().await?;
        let status = resp.status();
        tracing::debug!(url = %resp.url(), %status, "received response");
        if status.is_success() {
            return Ok(resp);
        }

        let info = match resp.bytes().await {
            Ok(bytes) => serde_json::from_slice(&bytes).ok(),
            Err(e) => {
                tracing::warn!(err = %e, "unable to read error body");
                None
            }
        };
        Err(ApiError::Status {
            code: status.as_u16(),
            info,
        })
    }
}

async fn abortable<T>(
    fut: impl Future<Output = Result<T, ApiError>>,
    signal: Option<&CancellationToken>,
) -> Result<T, ApiError> {
    match signal {
        Some(signal) => tokio::select! {
            biased;
            () = signal.cancelled() => {
                tracing::debug!("request aborted");
                Err(ApiError::Aborted)
            }
            result = fut => result,
        },
        None => fut.await,
    }
}
