//! HTTP client for the downstream processing service

use imgvoice_core::{ProcessingRequest, ProcessingResult};
use reqwest::Client;
use std::time::{Duration, Instant};

use crate::{GatewayError, GatewayResult};

/// Posts stored-object references to the processing service.
///
/// Any status is a valid outcome here; interpreting non-200 answers is left to the
/// caller through [`ProcessingResult`].
#[derive(Clone)]
pub struct ProcessingClient {
    http_client: Client,
}

impl ProcessingClient {
    /// `timeout` bounds the whole request, including reading the response body.
    pub fn new(timeout: Duration) -> GatewayResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http_client })
    }

    pub async fn forward(
        &self,
        url: &str,
        request: &ProcessingRequest,
    ) -> GatewayResult<ProcessingResult> {
        let start = Instant::now();

        let response = self
            .http_client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| map_reqwest_error(url, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| map_reqwest_error(url, e))?;

        tracing::info!(
            url = %url,
            key = %request.input_bucket_file,
            status = status,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Processing service responded"
        );

        Ok(ProcessingResult::from_response(status, body))
    }
}

fn map_reqwest_error(url: &str, err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout("the processing service".to_string())
    } else {
        tracing::warn!(url = %url, error = %err, "Processing service request failed");
        GatewayError::Transport(err.to_string())
    }
}
