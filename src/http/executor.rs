use std::sync::Arc;

use futures_util::StreamExt;
use reqwest::{Client, Request};
use tracing::{debug, error, warn};

use crate::error::{AppError, AppResult, HttpError};
use crate::measure::RunPolicy;
use crate::telemetry::{TelemetryEvent, TelemetrySender};

use super::{RequestSpec, build_client};

/// Outcome of one request attempt. Timeouts and transport failures are
/// absorbed here; neither unwinds the worker loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Completed { status: u16, bytes: u64 },
    TimedOut,
    Failed,
}

/// Sends one fully-configured request at a time over its own pooled
/// client, streaming the response body to completion.
#[derive(Debug)]
pub struct RequestExecutor {
    client: Client,
    spec: Arc<RequestSpec>,
}

impl RequestExecutor {
    /// Builds an executor with its own client so connection behavior is
    /// isolated per worker.
    ///
    /// # Errors
    ///
    /// Returns an error when the client cannot be built.
    pub fn new(spec: Arc<RequestSpec>, policy: &RunPolicy) -> AppResult<Self> {
        let client = build_client(&spec, policy)?;
        Ok(Self { client, spec })
    }

    /// Issues one untimed request to verify the target is reachable at
    /// all before any worker spawns.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::TargetUnreachable`] on DNS or connection
    /// failures. Slow or misbehaving responses are not escalated; the
    /// run can still measure those.
    pub async fn preflight(&self) -> AppResult<()> {
        let request = self.build_request()?;
        match self.client.execute(request).await {
            Ok(response) => {
                drop(drain_body(response).await);
                Ok(())
            }
            Err(err) if err.is_connect() => Err(AppError::http(HttpError::TargetUnreachable {
                url: self.spec.url.clone(),
                source: err,
            })),
            Err(err) => {
                debug!("Preflight request did not complete cleanly: {}", err);
                Ok(())
            }
        }
    }

    /// Sends one request and streams the body fully, reporting bytes and
    /// in-flight transitions to the telemetry tap.
    pub async fn execute(&self, telemetry: &TelemetrySender) -> Attempt {
        let request = match self.build_request() {
            Ok(request) => request,
            Err(err) => {
                error!("Failed to build request: {}", err);
                return Attempt::Failed;
            }
        };

        telemetry.record(TelemetryEvent::Opened);
        let attempt = self.send_and_drain(request, telemetry).await;
        telemetry.record(TelemetryEvent::Closed);
        attempt
    }

    async fn send_and_drain(&self, request: Request, telemetry: &TelemetrySender) -> Attempt {
        match self.client.execute(request).await {
            Ok(response) => {
                let status = response.status().as_u16();
                match drain_body(response).await {
                    Ok(bytes) => {
                        telemetry.record(TelemetryEvent::Transferred(bytes));
                        Attempt::Completed { status, bytes }
                    }
                    Err(err) if err.is_timeout() => {
                        warn!("Response body read timed out: {}", err);
                        Attempt::TimedOut
                    }
                    Err(err) => {
                        warn!("Failed to read response body: {}", err);
                        Attempt::Failed
                    }
                }
            }
            Err(err) if err.is_timeout() => {
                warn!("Request timed out: {}", err);
                Attempt::TimedOut
            }
            Err(err) => {
                warn!("Request failed: {}", err);
                Attempt::Failed
            }
        }
    }

    fn build_request(&self) -> AppResult<Request> {
        let mut builder = self
            .client
            .request(self.spec.method.as_reqwest(), &self.spec.url)
            .version(self.spec.version.as_reqwest())
            .timeout(self.spec.timeout);

        for (key, value) in &self.spec.headers {
            builder = builder.header(key, value);
        }
        if let Some(body) = self.spec.body.as_ref() {
            builder = builder.body(body.clone());
        }

        builder.build().map_err(|err| {
            AppError::http(HttpError::BuildRequestFailed {
                url: self.spec.url.clone(),
                source: err,
            })
        })
    }
}

async fn drain_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
