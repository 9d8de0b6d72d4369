use reqwest::{Client, redirect};

use crate::args::{DEFAULT_USER_AGENT, HttpVersion};
use crate::error::{AppError, AppResult, HttpError};
use crate::measure::RunPolicy;

use super::RequestSpec;

/// Redirect hop cap when following is enabled.
const REDIRECT_LIMIT: usize = 10;

/// Builds the pooled client for one executor. The pool is capped at a
/// single idle connection per host so per-worker connection behavior
/// stays observable and isolated.
///
/// # Errors
///
/// Returns [`HttpError::BuildClientFailed`] when the TLS backend or
/// client configuration cannot be initialized.
pub fn build_client(spec: &RequestSpec, policy: &RunPolicy) -> AppResult<Client> {
    let mut builder = Client::builder()
        .timeout(spec.timeout)
        .pool_max_idle_per_host(1)
        .user_agent(DEFAULT_USER_AGENT);

    builder = if policy.follow_redirects {
        builder.redirect(redirect::Policy::limited(REDIRECT_LIMIT))
    } else {
        builder.redirect(redirect::Policy::none())
    };

    if !policy.validate_certs {
        builder = builder
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true);
    }

    builder = match spec.version {
        HttpVersion::V1_0 | HttpVersion::V1_1 => builder.http1_only(),
        HttpVersion::V2 => builder.http2_prior_knowledge(),
    };

    builder
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}
