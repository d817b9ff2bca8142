//! DTOs for the forced refresh endpoint.

use serde::Serialize;

use crate::application::services::RefreshOutcome;

/// One repository whose refresh failed.
#[derive(Debug, Serialize)]
pub struct FailedRepository {
    pub url: String,
    pub error: String,
}

/// Result of a cache-bypassing refresh cycle.
///
/// Successes and failures are reported side by side so partial failure is
/// visible to the caller instead of being silently dropped.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub message: String,
    pub refreshed: usize,
    pub failed: Vec<FailedRepository>,
}

impl RefreshResponse {
    /// Builds the response from per-repository refresh outcomes.
    pub fn from_outcomes(outcomes: Vec<RefreshOutcome>) -> Self {
        let refreshed = outcomes.iter().filter(|o| o.is_success()).count();

        let failed: Vec<FailedRepository> = outcomes
            .into_iter()
            .filter_map(|o| match o.result {
                Ok(_) => None,
                Err(e) => Some(FailedRepository {
                    url: o.url,
                    error: e.message().to_string(),
                }),
            })
            .collect();

        let message = if failed.is_empty() {
            "Teams data refreshed successfully".to_string()
        } else {
            format!("Refreshed with {} failure(s)", failed.len())
        };

        RefreshResponse {
            message,
            refreshed,
            failed,
        }
    }
}
