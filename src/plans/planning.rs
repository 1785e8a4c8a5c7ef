use log::{debug, info};
use reqwest::StatusCode;
use thiserror::Error;

use super::models::{CopyYearRequest, PlanSummary};
use crate::api::constants::{annual_work_plans_endpoint, copy_year_endpoint};

#[derive(Debug, Error)]
pub enum PlanningError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Planning service rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Unexpected response body: {body}")]
    MalformedResponse {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Request to planning service failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Read-side and maintenance calls against the planning service
pub struct PlanningClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl PlanningClient {
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
        }
    }

    /// Plans stored for one year, sorted by sequence number (unnumbered last)
    pub async fn list_plans(&self, year: i32) -> Result<Vec<PlanSummary>, PlanningError> {
        let url = annual_work_plans_endpoint(&self.base_url);
        debug!("GET {}?year={}", url, year);

        let response = self
            .http_client
            .get(&url)
            .query(&[("year", year)])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            return Err(PlanningError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let mut plans: Vec<PlanSummary> = serde_json::from_str(&body)
            .map_err(|source| PlanningError::MalformedResponse { body, source })?;
        plans.sort_by_key(|p| (p.sequence_number.is_none(), p.sequence_number));

        debug!("Fetched {} plans for {}", plans.len(), year);
        Ok(plans)
    }

    /// Ask the server to duplicate every plan of `source_year` into `target_year`.
    ///
    /// Returns the number of plans the server created.
    pub async fn copy_year(&self, source_year: i32, target_year: i32) -> Result<u64, PlanningError> {
        let url = copy_year_endpoint(&self.base_url);
        debug!("POST {} ({} -> {})", url, source_year, target_year);

        let response = self
            .http_client
            .post(&url)
            .json(&CopyYearRequest {
                source_year,
                target_year,
            })
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        match status {
            StatusCode::OK | StatusCode::CREATED => {
                let copied: u64 = serde_json::from_str(body.trim())
                    .map_err(|source| PlanningError::MalformedResponse { body, source })?;
                info!("Copied {} plans from {} to {}", copied, source_year, target_year);
                Ok(copied)
            }
            StatusCode::NOT_FOUND => Err(PlanningError::NotFound {
                message: not_found_message(&body, source_year),
            }),
            other => Err(PlanningError::Rejected {
                status: other.as_u16(),
                body,
            }),
        }
    }
}

fn not_found_message(body: &str, source_year: i32) -> String {
    // The service answers with a bare string, sometimes JSON-quoted
    let text = serde_json::from_str::<String>(body).unwrap_or_else(|_| body.trim().to_string());
    if text.is_empty() {
        format!("No plans found for year {}", source_year)
    } else {
        text
    }
}
