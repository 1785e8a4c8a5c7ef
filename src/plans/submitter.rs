//! Best-effort sequential submission of work plan records
//!
//! Every record goes out as its own POST. A rejected or failed record is
//! recorded in the [`BatchSummary`] and the batch moves on; nothing a single
//! record does can stop the rest of the batch.

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use reqwest::StatusCode;

use super::models::WorkPlanRecord;
use crate::api::constants::annual_work_plans_endpoint;

/// What happened to one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Server answered 200 or 201
    Accepted,
    /// Server answered with any other status
    Rejected { status: u16 },
    /// No usable HTTP answer: connection, DNS, timeout or protocol failure
    TransportFailure { cause: String },
}

impl SubmissionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionOutcome::Accepted)
    }

    fn from_status(status: StatusCode) -> Self {
        if status == StatusCode::OK || status == StatusCode::CREATED {
            SubmissionOutcome::Accepted
        } else {
            SubmissionOutcome::Rejected {
                status: status.as_u16(),
            }
        }
    }
}

/// Accumulated outcomes of a batch, bucketed by sequence number in submission order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub accepted: Vec<u32>,
    pub rejected: Vec<(u32, u16)>,
    pub failed: Vec<(u32, String)>,
}

impl BatchSummary {
    /// Fold one outcome into the summary
    pub fn record(mut self, sequence_number: u32, outcome: SubmissionOutcome) -> Self {
        match outcome {
            SubmissionOutcome::Accepted => self.accepted.push(sequence_number),
            SubmissionOutcome::Rejected { status } => self.rejected.push((sequence_number, status)),
            SubmissionOutcome::TransportFailure { cause } => {
                self.failed.push((sequence_number, cause))
            }
        }
        self
    }

    pub fn total(&self) -> usize {
        self.accepted.len() + self.rejected.len() + self.failed.len()
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Sequence numbers worth re-running: rejected and failed, in submission order
    pub fn retry_candidates(&self) -> Vec<u32> {
        let mut seqs: Vec<u32> = self
            .rejected
            .iter()
            .map(|(seq, _)| *seq)
            .chain(self.failed.iter().map(|(seq, _)| *seq))
            .collect();
        seqs.sort_unstable();
        seqs
    }

    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty() && self.failed.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct SubmitterConfig {
    /// Full URL records are POSTed to
    pub endpoint: String,
}

impl SubmitterConfig {
    pub fn from_base_url(base_url: &str) -> Self {
        Self {
            endpoint: annual_work_plans_endpoint(base_url),
        }
    }
}

pub struct WorkPlanSubmitter {
    http_client: reqwest::Client,
    config: SubmitterConfig,
}

impl WorkPlanSubmitter {
    pub fn new(http_client: reqwest::Client, config: SubmitterConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Submit a single record. Never errors; failures become outcomes.
    pub async fn submit_one(&self, record: &WorkPlanRecord) -> SubmissionOutcome {
        debug!(
            "POST {} (sequence {})",
            self.config.endpoint, record.sequence_number
        );

        match self
            .http_client
            .post(&self.config.endpoint)
            .json(record)
            .send()
            .await
        {
            Ok(response) => {
                let outcome = SubmissionOutcome::from_status(response.status());
                if let SubmissionOutcome::Rejected { status } = &outcome {
                    warn!(
                        "Record {} rejected with status {}",
                        record.sequence_number, status
                    );
                }
                outcome
            }
            Err(e) => {
                warn!("Record {} failed: {}", record.sequence_number, e);
                SubmissionOutcome::TransportFailure {
                    cause: e.to_string(),
                }
            }
        }
    }

    /// Submit records one after another in input order.
    ///
    /// `on_outcome` sees each record as soon as its outcome is known, which
    /// lets the caller report progress while the batch runs.
    pub async fn submit_batch<F>(&self, records: &[WorkPlanRecord], mut on_outcome: F) -> BatchSummary
    where
        F: FnMut(&WorkPlanRecord, &SubmissionOutcome),
    {
        info!(
            "Submitting {} work plan records to {}",
            records.len(),
            self.config.endpoint
        );

        let summary = stream::iter(records)
            .then(|record| async move { (record, self.submit_one(record).await) })
            .fold(BatchSummary::default(), |summary, (record, outcome)| {
                on_outcome(record, &outcome);
                futures::future::ready(summary.record(record.sequence_number, outcome))
            })
            .await;

        info!(
            "Batch finished: {} accepted, {} rejected, {} failed",
            summary.accepted_count(),
            summary.rejected_count(),
            summary.failed_count()
        );
        summary
    }
}
