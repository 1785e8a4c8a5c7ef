use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    Planned,
    InProgress,
    Done,
    Completed,
    Delayed,
    Cancelled,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Planned => "Planned",
            Status::InProgress => "InProgress",
            Status::Done => "Done",
            Status::Completed => "Completed",
            Status::Delayed => "Delayed",
            Status::Cancelled => "Cancelled",
        };
        write!(f, "{}", name)
    }
}

/// One line of a yearly safety-activity plan, in the planning API's wire shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkPlanRecord {
    pub year: i32,
    pub category: String,
    pub sequence_number: u32,
    pub activity_name: String,
    pub related_legislation: String,
    pub priority: Priority,
    pub status: Status,
}

/// Plan as returned by the list endpoint; only the fields the CLI prints
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    #[serde(default)]
    pub id: Option<i64>,
    pub year: i32,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sequence_number: Option<u32>,
    #[serde(default)]
    pub activity_name: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyYearRequest {
    pub source_year: i32,
    pub target_year: i32,
}

/// Problems found before a batch is sent
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchIssues {
    /// Sequence numbers that appear more than once
    pub duplicate_sequences: Vec<u32>,
    /// Records missing an activity name or legislation reference
    pub incomplete_records: Vec<u32>,
    /// Positions where the sequence number does not increase
    pub out_of_order: Vec<u32>,
}

impl BatchIssues {
    /// Duplicates and incomplete records block submission; ordering only warns
    pub fn is_blocking(&self) -> bool {
        !self.duplicate_sequences.is_empty() || !self.incomplete_records.is_empty()
    }
}

/// Inspect a batch for duplicated or non-increasing sequence numbers and empty required fields
pub fn inspect_batch(records: &[WorkPlanRecord]) -> BatchIssues {
    let mut issues = BatchIssues::default();
    let mut seen = HashSet::new();
    let mut previous: Option<u32> = None;

    for record in records {
        let seq = record.sequence_number;

        if !seen.insert(seq) && !issues.duplicate_sequences.contains(&seq) {
            issues.duplicate_sequences.push(seq);
        }

        if record.activity_name.trim().is_empty() || record.related_legislation.trim().is_empty() {
            issues.incomplete_records.push(seq);
        }

        if let Some(prev) = previous {
            if seq <= prev {
                issues.out_of_order.push(seq);
            }
        }
        previous = Some(seq);
    }

    issues
}
