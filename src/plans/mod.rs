//! Annual work plan records and their submission to the planning service

pub mod catalog;
pub mod models;
pub mod planning;
pub mod submitter;

pub use catalog::{ANNUAL_WORK_PLAN_CATALOG, builtin_records, load_records_file, parse_records};
pub use models::{BatchIssues, PlanSummary, Priority, Status, WorkPlanRecord, inspect_batch};
pub use planning::{PlanningClient, PlanningError};
pub use submitter::{BatchSummary, SubmissionOutcome, SubmitterConfig, WorkPlanSubmitter};
