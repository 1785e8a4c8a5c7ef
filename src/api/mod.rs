//! HTTP plumbing shared by the planning and personnel components
//!
//! Endpoint paths live in [`constants`]; [`client`] builds the single
//! `reqwest::Client` a run uses, with the configured timeouts.

pub mod client;
pub mod constants;

pub use client::{USER_AGENT, build_http_client};
