pub mod api;
pub mod cli;
pub mod config;
pub mod excel;
pub mod plans;
pub mod renewal;
