//! Bulk ISG basic training renewal upload to the personnel service

pub mod uploader;

pub use uploader::{RenewalUploader, UploadError, UploadSummary, UploaderConfig};
