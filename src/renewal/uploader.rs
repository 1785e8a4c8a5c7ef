use log::{debug, info, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, StatusCode};
use serde::{Deserialize, Deserializer};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use crate::api::constants::{form, spreadsheet_content_type, training_renewal_endpoint};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Upload rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Server returned 200 but the summary could not be parsed: {source}")]
    MalformedResponse {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Upload request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Aggregate result the personnel service reports for a bulk renewal upload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    pub total_rows: u64,
    pub updated_count: u64,
    pub skipped_count: u64,
    pub not_found_count: u64,
    /// National identifiers of updated personnel, in server order
    #[serde(rename = "updatedTcList", default, deserialize_with = "null_as_empty")]
    pub updated_identifiers: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl UploadSummary {
    pub fn accounted_rows(&self) -> u64 {
        self.updated_count
            .saturating_add(self.skipped_count)
            .saturating_add(self.not_found_count)
    }

    /// The server promises `totalRows >= updated + skipped + notFound`; nothing
    /// here depends on it holding.
    pub fn is_consistent(&self) -> bool {
        self.total_rows >= self.accounted_rows()
    }

    /// First `limit` identifiers and whether more were left out
    pub fn identifier_preview(&self, limit: usize) -> (&[String], bool) {
        let shown = &self.updated_identifiers[..self.updated_identifiers.len().min(limit)];
        (shown, self.updated_identifiers.len() > limit)
    }
}

#[derive(Debug, Clone)]
pub struct UploaderConfig {
    /// Full URL the multipart form is POSTed to
    pub endpoint: String,
}

impl UploaderConfig {
    pub fn from_base_url(base_url: &str) -> Self {
        Self {
            endpoint: training_renewal_endpoint(base_url),
        }
    }
}

pub struct RenewalUploader {
    http_client: reqwest::Client,
    config: UploaderConfig,
}

impl RenewalUploader {
    pub fn new(http_client: reqwest::Client, config: UploaderConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Stream `path` to the renewal endpoint in a single attempt.
    ///
    /// The file is opened before any request is built, so a missing file never
    /// reaches the network. The handle is owned by the request body and is
    /// dropped whichever way the request ends.
    pub async fn upload_file(
        &self,
        path: &Path,
        overwrite_existing: bool,
    ) -> Result<UploadSummary, UploadError> {
        let file = open_for_upload(path).await?;
        let length = file
            .metadata()
            .await
            .map_err(|source| UploadError::Io {
                path: path.to_path_buf(),
                source,
            })?
            .len();

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.xlsx".to_string());

        let body = Body::wrap_stream(ReaderStream::new(file));
        let part = Part::stream_with_length(body, length)
            .file_name(file_name.clone())
            .mime_str(spreadsheet_content_type(&file_name))?;

        let form = Form::new()
            .part(form::FILE_FIELD, part)
            .text(form::OVERWRITE_FIELD, overwrite_existing.to_string());

        debug!(
            "POST {} ({}, {} bytes, overwriteExisting={})",
            self.config.endpoint, file_name, length, overwrite_existing
        );

        let response = self
            .http_client
            .post(&self.config.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Upload answered {} ({} bytes)", status, body.len());

        if status != StatusCode::OK {
            warn!("Upload of {:?} rejected with status {}", path, status);
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let summary: UploadSummary = serde_json::from_str(&body)
            .map_err(|source| UploadError::MalformedResponse { body, source })?;

        if !summary.is_consistent() {
            warn!(
                "Server summary accounts for {} rows but reports total {}",
                summary.accounted_rows(),
                summary.total_rows
            );
        }
        info!(
            "Upload applied: total={}, updated={}, skipped={}, not_found={}",
            summary.total_rows, summary.updated_count, summary.skipped_count, summary.not_found_count
        );

        Ok(summary)
    }
}

async fn open_for_upload(path: &Path) -> Result<File, UploadError> {
    let file = File::open(path).await.map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => UploadError::FileNotFound(path.to_path_buf()),
        _ => UploadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let metadata = file.metadata().await.map_err(|source| UploadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if !metadata.is_file() {
        return Err(UploadError::Io {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        });
    }

    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_from_server_json() {
        let summary: UploadSummary = serde_json::from_value(json!({
            "totalRows": 10,
            "updatedCount": 7,
            "skippedCount": 2,
            "notFoundCount": 1,
            "updatedTcList": ["A", "B"]
        }))
        .unwrap();

        assert_eq!(summary.total_rows, 10);
        assert_eq!(summary.updated_identifiers, vec!["A", "B"]);
        assert!(summary.is_consistent());
    }

    #[test]
    fn test_missing_or_null_identifier_list() {
        let absent: UploadSummary = serde_json::from_value(json!({
            "totalRows": 1, "updatedCount": 0, "skippedCount": 1, "notFoundCount": 0
        }))
        .unwrap();
        assert!(absent.updated_identifiers.is_empty());

        let null: UploadSummary = serde_json::from_value(json!({
            "totalRows": 1, "updatedCount": 0, "skippedCount": 1, "notFoundCount": 0,
            "updatedTcList": null
        }))
        .unwrap();
        assert!(null.updated_identifiers.is_empty());
    }

    #[test]
    fn test_missing_count_is_an_error() {
        let result: Result<UploadSummary, _> = serde_json::from_value(json!({
            "totalRows": 3, "updatedCount": 1
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_inconsistent_summary_is_tolerated() {
        let summary = UploadSummary {
            total_rows: 2,
            updated_count: 5,
            skipped_count: 1,
            not_found_count: u64::MAX,
            updated_identifiers: Vec::new(),
        };
        assert!(!summary.is_consistent());
        assert_eq!(summary.accounted_rows(), u64::MAX);
    }

    #[test]
    fn test_identifier_preview() {
        let summary = UploadSummary {
            total_rows: 7,
            updated_count: 7,
            skipped_count: 0,
            not_found_count: 0,
            updated_identifiers: (1..=7).map(|i| format!("TC{}", i)).collect(),
        };

        let (shown, truncated) = summary.identifier_preview(5);
        assert_eq!(shown.len(), 5);
        assert_eq!(shown[0], "TC1");
        assert!(truncated);

        let (shown, truncated) = summary.identifier_preview(10);
        assert_eq!(shown.len(), 7);
        assert!(!truncated);
    }

    #[tokio::test]
    async fn test_directory_is_not_uploadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_for_upload(dir.path()).await.unwrap_err();
        assert!(matches!(err, UploadError::Io { .. }));
    }
}
