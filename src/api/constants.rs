//! Endpoint paths and header values for the ISG planning and personnel services

/// Annual work plan collection on the planning service
pub const ANNUAL_WORK_PLANS_PATH: &str = "/api/AnnualWorkPlans";

/// Year-to-year plan copy on the planning service
pub const COPY_YEAR_PATH: &str = "/api/AnnualWorkPlans/copy-year";

/// Bulk training renewal update on the personnel service
pub const TRAINING_RENEWAL_UPLOAD_PATH: &str =
    "/api/personnel/reports/isg-temel-training-renewal/apply-excel";

/// Multipart form fields for the bulk upload
pub mod form {
    /// File part carrying the spreadsheet
    pub const FILE_FIELD: &str = "file";

    /// String-encoded boolean controlling overwrites on the server
    pub const OVERWRITE_FIELD: &str = "overwriteExisting";
}

/// Content types
pub mod content_types {
    pub const XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
    pub const XLS: &str = "application/vnd.ms-excel";
    pub const ODS: &str = "application/vnd.oasis.opendocument.spreadsheet";
    pub const OCTET_STREAM: &str = "application/octet-stream";
}

/// Join a configured base URL and a fixed resource path
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Full URL for work plan submission
pub fn annual_work_plans_endpoint(base_url: &str) -> String {
    endpoint(base_url, ANNUAL_WORK_PLANS_PATH)
}

/// Full URL for copying a year's plans
pub fn copy_year_endpoint(base_url: &str) -> String {
    endpoint(base_url, COPY_YEAR_PATH)
}

/// Full URL for the training renewal upload
pub fn training_renewal_endpoint(base_url: &str) -> String {
    endpoint(base_url, TRAINING_RENEWAL_UPLOAD_PATH)
}

/// Pick a content type from the spreadsheet extension
pub fn spreadsheet_content_type(file_name: &str) -> &'static str {
    let lower = file_name.to_lowercase();
    if lower.ends_with(".xlsx") {
        content_types::XLSX
    } else if lower.ends_with(".xls") {
        content_types::XLS
    } else if lower.ends_with(".ods") {
        content_types::ODS
    } else {
        content_types::OCTET_STREAM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        assert_eq!(
            annual_work_plans_endpoint("http://localhost:8094/"),
            "http://localhost:8094/api/AnnualWorkPlans"
        );
        assert_eq!(
            copy_year_endpoint("http://localhost:8094"),
            "http://localhost:8094/api/AnnualWorkPlans/copy-year"
        );
    }

    #[test]
    fn test_spreadsheet_content_type() {
        assert_eq!(spreadsheet_content_type("TABLO İSG.XLSX"), content_types::XLSX);
        assert_eq!(spreadsheet_content_type("old.xls"), content_types::XLS);
        assert_eq!(spreadsheet_content_type("data.csv"), content_types::OCTET_STREAM);
    }
}
