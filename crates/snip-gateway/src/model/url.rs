use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use snip_core::UrlRecord;

#[derive(Debug, Deserialize)]
pub struct CreateUrlRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct CreateUrlResponse {
    pub short_code: String,
    pub short_url: String,
}

#[derive(Debug, Serialize)]
pub struct UrlStatsResponse {
    pub short_code: String,
    pub original_url: String,
    pub created_at: Timestamp,
    pub visit_count: u64,
}

impl From<UrlRecord> for UrlStatsResponse {
    fn from(record: UrlRecord) -> Self {
        Self {
            short_code: record.code.to_string(),
            original_url: record.original_url,
            created_at: record.created_at,
            visit_count: record.visit_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
