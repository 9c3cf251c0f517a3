use serde::{Deserialize, Serialize};

use crate::search::AggregatedResult;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Absent and blank keywords are both rejected by the handler.
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchEnvelope {
    pub success: bool,
    pub data: AggregatedResult,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
