use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateUrlRequest {
    /// The target URL to shorten.
    pub url: String,
    /// Caller-chosen alias; one is generated when absent.
    pub alias: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateUrlResponse {
    pub id: i64,
    pub alias: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
