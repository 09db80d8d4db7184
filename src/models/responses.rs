use serde::{Deserialize, Serialize};

use crate::core::MatchOutcome;
use crate::models::domain::{Route, Session, SkippedRecord};

/// Issued session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub token: String,
    pub session: Session,
}

/// Response for the offer endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferResponse {
    pub offer: Route,
    /// Source to destination distance; absent when the source point is missing
    pub trip_distance_km: Option<f64>,
    #[serde(flatten)]
    pub outcome: MatchOutcome,
}

/// One of the session owner's routes, prepared for display
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingEntry {
    pub offer_id: Option<String>,
    pub date_label: String,
    pub source_address: String,
    pub destination_address: String,
    pub created_at: i64,
}

/// Response for the listings endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ListingResponse {
    pub listings: Vec<ListingEntry>,
    pub skipped: Vec<SkippedRecord>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
