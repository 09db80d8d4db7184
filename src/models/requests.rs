use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{CategoryFlags, GeoPoint, RouteDraft};

/// Username and password for registration or login
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Coordinate pair as submitted by a client
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct PointPayload {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl From<PointPayload> for GeoPoint {
    fn from(payload: PointPayload) -> Self {
        GeoPoint::new(payload.latitude, payload.longitude)
    }
}

/// Request to offer a route and find matching offers
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OfferRouteRequest {
    #[validate(nested)]
    pub source: PointPayload,
    #[validate(nested)]
    pub destination: PointPayload,
    #[serde(default)]
    pub source_address: Option<String>,
    #[serde(default)]
    pub destination_address: Option<String>,
    #[serde(default)]
    pub categories: CategoryFlags,
}

impl OfferRouteRequest {
    pub fn into_draft(self) -> RouteDraft {
        RouteDraft {
            source: self.source.into(),
            destination: self.destination.into(),
            source_address: self.source_address,
            destination_address: self.destination_address,
            categories: self.categories,
        }
    }
}

/// Request to search offers starting near a single point
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(nested)]
    pub point: PointPayload,
}
