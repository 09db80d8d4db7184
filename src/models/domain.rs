use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Geographic point in decimal degrees
///
/// A coordinate of exactly `0.0` marks the point as missing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// True when either coordinate holds the `0.0` "missing" marker
    pub fn is_missing(&self) -> bool {
        self.latitude == 0.0 || self.longitude == 0.0
    }
}

/// Property categories attached to an offer. Descriptive only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFlags {
    #[serde(default)]
    pub apartment: bool,
    #[serde(default)]
    pub house_villa: bool,
    #[serde(default)]
    pub studio_apartment: bool,
    #[serde(default)]
    pub farm_house: bool,
    #[serde(default)]
    pub serviced_apartment: bool,
}

/// A stored commute route offered or searched by a user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub owner_id: Option<Uuid>,
    pub offer_id: Option<String>,
    pub source: GeoPoint,
    pub destination: GeoPoint,
    pub source_address: Option<String>,
    pub destination_address: Option<String>,
    pub categories: CategoryFlags,
    /// Epoch seconds
    pub created_at: i64,
}

/// Route as submitted by a user, before it is assigned an identity
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteDraft {
    pub source: GeoPoint,
    pub destination: GeoPoint,
    pub source_address: Option<String>,
    pub destination_address: Option<String>,
    pub categories: CategoryFlags,
}

/// Registered user account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub owner_id: Uuid,
    pub account_id: u64,
    pub username: String,
    pub password_hash: String,
    /// Epoch milliseconds
    pub created_at_ms: i64,
}

impl Account {
    pub fn session(&self) -> Session {
        Session {
            owner_id: self.owner_id,
            account_id: self.account_id,
            username: self.username.clone(),
        }
    }
}

/// Identity of the user on whose behalf an operation runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub owner_id: Uuid,
    pub account_id: u64,
    pub username: String,
}

/// A stored row that could not be decoded and was left out of a scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    /// Zero-based position of the row in the table scan
    pub position: usize,
    pub reason: String,
}
