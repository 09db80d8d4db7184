//! Serialized forms of the records kept in the record store.
//!
//! Each stored row holds one of these as a JSON document. Field names follow the
//! layout already present in existing stores, so they differ from the API models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{Account, CategoryFlags, GeoPoint, Route};

/// Stored route row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    #[serde(default)]
    pub uuid: Option<Uuid>,
    #[serde(default)]
    pub offer_id: Option<String>,
    #[serde(default)]
    pub source_address: Option<String>,
    #[serde(default)]
    pub source_lat: Option<f64>,
    #[serde(default)]
    pub source_lng: Option<f64>,
    #[serde(default)]
    pub destination_address: Option<String>,
    #[serde(default)]
    pub destination_lat: Option<f64>,
    #[serde(default)]
    pub destination_lng: Option<f64>,
    #[serde(rename = "isApartmentSelected", default)]
    pub is_apartment_selected: u8,
    #[serde(rename = "isHouseVillaSelected", default)]
    pub is_house_villa_selected: u8,
    #[serde(rename = "isStudioApartmentSelected", default)]
    pub is_studio_apartment_selected: u8,
    #[serde(rename = "isFarmHouseSelected", default)]
    pub is_farm_house_selected: u8,
    #[serde(rename = "isServiceApartmentSelected", default)]
    pub is_service_apartment_selected: u8,
    #[serde(rename = "epochTime", default)]
    pub epoch_time: i64,
}

impl From<RouteRecord> for Route {
    fn from(record: RouteRecord) -> Self {
        // Absent coordinates decode to the 0.0 "missing" marker
        let point = |lat: Option<f64>, lng: Option<f64>| {
            GeoPoint::new(lat.unwrap_or(0.0), lng.unwrap_or(0.0))
        };

        Route {
            owner_id: record.uuid,
            offer_id: record.offer_id,
            source: point(record.source_lat, record.source_lng),
            destination: point(record.destination_lat, record.destination_lng),
            source_address: record.source_address,
            destination_address: record.destination_address,
            categories: CategoryFlags {
                apartment: record.is_apartment_selected != 0,
                house_villa: record.is_house_villa_selected != 0,
                studio_apartment: record.is_studio_apartment_selected != 0,
                farm_house: record.is_farm_house_selected != 0,
                serviced_apartment: record.is_service_apartment_selected != 0,
            },
            created_at: record.epoch_time,
        }
    }
}

impl From<&Route> for RouteRecord {
    fn from(route: &Route) -> Self {
        RouteRecord {
            uuid: route.owner_id,
            offer_id: route.offer_id.clone(),
            source_address: route.source_address.clone(),
            source_lat: Some(route.source.latitude),
            source_lng: Some(route.source.longitude),
            destination_address: route.destination_address.clone(),
            destination_lat: Some(route.destination.latitude),
            destination_lng: Some(route.destination.longitude),
            is_apartment_selected: route.categories.apartment.into(),
            is_house_villa_selected: route.categories.house_villa.into(),
            is_studio_apartment_selected: route.categories.studio_apartment.into(),
            is_farm_house_selected: route.categories.farm_house.into(),
            is_service_apartment_selected: route.categories.serviced_apartment.into(),
            epoch_time: route.created_at,
        }
    }
}

/// Stored account row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub uuid: Uuid,
    #[serde(rename = "accountId")]
    pub account_id: u64,
    pub username: String,
    /// bcrypt hash, never the plain password
    pub password: String,
    #[serde(rename = "createdAtEpoch")]
    pub created_at_epoch: i64,
}

impl From<AccountRecord> for Account {
    fn from(record: AccountRecord) -> Self {
        Account {
            owner_id: record.uuid,
            account_id: record.account_id,
            username: record.username,
            password_hash: record.password,
            created_at_ms: record.created_at_epoch,
        }
    }
}

impl From<&Account> for AccountRecord {
    fn from(account: &Account) -> Self {
        AccountRecord {
            uuid: account.owner_id,
            account_id: account.account_id,
            username: account.username.clone(),
            password: account.password_hash.clone(),
            created_at_epoch: account.created_at_ms,
        }
    }
}
