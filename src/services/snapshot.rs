use serde::de::DeserializeOwned;

use crate::core::MatchOutcome;
use crate::models::{Account, AccountRecord, Route, RouteRecord, SkippedRecord};
use crate::services::store::{RecordStore, StoreError, Table};

/// Decoded contents of one table
///
/// Rows that fail to decode are reported in `skipped` and the scan carries on
/// with the next row.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    pub records: Vec<T>,
    pub skipped: Vec<SkippedRecord>,
}

impl<T> Snapshot<T> {
    /// Number of rows read, decoded or not
    pub fn scanned(&self) -> usize {
        self.records.len() + self.skipped.len()
    }
}

impl Snapshot<Route> {
    /// Wrap matches found in this snapshot together with its decode report
    pub fn outcome(&self, matches: Vec<Route>) -> MatchOutcome {
        MatchOutcome {
            matches,
            scanned: self.scanned(),
            skipped: self.skipped.clone(),
        }
    }
}

/// Decode raw rows through their stored form `R` into `T`
pub fn decode_rows<R, T>(rows: Vec<String>, table: Table) -> Snapshot<T>
where
    R: DeserializeOwned,
    T: From<R>,
{
    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = Vec::new();

    for (position, row) in rows.iter().enumerate() {
        match serde_json::from_str::<R>(row) {
            Ok(record) => records.push(T::from(record)),
            Err(e) => {
                tracing::warn!("Skipping malformed {} record at position {}: {}", table.name(), position, e);
                skipped.push(SkippedRecord {
                    position,
                    reason: e.to_string(),
                });
            }
        }
    }

    Snapshot { records, skipped }
}

/// Load and decode every stored route
pub async fn load_routes(store: &dyn RecordStore) -> Result<Snapshot<Route>, StoreError> {
    let rows = store.load_all(Table::Routes).await?;
    Ok(decode_rows::<RouteRecord, Route>(rows, Table::Routes))
}

/// Load and decode every stored account
pub async fn load_accounts(store: &dyn RecordStore) -> Result<Snapshot<Account>, StoreError> {
    let rows = store.load_all(Table::Accounts).await?;
    Ok(decode_rows::<AccountRecord, Account>(rows, Table::Accounts))
}

/// Serialize and append a route
pub async fn append_route(store: &dyn RecordStore, route: &Route) -> Result<(), StoreError> {
    let content = serde_json::to_string(&RouteRecord::from(route))?;
    store.append(Table::Routes, content).await
}

/// Serialize and append an account
pub async fn append_account(store: &dyn RecordStore, account: &Account) -> Result<(), StoreError> {
    let content = serde_json::to_string(&AccountRecord::from(account))?;
    store.append(Table::Accounts, content).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::MemoryStore;

    #[tokio::test]
    async fn test_malformed_rows_are_skipped_not_fatal() {
        let store = MemoryStore::new();
        store.append(Table::Routes, r#"{"offer_id":"first"}"#.to_string()).await.unwrap();
        store.append(Table::Routes, "not json".to_string()).await.unwrap();
        store.append(Table::Routes, r#"{"source_lat":"north"}"#.to_string()).await.unwrap();
        store.append(Table::Routes, r#"{"offer_id":"last"}"#.to_string()).await.unwrap();

        let snapshot = load_routes(&store).await.unwrap();

        assert_eq!(snapshot.records.len(), 2);
        assert_eq!(snapshot.records[1].offer_id.as_deref(), Some("last"));
        let positions: Vec<_> = snapshot.skipped.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![1, 2]);
        assert_eq!(snapshot.scanned(), 4);
    }

    #[tokio::test]
    async fn test_route_survives_store_round_trip() {
        let store = MemoryStore::new();
        let route = Route {
            owner_id: Some(uuid::Uuid::new_v4()),
            offer_id: Some("Ab3dE5gH9k".to_string()),
            source: crate::models::GeoPoint::new(12.9716, 77.5946),
            destination: crate::models::GeoPoint::new(12.2958, 76.6394),
            source_address: Some("Bengaluru".to_string()),
            destination_address: Some("Mysuru".to_string()),
            categories: crate::models::CategoryFlags {
                studio_apartment: true,
                ..Default::default()
            },
            created_at: 1_700_000_000,
        };

        append_route(&store, &route).await.unwrap();
        let snapshot = load_routes(&store).await.unwrap();

        assert_eq!(snapshot.records, vec![route]);
        assert!(snapshot.skipped.is_empty());
    }
}
