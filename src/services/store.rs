use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors that can occur when reading or appending stored records
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Record tables. Each row holds one serialized record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Routes,
    Accounts,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Table::Routes => "routes",
            Table::Accounts => "accounts",
        }
    }
}

/// Append-only store of JSON records
///
/// There is no update or delete. Reads return every row of a table in
/// insertion order as a materialized snapshot.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn append(&self, table: Table, content: String) -> Result<(), StoreError>;
    async fn load_all(&self, table: Table) -> Result<Vec<String>, StoreError>;
    async fn health_check(&self) -> Result<bool, StoreError>;
}

/// Record store kept in process memory
///
/// Appends are serialized by the write lock. Used for tests and for running
/// without a database.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    tables: Arc<RwLock<HashMap<Table, Vec<String>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn append(&self, table: Table, content: String) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables.entry(table).or_default().push(content);
        tracing::trace!("Appended record to {}", table.name());
        Ok(())
    }

    async fn load_all(&self, table: Table) -> Result<Vec<String>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.get(&table).cloned().unwrap_or_default())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_keeps_insertion_order() {
        let store = MemoryStore::new();

        store.append(Table::Routes, "first".to_string()).await.unwrap();
        store.append(Table::Routes, "second".to_string()).await.unwrap();
        store.append(Table::Accounts, "account".to_string()).await.unwrap();

        let routes = store.load_all(Table::Routes).await.unwrap();
        assert_eq!(routes, vec!["first", "second"]);

        let accounts = store.load_all(Table::Accounts).await.unwrap();
        assert_eq!(accounts, vec!["account"]);
    }

    #[tokio::test]
    async fn test_empty_table() {
        let store = MemoryStore::new();
        assert!(store.load_all(Table::Routes).await.unwrap().is_empty());
    }

    #[test]
    fn test_table_names() {
        assert_eq!(Table::Routes.name(), "routes");
        assert_eq!(Table::Accounts.name(), "accounts");
    }
}
