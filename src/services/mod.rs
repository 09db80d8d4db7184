// Service exports
pub mod accounts;
pub mod postgres;
pub mod session;
pub mod snapshot;
pub mod store;

pub use accounts::{AccountError, AccountService};
pub use postgres::PostgresStore;
pub use session::{SessionError, SessionKeys};
pub use snapshot::{append_route, load_accounts, load_routes, Snapshot};
pub use store::{MemoryStore, RecordStore, StoreError, Table};
