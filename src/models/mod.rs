// Model exports
pub mod domain;
pub mod record;
pub mod requests;
pub mod responses;

pub use domain::{Account, CategoryFlags, GeoPoint, Route, RouteDraft, Session, SkippedRecord};
pub use record::{AccountRecord, RouteRecord};
pub use requests::{CredentialsRequest, OfferRouteRequest, PointPayload, SearchRequest};
pub use responses::{ErrorResponse, HealthResponse, ListingEntry, ListingResponse, OfferResponse, SessionResponse};
