// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod listing;
pub mod matcher;
pub mod token;

pub use distance::{distance_between, distance_km, haversine_distance, is_sentinel, DISTANCE_SENTINEL};
pub use filters::{is_within_radius, matches_mutually, matches_round_trip, matches_source_proximity, MATCH_RADIUS_KM};
pub use listing::{build_listings, display_date, partition_by_owner};
pub use matcher::{MatchEngine, MatchOutcome};
pub use token::{generate_token, OFFER_ID_LENGTH};
