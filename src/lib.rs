//! Homeroute - commute-route matching for roommate and property offers
//!
//! Users offer a route between two points; the service pairs it with other
//! users' routes whose endpoints lie within 10 km of its own, in reverse.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{MatchEngine, MatchOutcome, distance::{distance_km, DISTANCE_SENTINEL}};
pub use models::{GeoPoint, Route, RouteDraft, Session, SkippedRecord};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        assert_eq!(distance_km(12.9716, 77.5946, 12.9716, 77.5946), 0.0);
        assert_eq!(distance_km(0.0, 77.5946, 12.9716, 77.5946), DISTANCE_SENTINEL);
    }
}
