use serde::Serialize;

use crate::core::{
    filters::{is_other_owner, matches_mutually, matches_round_trip, matches_source_proximity},
    token::{generate_token, OFFER_ID_LENGTH},
};
use crate::models::{GeoPoint, Route, RouteDraft, Session, SkippedRecord};

/// Result of a matching pass over a stored snapshot
#[derive(Debug, Clone, Serialize)]
pub struct MatchOutcome {
    pub matches: Vec<Route>,
    /// Rows read from the store, decoded or not
    pub scanned: usize,
    /// Rows that failed to decode and took no part in matching
    pub skipped: Vec<SkippedRecord>,
}

/// Route matching engine
///
/// Every query is a linear scan over a materialized snapshot and keeps the
/// snapshot's order. Queries are pure; [`MatchEngine::record_offer`] only
/// prepares a record and leaves the append to the caller.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    offer_id_length: usize,
}

impl MatchEngine {
    /// Engine issuing offer ids of `offer_id_length` characters
    ///
    /// An empty id would make every stored route look like the same offer, so
    /// a length of zero falls back to [`OFFER_ID_LENGTH`].
    pub fn new(offer_id_length: usize) -> Self {
        if offer_id_length == 0 {
            tracing::warn!("Offer id length of 0 ignored, using {}", OFFER_ID_LENGTH);
            return Self::with_defaults();
        }

        Self { offer_id_length }
    }

    pub fn with_defaults() -> Self {
        Self {
            offer_id_length: OFFER_ID_LENGTH,
        }
    }

    /// Find stored routes that complete the query route's trip
    ///
    /// # Arguments
    /// * `query` - The route being offered
    /// * `routes` - Snapshot of all stored routes
    ///
    /// # Returns
    /// Routes from other owners whose destination is near the query source and
    /// whose source is near the query destination
    pub fn find_matches(&self, query: &Route, routes: &[Route]) -> Vec<Route> {
        routes
            .iter()
            .filter(|candidate| is_other_owner(candidate, query.owner_id))
            .filter(|candidate| matches_round_trip(query, candidate))
            .cloned()
            .collect()
    }

    /// Find stored routes from other owners that start near a point
    ///
    /// Used by search flows where nothing is offered. Destinations are ignored.
    pub fn find_matches_one_directional(
        &self,
        session: &Session,
        point: &GeoPoint,
        routes: &[Route],
    ) -> Vec<Route> {
        routes
            .iter()
            .filter(|candidate| is_other_owner(candidate, Some(session.owner_id)))
            .filter(|candidate| matches_source_proximity(point, candidate))
            .cloned()
            .collect()
    }

    /// Pair a previously stored route with other stored routes
    pub fn find_mutual_matches(&self, anchor: &Route, candidates: &[Route]) -> Vec<Route> {
        candidates
            .iter()
            .filter(|candidate| matches_mutually(anchor, candidate))
            .cloned()
            .collect()
    }

    /// Turn a draft into a storable route owned by the session user
    pub fn record_offer(&self, session: &Session, draft: RouteDraft) -> Route {
        self.record_offer_at(session, draft, chrono::Utc::now().timestamp())
    }

    /// [`MatchEngine::record_offer`] with an explicit creation time in epoch seconds
    pub fn record_offer_at(&self, session: &Session, draft: RouteDraft, created_at: i64) -> Route {
        Route {
            owner_id: Some(session.owner_id),
            offer_id: Some(generate_token(self.offer_id_length)),
            source: draft.source,
            destination: draft.destination,
            source_address: draft.source_address,
            destination_address: draft.destination_address,
            categories: draft.categories,
            created_at,
        }
    }
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
