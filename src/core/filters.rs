use uuid::Uuid;

use crate::core::distance::{distance_between, is_sentinel};
use crate::models::{GeoPoint, Route};

/// Two endpoints pair up when they are closer than this
pub const MATCH_RADIUS_KM: f64 = 10.0;

/// Check a computed distance against the match radius
///
/// The sentinel is negative and would otherwise pass the comparison.
#[inline]
pub fn is_within_radius(distance: f64) -> bool {
    !is_sentinel(distance) && distance < MATCH_RADIUS_KM
}

/// Check that a candidate is not owned by the querying user
#[inline]
pub fn is_other_owner(candidate: &Route, owner_id: Option<Uuid>) -> bool {
    candidate.owner_id != owner_id
}

/// Check if a stored route completes the query route's trip
///
/// The query source must be near the candidate's destination and the candidate's
/// source near the query destination.
#[inline]
pub fn matches_round_trip(query: &Route, candidate: &Route) -> bool {
    let query_src_to_candidate_dest = distance_between(&query.source, &candidate.destination);
    let candidate_src_to_query_dest = distance_between(&candidate.source, &query.destination);

    is_within_radius(query_src_to_candidate_dest) && is_within_radius(candidate_src_to_query_dest)
}

/// Check if a stored route starts near a searched point
#[inline]
pub fn matches_source_proximity(point: &GeoPoint, candidate: &Route) -> bool {
    is_within_radius(distance_between(&candidate.source, point))
}

/// Check if two stored routes from different users pair up
///
/// Candidates without an offer id or owner never pair.
pub fn matches_mutually(anchor: &Route, candidate: &Route) -> bool {
    let (Some(offer_id), Some(owner_id)) = (candidate.offer_id.as_deref(), candidate.owner_id) else {
        return false;
    };

    if anchor.offer_id.as_deref() == Some(offer_id) || anchor.owner_id == Some(owner_id) {
        return false;
    }

    let candidate_src_to_anchor_dest = distance_between(&candidate.source, &anchor.destination);
    let anchor_src_to_candidate_dest = distance_between(&anchor.source, &candidate.destination);

    is_within_radius(candidate_src_to_anchor_dest) && is_within_radius(anchor_src_to_candidate_dest)
}
