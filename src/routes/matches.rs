use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

use crate::core::{build_listings, distance_between, partition_by_owner, MatchOutcome};
use crate::models::{GeoPoint, ListingResponse, OfferResponse, OfferRouteRequest, SearchRequest};
use crate::routes::{authenticate, error_response, AppState};
use crate::services::{append_route, load_routes, Snapshot};

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/routes/offer", web::post().to(offer_route))
        .route("/routes/search", web::post().to(search_routes))
        .route("/routes/mine", web::get().to(my_routes))
        .route("/routes/{offer_id}/matches", web::get().to(mutual_matches));
}

/// Offer a route endpoint
///
/// POST /api/v1/routes/offer
///
/// Request body:
/// ```json
/// {
///   "source": { "latitude": 12.9716, "longitude": 77.5946 },
///   "destination": { "latitude": 12.2958, "longitude": 76.6394 },
///   "sourceAddress": "string",
///   "destinationAddress": "string",
///   "categories": { "apartment": true }
/// }
/// ```
///
/// The offer is stored whether or not anything matches.
async fn offer_route(
    state: web::Data<AppState>,
    req: web::Json<OfferRouteRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    let session = match authenticate(&state, &http_req) {
        Ok(session) => session,
        Err(response) => return response,
    };

    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    // Snapshot before the append, so the new offer never matches itself
    let snapshot = match load_routes(state.store.as_ref()).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!("Failed to load routes for {}: {}", session.username, e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load routes", e.to_string());
        }
    };

    let offer = state.engine.record_offer(&session, req.into_inner().into_draft());
    let matches = state.engine.find_matches(&offer, &snapshot.records);

    let trip_distance_km =
        (!offer.source.is_missing()).then(|| distance_between(&offer.source, &offer.destination));
    if trip_distance_km.is_none() {
        tracing::info!("Offer from {} has a missing source coordinate", session.username);
    }

    if let Err(e) = append_route(state.store.as_ref(), &offer).await {
        tracing::error!("Failed to store offer for {}: {}", session.username, e);
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to store offer", e.to_string());
    }

    tracing::info!(
        "Stored offer {:?} for {} with {} matches (from {} records, {} skipped)",
        offer.offer_id,
        session.username,
        matches.len(),
        snapshot.scanned(),
        snapshot.skipped.len()
    );

    HttpResponse::Ok().json(OfferResponse {
        offer,
        trip_distance_km,
        outcome: snapshot.outcome(matches),
    })
}

/// Search endpoint
///
/// POST /api/v1/routes/search
///
/// Request body:
/// ```json
/// { "point": { "latitude": 12.9716, "longitude": 77.5946 } }
/// ```
///
/// Returns other users' routes starting near the point. Nothing is stored.
async fn search_routes(
    state: web::Data<AppState>,
    req: web::Json<SearchRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    let session = match authenticate(&state, &http_req) {
        Ok(session) => session,
        Err(response) => return response,
    };

    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let snapshot = match load_routes(state.store.as_ref()).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!("Failed to load routes for {}: {}", session.username, e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load routes", e.to_string());
        }
    };

    let point = GeoPoint::from(req.point);
    let matches = state
        .engine
        .find_matches_one_directional(&session, &point, &snapshot.records);

    tracing::debug!("Search by {} found {} routes", session.username, matches.len());

    HttpResponse::Ok().json(snapshot.outcome(matches))
}

/// Listings endpoint
///
/// GET /api/v1/routes/mine
///
/// Returns the session owner's routes, newest first.
async fn my_routes(state: web::Data<AppState>, http_req: HttpRequest) -> impl Responder {
    let session = match authenticate(&state, &http_req) {
        Ok(session) => session,
        Err(response) => return response,
    };

    let Snapshot { records, skipped } = match load_routes(state.store.as_ref()).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!("Failed to load routes for {}: {}", session.username, e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load routes", e.to_string());
        }
    };

    let (mine, _) = partition_by_owner(&session, records);

    HttpResponse::Ok().json(ListingResponse {
        listings: build_listings(&mine),
        skipped,
    })
}

/// Mutual matches endpoint
///
/// GET /api/v1/routes/{offer_id}/matches
///
/// Pairs one of the session owner's stored routes with other users' routes.
async fn mutual_matches(
    state: web::Data<AppState>,
    path: web::Path<String>,
    http_req: HttpRequest,
) -> impl Responder {
    let session = match authenticate(&state, &http_req) {
        Ok(session) => session,
        Err(response) => return response,
    };

    let offer_id = path.into_inner();

    let snapshot = match load_routes(state.store.as_ref()).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!("Failed to load routes for {}: {}", session.username, e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load routes", e.to_string());
        }
    };

    let scanned = snapshot.scanned();
    let Snapshot { records, skipped } = snapshot;
    let (mine, others) = partition_by_owner(&session, records);

    let Some(anchor) = mine
        .iter()
        .find(|route| route.offer_id.as_deref() == Some(offer_id.as_str()))
    else {
        return error_response(
            StatusCode::NOT_FOUND,
            "Unknown offer",
            format!("No route {} owned by {}", offer_id, session.username),
        );
    };

    let matches = state.engine.find_mutual_matches(anchor, &others);

    tracing::debug!("Offer {} has {} mutual matches", offer_id, matches.len());

    HttpResponse::Ok().json(MatchOutcome {
        matches,
        scanned,
        skipped,
    })
}
