// Integration tests for Homeroute

use homeroute::core::{MatchEngine, OFFER_ID_LENGTH};
use homeroute::models::{CategoryFlags, GeoPoint, Route, RouteDraft, Session};
use homeroute::services::{append_route, load_routes, MemoryStore, RecordStore, Table};
use uuid::Uuid;

const BANGALORE: GeoPoint = GeoPoint::new(12.9716, 77.5946);
const MYSORE: GeoPoint = GeoPoint::new(12.2958, 76.6394);

fn create_session(name: &str) -> Session {
    Session {
        owner_id: Uuid::new_v4(),
        account_id: 1_234_567_890,
        username: name.to_string(),
    }
}

fn create_route(owner: Option<Uuid>, offer_id: &str, source: GeoPoint, destination: GeoPoint) -> Route {
    Route {
        owner_id: owner,
        offer_id: Some(offer_id.to_string()),
        source,
        destination,
        source_address: Some(format!("{} source", offer_id)),
        destination_address: Some(format!("{} destination", offer_id)),
        categories: CategoryFlags::default(),
        created_at: 1_700_000_000,
    }
}

fn draft(source: GeoPoint, destination: GeoPoint) -> RouteDraft {
    RouteDraft {
        source,
        destination,
        source_address: Some("MG Road, Bengaluru".to_string()),
        destination_address: Some("Mysuru Palace".to_string()),
        categories: CategoryFlags {
            apartment: true,
            ..CategoryFlags::default()
        },
    }
}

/// The offer flow as the service runs it: snapshot, match, then append
async fn offer(engine: &MatchEngine, store: &MemoryStore, session: &Session, draft: RouteDraft) -> (Route, Vec<Route>) {
    let snapshot = load_routes(store).await.unwrap();
    let offer = engine.record_offer(session, draft);
    let matches = engine.find_matches(&offer, &snapshot.records);
    append_route(store, &offer).await.unwrap();
    (offer, matches)
}

#[tokio::test]
async fn test_integration_reverse_route_matches() {
    let engine = MatchEngine::with_defaults();
    let store = MemoryStore::new();
    let u1 = create_session("u1");
    let u2 = create_session("u2");

    let (first, first_matches) = offer(&engine, &store, &u2, draft(MYSORE, BANGALORE)).await;
    assert!(first_matches.is_empty());

    let (_, matches) = offer(&engine, &store, &u1, draft(BANGALORE, MYSORE)).await;

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].offer_id, first.offer_id);
    assert_eq!(matches[0].owner_id, Some(u2.owner_id));
}

#[tokio::test]
async fn test_empty_store_still_records_offer() {
    let engine = MatchEngine::with_defaults();
    let store = MemoryStore::new();
    let session = create_session("u1");

    let (stored, matches) = offer(&engine, &store, &session, draft(BANGALORE, MYSORE)).await;

    assert!(matches.is_empty());

    let snapshot = load_routes(&store).await.unwrap();
    assert_eq!(snapshot.records, vec![stored.clone()]);
    assert_eq!(stored.offer_id.as_ref().map(String::len), Some(OFFER_ID_LENGTH));
    assert!(stored.categories.apartment);
}

#[tokio::test]
async fn test_own_routes_never_match() {
    let engine = MatchEngine::with_defaults();
    let store = MemoryStore::new();
    let session = create_session("u1");

    offer(&engine, &store, &session, draft(MYSORE, BANGALORE)).await;
    let (_, matches) = offer(&engine, &store, &session, draft(BANGALORE, MYSORE)).await;

    assert!(matches.is_empty());
}

#[test]
fn test_missing_source_never_matches_any_query() {
    let engine = MatchEngine::with_defaults();
    let u1 = create_session("u1");
    let missing = create_route(Some(Uuid::new_v4()), "B", GeoPoint::new(0.0, 0.0), BANGALORE);
    let routes = vec![missing];

    let round_trip = engine.record_offer(&u1, draft(BANGALORE, MYSORE));
    assert!(engine.find_matches(&round_trip, &routes).is_empty());

    let origin_trip = engine.record_offer(&u1, draft(BANGALORE, GeoPoint::new(0.0, 0.0)));
    assert!(engine.find_matches(&origin_trip, &routes).is_empty());

    assert!(engine
        .find_matches_one_directional(&u1, &GeoPoint::new(0.0, 0.0), &routes)
        .is_empty());
}

#[test]
fn test_find_matches_is_idempotent() {
    let engine = MatchEngine::with_defaults();
    let u1 = create_session("u1");
    let query = engine.record_offer(&u1, draft(BANGALORE, MYSORE));

    let routes: Vec<Route> = (0..20)
        .map(|i| {
            let jitter = (i as f64) * 0.01;
            create_route(
                Some(Uuid::new_v4()),
                &format!("R{}", i),
                GeoPoint::new(MYSORE.latitude + jitter, MYSORE.longitude),
                GeoPoint::new(BANGALORE.latitude, BANGALORE.longitude + jitter),
            )
        })
        .collect();

    let first = engine.find_matches(&query, &routes);
    let second = engine.find_matches(&query, &routes);

    assert_eq!(first, second);
    assert!(!first.is_empty() && first.len() < routes.len());
}

#[test]
fn test_mutual_matches_between_stored_routes() {
    let engine = MatchEngine::with_defaults();
    let owner = Uuid::new_v4();
    let anchor = create_route(Some(owner), "A", BANGALORE, MYSORE);

    let candidates = vec![
        create_route(Some(Uuid::new_v4()), "B", MYSORE, BANGALORE),
        create_route(Some(owner), "C", MYSORE, BANGALORE),
        create_route(None, "D", MYSORE, BANGALORE),
        create_route(Some(Uuid::new_v4()), "E", BANGALORE, MYSORE),
        Route {
            offer_id: None,
            ..create_route(Some(Uuid::new_v4()), "F", MYSORE, BANGALORE)
        },
    ];

    let ids: Vec<_> = engine
        .find_mutual_matches(&anchor, &candidates)
        .into_iter()
        .filter_map(|r| r.offer_id)
        .collect();

    assert_eq!(ids, vec!["B"]);
}

#[tokio::test]
async fn test_malformed_rows_reported_separately_from_no_match() {
    let engine = MatchEngine::with_defaults();
    let store = MemoryStore::new();
    let u1 = create_session("u1");

    store.append(Table::Routes, "garbage".to_string()).await.unwrap();
    append_route(&store, &create_route(Some(Uuid::new_v4()), "ok", MYSORE, BANGALORE))
        .await
        .unwrap();

    let snapshot = load_routes(&store).await.unwrap();
    let query = engine.record_offer(&u1, draft(BANGALORE, MYSORE));
    let outcome = snapshot.outcome(engine.find_matches(&query, &snapshot.records));

    assert_eq!(outcome.scanned, 2);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].position, 0);
    assert_eq!(outcome.matches.len(), 1);
}
