use chrono::DateTime;

use crate::models::{ListingEntry, Route, Session};

/// Split a snapshot into the session owner's routes and everyone else's
///
/// Routes without an owner land in the second list. Order is preserved.
pub fn partition_by_owner(session: &Session, routes: Vec<Route>) -> (Vec<Route>, Vec<Route>) {
    routes
        .into_iter()
        .partition(|route| route.owner_id == Some(session.owner_id))
}

/// Format an epoch-seconds timestamp as stacked day, date and month lines
///
/// e.g. `"Tue\n14\nNov"`. Out-of-range timestamps produce an empty label.
pub fn display_date(created_at: i64) -> String {
    DateTime::from_timestamp(created_at, 0)
        .map(|date| date.format("%a-%d-%b").to_string())
        .map(|label| label.split('-').collect::<Vec<_>>().join("\n"))
        .unwrap_or_default()
}

/// Strip escape backslashes from a stored address
pub fn clean_address(address: &str) -> String {
    address.replace('\\', "")
}

/// Build display entries for the owner's routes, newest first
pub fn build_listings(routes: &[Route]) -> Vec<ListingEntry> {
    let mut entries: Vec<ListingEntry> = routes
        .iter()
        .map(|route| ListingEntry {
            offer_id: route.offer_id.clone(),
            date_label: display_date(route.created_at),
            source_address: route.source_address.as_deref().map(clean_address).unwrap_or_default(),
            destination_address: route
                .destination_address
                .as_deref()
                .map(clean_address)
                .unwrap_or_default(),
            created_at: route.created_at,
        })
        .collect();

    // Stable, so same-second offers keep store order
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryFlags, GeoPoint};
    use uuid::Uuid;

    fn create_route(owner: Option<Uuid>, offer_id: &str, created_at: i64) -> Route {
        Route {
            owner_id: owner,
            offer_id: Some(offer_id.to_string()),
            source: GeoPoint::new(12.9716, 77.5946),
            destination: GeoPoint::new(12.2958, 76.6394),
            source_address: Some("MG Road\\, Bengaluru".to_string()),
            destination_address: None,
            categories: CategoryFlags::default(),
            created_at,
        }
    }

    #[test]
    fn test_display_date() {
        // 2023-11-14T22:13:20Z
        assert_eq!(display_date(1_700_000_000), "Tue\n14\nNov");
    }

    #[test]
    fn test_clean_address() {
        assert_eq!(clean_address("MG Road\\, Bengaluru"), "MG Road, Bengaluru");
    }

    #[test]
    fn test_partition_by_owner() {
        let session = Session {
            owner_id: Uuid::new_v4(),
            account_id: 1_234_567_890,
            username: "asha".to_string(),
        };

        let routes = vec![
            create_route(Some(session.owner_id), "mine-1", 10),
            create_route(Some(Uuid::new_v4()), "other", 20),
            create_route(None, "ownerless", 30),
            create_route(Some(session.owner_id), "mine-2", 40),
        ];

        let (mine, others) = partition_by_owner(&session, routes);

        let mine_ids: Vec<_> = mine.iter().filter_map(|r| r.offer_id.as_deref()).collect();
        assert_eq!(mine_ids, vec!["mine-1", "mine-2"]);
        assert_eq!(others.len(), 2);
    }

    #[test]
    fn test_listings_newest_first() {
        let routes = vec![create_route(None, "old", 100), create_route(None, "new", 200)];

        let listings = build_listings(&routes);

        assert_eq!(listings[0].offer_id.as_deref(), Some("new"));
        assert_eq!(listings[1].source_address, "MG Road, Bengaluru");
        assert_eq!(listings[1].destination_address, "");
    }
}
