//! Scenario tests for search and confirmation against the built-in data set.

use super::*;
use crate::domain::{
    CityId, ComfortScore, Coordinates, ModeId, NewRoute, NewTransportMode, Preference, RouteId,
    RouteWithDetails, Tag,
};
use crate::geo::haversine_km;
use crate::store::{MemoryStore, ModeDirectory, RouteRepository, SeedData};
use std::sync::Arc;

async fn seeded_store() -> Arc<MemoryStore> {
    let data = SeedData::builtin().unwrap();
    Arc::new(MemoryStore::seeded(&data).await.unwrap())
}

async fn engine() -> RouteSearch<MemoryStore> {
    RouteSearch::new(seeded_store().await)
}

fn mumbai_delhi_km() -> u32 {
    haversine_km(
        Coordinates::new(19.076, 72.8777),
        Coordinates::new(28.7041, 77.1025),
    )
    .round() as u32
}

fn providers(routes: &[RouteWithDetails]) -> Vec<&str> {
    routes.iter().map(|r| r.route.provider.as_str()).collect()
}

#[tokio::test]
async fn mumbai_to_delhi_by_time() {
    let results = engine()
        .await
        .search("Mumbai", "Delhi", Preference::Time)
        .await
        .unwrap();

    assert_eq!(results.len(), 3);
    let durations: Vec<u32> = results.iter().map(|r| r.route.duration).collect();
    assert_eq!(durations, vec![130, 995, 1455]);

    let modes: Vec<&str> = results
        .iter()
        .map(|r| r.transport_mode.name.as_str())
        .collect();
    assert_eq!(modes, vec!["Flight", "Train", "Bus"]);

    let expected = mumbai_delhi_km();
    assert_eq!(expected, 1153);
    assert!(results.iter().all(|r| r.distance == Some(expected)));
}

#[tokio::test]
async fn mumbai_to_delhi_by_cost() {
    let results = engine()
        .await
        .search("Mumbai", "Delhi", Preference::Cost)
        .await
        .unwrap();

    let prices: Vec<u32> = results.iter().map(|r| r.route.price).collect();
    assert_eq!(prices, vec![1400, 1850, 5200]);
}

#[tokio::test]
async fn hyderabad_to_delhi_by_comfort() {
    let results = engine()
        .await
        .search("Hyderabad", "Delhi", Preference::Comfort)
        .await
        .unwrap();

    let scores: Vec<u8> = results.iter().map(|r| r.route.comfort_score.get()).collect();
    assert_eq!(scores, vec![4, 3, 2]);
    assert_eq!(
        providers(&results),
        vec!["Air India", "Telangana Express", "Volvo A/C Sleeper"]
    );
}

#[tokio::test]
async fn enrichment_joins_cities_and_mode() {
    let results = engine()
        .await
        .search("Mumbai", "Bangalore", Preference::Time)
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    for r in &results {
        assert_eq!(r.origin_city.name, "Mumbai");
        assert_eq!(r.origin_city.id, r.route.origin_city_id);
        assert_eq!(r.destination_city.name, "Bangalore");
        assert_eq!(r.destination_city.id, r.route.destination_city_id);
        assert_eq!(r.transport_mode.id, r.route.transport_mode_id);
    }
}

#[tokio::test]
async fn tags_follow_mode_and_price() {
    let search = engine().await;

    let mumbai_delhi = search
        .search("Mumbai", "Delhi", Preference::Time)
        .await
        .unwrap();
    assert_eq!(mumbai_delhi[0].tags, vec![Tag::Fastest, Tag::MediumCost]);
    assert_eq!(mumbai_delhi[1].tags, vec![Tag::Recommended, Tag::BestValue]);
    assert_eq!(mumbai_delhi[2].tags, vec![Tag::BudgetOption]);

    // IndiGo Mumbai to Hyderabad costs 3800, under the threshold
    let mumbai_hyderabad = search
        .search("Mumbai", "Hyderabad", Preference::Time)
        .await
        .unwrap();
    assert_eq!(mumbai_hyderabad[0].transport_mode.name, "Flight");
    assert_eq!(mumbai_hyderabad[0].tags, vec![Tag::Fastest]);
}

#[tokio::test]
async fn city_names_are_case_insensitive() {
    let results = engine()
        .await
        .search("mUMBAI", "delhi", Preference::Time)
        .await
        .unwrap();
    assert_eq!(results.len(), 3);
}

#[tokio::test]
async fn unknown_origin_is_empty() {
    let results = engine()
        .await
        .search("Atlantis", "Delhi", Preference::Time)
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn unknown_destination_is_empty() {
    let results = engine()
        .await
        .search("Delhi", "El Dorado", Preference::Cost)
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn same_city_has_no_routes() {
    let results = engine()
        .await
        .search("Mumbai", "Mumbai", Preference::Time)
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn search_is_directional() {
    let search = engine().await;

    let forward = search
        .search("Delhi", "Jaipur", Preference::Time)
        .await
        .unwrap();
    assert_eq!(providers(&forward), vec!["Pink City Express"]);

    let backward = search
        .search("Jaipur", "Delhi", Preference::Time)
        .await
        .unwrap();
    assert!(backward.is_empty());
}

#[tokio::test]
async fn known_cities_without_routes_are_empty() {
    let results = engine()
        .await
        .search("Pune", "Lucknow", Preference::Comfort)
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn search_is_idempotent() {
    let search = engine().await;

    for preference in [Preference::Time, Preference::Cost, Preference::Comfort] {
        let first = search.search("Delhi", "Bangalore", preference).await.unwrap();
        let second = search.search("Delhi", "Bangalore", preference).await.unwrap();
        assert_eq!(first, second);
    }
}

#[tokio::test]
async fn equal_keys_keep_repository_order() {
    let store = seeded_store().await;
    // Mumbai to Pune has no seeded routes; add two Car routes with identical keys
    for provider in ["Cab One", "Cab Two"] {
        store
            .insert_route(NewRoute {
                origin_city_id: CityId(1),
                destination_city_id: CityId(8),
                transport_mode_id: ModeId(4),
                provider: provider.into(),
                price: 3000,
                duration: 180,
                departure_time: "Flexible".into(),
                arrival_time: "Flexible".into(),
                comfort_score: ComfortScore::new(3).unwrap(),
                amenities: vec!["A/C".into()],
                description: "Door to door".into(),
            })
            .await
            .unwrap();
    }

    let results = RouteSearch::new(store)
        .search("Mumbai", "Pune", Preference::Cost)
        .await
        .unwrap();
    assert_eq!(providers(&results), vec!["Cab One", "Cab Two"]);
    assert!(results.iter().all(|r| r.tags.is_empty()));
    assert!(results.iter().all(|r| r.distance == Some(120)));
}

#[tokio::test]
async fn missing_mode_is_integrity_error() {
    let store = seeded_store().await;
    let broken = store
        .insert_route(NewRoute {
            origin_city_id: CityId(8),
            destination_city_id: CityId(10),
            transport_mode_id: ModeId(99),
            provider: "Ghost Line".into(),
            price: 100,
            duration: 100,
            departure_time: "Flexible".into(),
            arrival_time: "Flexible".into(),
            comfort_score: ComfortScore::new(1).unwrap(),
            amenities: Vec::new(),
            description: String::new(),
        })
        .await
        .unwrap();

    let err = RouteSearch::new(Arc::clone(&store))
        .search("Pune", "Lucknow", Preference::Time)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SearchError::Integrity(IntegrityError::MissingMode { route, mode })
            if route == broken.id && mode == ModeId(99)
    ));
}

#[tokio::test]
async fn assemble_joins_without_tags_or_distance() {
    let assembler = ConfirmationAssembler::new(seeded_store().await);

    // Route 1 is the IndiGo Mumbai to Delhi flight, which search tags
    let details = assembler.assemble(RouteId(1)).await.unwrap().unwrap();
    assert_eq!(details.route.provider, "IndiGo");
    assert_eq!(details.origin_city.name, "Mumbai");
    assert_eq!(details.destination_city.name, "Delhi");
    assert_eq!(details.transport_mode.name, "Flight");
    assert!(details.tags.is_empty());
    assert_eq!(details.distance, None);
}

#[tokio::test]
async fn assemble_every_seeded_route() {
    let store = seeded_store().await;
    let assembler = ConfirmationAssembler::new(Arc::clone(&store));

    for route in store.list_routes().await.unwrap() {
        let details = assembler.assemble(route.id).await.unwrap().unwrap();
        assert_eq!(details.route, route);
        assert!(details.tags.is_empty());
    }
}

#[tokio::test]
async fn assemble_unknown_route_is_none() {
    let assembler = ConfirmationAssembler::new(seeded_store().await);
    assert!(assembler.assemble(RouteId(999)).await.unwrap().is_none());
}

#[tokio::test]
async fn assemble_dangling_city_is_integrity_error() {
    let store = Arc::new(MemoryStore::new());
    store
        .insert_mode(NewTransportMode {
            name: "Bus".into(),
            icon: "bus".into(),
            color: "#059669".into(),
        })
        .await
        .unwrap();
    let route = store
        .insert_route(NewRoute {
            origin_city_id: CityId(5),
            destination_city_id: CityId(6),
            transport_mode_id: ModeId(1),
            provider: "Nowhere Express".into(),
            price: 10,
            duration: 10,
            departure_time: "Flexible".into(),
            arrival_time: "Flexible".into(),
            comfort_score: ComfortScore::new(2).unwrap(),
            amenities: Vec::new(),
            description: String::new(),
        })
        .await
        .unwrap();

    let err = ConfirmationAssembler::new(store)
        .assemble(route.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SearchError::Integrity(IntegrityError::MissingCity { city, .. }) if city == CityId(5)
    ));
}
