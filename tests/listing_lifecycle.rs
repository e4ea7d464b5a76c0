use carmarket::auth::Identity;
use carmarket::gateway::LocalStore;
use carmarket::query::query;
use carmarket::validation::check;
use carmarket::{Draft, GatewayError, ListingGateway, SortKey};
use tempfile::tempdir;

const YEAR: i32 = 2025;

fn draft(brand: &str, model: &str, year: &str, price: &str) -> Draft {
    Draft {
        brand: brand.to_string(),
        model: model.to_string(),
        year: year.to_string(),
        mileage: "120000".to_string(),
        price: price.to_string(),
        description: "Well kept, winter tyres included".to_string(),
        images: vec![],
        owner_name: "Anna".to_string(),
        owner_phone: "0701234567".to_string(),
        owner_email: "anna@example.com".to_string(),
    }
}

fn owner() -> Identity {
    Identity::new("user-1", "anna")
}

#[tokio::test]
async fn insert_then_list_returns_the_stored_fields() {
    let dir = tempdir().unwrap();
    let store = LocalStore::new(dir.path()).await.unwrap();
    let fields = check(&draft("Volvo", "V70", "2018", "100000"), YEAR).unwrap();

    let inserted = store.insert(&owner(), fields.clone()).await.unwrap();
    let all = store.list_all().await.unwrap();

    assert_eq!(all.len(), 1);
    let stored = &all[0];
    assert_eq!(stored.id, inserted.id);
    assert!(!stored.id.is_empty());
    assert_eq!(stored.created_at, stored.updated_at);
    assert_eq!(stored.brand, fields.brand);
    assert_eq!(stored.model, fields.model);
    assert_eq!(stored.year, fields.year);
    assert_eq!(stored.mileage, fields.mileage);
    assert_eq!(stored.price, fields.price);
    assert_eq!(stored.description, fields.description);
    assert_eq!(stored.owner_email, fields.owner_email);
}

#[tokio::test]
async fn update_replaces_fields_and_advances_updated_at() {
    let dir = tempdir().unwrap();
    let store = LocalStore::new(dir.path()).await.unwrap();
    let original = store
        .insert(&owner(), check(&draft("Volvo", "V70", "2018", "100000"), YEAR).unwrap())
        .await
        .unwrap();

    let edited = check(&draft("Volvo", "V90", "2019", "90000"), YEAR).unwrap();
    store.update(&original.id, edited).await.unwrap();

    let all = store.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    let updated = &all[0];
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.created_at, original.created_at);
    assert!(updated.updated_at > original.updated_at);
    assert_eq!(updated.model, "V90");
    assert_eq!(updated.year, 2019);
    assert_eq!(updated.price, 90_000);
}

#[tokio::test]
async fn delete_removes_the_listing_once() {
    let dir = tempdir().unwrap();
    let store = LocalStore::new(dir.path()).await.unwrap();
    let keep = store
        .insert(&owner(), check(&draft("Saab", "900", "1991", "30000"), YEAR).unwrap())
        .await
        .unwrap();
    let gone = store
        .insert(&owner(), check(&draft("Volvo", "V70", "2018", "100000"), YEAR).unwrap())
        .await
        .unwrap();

    store.delete(&gone.id).await.unwrap();

    let ids: Vec<String> = store.list_all().await.unwrap().into_iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![keep.id]);

    let err = store.delete(&gone.id).await.unwrap_err();
    assert!(matches!(err, GatewayError::NotFound(_)));
}

#[tokio::test]
async fn image_order_survives_a_round_trip() {
    let dir = tempdir().unwrap();
    let store = LocalStore::new(dir.path()).await.unwrap();
    let mut with_photos = draft("Volvo", "V70", "2018", "100000");
    with_photos.add_images(["a", "b", "c"]);

    store
        .insert(&owner(), check(&with_photos, YEAR).unwrap())
        .await
        .unwrap();

    let reopened = LocalStore::new(dir.path()).await.unwrap();
    let all = reopened.list_all().await.unwrap();
    assert_eq!(all[0].images, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn search_and_sort_over_stored_listings() {
    let dir = tempdir().unwrap();
    let store = LocalStore::new(dir.path()).await.unwrap();
    for (year, price) in [("2018", "100000"), ("2020", "300000"), ("2019", "200000")] {
        store
            .insert(&owner(), check(&draft("Volvo", "V70", year, price), YEAR).unwrap())
            .await
            .unwrap();
    }
    let all = store.list_all().await.unwrap();

    let by_price: Vec<i64> = query(&all, "volvo", SortKey::parse("price"))
        .iter()
        .map(|l| l.price)
        .collect();
    assert_eq!(by_price, vec![300_000, 200_000, 100_000]);

    let only_2020 = query(&all, "2020", SortKey::parse("date"));
    assert_eq!(only_2020.len(), 1);
    assert_eq!(only_2020[0].year, 2020);
}
