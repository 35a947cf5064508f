mod common;

use devcamper_api::domain::entities::{Bootcamp, UpdateBootcamp};
use devcamper_api::domain::identity::Role;
use devcamper_api::domain::pagination::PagingDefaults;
use devcamper_api::domain::query::QueryDescriptor;
use devcamper_api::domain::repositories::BootcampRepository;
use devcamper_api::error::AppError;
use devcamper_api::infrastructure::persistence::PgBootcampRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn query(pairs: &[(&str, &str)]) -> QueryDescriptor<Bootcamp> {
    QueryDescriptor::from_pairs(pairs.iter().copied(), PagingDefaults::default()).unwrap()
}

#[sqlx::test]
async fn test_create_bootcamp(pool: PgPool) {
    let owner = common::pg_user(&pool, "Owner", Role::Publisher).await;
    let repo = PgBootcampRepository::new(Arc::new(pool));

    let bootcamp = repo
        .create(common::new_bootcamp("Devworks Bootcamp", owner.id))
        .await
        .unwrap();

    assert_eq!(bootcamp.slug, "devworks-bootcamp");
    assert_eq!(bootcamp.photo, "no-photo.jpg");
    assert_eq!(bootcamp.user_id, owner.id);
    assert_eq!(bootcamp.average_cost, None);
    assert_eq!(repo.find_by_user(owner.id).await.unwrap(), Some(bootcamp));
}

#[sqlx::test]
async fn test_duplicate_name(pool: PgPool) {
    let owner = common::pg_user(&pool, "Owner", Role::Admin).await;
    let repo = PgBootcampRepository::new(Arc::new(pool));

    repo.create(common::new_bootcamp("Same", owner.id)).await.unwrap();
    let result = repo.create(common::new_bootcamp("Same", owner.id)).await;

    assert!(matches!(result, Err(AppError::DuplicateKey(_))));
}

#[sqlx::test]
async fn test_find_filters_sorts_and_pages(pool: PgPool) {
    let owner = common::pg_user(&pool, "Owner", Role::Admin).await;
    let repo = PgBootcampRepository::new(Arc::new(pool));

    for (name, careers) in [
        ("Alpha", vec!["Web Development"]),
        ("Bravo", vec!["Business", "Other"]),
        ("Charlie", vec!["UI/UX"]),
    ] {
        let mut input = common::new_bootcamp(name, owner.id);
        input.careers = careers.into_iter().map(String::from).collect();
        input.housing = name != "Bravo";
        repo.create(input).await.unwrap();
    }

    let found = repo
        .find(&query(&[("careers[in]", "Other,UI/UX"), ("sort", "-name")]))
        .await
        .unwrap();
    let names: Vec<_> = found.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["Charlie", "Bravo"]);

    let q = query(&[("housing", "true"), ("limit", "1"), ("page", "2"), ("sort", "name")]);
    let page = repo.find(&q).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name, "Charlie");
    assert_eq!(repo.count(&q.filter).await.unwrap(), 2);
}

#[sqlx::test]
async fn test_find_within_radius(pool: PgPool) {
    let owner = common::pg_user(&pool, "Owner", Role::Admin).await;
    let repo = PgBootcampRepository::new(Arc::new(pool));

    repo.create(common::new_bootcamp("Boston", owner.id)).await.unwrap();
    let mut nowhere = common::new_bootcamp("Nowhere", owner.id);
    nowhere.latitude = None;
    nowhere.longitude = None;
    repo.create(nowhere).await.unwrap();

    let near = repo.find_within_radius(42.3736, -71.1097, 10.0).await.unwrap();
    assert_eq!(near.len(), 1);
    assert_eq!(near[0].name, "Boston");

    let far = repo.find_within_radius(40.7128, -74.0060, 50.0).await.unwrap();
    assert!(far.is_empty());
}

#[sqlx::test]
async fn test_update_renames_slug_and_clears_fields(pool: PgPool) {
    let owner = common::pg_user(&pool, "Owner", Role::Publisher).await;
    let repo = PgBootcampRepository::new(Arc::new(pool));
    let mut input = common::new_bootcamp("Old Name", owner.id);
    input.phone = Some("(111) 111-1111".into());
    let bootcamp = repo.create(input).await.unwrap();

    let updated = repo
        .update(
            bootcamp.id,
            UpdateBootcamp {
                name: Some("New Name".into()),
                phone: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.slug, "new-name");
    assert_eq!(updated.phone, None);
    assert_eq!(updated.address, bootcamp.address);

    let missing = repo.update(9999, UpdateBootcamp::default()).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[sqlx::test]
async fn test_delete(pool: PgPool) {
    let owner = common::pg_user(&pool, "Owner", Role::Publisher).await;
    let repo = PgBootcampRepository::new(Arc::new(pool));
    let bootcamp = repo
        .create(common::new_bootcamp("Doomed", owner.id))
        .await
        .unwrap();

    assert!(repo.delete(bootcamp.id).await.unwrap());
    assert!(!repo.delete(bootcamp.id).await.unwrap());
    assert_eq!(repo.find_by_id(bootcamp.id).await.unwrap(), None);
}
