//! `PgStore` against a real database.
//!
//! Ignored by default; run with `DATABASE_URL` set and `--ignored`.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;
use wedplan_core::roles::Role;
use wedplan_core::status::{ApprovalStatus, EventStatus};
use wedplan_db::models::approval::ApprovalChange;
use wedplan_db::models::event::CreateEvent;
use wedplan_db::models::profile::CreateProfile;
use wedplan_db::models::venue::CreateVenue;
use wedplan_db::repositories::{EventRepo, ProfileRepo, RoleRepo, VenueRepo};
use wedplan_db::{DataStore, PgStore, Select, StoreError, Table};

async fn profile(store: &PgStore, name: &str) -> Uuid {
    let id = Uuid::new_v4();
    ProfileRepo::ensure(
        store,
        &CreateProfile {
            id,
            email: format!("{name}@example.com"),
            full_name: name.into(),
        },
    )
    .await
    .unwrap();
    id
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore]
async fn insert_takes_column_defaults(pool: PgPool) {
    let store = PgStore::new(pool);
    let couple = profile(&store, "couple").await;
    let event = EventRepo::create(
        &store,
        &CreateEvent {
            couple_id: couple,
            planner_id: None,
            title: "Wedding".into(),
            description: None,
            event_date: NaiveDate::from_ymd_opt(2027, 6, 12).unwrap(),
            venue_location: None,
            budget: Some(25_000.5),
            guest_count: 80,
            status: EventStatus::Planning,
        },
    )
    .await
    .unwrap();
    assert_eq!(event.budget, Some(25_000.5));
    assert_eq!(event.planner_id, None);

    let updated = EventRepo::update_status(&store, event.id, EventStatus::InProgress)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status(), EventStatus::InProgress);
    assert!(updated.updated_at >= event.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore]
async fn directory_orders_unrated_last(pool: PgPool) {
    let store = PgStore::new(pool);
    let manager = profile(&store, "manager").await;
    let approve = ApprovalChange::new(ApprovalStatus::Approved, None).unwrap();
    for name in ["A", "B"] {
        let venue = VenueRepo::create(
            &store,
            &CreateVenue {
                manager_id: manager,
                name: name.into(),
                location: "Austin".into(),
                description: None,
                capacity: Some(100),
                price_per_day: None,
                amenities: Some(vec!["Parking".into()]),
            },
        )
        .await
        .unwrap();
        VenueRepo::review(&store, venue.id, &approve).await.unwrap();
    }
    sqlx::query("UPDATE venues SET rating = 4.8 WHERE name = 'B'")
        .execute(store.pool())
        .await
        .unwrap();

    let listed = VenueRepo::list_directory(&store).await.unwrap();
    let names: Vec<_> = listed.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["B", "A"]);
    assert_eq!(listed[0].amenities, Some(vec!["Parking".to_string()]));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore]
async fn role_filters_and_delete(pool: PgPool) {
    let store = PgStore::new(pool);
    let user = profile(&store, "admin").await;
    RoleRepo::assign(&store, user, Role::Admin).await.unwrap();
    RoleRepo::assign(&store, user, Role::VenueManager).await.unwrap();

    let count = store
        .count(&Select::from(Table::UserRoles).is_in("role", [Role::Admin, Role::Vendor]))
        .await
        .unwrap();
    assert_eq!(count, 1);

    assert!(RoleRepo::revoke(&store, user, Role::Admin).await.unwrap());
    assert_eq!(
        RoleRepo::roles_for(&store, user).await.unwrap(),
        vec![Role::VenueManager]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore]
async fn unknown_column_never_reaches_sql(pool: PgPool) {
    let store = PgStore::new(pool);
    let result = store
        .select(&Select::from(Table::Events).eq("title; DROP TABLE events", "x"))
        .await;
    assert!(matches!(result, Err(StoreError::UnknownColumn { .. })));
}
