//! Integration tests for the events domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - Migrations create the expected schema
//! - The unique identifier constraint is enforced
//! - Filters and sorting translate to working SQL

use chrono::{Duration, Utc};
use domain_events::*;
use test_utils::{TestDataBuilder, TestDatabase};

fn event(identifier: String, capacity: i32, event_type: EventType) -> Event {
    let start = Utc::now() + Duration::days(7);
    Event {
        id: None,
        name: format!("Integration {}", identifier),
        description: Some("Created by integration tests".to_string()),
        identifier,
        start_at: start,
        end_at: start + Duration::hours(8),
        location: "Main Hall".to_string(),
        capacity,
        event_type,
        status: EventStatus::Open,
        cancel_reason: None,
        audit: None,
    }
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires docker"]
async fn test_save_and_find_event() {
    let db = TestDatabase::new().await;
    let repo = PgEventRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("save_and_find");

    let input = event(builder.identifier("main"), 120, EventType::Workshop);
    let saved = repo.save(input.clone().into()).await.unwrap();

    assert!(saved.id > 0);
    assert_eq!(saved.identifier, input.identifier);
    assert_eq!(saved.event_type, EventType::Workshop);

    let found = repo.find_by_id(saved.id).await.unwrap();
    let found = found.expect("event should exist");
    assert_eq!(found.name, input.name);
    assert_eq!(found.capacity, 120);

    assert!(repo.exists_by_identifier(&input.identifier).await.unwrap());
    assert!(!repo.exists_by_identifier("missing-identifier").await.unwrap());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_duplicate_identifier_constraint() {
    let db = TestDatabase::new().await;
    let repo = PgEventRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("duplicate_identifier");

    let identifier = builder.identifier("dup");
    repo.save(event(identifier.clone(), 10, EventType::Meetup).into())
        .await
        .unwrap();

    let err = repo
        .save(event(identifier.clone(), 20, EventType::Meetup).into())
        .await
        .unwrap_err();

    assert_eq!(err, EventError::IdentifierAlreadyExists(identifier));
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_find_by_filters() {
    let db = TestDatabase::new().await;
    let repo = PgEventRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("find_by_filters");

    for (suffix, capacity, event_type) in [
        ("small", 10, EventType::Meetup),
        ("medium", 60, EventType::Conference),
        ("large", 300, EventType::Conference),
    ] {
        repo.save(event(builder.identifier(suffix), capacity, event_type).into())
            .await
            .unwrap();
    }

    let filter = EventFilter {
        name: Some("integration".to_string()),
        event_type: Some(EventType::Conference),
        capacity_min: Some(50),
        ..Default::default()
    };

    let page = repo
        .find_by_filters(&filter, PageRequest::new(0, 10).with_sort("capacity,desc"))
        .await
        .unwrap();

    assert_eq!(page.total_elements, 2);
    assert_eq!(page.content[0].capacity, 300);
    assert_eq!(page.content[1].capacity, 60);
}

// ============================================================================
// Use Case Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires docker"]
async fn test_update_and_cancel_flow() {
    let db = TestDatabase::new().await;
    let use_cases = EventUseCases::new(PgEventRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("update_and_cancel");

    let created = use_cases
        .create
        .execute(event(builder.identifier("flow"), 40, EventType::Seminar))
        .await
        .unwrap();
    let id = created.id.expect("created event has an id");

    let mut changes = created.clone();
    changes.capacity = 80;
    changes.description = None;
    let updated = use_cases.update.execute(id, changes).await.unwrap();

    assert_eq!(updated.capacity, 80);
    assert_eq!(updated.description, created.description);

    use_cases
        .cancel
        .execute(id, Some("Speaker unavailable".to_string()))
        .await
        .unwrap();

    let cancelled = use_cases.get_by_id.execute(id).await.unwrap();
    assert_eq!(cancelled.status, EventStatus::Cancelled);
    assert_eq!(cancelled.cancel_reason.as_deref(), Some("Speaker unavailable"));

    let page = use_cases.get_all.execute(PageRequest::default()).await.unwrap();
    assert_eq!(page.total_elements, 1);
}
