mod common;

use std::collections::BTreeSet;

use chrono::NaiveDate;
use trailtales::error::AppError;
use trailtales::models::{EventCreation, JourneyCreation, JourneyUpdate};

use common::{count, register, setup};

fn names(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn journey(name: &str) -> JourneyCreation {
    JourneyCreation {
        name: name.into(),
        ..Default::default()
    }
}

const TAG_ROWS: &str = "SELECT COUNT(*) FROM journey_tags WHERE journey_id = ?";
const PARTICIPANT_ROWS: &str = "SELECT COUNT(*) FROM journey_participants WHERE journey_id = ?";

#[tokio::test]
async fn create_resolves_locations_and_tags() {
    let app = setup().await;
    let anna = register(&app.services, "anna").await;

    let created = app
        .services
        .journeys
        .create_journey(
            &JourneyCreation {
                name: "Carpathian hike".into(),
                description: Some("Three days in the mountains".into()),
                start_date: NaiveDate::from_ymd_opt(2024, 7, 1),
                end_date: NaiveDate::from_ymd_opt(2024, 7, 3),
                tag_names: names(&["mountains", "hiking"]),
                origin_location_name: Some("Lviv".into()),
                destination_location_name: Some("Hoverla".into()),
                destination_location_description: Some("Highest peak".into()),
                ..Default::default()
            },
            &anna,
        )
        .await
        .unwrap();

    assert_eq!(created.user_id, anna.id);
    assert_eq!(created.owner.as_ref().map(|o| o.id), Some(anna.id));
    let tag_names: Vec<_> = created.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(tag_names, vec!["hiking", "mountains"]);
    assert_eq!(
        created
            .destination_location
            .as_ref()
            .and_then(|l| l.description.as_deref()),
        Some("Highest peak")
    );

    // 隐式解析复用已有地点和标签
    let second = app
        .services
        .journeys
        .create_journey(
            &JourneyCreation {
                tag_names: names(&["hiking"]),
                origin_location_name: Some("Lviv".into()),
                ..journey("Another hike")
            },
            &anna,
        )
        .await
        .unwrap();
    assert_eq!(second.origin_location_id, created.origin_location_id);
    assert_eq!(app.services.tags.get_all_tags().await.unwrap().len(), 2);
}

#[tokio::test]
async fn resaving_same_tag_set_is_idempotent() {
    let app = setup().await;
    let anna = register(&app.services, "anna").await;
    let journeys = &app.services.journeys;

    let created = journeys
        .create_journey(
            &JourneyCreation {
                tag_names: names(&["sea", "summer"]),
                ..journey("Odesa")
            },
            &anna,
        )
        .await
        .unwrap();

    for _ in 0..3 {
        let updated = journeys
            .update_journey(
                created.id,
                &JourneyUpdate {
                    tag_names: Some(names(&["sea", "summer"])),
                    ..Default::default()
                },
                &anna,
            )
            .await
            .unwrap();
        assert_eq!(updated.tags.len(), 2);
    }
    assert_eq!(count(&app.pool, TAG_ROWS, created.id).await, 2);

    // 只改名称时标签保持不变
    journeys
        .update_journey(
            created.id,
            &JourneyUpdate {
                name: Some("Odesa again".into()),
                ..Default::default()
            },
            &anna,
        )
        .await
        .unwrap();
    assert_eq!(count(&app.pool, TAG_ROWS, created.id).await, 2);

    let cleared = journeys
        .update_journey(
            created.id,
            &JourneyUpdate {
                tag_names: Some(BTreeSet::new()),
                ..Default::default()
            },
            &anna,
        )
        .await
        .unwrap();
    assert!(cleared.tags.is_empty());
    assert_eq!(count(&app.pool, TAG_ROWS, created.id).await, 0);
}

#[tokio::test]
async fn non_owner_cannot_modify() {
    let app = setup().await;
    let anna = register(&app.services, "anna").await;
    let bob = register(&app.services, "bob").await;
    let journeys = &app.services.journeys;

    let created = journeys.create_journey(&journey("Private trip"), &anna).await.unwrap();

    let update = journeys
        .update_journey(
            created.id,
            &JourneyUpdate {
                name: Some("Hijacked".into()),
                ..Default::default()
            },
            &bob,
        )
        .await;
    assert!(matches!(update, Err(AppError::Forbidden(_))));
    assert!(matches!(
        journeys.delete_journey(created.id, &bob).await,
        Err(AppError::Forbidden(_))
    ));
    assert!(matches!(
        journeys.add_tag_to_journey(created.id, "stolen", &bob).await,
        Err(AppError::Forbidden(_))
    ));
    assert!(matches!(
        journeys.add_participant(created.id, "bob", &bob).await,
        Err(AppError::Forbidden(_))
    ));

    // 不存在与无权限是不同的错误
    assert!(matches!(
        journeys.delete_journey(9999, &anna).await,
        Err(AppError::NotFound(_))
    ));

    let unchanged = journeys.get_journey_by_id(created.id).await.unwrap();
    assert_eq!(unchanged.name, "Private trip");
    assert_eq!(unchanged.user_id, anna.id);
}

#[tokio::test]
async fn repeated_participant_changes_keep_join_table_consistent() {
    let app = setup().await;
    let anna = register(&app.services, "anna").await;
    let bob = register(&app.services, "bob").await;
    let journeys = &app.services.journeys;

    let created = journeys.create_journey(&journey("Group trip"), &anna).await.unwrap();

    journeys.add_participant(created.id, "bob", &anna).await.unwrap();
    journeys
        .add_participant(created.id, "bob@example.com", &anna)
        .await
        .unwrap();
    assert_eq!(count(&app.pool, PARTICIPANT_ROWS, created.id).await, 1);

    let participated = journeys.get_participated_journeys(&bob).await.unwrap();
    assert_eq!(participated.len(), 1);

    journeys.remove_participant(created.id, "bob", &anna).await.unwrap();
    journeys.remove_participant(created.id, "bob", &anna).await.unwrap();
    assert_eq!(count(&app.pool, PARTICIPANT_ROWS, created.id).await, 0);

    journeys.add_participant(created.id, "bob", &anna).await.unwrap();
    let participants = journeys.get_participants(created.id).await.unwrap();
    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0].id, bob.id);

    assert!(matches!(
        journeys.add_participant(created.id, "ghost", &anna).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn unknown_tags_are_created_but_unknown_participants_are_rejected() {
    let app = setup().await;
    let anna = register(&app.services, "anna").await;
    let journeys = &app.services.journeys;

    let created = journeys
        .create_journey(
            &JourneyCreation {
                tag_names: names(&["brand-new"]),
                ..journey("Tagged")
            },
            &anna,
        )
        .await
        .unwrap();
    assert_eq!(created.tags.len(), 1);
    assert!(app.services.tags.get_tag_by_name("brand-new").await.is_ok());

    let rejected = journeys
        .create_journey(
            &JourneyCreation {
                tag_names: names(&["another-new"]),
                participant_usernames: names(&["ghost"]),
                ..journey("With ghost")
            },
            &anna,
        )
        .await;
    assert!(matches!(rejected, Err(AppError::NotFound(_))));

    // 失败的保存整体回滚
    assert_eq!(journeys.get_all_journeys().await.unwrap().len(), 1);
    assert!(matches!(
        app.services.tags.get_tag_by_name("another-new").await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn tag_add_and_remove() {
    let app = setup().await;
    let anna = register(&app.services, "anna").await;
    let journeys = &app.services.journeys;

    let created = journeys.create_journey(&journey("Weekend"), &anna).await.unwrap();
    journeys.add_tag_to_journey(created.id, "city", &anna).await.unwrap();
    journeys.add_tag_to_journey(created.id, "city", &anna).await.unwrap();
    assert_eq!(journeys.get_tags_for_journey(created.id).await.unwrap().len(), 1);

    let updated = journeys
        .remove_tag_from_journey(created.id, "city", &anna)
        .await
        .unwrap();
    assert!(updated.tags.is_empty());

    assert!(matches!(
        journeys.remove_tag_from_journey(created.id, "unknown", &anna).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn origin_and_destination_can_be_set_and_cleared() {
    let app = setup().await;
    let anna = register(&app.services, "anna").await;
    let journeys = &app.services.journeys;

    let created = journeys.create_journey(&journey("Road trip"), &anna).await.unwrap();
    let updated = journeys
        .set_origin_location(created.id, "Kyiv", Some("Capital"), &anna)
        .await
        .unwrap();
    let updated = journeys
        .set_destination_location(updated.id, "Odesa", None, &anna)
        .await
        .unwrap();
    assert_eq!(updated.origin_location.map(|l| l.name).as_deref(), Some("Kyiv"));
    assert_eq!(
        updated.destination_location.map(|l| l.name).as_deref(),
        Some("Odesa")
    );

    journeys.remove_origin_location(created.id, &anna).await.unwrap();
    let updated = journeys
        .remove_destination_location(created.id, &anna)
        .await
        .unwrap();
    assert!(updated.origin_location_id.is_none());
    assert!(updated.destination_location_id.is_none());

    // 通过更新清除地点
    journeys
        .set_origin_location(created.id, "Kyiv", None, &anna)
        .await
        .unwrap();
    let cleared = journeys
        .update_journey(
            created.id,
            &JourneyUpdate {
                origin_location_name: Some(String::new()),
                ..Default::default()
            },
            &anna,
        )
        .await
        .unwrap();
    assert!(cleared.origin_location.is_none());
}

#[tokio::test]
async fn update_rejects_end_before_start() {
    let app = setup().await;
    let anna = register(&app.services, "anna").await;

    let created = app
        .services
        .journeys
        .create_journey(
            &JourneyCreation {
                start_date: NaiveDate::from_ymd_opt(2024, 8, 10),
                ..journey("Dated")
            },
            &anna,
        )
        .await
        .unwrap();

    let result = app
        .services
        .journeys
        .update_journey(
            created.id,
            &JourneyUpdate {
                end_date: NaiveDate::from_ymd_opt(2024, 8, 1),
                ..Default::default()
            },
            &anna,
        )
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn search_matches_names_tags_and_locations() {
    let app = setup().await;
    let anna = register(&app.services, "anna").await;
    let bob = register(&app.services, "bob").await;
    let journeys = &app.services.journeys;

    let alps = journeys
        .create_journey(
            &JourneyCreation {
                description: Some("Skiing in the ALPS".into()),
                tag_names: names(&["winter", "ski"]),
                ..journey("Alpine week")
            },
            &anna,
        )
        .await
        .unwrap();
    let coast = journeys
        .create_journey(
            &JourneyCreation {
                destination_location_name: Some("Odesa".into()),
                tag_names: names(&["summer"]),
                ..journey("Black sea")
            },
            &bob,
        )
        .await
        .unwrap();

    let ids = |found: Vec<trailtales::database::models::Journey>| {
        found.into_iter().map(|j| j.id).collect::<Vec<_>>()
    };

    assert_eq!(ids(journeys.search_journeys("alps").await.unwrap()), vec![alps.id]);
    // 多个标签同时命中也只返回一次
    assert_eq!(ids(journeys.search_journeys("i").await.unwrap()), vec![alps.id]);
    assert_eq!(ids(journeys.search_journeys("WINTER").await.unwrap()), vec![alps.id]);
    assert_eq!(ids(journeys.search_journeys("odes").await.unwrap()), vec![coast.id]);
    assert!(journeys.search_journeys("desert").await.unwrap().is_empty());

    let kyiv = journeys
        .create_journey(
            &JourneyCreation {
                destination_location_name: Some("Київ".into()),
                tag_names: names(&["Осінь"]),
                ..journey("Поїздка до Києва")
            },
            &anna,
        )
        .await
        .unwrap();
    for keyword in ["Києва", "київ", "ПОЇЗДКА", "осінь"] {
        assert_eq!(
            ids(journeys.search_journeys(keyword).await.unwrap()),
            vec![kyiv.id],
            "keyword {keyword}"
        );
    }

    assert_eq!(
        ids(journeys.filter_journeys_by_tag("summer").await.unwrap()),
        vec![coast.id]
    );
    assert!(journeys.filter_journeys_by_tag("unknown").await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_removes_events() {
    let app = setup().await;
    let anna = register(&app.services, "anna").await;

    let created = app
        .services
        .journeys
        .create_journey(&journey("Short trip"), &anna)
        .await
        .unwrap();
    let event = app
        .services
        .events
        .create_event(
            &EventCreation {
                name: "Museum visit".into(),
                journey_id: Some(created.id),
                ..Default::default()
            },
            &anna,
        )
        .await
        .unwrap();

    app.services.journeys.delete_journey(created.id, &anna).await.unwrap();

    assert!(matches!(
        app.services.journeys.get_journey_by_id(created.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        app.services.events.get_event_by_id(event.id).await,
        Err(AppError::NotFound(_))
    ));
}
