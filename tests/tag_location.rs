mod common;

use trailtales::error::AppError;
use trailtales::models::{JourneyCreation, LocationCreation, LocationUpdate, TagCreation};

use common::{register, setup};

fn tag(name: &str) -> TagCreation {
    TagCreation { name: name.into() }
}

fn location(name: &str, description: Option<&str>) -> LocationCreation {
    LocationCreation {
        name: name.into(),
        description: description.map(str::to_string),
    }
}

#[tokio::test]
async fn tag_names_are_unique() {
    let app = setup().await;
    let tags = &app.services.tags;

    let sea = tags.create_tag(&tag("sea")).await.unwrap();
    assert!(matches!(
        tags.create_tag(&tag("sea")).await,
        Err(AppError::AlreadyExists(_))
    ));

    let hiking = tags.create_tag(&tag("hiking")).await.unwrap();
    assert!(matches!(
        tags.update_tag(hiking.id, &tag("sea")).await,
        Err(AppError::AlreadyExists(_))
    ));

    let renamed = tags.update_tag(sea.id, &tag("ocean")).await.unwrap();
    assert_eq!(renamed.name, "ocean");
    assert_eq!(tags.get_tag_by_name("ocean").await.unwrap().id, sea.id);
}

#[tokio::test]
async fn tag_lookups_and_delete() {
    let app = setup().await;
    let tags = &app.services.tags;
    let created = tags.create_tag(&tag("  mountains ")).await.unwrap();

    assert_eq!(created.name, "mountains");
    assert_eq!(tags.get_tag_by_id(created.id).await.unwrap().name, "mountains");
    assert_eq!(tags.get_all_tags().await.unwrap().len(), 1);

    tags.delete_tag(created.id).await.unwrap();
    assert!(matches!(
        tags.delete_tag(created.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        tags.get_tag_by_name("mountains").await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn short_tag_name_is_invalid() {
    let app = setup().await;
    assert!(matches!(
        app.services.tags.create_tag(&tag("a")).await,
        Err(AppError::Validation(_))
    ));
}

#[tokio::test]
async fn location_names_are_unique() {
    let app = setup().await;
    let locations = &app.services.locations;

    locations.create_location(&location("Lviv", None)).await.unwrap();
    assert!(matches!(
        locations.create_location(&location("Lviv", Some("again"))).await,
        Err(AppError::AlreadyExists(_))
    ));
}

#[tokio::test]
async fn location_update_rules() {
    let app = setup().await;
    let locations = &app.services.locations;

    let lviv = locations
        .create_location(&location("Lviv", Some("Old town")))
        .await
        .unwrap();
    locations.create_location(&location("Kyiv", None)).await.unwrap();

    // 空白名称保留原名，空白描述清空
    let updated = locations
        .update_location(
            lviv.id,
            &LocationUpdate {
                name: Some("  ".into()),
                description: Some("".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Lviv");
    assert_eq!(updated.description, None);

    let collision = locations
        .update_location(
            lviv.id,
            &LocationUpdate {
                name: Some("KYIV".into()),
                description: None,
            },
        )
        .await;
    assert!(matches!(collision, Err(AppError::AlreadyExists(_))));

    let renamed = locations
        .update_location(
            lviv.id,
            &LocationUpdate {
                name: Some("Lemberg".into()),
                description: Some("Historic name".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Lemberg");
    assert_eq!(renamed.description.as_deref(), Some("Historic name"));
}

#[tokio::test]
async fn location_rename_collision_folds_unicode_case() {
    let app = setup().await;
    let locations = &app.services.locations;

    locations.create_location(&location("Львів", None)).await.unwrap();
    let kyiv = locations.create_location(&location("Київ", None)).await.unwrap();

    let collision = locations
        .update_location(
            kyiv.id,
            &LocationUpdate {
                name: Some("ЛЬВІВ".into()),
                description: None,
            },
        )
        .await;
    assert!(matches!(collision, Err(AppError::AlreadyExists(_))));

    // 只改自身大小写不算冲突
    let recased = locations
        .update_location(
            kyiv.id,
            &LocationUpdate {
                name: Some("КИЇВ".into()),
                description: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(recased.name, "КИЇВ");
}

#[tokio::test]
async fn deleting_location_clears_journey_reference() {
    let app = setup().await;
    let anna = register(&app.services, "anna").await;

    let journey = app
        .services
        .journeys
        .create_journey(
            &JourneyCreation {
                name: "Western trip".into(),
                origin_location_name: Some("Lviv".into()),
                destination_location_name: Some("Uzhhorod".into()),
                ..Default::default()
            },
            &anna,
        )
        .await
        .unwrap();
    let origin = journey.origin_location.clone().unwrap();

    app.services.locations.delete_location(origin.id).await.unwrap();

    let reloaded = app.services.journeys.get_journey_by_id(journey.id).await.unwrap();
    assert!(reloaded.origin_location.is_none());
    assert_eq!(
        reloaded.destination_location.map(|l| l.name).as_deref(),
        Some("Uzhhorod")
    );
}
