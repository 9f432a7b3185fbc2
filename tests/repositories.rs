mod common;

use trailtales::database::models::RoleName;
use trailtales::database::repositories::{
    JourneyRepository, RoleRepository, TagRepository, UserRepository,
};
use trailtales::error::AppError;
use trailtales::models::JourneyCreation;

use common::{count, register, setup};

#[tokio::test]
async fn seeded_roles_are_listed() {
    let app = setup().await;
    let mut conn = app.pool.acquire().await.unwrap();

    let roles = RoleRepository::find_all(&mut conn).await.unwrap();
    let names: Vec<_> = roles.iter().map(|r| r.name).collect();
    assert_eq!(names, vec![RoleName::User, RoleName::Admin]);

    let admin = RoleRepository::find_by_id(&mut conn, roles[1].id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(admin.name, RoleName::Admin);
    assert!(RoleRepository::find_by_id(&mut conn, 9999).await.unwrap().is_none());
}

#[tokio::test]
async fn users_can_be_listed_updated_and_deleted() {
    let app = setup().await;
    register(&app.services, "bob").await;
    let anna = register(&app.services, "anna").await;
    let mut conn = app.pool.acquire().await.unwrap();

    let users = UserRepository::find_all(&mut conn).await.unwrap();
    let usernames: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(usernames, vec!["anna", "bob"]);
    assert!(users.iter().all(|u| u.has_role(RoleName::User)));

    let mut changed = anna.clone();
    changed.email = "anna@travel.example".into();
    UserRepository::update(&mut conn, &changed).await.unwrap();
    let reloaded = UserRepository::find_by_id(&mut conn, anna.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.email, "anna@travel.example");

    changed.id = 9999;
    assert!(matches!(
        UserRepository::update(&mut conn, &changed).await,
        Err(AppError::NotFound(_))
    ));

    assert!(UserRepository::delete_by_id(&mut conn, anna.id).await.unwrap());
    assert!(!UserRepository::delete_by_id(&mut conn, anna.id).await.unwrap());
    // 内存库只有一个连接
    drop(conn);
    assert_eq!(
        count(&app.pool, "SELECT COUNT(*) FROM user_roles WHERE user_id = ?", anna.id).await,
        0
    );
}

#[tokio::test]
async fn tag_can_be_detached_from_journey() {
    let app = setup().await;
    let anna = register(&app.services, "anna").await;
    let journey = app
        .services
        .journeys
        .create_journey(
            &JourneyCreation {
                name: "Coast walk".into(),
                tag_names: ["sea".to_string()].into_iter().collect(),
                ..Default::default()
            },
            &anna,
        )
        .await
        .unwrap();
    let sea = app.services.tags.get_tag_by_name("sea").await.unwrap();
    let mut conn = app.pool.acquire().await.unwrap();

    assert!(TagRepository::remove_from_journey(&mut conn, journey.id, sea.id).await.unwrap());
    assert!(!TagRepository::remove_from_journey(&mut conn, journey.id, sea.id).await.unwrap());
    assert!(TagRepository::find_by_journey_id(&mut conn, journey.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn participant_rows_can_be_added_and_removed() {
    let app = setup().await;
    let anna = register(&app.services, "anna").await;
    let bob = register(&app.services, "bob").await;
    let journey = app
        .services
        .journeys
        .create_journey(
            &JourneyCreation {
                name: "Night train".into(),
                ..Default::default()
            },
            &anna,
        )
        .await
        .unwrap();
    let mut conn = app.pool.acquire().await.unwrap();

    JourneyRepository::add_participant(&mut conn, journey.id, bob.id).await.unwrap();
    JourneyRepository::add_participant(&mut conn, journey.id, bob.id).await.unwrap();
    let participants = JourneyRepository::find_participants(&mut conn, journey.id)
        .await
        .unwrap();
    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0].id, bob.id);

    assert!(JourneyRepository::remove_participant(&mut conn, journey.id, bob.id).await.unwrap());
    assert!(!JourneyRepository::remove_participant(&mut conn, journey.id, bob.id).await.unwrap());
    assert!(JourneyRepository::find_participants(&mut conn, journey.id)
        .await
        .unwrap()
        .is_empty());
}
