mod common;

use trailtales::database::models::RoleName;
use trailtales::error::AppError;
use trailtales::models::{UserLogin, UserRegistration};

use common::{PASSWORD, register, setup};

#[tokio::test]
async fn register_assigns_user_role() {
    let app = setup().await;
    let user = register(&app.services, "anna").await;

    assert_eq!(user.username, "anna");
    assert!(user.has_role(RoleName::User));
    assert!(!user.has_role(RoleName::Admin));
    assert_ne!(user.password_hash, PASSWORD);
}

#[tokio::test]
async fn duplicate_username_and_email_are_rejected() {
    let app = setup().await;
    register(&app.services, "anna").await;

    let same_username = app
        .services
        .users
        .register(&UserRegistration {
            username: "anna".into(),
            email: "other@example.com".into(),
            password: PASSWORD.into(),
        })
        .await;
    assert!(matches!(same_username, Err(AppError::AlreadyExists(_))));

    let same_email = app
        .services
        .users
        .register(&UserRegistration {
            username: "annie".into(),
            email: "anna@example.com".into(),
            password: PASSWORD.into(),
        })
        .await;
    assert!(matches!(same_email, Err(AppError::AlreadyExists(_))));
}

#[tokio::test]
async fn invalid_registration_reports_all_messages() {
    let app = setup().await;
    let err = app
        .services
        .users
        .register(&UserRegistration {
            username: "a".into(),
            email: "nope".into(),
            password: "1".into(),
        })
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(message.matches("; ").count(), 2, "{message}");
}

#[tokio::test]
async fn login_accepts_username_or_email() {
    let app = setup().await;
    let anna = register(&app.services, "anna").await;

    for identifier in ["anna", "anna@example.com"] {
        let user = app
            .services
            .users
            .login(&UserLogin {
                identifier: identifier.into(),
                password: PASSWORD.into(),
            })
            .await
            .unwrap();
        assert_eq!(user.id, anna.id);
    }
}

#[tokio::test]
async fn login_failures_share_one_message() {
    let app = setup().await;
    register(&app.services, "anna").await;

    let wrong_password = app
        .services
        .users
        .login(&UserLogin {
            identifier: "anna".into(),
            password: "wrong-password".into(),
        })
        .await
        .unwrap_err();
    let unknown_user = app
        .services
        .users
        .login(&UserLogin {
            identifier: "nobody".into(),
            password: PASSWORD.into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, AppError::AuthFailed(_)));
    assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    assert_eq!(wrong_password.to_string(), "Invalid identifier or password");
}

#[tokio::test]
async fn lookup_by_identifier() {
    let app = setup().await;
    let anna = register(&app.services, "anna").await;

    let found = app.services.users.find_by_identifier("anna@example.com").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(anna.id));
    assert!(app.services.users.find_by_identifier("ghost").await.unwrap().is_none());
    assert!(matches!(
        app.services.users.get_user_by_id(999).await,
        Err(AppError::NotFound(_))
    ));
}
