use sqlx::SqlitePool;

use crate::database::models::{RoleName, User};
use crate::database::repositories::{RoleRepository, UserRepository};
use crate::error::{AppError, AppResult};
use crate::models::{UserLogin, UserRegistration, Validate};
use crate::utils::{hash_password, verify_password};

const INVALID_CREDENTIALS: &str = "Invalid identifier or password";

#[derive(Clone)]
pub struct UserService {
    pool: SqlitePool,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(pool: SqlitePool, bcrypt_cost: u32) -> Self {
        Self { pool, bcrypt_cost }
    }

    /// 注册新用户并分配 `ROLE_USER`
    pub async fn register(&self, dto: &UserRegistration) -> AppResult<User> {
        dto.validate()?;
        let username = dto.username.trim();
        let email = dto.email.trim();

        let mut tx = self.pool.begin().await?;

        if UserRepository::find_by_username(&mut tx, username).await?.is_some() {
            return Err(AppError::already_exists(format!(
                "User with username '{username}' already exists"
            )));
        }
        if UserRepository::find_by_email(&mut tx, email).await?.is_some() {
            return Err(AppError::already_exists(format!(
                "User with email '{email}' already exists"
            )));
        }

        let role = RoleRepository::find_by_name(&mut tx, RoleName::User)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Role {} is missing", RoleName::User)))?;

        let password_hash = hash_password(&dto.password, self.bcrypt_cost)?;
        let user = UserRepository::insert(&mut tx, username, email, &password_hash).await?;
        UserRepository::replace_roles(&mut tx, user.id, &[role.id]).await?;

        let user = UserRepository::find_by_id(&mut tx, user.id)
            .await?
            .ok_or_else(|| AppError::Internal("registered user disappeared".into()))?;
        tx.commit().await?;

        tracing::info!("Registered user {} ({})", user.username, user.id);
        Ok(user)
    }

    /// 用户名或邮箱登录，两种失败返回同样的错误信息
    pub async fn login(&self, dto: &UserLogin) -> AppResult<User> {
        dto.validate()?;

        let mut conn = self.pool.acquire().await?;
        let Some(user) =
            UserRepository::find_by_username_or_email(&mut conn, dto.identifier.trim()).await?
        else {
            tracing::warn!("Login failed: unknown identifier");
            return Err(AppError::auth_failed(INVALID_CREDENTIALS));
        };

        if !verify_password(&dto.password, &user.password_hash)? {
            tracing::warn!("Login failed: wrong password for user {}", user.id);
            return Err(AppError::auth_failed(INVALID_CREDENTIALS));
        }

        tracing::info!("User {} logged in", user.username);
        Ok(user)
    }

    pub async fn get_user_by_id(&self, id: i64) -> AppResult<User> {
        let mut conn = self.pool.acquire().await?;
        UserRepository::find_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User with ID {id} not found")))
    }

    pub async fn find_by_identifier(&self, identifier: &str) -> AppResult<Option<User>> {
        let mut conn = self.pool.acquire().await?;
        UserRepository::find_by_username_or_email(&mut conn, identifier.trim()).await
    }
}
