//! User service
//!
//! Passwords are hashed before anything touches the store. Email
//! uniqueness is a check at create time, not a storage constraint.

use tracing::info;

use crate::auth;
use crate::database::repositories::UserRepository;
use crate::errors::{AppError, AppResult};
use crate::models::{User, UserCreateRequest, UserRole, UserUpdateRequest};

#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
}

impl UserService {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    /// Create an account; fails with `Duplicate` when the email is taken
    /// and writes nothing in that case.
    pub async fn create(&self, request: UserCreateRequest) -> AppResult<User> {
        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::duplicate("user", &request.email));
        }
        if request.password.trim().is_empty() {
            return Err(AppError::validation("password must not be empty"));
        }

        let record = HashedUser {
            email: request.email,
            password: auth::hash_password(&request.password)?,
            role: request.role.unwrap_or(UserRole::User),
            enabled: request.enabled.unwrap_or(true),
        };
        let user = self.users.documents().save(&record).await?;
        info!("created user {} ({})", user.id, user.email);
        Ok(user)
    }

    pub async fn get(&self, id: &str) -> AppResult<User> {
        self.users.documents().get(id).await
    }

    pub async fn find(&self, id: &str) -> AppResult<Option<User>> {
        self.users.documents().find_by_id(id).await
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.users.find_by_email(email).await
    }

    pub async fn get_all(&self) -> AppResult<Vec<User>> {
        self.users.documents().find_all().await
    }

    /// Partial update; a supplied non-empty password is re-hashed, an
    /// empty one is ignored.
    pub async fn update(&self, id: &str, mut patch: UserUpdateRequest) -> AppResult<User> {
        match patch.password.as_deref() {
            Some(plain) if !plain.trim().is_empty() => {
                patch.password = Some(auth::hash_password(plain)?);
            }
            _ => patch.password = None,
        }

        self.users.documents().update(id, &patch).await?;
        self.users.documents().get(id).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.users.documents().delete(id).await
    }
}

/// Internal create shape with the hash already applied
#[derive(serde::Serialize)]
struct HashedUser {
    email: String,
    password: String,
    role: UserRole,
    enabled: bool,
}
