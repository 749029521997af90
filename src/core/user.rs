//! User business logic - registration and lookup.
//!
//! Password handling and login are owned by the surrounding application; this
//! module only manages the identity records goals and expenses belong to.

use crate::{
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use tracing::info;

/// Registers a new user.
///
/// The name is trimmed and must not be blank. The email is trimmed, lower-cased,
/// must contain an `@`, and must not already belong to another user.
pub async fn create_user(
    db: &DatabaseConnection,
    name: String,
    email: String,
) -> Result<user::Model> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::invalid_argument("User name cannot be empty"));
    }

    let email = email.trim().to_lowercase();
    if !email.contains('@') {
        return Err(Error::invalid_argument(format!(
            "'{email}' is not a valid email address"
        )));
    }

    if get_user_by_email(db, &email).await?.is_some() {
        return Err(Error::invalid_argument(format!(
            "Email '{email}' is already registered"
        )));
    }

    let user = user::ActiveModel {
        name: Set(name.to_string()),
        email: Set(email),
        registered_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = user.insert(db).await?;
    info!(user_id = result.id, "Registered user");
    Ok(result)
}

/// Finds a user by ID, returning None if absent.
pub async fn get_user_by_id<C>(db: &C, user_id: i64) -> Result<Option<user::Model>>
where
    C: ConnectionTrait,
{
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Finds a user by email (case-insensitive), returning None if absent.
pub async fn get_user_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Email.eq(email.trim().to_lowercase()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a user by ID, failing with [`Error::UserNotFound`] if absent.
pub async fn require_user<C>(db: &C, user_id: i64) -> Result<user::Model>
where
    C: ConnectionTrait,
{
    get_user_by_id(db, user_id)
        .await?
        .ok_or(Error::UserNotFound { id: user_id })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_user_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_user(&db, "   ".to_string(), "a@b.com".to_string()).await;
        assert!(matches!(result, Err(Error::InvalidArgument { .. })));

        let result = create_user(&db, "Ana".to_string(), "not-an-email".to_string()).await;
        assert!(matches!(result, Err(Error::InvalidArgument { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_user_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let user = create_user(&db, "  Ana ".to_string(), " Ana@Example.com ".to_string()).await?;
        assert_eq!(user.name, "Ana");
        assert_eq!(user.email, "ana@example.com");

        let found = get_user_by_id(&db, user.id).await?.unwrap();
        assert_eq!(found, user);

        let by_email = get_user_by_email(&db, "ANA@example.com").await?.unwrap();
        assert_eq!(by_email.id, user.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() -> Result<()> {
        let db = setup_test_db().await?;
        create_user(&db, "Ana".to_string(), "ana@example.com".to_string()).await?;

        let result = create_user(&db, "Other".to_string(), "ANA@example.com".to_string()).await;
        assert!(matches!(result, Err(Error::InvalidArgument { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_require_user_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = require_user(&db, 999).await;
        assert!(matches!(result, Err(Error::UserNotFound { id: 999 })));

        Ok(())
    }
}
