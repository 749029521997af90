//! Expense type business logic - the catalogue expenses are classified against.
//!
//! Provides creation, lookup, and config-driven seeding of expense types.

use crate::{
    config::expense_types::ExpenseTypeConfig,
    entities::{ExpenseType, expense_type},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info};

/// Creates a new expense type.
///
/// The name is trimmed, must not be blank, and must not already exist.
pub async fn create_expense_type(
    db: &DatabaseConnection,
    name: String,
    description: Option<String>,
    is_essential: bool,
) -> Result<expense_type::Model> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::invalid_argument("Expense type name cannot be empty"));
    }

    if get_expense_type_by_name(db, name).await?.is_some() {
        return Err(Error::invalid_argument(format!(
            "Expense type '{name}' already exists"
        )));
    }

    let expense_type = expense_type::ActiveModel {
        name: Set(name.to_string()),
        description: Set(description.filter(|d| !d.trim().is_empty())),
        is_essential: Set(is_essential),
        ..Default::default()
    };

    let result = expense_type.insert(db).await?;
    Ok(result)
}

/// Finds an expense type by its ID, returning None if absent.
pub async fn get_expense_type_by_id<C>(
    db: &C,
    expense_type_id: i64,
) -> Result<Option<expense_type::Model>>
where
    C: ConnectionTrait,
{
    ExpenseType::find_by_id(expense_type_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds an expense type by its exact name, returning None if absent.
pub async fn get_expense_type_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<expense_type::Model>> {
    ExpenseType::find()
        .filter(expense_type::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every expense type ordered alphabetically by name.
pub async fn get_all_expense_types(db: &DatabaseConnection) -> Result<Vec<expense_type::Model>> {
    ExpenseType::find()
        .order_by_asc(expense_type::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Inserts every configured expense type that is not in the database yet.
///
/// Existing types are matched by name and left untouched, so running this on
/// every start is safe. Returns the number of types inserted.
pub async fn seed_expense_types(
    db: &DatabaseConnection,
    configs: &[ExpenseTypeConfig],
) -> Result<usize> {
    let mut inserted = 0;

    for config in configs {
        if get_expense_type_by_name(db, config.name.trim()).await?.is_some() {
            debug!("Expense type '{}' already present, skipping", config.name);
            continue;
        }

        create_expense_type(
            db,
            config.name.clone(),
            config.description.clone(),
            config.is_essential,
        )
        .await?;
        inserted += 1;
    }

    info!("Seeded {} expense types", inserted);
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_expense_type_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_expense_type(&db, "  ".to_string(), None, false).await;
        assert!(matches!(result, Err(Error::InvalidArgument { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_expense_type_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let coffee = create_expense_type(
            &db,
            " Coffee ".to_string(),
            Some("Takeaway coffee".to_string()),
            false,
        )
        .await?;
        assert_eq!(coffee.name, "Coffee");
        assert!(!coffee.is_essential);

        let found = get_expense_type_by_id(&db, coffee.id).await?.unwrap();
        assert_eq!(found, coffee);

        let duplicate = create_expense_type(&db, "Coffee".to_string(), None, true).await;
        assert!(matches!(duplicate, Err(Error::InvalidArgument { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_expense_types_ordered() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_expense_type(&db, "Snacks", false).await?;
        create_test_expense_type(&db, "Rent", true).await?;

        let all = get_all_expense_types(&db).await?;
        let names: Vec<&str> = all.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Rent", "Snacks"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_expense_types_skips_existing() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_expense_type(&db, "Rent", true).await?;

        let configs = vec![
            ExpenseTypeConfig {
                name: "Rent".to_string(),
                description: None,
                is_essential: true,
            },
            ExpenseTypeConfig {
                name: "Coffee".to_string(),
                description: Some("Takeaway coffee".to_string()),
                is_essential: false,
            },
        ];

        assert_eq!(seed_expense_types(&db, &configs).await?, 1);
        assert_eq!(seed_expense_types(&db, &configs).await?, 0);
        assert_eq!(get_all_expense_types(&db).await?.len(), 2);

        Ok(())
    }
}
