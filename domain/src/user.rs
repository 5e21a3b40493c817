use crate::{error::Error, users, Id};
use chrono::Utc;
use entity_api::{mutate, query, query::IntoQueryFilterMap};
use sea_orm::{ConnectionTrait, IntoActiveModel, Set, TransactionTrait};

pub use entity_api::user::{create, delete_by_id, find_all, find_by_id, find_by_username};

pub async fn find_by(
    db: &impl ConnectionTrait,
    params: impl IntoQueryFilterMap,
) -> Result<Vec<users::Model>, Error> {
    let users =
        query::find_by::<users::Entity, users::Column>(db, params.into_query_filter_map()).await?;

    Ok(users)
}

/// Applies a partial update to a user. The find and the column update run
/// inside one transaction, so the row cannot be soft-deleted out from under
/// the update between the two statements.
pub async fn update(
    db: &(impl ConnectionTrait + TransactionTrait),
    user_id: Id,
    params: impl mutate::IntoUpdateMap,
) -> Result<users::Model, Error> {
    let txn = db.begin().await?;

    let existing_user = find_by_id(&txn, user_id).await?;

    let mut active_model = existing_user.into_active_model();
    active_model.updated_at = Set(Utc::now().into());

    let updated_user = mutate::update::<users::ActiveModel, users::Column>(
        &txn,
        active_model,
        params.into_update_map(),
    )
    .await?;

    txn.commit().await?;

    Ok(updated_user)
}

#[cfg(test)]
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use entity_api::mutate::{IntoUpdateMap, UpdateMap};
    use sea_orm::{DatabaseBackend, MockDatabase, Value};

    struct EmailParams {
        email: String,
    }

    impl IntoUpdateMap for EmailParams {
        fn into_update_map(self) -> UpdateMap {
            let mut update_map = UpdateMap::new();
            update_map.insert(
                "email".to_string(),
                Some(Value::String(Some(Box::new(self.email)))),
            );
            update_map
        }
    }

    fn test_user() -> users::Model {
        let now = Utc::now();
        users::Model {
            id: "b1GlMQGYCzqW3EVhZtZg81Nps".to_string(),
            username: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            password: "hashed".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            phone_number: "555-0100".to_string(),
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            country: "US".to_string(),
            zip_code: "62701".to_string(),
            is_active: true,
            is_superuser: false,
            created_at: now.into(),
            updated_at: now.into(),
            deleted_at: None,
        }
    }

    #[tokio::test]
    async fn update_finds_and_updates_inside_one_transaction() {
        let existing = test_user();
        let mut updated = existing.clone();
        updated.email = "new@example.com".to_string();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing.clone()], vec![updated]])
            .into_connection();

        let result = update(
            &db,
            existing.id.clone(),
            EmailParams {
                email: "new@example.com".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(result.email, "new@example.com");

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("BEGIN"));
        assert!(log.contains("COMMIT"));
        assert!(!log.contains("ROLLBACK"));
    }

    #[tokio::test]
    async fn update_of_a_missing_user_rolls_back_without_committing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<users::Model>::new()])
            .into_connection();

        let error = update(
            &db,
            "missing".to_string(),
            EmailParams {
                email: "new@example.com".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(
            error.error_kind,
            crate::error::DomainErrorKind::Internal(crate::error::InternalErrorKind::Entity(
                crate::error::EntityErrorKind::NotFound
            ))
        );

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("BEGIN"));
        assert!(log.contains("ROLLBACK"));
        assert!(!log.contains("COMMIT"));
    }
}
