use super::error::{EntityApiErrorKind, Error};
use crate::nano_id;
use chrono::Utc;

use entity::users::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use password_auth::generate_hash;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set, TransactionTrait};

/// Inserts a new user inside its own unit of work. A caller-supplied id is
/// honored; an empty id is replaced with a freshly generated nano-id. The
/// password arrives in plaintext and is stored hashed.
pub async fn create(db: &impl TransactionTrait, user_model: Model) -> Result<Model, Error> {
    debug!("New User Model to be inserted: {user_model:?}");

    let id = if user_model.id.is_empty() {
        nano_id::generate()
    } else {
        user_model.id
    };
    let now = Utc::now();

    let user_active_model = ActiveModel {
        id: Set(id),
        username: Set(user_model.username),
        email: Set(user_model.email),
        password: Set(generate_hash(user_model.password)),
        first_name: Set(user_model.first_name),
        last_name: Set(user_model.last_name),
        phone_number: Set(user_model.phone_number),
        address: Set(user_model.address),
        city: Set(user_model.city),
        state: Set(user_model.state),
        country: Set(user_model.country),
        zip_code: Set(user_model.zip_code),
        is_active: Set(user_model.is_active),
        is_superuser: Set(user_model.is_superuser),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        deleted_at: Set(None),
    };

    let txn = db.begin().await?;
    let created_user = user_active_model.insert(&txn).await?;
    txn.commit().await?;

    Ok(created_user)
}

/// Finds a user by id, excluding soft-deleted records.
pub async fn find_by_id(db: &impl ConnectionTrait, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id)
        .filter(Column::DeletedAt.is_null())
        .one(db)
        .await?
        .ok_or_else(|| Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordNotFound,
        })
}

pub async fn find_by_username(
    db: &impl ConnectionTrait,
    username: &str,
) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::Username.eq(username))
        .filter(Column::DeletedAt.is_null())
        .one(db)
        .await?)
}

/// Returns every user that has not been soft-deleted.
pub async fn find_all(db: &impl ConnectionTrait) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::DeletedAt.is_null())
        .all(db)
        .await?)
}

/// Soft-deletes a user by stamping `deleted_at`. The row stays behind for
/// audit purposes and disappears from every query in this module.
pub async fn delete_by_id(db: &impl TransactionTrait, id: Id) -> Result<(), Error> {
    let txn = db.begin().await?;

    let user = find_by_id(&txn, id).await?;
    let now = Utc::now();

    let mut user_active_model: ActiveModel = user.into();
    user_active_model.updated_at = Set(now.into());
    user_active_model.deleted_at = Set(Some(now.into()));
    user_active_model.update(&txn).await?;

    txn.commit().await?;

    Ok(())
}

#[cfg(test)]
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, RuntimeErr};

    fn test_user() -> Model {
        let now = Utc::now();
        Model {
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
    async fn create_commits_exactly_one_transaction() {
        let user = test_user();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[user.clone()]])
            .into_connection();

        let created = create(&db, user.clone()).await.unwrap();
        assert_eq!(created.id, user.id);

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("BEGIN"));
        assert!(log.contains("COMMIT"));
        assert!(!log.contains("ROLLBACK"));
    }

    #[tokio::test]
    async fn a_failed_insert_rolls_back_and_never_commits() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Exec(RuntimeErr::Internal(
                "insert failed".to_string(),
            ))])
            .into_connection();

        let error = create(&db, test_user()).await.unwrap_err();
        assert_eq!(error.error_kind, EntityApiErrorKind::SystemError);

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("BEGIN"));
        assert!(log.contains("ROLLBACK"));
        assert!(!log.contains("COMMIT"));
    }

    #[tokio::test]
    async fn find_by_id_returns_the_matching_user() {
        let user = test_user();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[user.clone()]])
            .into_connection();

        let found = find_by_id(&db, user.id.clone()).await.unwrap();
        assert_eq!(found, user);
    }

    #[tokio::test]
    async fn find_by_id_maps_missing_user_to_record_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<Model>::new()])
            .into_connection();

        let error = find_by_id(&db, "missing".to_string()).await.unwrap_err();
        assert_eq!(error.error_kind, EntityApiErrorKind::RecordNotFound);
    }

    #[tokio::test]
    async fn find_all_returns_every_live_user() {
        let user = test_user();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[user.clone()]])
            .into_connection();

        let users = find_all(&db).await.unwrap();
        assert_eq!(users, vec![user]);
    }

    #[tokio::test]
    async fn find_by_username_returns_none_when_absent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<Model>::new()])
            .into_connection();

        assert!(find_by_username(&db, "ghost").await.unwrap().is_none());
    }
}
