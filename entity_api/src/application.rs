use super::error::{EntityApiErrorKind, Error};
use crate::nano_id;
use chrono::Utc;

use entity::applications::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set, TransactionTrait};

/// Length of a generated application API key.
const API_KEY_SIZE: usize = 40;

/// Inserts a new application inside its own unit of work. Empty id and
/// api_key fields are replaced with generated values.
pub async fn create(db: &impl TransactionTrait, application_model: Model) -> Result<Model, Error> {
    debug!("New Application Model to be inserted: {application_model:?}");

    let id = if application_model.id.is_empty() {
        nano_id::generate()
    } else {
        application_model.id
    };
    let api_key = if application_model.api_key.is_empty() {
        nano_id::generate_sized(API_KEY_SIZE)
    } else {
        application_model.api_key
    };
    let now = Utc::now();

    let application_active_model = ActiveModel {
        id: Set(id),
        name: Set(application_model.name),
        description: Set(application_model.description),
        url: Set(application_model.url),
        is_active: Set(application_model.is_active),
        api_key: Set(api_key),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        deleted_at: Set(None),
    };

    let txn = db.begin().await?;
    let created_application = application_active_model.insert(&txn).await?;
    txn.commit().await?;

    Ok(created_application)
}

/// Finds an application by id, excluding soft-deleted records.
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

pub async fn find_by_name(db: &impl ConnectionTrait, name: &str) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::Name.eq(name))
        .filter(Column::DeletedAt.is_null())
        .one(db)
        .await?)
}

/// Returns every application that has not been soft-deleted.
pub async fn find_all(db: &impl ConnectionTrait) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::DeletedAt.is_null())
        .all(db)
        .await?)
}

/// Soft-deletes an application by stamping `deleted_at`.
pub async fn delete_by_id(db: &impl TransactionTrait, id: Id) -> Result<(), Error> {
    let txn = db.begin().await?;

    let application = find_by_id(&txn, id).await?;
    let now = Utc::now();

    let mut application_active_model: ActiveModel = application.into();
    application_active_model.updated_at = Set(now.into());
    application_active_model.deleted_at = Set(Some(now.into()));
    application_active_model.update(&txn).await?;

    txn.commit().await?;

    Ok(())
}

#[cfg(test)]
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn test_application() -> Model {
        let now = Utc::now();
        Model {
            id: "k9RlMQGYCzqW3EVhZtZg81Npr".to_string(),
            name: "dashboard".to_string(),
            description: "Operations dashboard".to_string(),
            url: "https://dashboard.example.com".to_string(),
            is_active: true,
            api_key: "a".repeat(API_KEY_SIZE),
            created_at: now.into(),
            updated_at: now.into(),
            deleted_at: None,
        }
    }

    #[tokio::test]
    async fn find_by_id_returns_the_matching_application() {
        let application = test_application();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[application.clone()]])
            .into_connection();

        let found = find_by_id(&db, application.id.clone()).await.unwrap();
        assert_eq!(found, application);
    }

    #[tokio::test]
    async fn find_by_id_maps_missing_application_to_record_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<Model>::new()])
            .into_connection();

        let error = find_by_id(&db, "missing".to_string()).await.unwrap_err();
        assert_eq!(error.error_kind, EntityApiErrorKind::RecordNotFound);
    }

    #[tokio::test]
    async fn find_by_name_returns_the_matching_application() {
        let application = test_application();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[application.clone()]])
            .into_connection();

        let found = find_by_name(&db, "dashboard").await.unwrap();
        assert_eq!(found, Some(application));
    }
}
