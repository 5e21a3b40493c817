use crate::{applications, error::Error, Id};
use chrono::Utc;
use entity_api::{mutate, query, query::IntoQueryFilterMap};
use sea_orm::{ConnectionTrait, IntoActiveModel, Set, TransactionTrait};

pub use entity_api::application::{create, delete_by_id, find_all, find_by_id, find_by_name};

pub async fn find_by(
    db: &impl ConnectionTrait,
    params: impl IntoQueryFilterMap,
) -> Result<Vec<applications::Model>, Error> {
    let applications = query::find_by::<applications::Entity, applications::Column>(
        db,
        params.into_query_filter_map(),
    )
    .await?;

    Ok(applications)
}

/// Applies a partial update to an application. The find and the column
/// update share one transaction.
pub async fn update(
    db: &(impl ConnectionTrait + TransactionTrait),
    application_id: Id,
    params: impl mutate::IntoUpdateMap,
) -> Result<applications::Model, Error> {
    let txn = db.begin().await?;

    let existing_application = find_by_id(&txn, application_id).await?;

    let mut active_model = existing_application.into_active_model();
    active_model.updated_at = Set(Utc::now().into());

    let updated_application =
        mutate::update::<applications::ActiveModel, applications::Column>(
            &txn,
            active_model,
            params.into_update_map(),
        )
        .await?;

    txn.commit().await?;

    Ok(updated_application)
}
