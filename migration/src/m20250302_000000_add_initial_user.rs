use chrono::Utc;
use entity_api::nano_id;
use password_auth::generate_hash;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{DbBackend, Statement, Value};

const ADMIN_USERNAME: &str = "admin";
const ADMIN_EMAIL: &str = "admin@relayplatform.dev";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        insert_initial_admin_user(manager).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        delete_initial_admin_user(manager).await
    }
}

// NOTE: We use raw SQL here to avoid issues with entity type changes in future migrations.
// Using the ORM can break if new fields are added later, but raw SQL remains compatible.
async fn insert_initial_admin_user(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let db = manager.get_connection();
    let now = Utc::now();

    let password_hash = generate_hash("password");

    let user_sql = r#"
        INSERT INTO relay_platform.users (
            id, username, email, password, first_name, last_name,
            is_active, is_superuser, created_at, updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (username) DO NOTHING
    "#;
    db.execute(Statement::from_sql_and_values(
        DbBackend::Postgres,
        user_sql,
        vec![
            Value::String(Some(Box::new(nano_id::generate()))),
            Value::String(Some(Box::new(ADMIN_USERNAME.to_owned()))),
            Value::String(Some(Box::new(ADMIN_EMAIL.to_owned()))),
            Value::String(Some(Box::new(password_hash))),
            Value::String(Some(Box::new("Admin".to_owned()))),
            Value::String(Some(Box::new("Admin".to_owned()))),
            Value::Bool(Some(true)),
            Value::Bool(Some(true)),
            Value::ChronoDateTimeUtc(Some(Box::new(now))),
            Value::ChronoDateTimeUtc(Some(Box::new(now))),
        ],
    ))
    .await?;

    Ok(())
}

async fn delete_initial_admin_user(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let db = manager.get_connection();

    let delete_user_sql = r#"
        DELETE FROM relay_platform.users WHERE username = $1
    "#;
    db.execute(Statement::from_sql_and_values(
        DbBackend::Postgres,
        delete_user_sql,
        vec![Value::String(Some(Box::new(ADMIN_USERNAME.to_owned())))],
    ))
    .await?;

    Ok(())
}
