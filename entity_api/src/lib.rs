use chrono::Utc;
use log::*;
use password_auth::generate_hash;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

pub use entity::{applications, users, Id};

pub mod application;
pub mod error;
pub mod mutate;
pub mod nano_id;
pub mod query;
pub mod user;

/// Seeds the database with an initial superuser for local development.
/// A failed insert (e.g. the user already exists) is logged and skipped so
/// the seed binary stays re-runnable.
pub async fn seed_database(db: &DatabaseConnection) {
    let now = Utc::now();

    let admin_user = users::ActiveModel {
        id: Set(nano_id::generate()),
        username: Set("admin".to_string()),
        email: Set("admin@relayplatform.dev".to_string()),
        password: Set(generate_hash("dLxNxnjn&b!2sqkwFbb4s8jX")),
        first_name: Set("Admin".to_string()),
        last_name: Set("User".to_string()),
        phone_number: Set("".to_string()),
        address: Set("".to_string()),
        city: Set("".to_string()),
        state: Set("".to_string()),
        country: Set("".to_string()),
        zip_code: Set("".to_string()),
        is_active: Set(true),
        is_superuser: Set(true),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        deleted_at: Set(None),
    };

    match admin_user.insert(db).await {
        Ok(user) => info!("Seeded initial superuser [{}]", user.username),
        Err(e) => warn!("Skipping initial superuser seed: {e}"),
    }
}
