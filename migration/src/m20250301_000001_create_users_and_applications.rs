use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Ids are server-generated 25-character nano-ids, hence CHAR(25)
        // primary keys instead of serials.
        let create_users_sql = r#"
            CREATE TABLE IF NOT EXISTS relay_platform.users (
                id CHAR(25) PRIMARY KEY,
                username VARCHAR(255) NOT NULL,
                email VARCHAR(255) NOT NULL,
                password VARCHAR(255) NOT NULL,
                first_name VARCHAR(255) NOT NULL DEFAULT '',
                last_name VARCHAR(255) NOT NULL DEFAULT '',
                phone_number VARCHAR(255) NOT NULL DEFAULT '',
                address VARCHAR(255) NOT NULL DEFAULT '',
                city VARCHAR(255) NOT NULL DEFAULT '',
                state VARCHAR(255) NOT NULL DEFAULT '',
                country VARCHAR(255) NOT NULL DEFAULT '',
                zip_code VARCHAR(255) NOT NULL DEFAULT '',
                is_active BOOLEAN NOT NULL DEFAULT TRUE,
                is_superuser BOOLEAN NOT NULL DEFAULT FALSE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                deleted_at TIMESTAMPTZ
            )
        "#;

        manager
            .get_connection()
            .execute_unprepared(create_users_sql)
            .await?;

        manager
            .get_connection()
            .execute_unprepared("ALTER TABLE relay_platform.users OWNER TO relay")
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS users_username_key \
                 ON relay_platform.users (username)",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS users_email_key \
                 ON relay_platform.users (email)",
            )
            .await?;

        let create_applications_sql = r#"
            CREATE TABLE IF NOT EXISTS relay_platform.applications (
                id CHAR(25) PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                url VARCHAR(2048) NOT NULL DEFAULT '',
                is_active BOOLEAN NOT NULL DEFAULT TRUE,
                api_key CHAR(40) NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                deleted_at TIMESTAMPTZ
            )
        "#;

        manager
            .get_connection()
            .execute_unprepared(create_applications_sql)
            .await?;

        manager
            .get_connection()
            .execute_unprepared("ALTER TABLE relay_platform.applications OWNER TO relay")
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS applications_name_key \
                 ON relay_platform.applications (name)",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS applications_api_key_key \
                 ON relay_platform.applications (api_key)",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS relay_platform.applications")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS relay_platform.users")
            .await?;

        Ok(())
    }
}
