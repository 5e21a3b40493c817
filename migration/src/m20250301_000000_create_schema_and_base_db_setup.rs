use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create the platform's schema
        manager
            .get_connection()
            .execute_unprepared("CREATE SCHEMA IF NOT EXISTS relay_platform;")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("SET search_path TO relay_platform, public;")
            .await?;

        // Grant the base DB user that executes all platform queries
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DO $$ BEGIN
                    GRANT ALL PRIVILEGES ON DATABASE relay TO relay;
                    GRANT ALL ON SCHEMA relay_platform TO relay;

                    ALTER DEFAULT PRIVILEGES IN SCHEMA relay_platform GRANT ALL ON TABLES TO relay;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA relay_platform GRANT ALL ON SEQUENCES TO relay;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA relay_platform GRANT ALL ON FUNCTIONS TO relay;
                END $$;
            "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Revoke default privileges first
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DO $$ BEGIN
                    ALTER DEFAULT PRIVILEGES IN SCHEMA relay_platform REVOKE ALL ON FUNCTIONS FROM relay;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA relay_platform REVOKE ALL ON SEQUENCES FROM relay;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA relay_platform REVOKE ALL ON TABLES FROM relay;
                    REVOKE ALL ON SCHEMA relay_platform FROM relay;
                    REVOKE ALL PRIVILEGES ON DATABASE relay FROM relay;
                END $$;
            "#,
            )
            .await?;

        // Drop the schema (CASCADE will remove all objects in it)
        manager
            .get_connection()
            .execute_unprepared("DROP SCHEMA IF EXISTS relay_platform CASCADE;")
            .await?;

        Ok(())
    }
}
