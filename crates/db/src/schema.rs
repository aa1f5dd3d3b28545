use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create custom_users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS custom_users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            username VARCHAR(255) NOT NULL UNIQUE,
            password_hash VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            last_login TIMESTAMP WITH TIME ZONE NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create alarms table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS alarms (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id UUID NOT NULL REFERENCES custom_users(id),
            name VARCHAR(255) NOT NULL,
            hour SMALLINT NOT NULL CHECK (hour BETWEEN 0 AND 23),
            minutes SMALLINT NOT NULL CHECK (minutes BETWEEN 0 AND 59),
            days_active INTEGER[] NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            stop_method VARCHAR(32) NOT NULL DEFAULT 'default',
            snooze_duration_minutes INTEGER NOT NULL DEFAULT 5,
            snooze_max_count INTEGER NULL,
            wake_sequence JSONB NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_alarms_user_id ON alarms(user_id);
        CREATE INDEX IF NOT EXISTS idx_alarms_user_id_is_active ON alarms(user_id, is_active);
        CREATE INDEX IF NOT EXISTS idx_custom_users_username ON custom_users(username);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
