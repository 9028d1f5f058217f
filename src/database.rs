use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::config::DatabaseConfig;

const MAX_CONNECTIONS: u32 = 5;

/// Column definitions per table, in dependency order (referenced tables first).
/// Every table also gets a `BIGSERIAL` primary key named `id`.
const TABLES: &[(&str, &[(&str, &str)])] = &[
    (
        "users",
        &[
            ("username", "TEXT UNIQUE"),
            ("email", "TEXT NOT NULL UNIQUE"),
            ("password_hash", "TEXT NOT NULL"),
            ("created_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
            ("updated_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
        ],
    ),
    (
        "social_media",
        &[
            ("name", "TEXT NOT NULL"),
            ("social_media_url", "TEXT NOT NULL"),
            ("user_id", "BIGINT NOT NULL REFERENCES users(id)"),
            ("created_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
            ("updated_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
        ],
    ),
    (
        "photos",
        &[
            ("title", "TEXT NOT NULL"),
            ("caption", "TEXT"),
            ("photo_url", "TEXT NOT NULL"),
            ("user_id", "BIGINT NOT NULL REFERENCES users(id)"),
            ("created_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
            ("updated_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
        ],
    ),
    (
        "comments",
        &[
            ("message", "TEXT NOT NULL"),
            ("user_id", "BIGINT NOT NULL REFERENCES users(id)"),
            ("photo_id", "BIGINT NOT NULL REFERENCES photos(id) ON DELETE CASCADE"),
            ("created_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
            ("updated_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
        ],
    ),
];

/// Opens the shared connection pool. Called once at startup.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(config.connect_options())
        .await
}

/// migrate
///
/// Creates any missing table, then adds any missing column. Safe to run on every
/// start; existing data and columns are left alone.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in schema_statements() {
        tracing::debug!(%statement, "applying schema");
        sqlx::query(&statement).execute(pool).await?;
    }
    tracing::info!(tables = TABLES.len(), "database schema is up to date");
    Ok(())
}

fn schema_statements() -> Vec<String> {
    let mut statements = Vec::new();
    for (table, columns) in TABLES {
        statements.push(format!(
            "CREATE TABLE IF NOT EXISTS {table} (id BIGSERIAL PRIMARY KEY)"
        ));
        for (column, definition) in columns.iter() {
            statements.push(format!(
                "ALTER TABLE {table} ADD COLUMN IF NOT EXISTS {column} {definition}"
            ));
        }
    }
    statements
}
