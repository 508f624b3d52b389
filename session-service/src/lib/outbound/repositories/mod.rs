pub mod refresh_token;
pub mod user;

pub use refresh_token::PostgresRefreshTokenStore;
pub use user::PostgresUserDirectory;

use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Open a connection pool for the session stores.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    Ok(pool)
}

/// Create the `refresh_tokens` table if it does not exist yet.
///
/// The `users` table belongs to the host application and is not touched.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!(database = "postgresql", "Session store migrations completed");
    Ok(())
}
