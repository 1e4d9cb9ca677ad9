use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::application::ports::StoreError;

const CONNECT_RETRIES: u32 = 5;

#[instrument(skip(url))]
pub async fn create_pool(url: &str, max_connections: u32) -> Result<PgPool, StoreError> {
    let mut retries = CONNECT_RETRIES;
    let mut delay = Duration::from_millis(500);

    loop {
        match PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
        {
            Ok(pool) => {
                info!("PostgreSQL connection pool established");
                return Ok(pool);
            }
            Err(e) if retries > 0 => {
                retries -= 1;
                warn!(
                    error = %e,
                    retries_left = retries,
                    delay_ms = delay.as_millis(),
                    "PostgreSQL connection failed, retrying"
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
            Err(e) => {
                return Err(StoreError::ConnectionFailed(e.to_string()));
            }
        }
    }
}

/// Applies the embedded `migrations/` directory.
#[instrument(skip(pool))]
pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!()
        .run(pool)
        .await
        .map_err(|e| StoreError::ConnectionFailed(format!("migrations failed: {e}")))?;
    info!("Database migrations applied");
    Ok(())
}
