#![forbid(unsafe_code)]

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::{Pool, Postgres};

use log::info;
use crate::utils::config::DbConfig;

// Pool sizing mirrors the benchmark deployment configuration.
const POOL_MIN_CONNECTIONS: u32 = 0;
const POOL_MAX_CONNECTIONS: u32 = 50;
const POOL_IDLE_TIMEOUT_SECS: u64 = 10;

// ---------------------------------------------------------------------------
// init_db:
// ---------------------------------------------------------------------------
/** Create the connection pool against the pre-existing benchmark schema.
 * Startup is the only place a database failure is fatal.
 */
pub async fn init_db(config: &DbConfig) -> Pool<Postgres> {
    info!("Connecting to database {} on host {}.", config.database, config.host);

    // Create the database connection pool.
    let db = PgPoolOptions::new()
        .min_connections(POOL_MIN_CONNECTIONS)
        .max_connections(POOL_MAX_CONNECTIONS)
        .idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SECS))
        .connect_with(connect_options(config)).await
        .expect("Unable to create db connection pool");

    info!("Database connection pool created.");
    db
}

// ---------------------------------------------------------------------------
// connect_options:
// ---------------------------------------------------------------------------
/** Assemble the driver options from the store coordinates.  TLS is required
 * but the server certificate is not verified (sqlx's Require mode), which is
 * the transport arrangement the benchmark harness runs with.
 */
fn connect_options(config: &DbConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .database(&config.database)
        .username(&config.user)
        .password(&config.password)
        .ssl_mode(PgSslMode::Require)
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_requires_tls() {
        let config = DbConfig {
            database: "benchmark_db".to_string(),
            user: "postgres".to_string(),
            password: "root".to_string(),
            host: "localhost".to_string(),
        };
        // Require refuses plaintext fallback; Prefer would silently accept
        // an unencrypted connection when the server declines TLS.
        let options = connect_options(&config);
        assert!(format!("{:?}", options).contains("Require"));
    }
}
