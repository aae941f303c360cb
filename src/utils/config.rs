#![forbid(unsafe_code)]

use std::env;

use clap::Parser;
use log::{info, LevelFilter};
use sqlx::{Pool, Postgres};

use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;

// Benchmark utilities.
use crate::utils::db_init;
use crate::utils::errors::Errors;

// ***************************************************************************
//                                Constants
// ***************************************************************************
// Networking.
const DEFAULT_HTTP_ADDR: &str = "0.0.0.0";
const DEFAULT_HTTP_PORT: u16 = 8080;

// Database coordinates are taken from the environment with fixed fallbacks,
// matching the benchmark harness conventions.
const ENV_PG_DATABASE: &str = "PGDB";
const ENV_PG_USER: &str = "PGUSER";
const ENV_PG_PASSWORD: &str = "PGPASS";
const ENV_PG_HOST: &str = "PGHOST";

const DEFAULT_PG_DATABASE: &str = "benchmark_db";
const DEFAULT_PG_USER: &str = "postgres";
const DEFAULT_PG_PASSWORD: &str = "root";
const DEFAULT_PG_HOST: &str = "localhost";

// Console logging layout used when no log4rs file is provided.
const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}";

// ***************************************************************************
//                               Config Structs
// ***************************************************************************
// ---------------------------------------------------------------------------
// BenchArgs:
// ---------------------------------------------------------------------------
#[derive(Parser, Debug)]
#[command(name = "bench_server", about = "Command line arguments for the benchmark server.")]
pub struct BenchArgs {
    /// Port the HTTP listener binds.
    #[arg(short = 'p', long, default_value_t = DEFAULT_HTTP_PORT)]
    pub http_port: u16,

    /// Path to a log4rs YAML configuration file.
    ///
    /// When absent, a console logger with an INFO threshold is configured
    /// programmatically.
    #[arg(short, long)]
    pub log_config: Option<String>,
}

// ---------------------------------------------------------------------------
// DbConfig:
// ---------------------------------------------------------------------------
#[derive(Debug)]
pub struct DbConfig {
    pub database: String,
    pub user: String,
    pub password: String,
    pub host: String,
}

impl DbConfig {
    /** Read the store coordinates from the environment, falling back to the
     * harness defaults for anything unset.
     */
    pub fn from_env() -> Self {
        Self {
            database: env_or(ENV_PG_DATABASE, DEFAULT_PG_DATABASE),
            user: env_or(ENV_PG_USER, DEFAULT_PG_USER),
            password: env_or(ENV_PG_PASSWORD, DEFAULT_PG_PASSWORD),
            host: env_or(ENV_PG_HOST, DEFAULT_PG_HOST),
        }
    }
}

// ---------------------------------------------------------------------------
// Parms:
// ---------------------------------------------------------------------------
#[derive(Debug)]
pub struct Parms {
    pub http_addr: String,
    pub http_port: u16,
    pub db_config: DbConfig,
}

// ---------------------------------------------------------------------------
// RuntimeCtx:
// ---------------------------------------------------------------------------
/** The process-wide runtime context.  Constructed once in main and handed
 * to each endpoint, which keeps the database pool out of global state and
 * lets tests substitute their own context.
 */
#[derive(Debug)]
pub struct RuntimeCtx {
    pub parms: Parms,
    pub db: Pool<Postgres>,
}

// ***************************************************************************
//                               Log Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_log:
// ---------------------------------------------------------------------------
pub fn init_log(args: &BenchArgs) {
    match &args.log_config {
        // Initialize log4rs from the caller-supplied file.
        Some(logconfig) => {
            match log4rs::init_file(logconfig.clone(), Default::default()) {
                Ok(_) => (),
                Err(e) => {
                    println!("{}", e);
                    let s = format!("{}", Errors::Log4rsInitialization(logconfig.clone()));
                    panic!("{}", s);
                },
            }
            info!("Log4rs initialized using: {}", logconfig);
        },
        // Fall back to a console logger.
        None => {
            init_default_log();
            info!("Log4rs initialized with the default console configuration.");
        },
    }
}

// ---------------------------------------------------------------------------
// init_default_log:
// ---------------------------------------------------------------------------
fn init_default_log() {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();
    let config = log4rs::Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))
        .expect("FAILED to assemble the default log configuration.");
    log4rs::init_config(config).expect("FAILED to initialize logging.");
}

// ***************************************************************************
//                             Config Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_runtime_context:
// ---------------------------------------------------------------------------
/** Build the runtime context from the command line and environment.  A
 * database that cannot be reached at startup aborts the process; request
 * time failures are mapped to 500 responses instead.
 */
pub async fn init_runtime_context(args: &BenchArgs) -> RuntimeCtx {
    let db_config = DbConfig::from_env();
    let db = db_init::init_db(&db_config).await;
    let parms = Parms {
        http_addr: DEFAULT_HTTP_ADDR.to_string(),
        http_port: args.http_port,
        db_config,
    };
    RuntimeCtx { parms, db }
}

// ---------------------------------------------------------------------------
// env_or:
// ---------------------------------------------------------------------------
fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_or_falls_back_when_unset() {
        // A key no harness environment defines.
        assert_eq!(env_or("BENCH_SERVER_NO_SUCH_KEY", "fallback"), "fallback");
    }

    #[test]
    fn db_config_defaults() {
        // Only meaningful when the PG* variables are unset, which is the
        // normal unit test environment.
        if env::var(ENV_PG_DATABASE).is_err() {
            let cfg = DbConfig::from_env();
            assert_eq!(cfg.database, DEFAULT_PG_DATABASE);
        }
    }
}
