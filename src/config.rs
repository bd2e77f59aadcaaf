// src/config.rs

use std::env;
use std::net::SocketAddr;

use dotenvy::dotenv;

/// Length of the code test-takers use to open a quiz.
pub const ACCESS_CODE_LENGTH: usize = 6;

/// How many fresh access codes are tried before quiz creation gives up.
pub const ACCESS_CODE_MAX_ATTEMPTS: usize = 5;

/// A question needs at least this many options to be answerable.
pub const MIN_QUESTION_OPTIONS: usize = 2;

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub rust_log: String,
    pub bind_addr: SocketAddr,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .ok()
            .and_then(|addr| addr.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let admin_username = env::var("ADMIN_USERNAME").ok();
        let admin_password = env::var("ADMIN_PASSWORD").ok();

        Self {
            database_url,
            rust_log,
            bind_addr,
            admin_username,
            admin_password,
        }
    }

    /// Configuration for tests and embedded use: in-memory store, quiet logs.
    pub fn in_memory() -> Self {
        Self {
            database_url: None,
            rust_log: "error".to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            admin_username: None,
            admin_password: None,
        }
    }
}
