// src/main.rs

use std::time::Duration;

use dotenvy::dotenv;
use quiz_server::config::Config;
use quiz_server::models::user::CreateUserRequest;
use quiz_server::routes;
use quiz_server::state::AppState;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DB_CONNECT_RETRIES: u32 = 5;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (if present)
    dotenv().ok();

    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let state = match &config.database_url {
        Some(database_url) => {
            let pool = connect_with_retry(database_url).await?;
            tracing::info!("Database connected...");

            tracing::info!("Running migrations...");
            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Migrations applied successfully.");

            AppState::postgres(config.clone(), pool)
        }
        None => {
            tracing::info!("DATABASE_URL not set, using the in-memory store");
            AppState::in_memory(config.clone())
        }
    };

    seed_admin_user(&state, &config).await;

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn connect_with_retry(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let mut retry_count = 0;
    loop {
        match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(e) => {
                retry_count += 1;
                if retry_count > DB_CONNECT_RETRIES {
                    tracing::error!("Failed to connect to database after {} retries", DB_CONNECT_RETRIES);
                    return Err(e);
                }
                tracing::warn!("Database not ready, retrying in 2s... (Attempt {})", retry_count);
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    }
}

/// Registers the configured ADMIN account unless that username already exists.
async fn seed_admin_user(state: &AppState, config: &Config) {
    let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) else {
        return;
    };

    match state.users.get_by_username(username).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            tracing::info!("Seeding admin user: {}", username);
            let req = CreateUserRequest {
                username: username.clone(),
                password: password.clone(),
                role: "ADMIN".to_string(),
            };
            if let Err(e) = state.users.register(req).await {
                tracing::error!("Failed to seed admin user: {}", e);
            }
        }
        Err(e) => tracing::error!("Failed to seed admin user: {}", e),
    }
}
