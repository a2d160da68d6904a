//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! Routes live under `/api/v1`. The protected group is wrapped with
//! [`require_auth`] as a route layer, so unmatched paths never reach the gate.

// region: --- Imports
use crate::handlers::{auth, todos};
use crate::middleware::{log_requests, require_auth, stamp_req, RequestStamp};
use axum::{
    extract::FromRef,
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    response::IntoResponse,
    routing::{delete, get, patch, post},
    Router,
};
use lib_core::model::store::{
    create_pool, run_migrations, DynTodoStore, DynUserStore, TodoRepository, UserRepository,
};
use lib_core::{AppError, Config};
use lib_utils::get_env_or;
use std::path::Path;
use std::sync::Arc;
use tower_cookies::CookieManagerLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub users: DynUserStore,
    pub todos: DynTodoStore,
}

impl AppState {
    pub fn new(config: Config, users: DynUserStore, todos: DynTodoStore) -> Self {
        Self { config, users, todos }
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for DynUserStore {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

impl FromRef<AppState> for DynTodoStore {
    fn from_ref(state: &AppState) -> Self {
        state.todos.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration
pub struct ServerConfig {
    /// Database migrations path
    pub migrations_path: &'static str,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            migrations_path: "./migrations",
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading or validation fails
/// - Database connection fails
/// - Database migrations fail
/// - Server binding fails
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let log_level = get_env_or("LOG_LEVEL", "info").to_lowercase();
    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {}", e))?;

    info!(" TODO BACKEND STARTING");
    info!(" Log level: {}", log_level);

    info!("Loading configuration...");
    let app_config = Config::load()?;
    info!("Environment: {}", app_config.env_mode);

    ensure_sqlite_dir(&app_config.database_url)?;

    info!("Connecting to database...");
    let pool = create_pool(&app_config.database_url).await?;

    info!(" Running database migrations from: {}", config.migrations_path);
    run_migrations(&pool, Path::new(config.migrations_path)).await?;
    info!(" Migrations complete");

    let bind_address = format!("0.0.0.0:{}", app_config.port);
    let state = AppState::new(
        app_config,
        Arc::new(UserRepository::new(pool.clone())),
        Arc::new(TodoRepository::new(pool)),
    );

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!(" SERVER READY: http://{}", bind_address);
    log_server_info();

    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the parent directory of a file-backed SQLite database.
fn ensure_sqlite_dir(database_url: &str) -> anyhow::Result<()> {
    let Some(rest) = database_url.strip_prefix("sqlite:") else {
        return Ok(());
    };
    let db_path = rest.trim_start_matches("//");
    let db_path = db_path.split('?').next().unwrap_or(db_path);

    if db_path.is_empty() || db_path.starts_with(":memory:") {
        return Ok(());
    }

    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            info!("Created database directory: {:?}", parent);
        }
    }
    info!("Database file will be at: {}", db_path);

    Ok(())
}

/// Create the main application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    info!("[ROUTE SETUP] Registering HTTP routes...");
    let public = Router::new()
        .route("/", get(auth::root))
        .route("/register-root", get(auth::root))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout));

    let protected = Router::new()
        .route("/me", get(auth::me))
        .route("/todos", get(todos::list_todos))
        .route("/todos/new", post(todos::create_todo))
        .route("/todos/{id}", get(todos::get_todo))
        .route("/todos/update/{id}", patch(todos::update_todo))
        .route("/todos/delete/{id}", delete(todos::delete_todo))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .nest("/api/v1", public.merge(protected))
        // Nesting maps "/" to "/api/v1" only
        .route("/api/v1/", get(auth::root))
        .route("/health", get(|| async { "OK" }))
        .fallback(|| async {
            info!("[404 HANDLER] Unmatched route - returning 404");
            AppError::NotFound("route not found".to_string()).into_response()
        })
        .with_state(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .extensions()
                    .get::<RequestStamp>()
                    .map(|s| s.id.clone())
                    .unwrap_or_else(|| "unknown".to_string());
                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(log_requests))
        // Outermost of the three so the id exists for logging and spans
        .layer(from_fn(stamp_req))
        .layer(CookieManagerLayer::new())
        .layer(cors)
}

/// Single-origin CORS with credentials, as the session rides in a cookie.
fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    match HeaderValue::from_str(&config.frontend_url) {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            tracing::warn!("[CORS] FRONTEND_URL is not a valid header value; cross-origin requests are refused");
            layer
        }
    }
}

/// Log server information
fn log_server_info() {
    info!(" AUTH:");
    info!("   • GET    /api/v1/register-root");
    info!("   • POST   /api/v1/register");
    info!("   • POST   /api/v1/login");
    info!("   • POST   /api/v1/logout");
    info!("   • GET    /api/v1/me");
    info!(" TODOS:");
    info!("   • GET    /api/v1/todos");
    info!("   • POST   /api/v1/todos/new");
    info!("   • GET    /api/v1/todos/{{id}}");
    info!("   • PATCH  /api/v1/todos/update/{{id}}");
    info!("   • DELETE /api/v1/todos/delete/{{id}}");
    info!(" HEALTH:");
    info!("   • GET    /health");
}
// endregion: --- Server Setup
