//! Portfolio site backend - library for app logic and testing

pub mod auth;
pub mod config;
pub mod contact;
pub mod content;
pub mod db;
pub mod error;
pub mod export;
pub mod github;
pub mod images;
pub mod logging;
pub mod perf;
pub mod routes;
pub mod schema;
pub mod sitemap;
pub mod state;
pub mod storage;

use axum::{
    http::{HeaderName, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::config::{AppConfig, DEFAULT_JWT_SECRET};
use crate::db::{DbConfig, DocumentStore};
use crate::state::AppState;

/// Body cap for everything except uploads.
pub const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Configure CORS from environment variables.
/// Uses ALLOWED_ORIGINS (comma-separated) or FRONTEND_ORIGIN, then the site
/// URL plus the local dev server.
pub fn configure_cors(site_url: &str) -> CorsLayer {
    let allowed_origins = std::env::var("ALLOWED_ORIGINS")
        .ok()
        .and_then(|s| {
            let origins: Vec<HeaderValue> = s
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                None
            } else {
                Some(origins)
            }
        })
        .or_else(|| {
            std::env::var("FRONTEND_ORIGIN")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(|origin| vec![origin])
        })
        .unwrap_or_else(|| {
            let mut origins = vec![
                HeaderValue::from_static("http://localhost:3000"),
                HeaderValue::from_static("http://127.0.0.1:3000"),
            ];
            if let Ok(site) = site_url.parse::<HeaderValue>() {
                if !origins.contains(&site) {
                    origins.push(site);
                }
            }
            origins
        });

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ])
        .expose_headers([HeaderName::from_static(routes::content::CONTENT_SOURCE_HEADER)])
        .allow_credentials(true)
}

fn api_routes() -> Router<AppState> {
    use routes::{auth, contact, content, github, health, images, metrics, perf, sitemap};

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/verify", post(auth::verify_session))
        .route("/api/auth/refresh", post(auth::refresh))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/projects", get(content::list_projects))
        .route("/api/projects/categories", get(content::project_categories))
        .route("/api/projects/{id}", get(content::get_project))
        .route("/api/blog", get(content::list_posts))
        .route("/api/blog/tags", get(content::post_tags))
        .route("/api/blog/{slug}", get(content::get_post))
        .route("/api/services", get(content::list_services))
        .route("/api/testimonials", get(content::list_testimonials))
        .route("/api/profile", get(content::get_profile))
        .route("/api/github/repos", get(github::list_repos))
        .route("/api/github/repos/{name}", get(github::get_repo))
        .route("/api/github/profile", get(github::get_profile))
        .route("/api/contact", post(contact::send_message))
        .route("/api/images/resolve", get(images::resolve))
        .route("/api/critical-css", get(perf::get_critical_css))
        .route("/api/critical-css/preload", get(perf::get_preload_tags))
        .route("/api/metrics/vitals", post(metrics::receive_vitals))
        .route(
            "/api/metrics/images",
            get(metrics::image_summary).post(metrics::receive_image_events),
        )
        .route("/sitemap.xml", get(sitemap::sitemap))
        .route("/health", get(health::health_ping))
        .route("/health/detailed", get(health::health_detailed))
        .route("/health/database", get(health::health_database))
        .route("/health/ready", get(health::health_ready))
        // Global 2 MB request body cap; uploads carry their own limit
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
}

fn admin_routes(state: &AppState) -> Router<AppState> {
    use routes::admin;

    Router::new()
        .route("/api/admin/stats", get(admin::stats))
        .route("/api/admin/{collection}", get(admin::list).post(admin::create))
        .route(
            "/api/admin/{collection}/{id}",
            get(admin::get).patch(admin::update).delete(admin::delete),
        )
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .merge(routes::upload::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_admin))
}

/// The exported static site, with the admin page guard in front of it.
fn site_routes(state: &AppState) -> Router<AppState> {
    let dir = &state.config.static_dir;
    let site = ServeDir::new(dir)
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new(dir.join("404.html")));

    Router::new()
        .fallback_service(site)
        .layer(middleware::from_fn_with_state(state.clone(), auth::guard::page_guard))
}

/// Create and configure the application router.
pub fn create_app(state: AppState) -> Router {
    let cors = configure_cors(&state.config.site_url);
    tracing::info!("CORS configured");

    Router::new()
        .merge(api_routes())
        .merge(admin_routes(&state))
        .merge(site_routes(&state))
        .nest_service(storage::PUBLIC_PREFIX, ServeDir::new(state.storage.root()))
        .with_state(state)
        .layer(logging::middleware::propagate_request_id_layer())
        .layer(middleware::from_fn(logging::middleware::log_request))
        .layer(logging::middleware::request_id_layer())
        .layer(TraceLayer::new_for_http())
        // Compress responses with gzip/br/zstd automatically
        .layer(CompressionLayer::new())
        .layer(cors)
}

/// Refuse to start in production with the insecure default JWT secret and
/// warn about default admin credentials.
fn check_production_secrets(config: &AppConfig) {
    if !config.is_production() {
        return;
    }

    if config.jwt_secret.is_empty() || config.jwt_secret == DEFAULT_JWT_SECRET {
        panic!(
            "FATAL: JWT_SECRET must be set to a secure, unique value in production. \
             Refusing to start with the default secret."
        );
    }

    if config.admin_email == "admin@example.com" {
        tracing::warn!("SECURITY: ADMIN_EMAIL is using an insecure default. Set ADMIN_EMAIL to a real address.");
    }
    if std::env::var("ADMIN_HASH_PASSWORD").is_err() && std::env::var("ADMIN_PASSWORD").is_err() {
        tracing::warn!(
            "SECURITY: Neither ADMIN_HASH_PASSWORD nor ADMIN_PASSWORD is set. \
             The fallback default password 'admin123' is insecure. \
             Set ADMIN_HASH_PASSWORD to a bcrypt hash of a strong password."
        );
    }
}

/// Postgres when DATABASE_URL is set and reachable, otherwise the in-memory store.
async fn open_store(config: &AppConfig) -> DocumentStore {
    let Some(url) = &config.database_url else {
        tracing::info!("DATABASE_URL not set. Using the in-memory document store.");
        return DocumentStore::memory();
    };

    match db::init_pool(&DbConfig::from_env(url)).await {
        Ok(pool) => {
            if let Err(e) = db::run_migrations(&pool).await {
                tracing::error!("Failed to run database migrations: {}", e);
            }
            DocumentStore::Postgres(pool)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to initialize database pool: {}. Continuing with the in-memory store.",
                e
            );
            DocumentStore::memory()
        }
    }
}

/// Run the server (used by main).
pub async fn run() {
    dotenvy::dotenv().ok();

    // Guards must outlive the server or buffered log lines are lost.
    let _log_guards = logging::init(&logging::LogConfig::from_env());

    routes::health::init_start_time();

    let config = AppConfig::from_env();
    check_production_secrets(&config);

    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("Invalid HOST/PORT configuration: {}", e);
            std::process::exit(1);
        }
    };

    let store = open_store(&config).await;
    let app = create_app(AppState::new(config, store));

    tracing::info!("Starting server on {}", addr);
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
