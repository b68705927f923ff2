pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod normalize;
pub mod services;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes())
        .merge(public_routes())
        .merge(admin_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::public::auth;

    Router::new().route("/auth/login", post(auth::login))
}

fn public_routes() -> Router<AppState> {
    use handlers::public::{posts, projects};

    Router::new()
        .route("/api/posts", get(posts::list))
        .route("/api/posts/:slug", get(posts::get))
        .route("/api/projects", get(projects::list))
        .route("/api/projects/:slug", get(projects::get))
}

fn admin_routes() -> Router<AppState> {
    use handlers::admin::{posts, projects};

    Router::new()
        .route("/api/admin/posts", get(posts::list).post(posts::create))
        .route(
            "/api/admin/posts/:id",
            get(posts::get).patch(posts::update).delete(posts::remove),
        )
        .route(
            "/api/admin/projects",
            get(projects::list).post(projects::create),
        )
        .route(
            "/api/admin/projects/:id",
            get(projects::get)
                .patch(projects::update)
                .delete(projects::remove),
        )
        // Single guard for the whole admin subtree
        .route_layer(axum::middleware::from_fn(middleware::admin_auth_middleware))
}

async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "name": "Portfolio API",
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "login": "POST /auth/login (public)",
                "posts": "GET /api/posts, GET /api/posts/:slug (public, published only)",
                "projects": "GET /api/projects, GET /api/projects/:slug (public, published only)",
                "admin": "/api/admin/posts[/:id], /api/admin/projects[/:id] (ADMIN token)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match database::health_check(&state.db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": { "status": "ok", "timestamp": now, "database": "ok" }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": { "status": "degraded", "timestamp": now, "database_error": e.to_string() }
            })),
        ),
    }
}
