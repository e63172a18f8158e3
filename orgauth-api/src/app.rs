/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use orgauth_api::{app::{build_router, AppState}, config::Config};
/// use orgauth_shared::store::MemoryStore;
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Arc::new(MemoryStore::new()), config);
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use orgauth_shared::auth::middleware::{jwt_auth_middleware, AuthError};
use orgauth_shared::store::Store;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Persistence handle
    pub store: Arc<dyn Store>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET  /health                          (public)
/// ├── /auth/                                (public)
/// │   ├── POST /register
/// │   └── POST /login
/// └── /api/                                 (bearer token)
///     ├── GET  /users/:id
///     ├── GET  /organisations
///     ├── POST /organisations
///     ├── GET  /organisations/:orgId
///     └── POST /organisations/:orgId/users
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    let api_routes = Router::new()
        .route("/users/:id", get(routes::users::get_user))
        .route(
            "/organisations",
            get(routes::organisations::list_organisations)
                .post(routes::organisations::create_organisation),
        )
        .route(
            "/organisations/:org_id",
            get(routes::organisations::get_organisation),
        )
        .route(
            "/organisations/:org_id/users",
            post(routes::organisations::add_member),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    Router::new()
        .merge(health_routes)
        .nest("/auth", auth_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Rejects requests without a valid bearer token and injects `AuthContext`
async fn jwt_auth_layer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    jwt_auth_middleware(state.jwt_secret().to_string(), req, next).await
}
