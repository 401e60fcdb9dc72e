use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::get,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;

pub mod auth;
mod error;
mod staff;
mod system;

pub use error::ApiError;

/// Everything under this prefix; matches the upstream admin UI's base path.
pub const API_PREFIX: &str = "/staff-timetable/api";

#[derive(Clone)]
pub struct AppState {
    store: Store,
    config: Config,
}

impl AppState {
    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }
}

pub async fn create_app_state(config: Config) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.database.url()?,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    Ok(Arc::new(AppState { store, config }))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let protected_routes = create_protected_router(state.clone());

    let api_router = Router::new()
        .merge(protected_routes)
        .route("/health", get(system::health))
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest(API_PREFIX, api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/staff/", get(staff::list_staff).post(staff::create_staff))
        .route(
            "/staff/{id}",
            get(staff::get_staff)
                .put(staff::update_staff)
                .delete(staff::delete_staff),
        )
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
