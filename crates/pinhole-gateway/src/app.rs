use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::auth::require_token;
use crate::handlers::{create_url_handler, delete_url_handler, health_handler, redirect_handler};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        let urls = Router::new()
            .route("/", post(create_url_handler))
            .route("/{alias}", delete(delete_url_handler))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_token,
            ));

        Router::new()
            .route("/health", get(health_handler))
            .nest("/v1/urls", urls)
            .route("/{alias}", get(redirect_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
