use axum::Router;

pub mod fruits;
pub mod system;

/// Router for all resource endpoints.
pub fn router() -> Router {
    Router::new().nest("/fruits", fruits::router())
}
