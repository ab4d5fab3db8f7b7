pub mod health;
pub mod songs;

use axum::Router;
use axum::routing::get;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health::root))
        .route("/healthz", get(health::healthz))
        .route("/songs", get(songs::songs))
        .route("/albums", get(songs::albums))
}
