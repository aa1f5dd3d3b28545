use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/alarms", post(handlers::alarm::create_alarm))
        .route("/api/alarms", get(handlers::alarm::list_alarms))
        .route("/api/alarms/:id", get(handlers::alarm::get_alarm))
        .route("/api/alarms/:id", put(handlers::alarm::update_alarm))
        .route("/api/alarms/:id", delete(handlers::alarm::delete_alarm))
        .route(
            "/api/alarms/:id/toggle",
            put(handlers::alarm::toggle_alarm),
        )
}
