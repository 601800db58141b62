use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::web::{AppState, compatibility, tarot};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/compatibility", post(compatibility::analyze))
        .route("/api/tarot/spreads", get(tarot::list_spreads))
        .route("/api/tarot/cards/:name/advice", get(tarot::card_advice))
        .route("/api/tarot/draw", post(tarot::draw))
        .route(
            "/api/tarot/readings",
            get(tarot::list_readings)
                .post(tarot::save_reading)
                .delete(tarot::clear_readings),
        )
        .route(
            "/api/tarot/readings/:id",
            get(tarot::get_reading).delete(tarot::delete_reading),
        )
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}
