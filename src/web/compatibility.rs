use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    compatibility::{CompatibilityResult, PersonInput},
    locale::Locale,
    web::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CompatibilityRequest {
    #[serde(default)]
    persons: Vec<PersonInput>,
    #[serde(default)]
    locale: Option<Locale>,
}

pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<CompatibilityRequest>,
) -> Json<CompatibilityResult> {
    if request.persons.len() > 2 {
        warn!(
            count = request.persons.len(),
            "only the first two persons are compared"
        );
    }

    let locale = request.locale.unwrap_or(state.config().default_locale);
    let result = state
        .memo()
        .get_or_compute(state.engine(), request.persons, locale)
        .await;

    info!(
        overall = result.scores.overall_score,
        %locale,
        "compatibility computed"
    );
    Json(CompatibilityResult::clone(&result))
}
