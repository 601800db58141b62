use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use tokio::task;
use tracing::{error, info, warn};

use crate::{
    locale::Locale,
    tarot::{
        DrawnCard, Interpretation, NewTarotReading, SavedTarotReading, Spread, draw_cards,
        find_card, find_spread, format_reading_date, get_card_advice, interpret, spreads,
    },
    web::{ApiError, AppState, json_error, state::Readings},
};

#[derive(Debug, Deserialize)]
pub struct AdviceQuery {
    #[serde(default)]
    reversed: bool,
    #[serde(default)]
    locale: Option<Locale>,
}

#[derive(Debug, Serialize)]
pub struct AdviceResponse {
    card: String,
    card_ko: String,
    reversed: bool,
    locale: Locale,
    advice: String,
}

#[derive(Debug, Deserialize)]
pub struct DrawRequest {
    spread_id: String,
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    locale: Option<Locale>,
}

#[derive(Debug, Serialize)]
pub struct DrawResponse {
    spread: &'static Spread,
    title: &'static str,
    question: String,
    locale: Locale,
    cards: Vec<DrawnCard>,
    interpretation: Interpretation,
}

#[derive(Debug, Deserialize)]
pub struct ReadingsQuery {
    #[serde(default)]
    locale: Option<Locale>,
}

#[derive(Debug, Serialize)]
pub struct ReadingView {
    #[serde(flatten)]
    reading: SavedTarotReading,
    date: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    deleted: bool,
}

pub async fn list_spreads() -> Json<&'static [Spread]> {
    Json(spreads())
}

pub async fn card_advice(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<AdviceQuery>,
) -> Result<Json<AdviceResponse>, ApiError> {
    let card = find_card(&name)
        .ok_or_else(|| json_error(StatusCode::NOT_FOUND, format!("unknown card: {name}")))?;
    let locale = query.locale.unwrap_or(state.config().default_locale);

    Ok(Json(AdviceResponse {
        card: card.name.clone(),
        card_ko: card.name_ko.clone(),
        reversed: query.reversed,
        locale,
        advice: get_card_advice(card, query.reversed, locale),
    }))
}

pub async fn draw(
    State(state): State<AppState>,
    Json(request): Json<DrawRequest>,
) -> Result<Json<DrawResponse>, ApiError> {
    let spread = find_spread(&request.spread_id).ok_or_else(|| {
        json_error(
            StatusCode::BAD_REQUEST,
            format!("unknown spread: {}", request.spread_id),
        )
    })?;
    let locale = request.locale.unwrap_or(state.config().default_locale);
    let question = request.question.unwrap_or_default();

    let cards = draw_cards(spread, &mut OsRng);
    let interpretation = interpret(&question, &cards, locale);
    info!(spread = spread.id, cards = cards.len(), "tarot cards drawn");

    Ok(Json(DrawResponse {
        spread,
        title: spread.localized_title(locale),
        question,
        locale,
        cards,
        interpretation,
    }))
}

pub async fn list_readings(
    State(state): State<AppState>,
    Query(query): Query<ReadingsQuery>,
) -> Result<Json<Vec<ReadingView>>, ApiError> {
    let locale = query.locale.unwrap_or(state.config().default_locale);
    let readings = with_repository(&state, |repository| repository.get_saved_readings()).await?;

    Ok(Json(
        readings
            .into_iter()
            .map(|reading| ReadingView {
                date: format_reading_date(reading.timestamp, locale),
                reading,
            })
            .collect(),
    ))
}

pub async fn save_reading(
    State(state): State<AppState>,
    Json(reading): Json<NewTarotReading>,
) -> Result<Json<SavedTarotReading>, ApiError> {
    if reading.cards.is_empty() {
        return Err(json_error(
            StatusCode::BAD_REQUEST,
            "a reading needs at least one card",
        ));
    }

    let saved = with_repository(&state, move |repository| repository.save_reading(reading)).await?;
    Ok(Json(saved))
}

pub async fn get_reading(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SavedTarotReading>, ApiError> {
    let lookup = id.clone();
    with_repository(&state, move |repository| repository.get_reading_by_id(&lookup))
        .await?
        .map(Json)
        .ok_or_else(|| json_error(StatusCode::NOT_FOUND, format!("no saved reading {id}")))
}

pub async fn delete_reading(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let target = id.clone();
    let deleted = with_repository(&state, move |repository| repository.delete_reading(&target)).await?;
    if !deleted {
        warn!(%id, "tarot reading was not deleted");
    }
    Ok(Json(DeleteResponse { deleted }))
}

pub async fn clear_readings(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    with_repository(&state, |repository| repository.clear_readings()).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn with_repository<T, F>(state: &AppState, op: F) -> Result<T, ApiError>
where
    F: FnOnce(&Readings) -> T + Send + 'static,
    T: Send + 'static,
{
    let repository = state.readings();
    task::spawn_blocking(move || op(&repository))
        .await
        .map_err(|err| {
            error!(?err, "tarot storage task failed");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "tarot storage is unavailable, please try again later",
            )
        })
}
