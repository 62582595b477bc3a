use axum::{extract::State, Json};
use service_core::error::AppError;

use crate::{
    dtos::{
        ExcuseRequest, ExcuseResponse, ReverseCancelRequest, ReverseCancelResponse, StylesResponse,
        TimelineRequest, TimelineResponse, UnsummaryRequest, UnsummaryResponse,
    },
    services::{
        extraction::check_word_count,
        generation::{finish, generate_text, Tool},
        metrics, TimelineGenerator,
    },
    utils::ValidatedJson,
    AppState,
};

/// POST /generate-unsummary
pub async fn generate_unsummary(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<UnsummaryRequest>,
) -> Result<Json<UnsummaryResponse>, AppError> {
    let style = req.style.unwrap_or_default();
    let prompt = req.prompt.unwrap_or_default();
    let word_count = req.word_count.unwrap_or_default();

    let ai_prompt = state
        .catalog
        .compose_unsummary(&style, &prompt, word_count);

    tracing::info!(style = %style, word_count, "Generating unsummary");

    let result = generate_text(state.provider.as_ref(), Tool::Unsummary, &ai_prompt)
        .await
        .map(|result| Json(UnsummaryResponse { result }));
    finish(Tool::Unsummary, result)
}

/// POST /reverse-cancel
pub async fn reverse_cancel(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ReverseCancelRequest>,
) -> Result<Json<ReverseCancelResponse>, AppError> {
    // Already checked by the extractor.
    let requested = req.whole_word_count().ok_or_else(|| {
        AppError::bad_request("Invalid word count. It must be between 50 and 1000 words.")
    })?;
    let style = req.style.unwrap_or_default();
    let topic = req.topic.unwrap_or_default();

    let ai_prompt = state.catalog.compose_defense(&style, &topic, requested);

    tracing::info!(style = %style, requested, "Generating defense");

    let result = defend(&state, &ai_prompt, requested).await.map(Json);
    finish(Tool::ReverseCancel, result)
}

async fn defend(
    state: &AppState,
    ai_prompt: &str,
    requested: u64,
) -> Result<ReverseCancelResponse, AppError> {
    let defense = generate_text(state.provider.as_ref(), Tool::ReverseCancel, ai_prompt).await?;
    let word_count = check_word_count(&defense, requested).map_err(|e| {
        tracing::warn!(requested, error = %e, "Defense length outside tolerance");
        e
    })?;
    Ok(ReverseCancelResponse {
        defense,
        word_count,
    })
}

/// POST /generate-excuse
pub async fn generate_excuse(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ExcuseRequest>,
) -> Result<Json<ExcuseResponse>, AppError> {
    let situation = req.situation.unwrap_or_default();
    let ai_prompt = state.catalog.compose_excuse(&situation);

    let result = generate_text(state.provider.as_ref(), Tool::Excuse, &ai_prompt)
        .await
        .map(|excuse| Json(ExcuseResponse { excuse }));
    finish(Tool::Excuse, result)
}

/// POST /generate-timeline
///
/// Always answers 200 once the request is valid; events that could not be
/// generated are left out.
pub async fn generate_timeline(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<TimelineRequest>,
) -> Result<Json<TimelineResponse>, AppError> {
    let prompt = req.prompt.unwrap_or_default();
    let settings = &state.config.timeline;

    tracing::info!(events = settings.event_count, "Generating timeline");

    let timeline = TimelineGenerator::new(state.provider.as_ref(), &state.catalog, settings)
        .generate(&prompt)
        .await;

    if timeline.len() < settings.event_count {
        tracing::warn!(
            generated = timeline.len(),
            requested = settings.event_count,
            "Timeline is missing events"
        );
    }
    metrics::record_generation(Tool::Timeline.as_str(), "success");

    Ok(Json(TimelineResponse { timeline }))
}

/// GET /styles
pub async fn list_styles(State(state): State<AppState>) -> Json<StylesResponse> {
    Json(StylesResponse {
        unsummary: state.catalog.unsummary.names(),
        reverse_cancel: state.catalog.defense.names(),
    })
}
