use crate::errors::AppError;
use crate::models::{
    ChartPoint, DailyEntry, EntryForm, EntrySubmission, HistoryItem, HistoryQuery, IndexQuery,
    StatsResponse, TargetCaloriesRequest, normalise_date_key,
};
use crate::state::AppState;
use crate::stats::{HistorySort, build_chart, build_history, build_stats};
use crate::storage::Persistence;
use crate::ui::render_index;
use crate::validation::accept_submission;
use axum::{
    Form, Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect},
};
use chrono::Local;
use tracing::{info, warn};

pub async fn index<P: Persistence>(
    State(state): State<AppState<P>>,
    Query(query): Query<IndexQuery>,
) -> Html<String> {
    let store = state.store.lock().await;
    let today = Local::now().date_naive();
    Html(render_index(store.data(), today, query.share_mode()))
}

pub async fn submit_form<P: Persistence>(
    State(state): State<AppState<P>>,
    Form(form): Form<EntryForm>,
) -> Result<Redirect, AppError> {
    save_entry(&state, EntrySubmission::from(form)).await?;
    Ok(Redirect::to("/"))
}

pub async fn delete_form<P: Persistence>(
    State(state): State<AppState<P>>,
    Path(date): Path<String>,
) -> Result<Redirect, AppError> {
    let date = normalise_date_key(&date);
    state.store.lock().await.remove(&date).await?;
    Ok(Redirect::to("/"))
}

pub async fn list_entries<P: Persistence>(
    State(state): State<AppState<P>>,
    Query(query): Query<HistoryQuery>,
) -> Json<Vec<HistoryItem>> {
    let store = state.store.lock().await;
    let search = query.search.as_deref().unwrap_or("").trim();
    let sort = HistorySort::parse(query.sort.as_deref());
    Json(build_history(store.data(), search, sort))
}

pub async fn get_entry<P: Persistence>(
    State(state): State<AppState<P>>,
    Path(date): Path<String>,
) -> Result<Json<DailyEntry>, AppError> {
    let date = normalise_date_key(&date);
    let store = state.store.lock().await;
    store
        .get(&date)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("no entry for {date}")))
}

pub async fn create_entry<P: Persistence>(
    State(state): State<AppState<P>>,
    Json(submission): Json<EntrySubmission>,
) -> Result<(StatusCode, Json<DailyEntry>), AppError> {
    let entry = save_entry(&state, submission).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update_entry<P: Persistence>(
    State(state): State<AppState<P>>,
    Path(date): Path<String>,
    Json(submission): Json<EntrySubmission>,
) -> Result<Json<DailyEntry>, AppError> {
    let date = normalise_date_key(&date);
    let entry = accept_submission(submission)?;
    let mut store = state.store.lock().await;
    if store.get(&date).is_none() {
        return Err(AppError::not_found(format!("no entry for {date}")));
    }
    let replaced = store.replace(&date, entry.clone()).await?;
    if replaced.overwritten.is_some() && date != entry.date {
        warn!(from = %date, to = %entry.date, "edit replaced the existing entry on the new date");
    }
    info!(from = %date, to = %entry.date, "entry updated");
    Ok(Json(entry))
}

pub async fn delete_entry<P: Persistence>(
    State(state): State<AppState<P>>,
    Path(date): Path<String>,
) -> Result<StatusCode, AppError> {
    let date = normalise_date_key(&date);
    if state.store.lock().await.remove(&date).await?.is_some() {
        info!(date = %date, "entry deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_stats<P: Persistence>(
    State(state): State<AppState<P>>,
) -> Result<Json<StatsResponse>, AppError> {
    let store = state.store.lock().await;
    Ok(Json(build_stats(store.data())))
}

pub async fn get_chart<P: Persistence>(State(state): State<AppState<P>>) -> Json<Vec<ChartPoint>> {
    let store = state.store.lock().await;
    Json(build_chart(store.data()))
}

pub async fn export<P: Persistence>(
    State(state): State<AppState<P>>,
) -> Result<impl IntoResponse, AppError> {
    let text = state.store.lock().await.export_json().await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], text))
}

pub async fn set_target_calories<P: Persistence>(
    State(state): State<AppState<P>>,
    Json(payload): Json<TargetCaloriesRequest>,
) -> Result<StatusCode, AppError> {
    state
        .store
        .lock()
        .await
        .set_target_calories(payload.target_calories)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn save_entry<P: Persistence>(
    state: &AppState<P>,
    submission: EntrySubmission,
) -> Result<DailyEntry, AppError> {
    let entry = accept_submission(submission)?;
    let previous = state.store.lock().await.upsert(entry.clone()).await?;
    info!(date = %entry.date, replaced = previous.is_some(), "entry saved");
    Ok(entry)
}
