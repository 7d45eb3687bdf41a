use crate::handlers;
use crate::state::AppState;
use crate::storage::Persistence;
use axum::{
    Router,
    routing::{get, post, put},
};

pub fn router<P: Persistence>(state: AppState<P>) -> Router {
    Router::new()
        .route("/", get(handlers::index::<P>))
        .route("/entries", post(handlers::submit_form::<P>))
        .route("/entries/:date/delete", post(handlers::delete_form::<P>))
        .route(
            "/api/entries",
            get(handlers::list_entries::<P>).post(handlers::create_entry::<P>),
        )
        .route(
            "/api/entries/:date",
            get(handlers::get_entry::<P>)
                .put(handlers::update_entry::<P>)
                .delete(handlers::delete_entry::<P>),
        )
        .route("/api/stats", get(handlers::get_stats::<P>))
        .route("/api/chart", get(handlers::get_chart::<P>))
        .route("/api/export", get(handlers::export::<P>))
        .route("/api/target-calories", put(handlers::set_target_calories::<P>))
        .with_state(state)
}
