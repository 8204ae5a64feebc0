use std::sync::Arc;

use axum::{extract::State, response::Html};

use crate::{
    db::format_date,
    templates::{home_page, HomeData},
    AppState,
};

/// Handler for the index page (GET /)
pub async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    let constants = &state.constants;
    let data = HomeData {
        most_recent_date: format_date(constants.most_recent_date)
            .unwrap_or_else(|_| "Invalid".to_string()),
        one_year_prior_date: format_date(constants.one_year_prior_date)
            .unwrap_or_else(|_| "Invalid".to_string()),
        most_active_station: constants.most_active_station.clone(),
    };

    Html(home_page(&state.remote_url, &data).into_string())
}
