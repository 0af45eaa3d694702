use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

use crate::state::{load, settle, HomeState, Loader};
use crate::view::HomeView;

pub struct AppState {
    pub loader: Arc<Loader>,
    pub calendar_name: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/home", get(handle_home))
        .route("/meetings.ics", get(handle_calendar))
        .route("/meetings.json", get(handle_meetings))
        .fallback(|| async { StatusCode::NOT_FOUND })
        .with_state(state)
}

#[derive(Deserialize)]
struct HomeQuery {
    // IANA zone of the viewer
    tz: Option<String>,
    // RFC 3339 instant to preview the board at
    at: Option<String>,
}

impl HomeQuery {
    fn now(&self, default_tz: Tz) -> Result<DateTime<Tz>, &'static str> {
        let tz = match &self.tz {
            Some(tz) => tz.parse::<Tz>().map_err(|_| "unknown time zone in `tz`")?,
            None => default_tz,
        };

        match &self.at {
            Some(at) => DateTime::parse_from_rfc3339(at)
                .map(|at| at.with_timezone(&tz))
                .map_err(|_| "`at` must be an RFC 3339 instant"),
            None => Ok(Utc::now().with_timezone(&tz)),
        }
    }
}

async fn handle_home(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HomeQuery>,
) -> Response {
    let now = match query.now(state.loader.timezone()) {
        Ok(now) => now,
        Err(message) => return (StatusCode::BAD_REQUEST, message).into_response(),
    };

    let home = settle(load(Arc::clone(&state.loader))).await;

    let status = match &home {
        HomeState::Error(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };

    (status, Json(HomeView::new(&home, now))).into_response()
}

async fn handle_calendar(State(state): State<Arc<AppState>>) -> Response {
    match state.loader.meetings().await {
        Ok(meetings) => (
            [(header::CONTENT_TYPE, "text/calendar")],
            meetings::to_ics(&state.calendar_name, &meetings).to_string(),
        )
            .into_response(),
        Err(err) => {
            log::warn!("Failed to build calendar: {err}");
            (StatusCode::BAD_GATEWAY, err.to_string()).into_response()
        }
    }
}

async fn handle_meetings(State(state): State<Arc<AppState>>) -> Response {
    match state.loader.meetings().await {
        Ok(meetings) => Json(meetings.as_ref()).into_response(),
        Err(err) => {
            log::warn!("Failed to republish meetings: {err}");
            (StatusCode::BAD_GATEWAY, err.to_string()).into_response()
        }
    }
}
