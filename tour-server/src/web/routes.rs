//! HTTP route handlers.

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tower_http::services::ServeDir;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{Coordinate, DomainError, Mood, PlaceKind, Tour};
use crate::planner::{TourRequest, plan_tour};
use crate::session::SessionError;

use super::dto::*;
use super::state::{AppState, SharedSession};
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/kinds", get(list_kinds))
        .route("/tour/plan", post(plan))
        .route("/session", post(create_session))
        .route("/session/:id", get(get_session))
        .route("/session/:id/location", post(share_location))
        .route("/session/:id/mood", post(choose_mood))
        .route("/session/:id/kinds/:kind", post(toggle_kind))
        .route("/session/:id/build", post(build_tour))
        .route("/session/:id/new-route", post(new_route))
        .route("/session/:id/change-location", post(change_location))
        .route("/session/:id/cancel", post(cancel))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the planning form.
async fn index_page() -> impl IntoResponse {
    Html(
        IndexTemplate::new()
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Every kind of place a tour can include.
async fn list_kinds() -> Json<KindsResponse> {
    Json(KindsResponse {
        kinds: PlaceKind::ALL.into_iter().map(KindResult::from_kind).collect(),
    })
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Parse a JSON body, reporting failures as bad requests.
fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(body), "invalid JSON body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

async fn run_planner(state: &AppState, request: &TourRequest) -> Tour {
    plan_tour(
        request,
        state.places.as_ref(),
        state.oracle.as_ref(),
        &state.config,
    )
    .await
}

fn tour_fragment(tour: &Tour, start: Coordinate) -> Result<Response, AppError> {
    let template = TourResultsTemplate {
        tour: TourView::from_tour(tour, start),
    };
    let html = template.render()?;
    Ok(Html(html).into_response())
}

/// Plan a tour in one request.
async fn plan(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let req: PlanTourRequest = parse_json(&body)?;
    let request = req.into_tour_request()?;
    if request.kinds.is_empty() {
        return Err(SessionError::NoKindsSelected.into());
    }

    let tour = run_planner(&state, &request).await;

    // Return HTML or JSON based on Accept header
    if accepts_html(&headers) {
        tour_fragment(&tour, request.start)
    } else {
        Ok(Json(TourResponse::from_tour(&tour, request.start)).into_response())
    }
}

async fn find_session(state: &AppState, id: Uuid) -> Result<SharedSession, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound {
            message: format!("Session {id} not found or expired"),
        })
}

/// Start a planning session.
async fn create_session(State(state): State<AppState>) -> Response {
    let (id, session) = state.sessions.create().await;
    info!(session = %id, "session started");
    let snapshot = SessionResponse::from_session(id, &*session.lock().await);
    (StatusCode::CREATED, Json(snapshot)).into_response()
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = find_session(&state, id).await?;
    let session = session.lock().await;
    Ok(Json(SessionResponse::from_session(id, &session)))
}

async fn share_location(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<SessionResponse>, AppError> {
    let req: LocationRequest = parse_json(&body)?;
    let location = Coordinate::new(req.lat, req.lng).map_err(DomainError::from)?;

    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    session.share_location(location)?;
    Ok(Json(SessionResponse::from_session(id, &session)))
}

async fn choose_mood(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<SessionResponse>, AppError> {
    let req: MoodRequest = parse_json(&body)?;
    let mood: Mood = req.mood.parse()?;

    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    session.choose_mood(mood)?;
    Ok(Json(SessionResponse::from_session(id, &session)))
}

async fn toggle_kind(
    State(state): State<AppState>,
    Path((id, kind)): Path<(Uuid, String)>,
) -> Result<Json<SessionResponse>, AppError> {
    let kind: PlaceKind = kind.parse()?;

    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    session.toggle_kind(kind)?;
    Ok(Json(SessionResponse::from_session(id, &session)))
}

/// Plan a tour from the session's selections and show it.
async fn build_tour(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;

    let request = session.build_request()?;
    let tour = run_planner(&state, &request).await;

    let fragment = if accepts_html(&headers) {
        Some(tour_fragment(&tour, request.start)?)
    } else {
        None
    };

    session.show_tour(tour)?;

    match fragment {
        Some(html) => Ok(html),
        None => Ok(Json(SessionResponse::from_session(id, &session)).into_response()),
    }
}

async fn new_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    session.new_route()?;
    Ok(Json(SessionResponse::from_session(id, &session)))
}

async fn change_location(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    session.change_location()?;
    Ok(Json(SessionResponse::from_session(id, &session)))
}

async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;
    session.cancel();
    Ok(Json(SessionResponse::from_session(id, &session)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Internal {
            message: format!("Template error: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
