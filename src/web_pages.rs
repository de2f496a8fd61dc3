use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, patch, post},
};
use serde::{Deserialize, Serialize};

use crate::{
    controller::{FormState, IgnoreReason, MAX_ATTEMPTS, SubmitOutcome},
    image_service::ImageGenerator,
    params::{FormField, FormOptions, GenerationParams},
    sessions::{Session, SessionRegistry},
};

const HOME_HTML: &str = include_str!("../templates/home.html");
const GENERATE_HTML: &str = include_str!("../templates/generate.html");

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Session state as the form page sees it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateView {
    #[serde(flatten)]
    pub params: GenerationParams,
    pub images: Vec<String>,
    pub busy: bool,
    pub attempts: u32,
    pub attempts_remaining: u32,
    pub max_attempts: u32,
    pub can_submit: bool,
}

impl From<FormState> for StateView {
    fn from(state: FormState) -> Self {
        Self {
            attempts_remaining: state.attempts_remaining(),
            can_submit: state.can_submit(),
            max_attempts: MAX_ATTEMPTS,
            busy: state.busy,
            attempts: state.attempts,
            images: state.images,
            params: state.params,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    id: String,
    created_at: String,
    state: StateView,
}

#[derive(Deserialize)]
struct FieldUpdate {
    field: FormField,
    value: String,
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum SubmitStatus {
    Completed,
    Failed,
    Ignored,
}

#[derive(Serialize)]
struct SubmitResponse {
    status: SubmitStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<IgnoreReason>,
    state: StateView,
}

fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorResponse { error: message.to_string() })).into_response()
}

fn session_not_found(id: &str) -> Response {
    json_error(StatusCode::NOT_FOUND, &format!("session {id} not found"))
}

pub fn router<G>(registry: Arc<SessionRegistry<G>>) -> Router
where
    G: ImageGenerator + Clone + 'static,
{
    Router::new()
        .route("/", get(home_page))
        .route("/generate", get(generate_page))
        .route("/health", get(health_check))
        .route("/api/options", get(form_options))
        .route("/api/sessions", post(create_session::<G>))
        .route("/api/sessions/{id}", get(session_state::<G>))
        .route("/api/sessions/{id}/fields", patch(update_field::<G>))
        .route("/api/sessions/{id}/generate", post(submit::<G>))
        .with_state(registry)
}

pub async fn home_page() -> Html<&'static str> {
    Html(HOME_HTML)
}

pub async fn generate_page() -> Html<&'static str> {
    Html(GENERATE_HTML)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn form_options() -> Json<FormOptions> {
    Json(FormOptions::new())
}

fn session_response<G: ImageGenerator>(session: &Session<G>) -> SessionResponse {
    SessionResponse {
        id: session.id.clone(),
        created_at: session.created_at.to_rfc3339(),
        state: session.controller.snapshot().into(),
    }
}

async fn create_session<G>(State(registry): State<Arc<SessionRegistry<G>>>) -> Response
where
    G: ImageGenerator + Clone + 'static,
{
    let session = registry.create();
    (StatusCode::CREATED, Json(session_response(&session))).into_response()
}

async fn session_state<G>(
    State(registry): State<Arc<SessionRegistry<G>>>,
    Path(id): Path<String>,
) -> Response
where
    G: ImageGenerator + Clone + 'static,
{
    match registry.get(&id) {
        Some(session) => Json(session_response(&session)).into_response(),
        None => session_not_found(&id),
    }
}

async fn update_field<G>(
    State(registry): State<Arc<SessionRegistry<G>>>,
    Path(id): Path<String>,
    Json(update): Json<FieldUpdate>,
) -> Response
where
    G: ImageGenerator + Clone + 'static,
{
    let Some(session) = registry.get(&id) else {
        return session_not_found(&id);
    };
    session.controller.update_field(update.field, update.value);
    Json(StateView::from(session.controller.snapshot())).into_response()
}

async fn submit<G>(
    State(registry): State<Arc<SessionRegistry<G>>>,
    Path(id): Path<String>,
) -> Response
where
    G: ImageGenerator + Clone + 'static,
{
    let Some(session) = registry.get(&id) else {
        return session_not_found(&id);
    };
    let (status, reason) = match session.controller.submit().await {
        SubmitOutcome::Completed => (SubmitStatus::Completed, None),
        SubmitOutcome::Failed => (SubmitStatus::Failed, None),
        SubmitOutcome::Ignored(reason) => (SubmitStatus::Ignored, Some(reason)),
    };
    let state = session.controller.snapshot().into();
    Json(SubmitResponse { status, reason, state }).into_response()
}
