// File: src/app.rs
// Purpose: Routes and handlers wiring HTTP requests to per-visitor form controllers

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use onboard::{FieldChange, FieldName, FormController, SubmitOutcome, Submitter};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, error};
use uuid::Uuid;

use crate::theme::Theme;
use crate::view::{render_form, render_page, render_status};

/// Cookie naming the visitor's form session
pub const SESSION_COOKIE: &str = "onboard_session";

/// Sessions untouched for this long are dropped
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

type SharedController<S> = Arc<Mutex<FormController<Arc<S>>>>;

/// One mounted form
struct Session<S> {
    controller: SharedController<S>,
    last_seen: Instant,
}

/// Application state shared across handlers.
///
/// Each page load mounts a fresh controller under a new session id, and the
/// previous one of that visitor is unmounted. The per-session mutex serializes
/// events: a request holds its controller until its field change or
/// submission has run to completion.
pub struct AppState<S> {
    submitter: Arc<S>,
    sessions: Arc<Mutex<HashMap<Uuid, Session<S>>>>,
    idle_timeout: Duration,
    theme: Theme,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            submitter: self.submitter.clone(),
            sessions: self.sessions.clone(),
            idle_timeout: self.idle_timeout,
            theme: self.theme,
        }
    }
}

impl<S: Submitter + 'static> AppState<S> {
    pub fn new(submitter: S, theme: Theme) -> Self {
        Self {
            submitter: Arc::new(submitter),
            sessions: Arc::new(Mutex::new(HashMap::new())),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            theme,
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Mounts a new form, unmounting `previous` and any stale session
    async fn mount(&self, previous: Option<Uuid>) -> (Uuid, SharedController<S>) {
        let mut sessions = self.sessions.lock().await;
        if let Some(id) = previous {
            sessions.remove(&id);
        }

        let before = sessions.len();
        let idle_timeout = self.idle_timeout;
        sessions.retain(|_, session| session.last_seen.elapsed() < idle_timeout);
        if sessions.len() < before {
            debug!(evicted = before - sessions.len(), "stale form sessions dropped");
        }

        let id = Uuid::new_v4();
        let controller = Arc::new(Mutex::new(FormController::new(self.submitter.clone())));
        sessions.insert(
            id,
            Session {
                controller: controller.clone(),
                last_seen: Instant::now(),
            },
        );
        debug!(session = %id, live = sessions.len(), "form mounted");
        (id, controller)
    }

    /// The visitor's form. Mounts one when the cookie is missing, unknown or
    /// stale, and returns the new id so the response can set it.
    async fn session(&self, headers: &HeaderMap) -> (SharedController<S>, Option<Uuid>) {
        if let Some(id) = session_id(headers) {
            let mut sessions = self.sessions.lock().await;
            if let Some(session) = sessions.get_mut(&id) {
                if session.last_seen.elapsed() < self.idle_timeout {
                    session.last_seen = Instant::now();
                    return (session.controller.clone(), None);
                }
            }
        }

        let (id, controller) = self.mount(session_id(headers)).await;
        (controller, Some(id))
    }
}

pub fn router<S: Submitter + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/", get(index_handler::<S>))
        .route("/field", post(field_handler::<S>))
        .route("/submit", post(submit_handler::<S>))
        .route("/state", get(state_handler::<S>))
        .with_state(state)
}

/// Parse an application/x-www-form-urlencoded body
fn parse_urlencoded(body: &[u8]) -> HashMap<String, String> {
    let form_str = String::from_utf8_lossy(body);
    form_str
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(k), decode_component(v))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

/// Session id from the Cookie header, if present and well-formed
fn session_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|cookie| cookie.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| value.parse().ok())
}

fn with_session_cookie(mut response: Response, id: Option<Uuid>) -> Response {
    if let Some(id) = id {
        let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id);
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
    response
}

fn pick_theme(requested: Option<&String>, fallback: Theme) -> Theme {
    requested
        .and_then(|t| t.parse::<Theme>().ok())
        .unwrap_or(fallback)
}

/// Page load: always a fresh mount
async fn index_handler<S: Submitter + 'static>(
    State(state): State<AppState<S>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let theme = pick_theme(query.get("theme"), state.theme);
    let (id, controller) = state.mount(session_id(&headers)).await;
    let controller = controller.lock().await;
    let page = Html(render_page(theme, controller.state()).into_string());
    with_session_cookie(page.into_response(), Some(id))
}

/// One input event. The body names the field in `field` and carries the
/// input's own `name=value` pair; a checkbox is checked iff its pair is present.
async fn field_handler<S: Submitter + 'static>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let params = parse_urlencoded(&body);

    let Some(name) = params.get("field") else {
        return (StatusCode::BAD_REQUEST, "missing 'field' parameter").into_response();
    };
    let field: FieldName = match name.parse() {
        Ok(field) => field,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let change = FieldChange {
        field,
        value: params.get(field.as_str()).cloned().unwrap_or_default(),
        checked: params.contains_key(field.as_str()),
    };
    let theme = pick_theme(params.get("theme"), state.theme);

    let (controller, new_id) = state.session(&headers).await;
    let mut controller = controller.lock().await;
    let snapshot = controller.on_field_change(change);
    let fragment = Html(render_status(theme, snapshot).into_string());
    with_session_cookie(fragment.into_response(), new_id)
}

/// Submit event. Answers with the form fragment for HTMX, the whole page otherwise.
/// A failed submission renders exactly like an untouched form.
async fn submit_handler<S: Submitter + 'static>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let params = parse_urlencoded(&body);
    let theme = pick_theme(params.get("theme"), state.theme);

    let (controller, new_id) = state.session(&headers).await;
    let mut controller = controller.lock().await;
    let outcome = controller.submit().await;
    debug!(submitted = matches!(outcome, SubmitOutcome::Submitted(_)), "submit handled");

    let markup = if headers.contains_key("hx-request") {
        render_form(theme, controller.state())
    } else {
        render_page(theme, controller.state())
    };
    with_session_cookie(Html(markup.into_string()).into_response(), new_id)
}

/// Diagnostic snapshot of the visitor's form. The password never leaves the server.
async fn state_handler<S: Submitter + 'static>(State(state): State<AppState<S>>, headers: HeaderMap) -> Response {
    let (controller, new_id) = state.session(&headers).await;
    let controller = controller.lock().await;

    let mut snapshot = match serde_json::to_value(controller.state()) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!(error = %e, "failed to serialize form state");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    if let Some(fields) = snapshot.get_mut("fields").and_then(|f| f.as_object_mut()) {
        fields.remove(FieldName::Password.as_str());
    }

    with_session_cookie(Json(snapshot).into_response(), new_id)
}
