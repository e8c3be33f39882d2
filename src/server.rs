use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Form, Query, State},
    http::StatusCode,
    response::{Html, Json},
    routing::{get, post},
    Router,
};
use log::{debug, info};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;

use crate::app::App;
use crate::client::JsonFetcher;
use crate::model::Period;
use crate::ui;

/// Shared state for all handlers
#[derive(Clone)]
pub struct ServerState {
    pub session: Arc<RwLock<App>>,
    pub fetcher: Arc<dyn JsonFetcher>,
    /// Origin used when building share links
    pub public_url: String,
}

impl ServerState {
    pub fn new(app: App, fetcher: Arc<dyn JsonFetcher>, public_url: impl Into<String>) -> Self {
        Self {
            session: Arc::new(RwLock::new(app)),
            fetcher,
            public_url: public_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ViewQuery {
    #[serde(default)]
    fragment: String,
}

#[derive(Debug, Deserialize)]
struct BaseUrlForm {
    #[serde(default)]
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SubmitForm {
    #[serde(default)]
    address: String,
}

#[derive(Debug, Deserialize)]
struct OptionsForm {
    base_url: Option<String>,
    period: Option<String>,
    positions: Option<String>,
    closed: Option<String>,
}

fn flag(raw: &str) -> bool {
    matches!(raw, "1" | "true" | "on")
}

fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Build the dashboard router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/view", get(view_handler))
        .route("/landing/base-url", post(landing_base_url_handler))
        .route("/landing/reset", post(landing_reset_handler))
        .route("/landing/submit", post(landing_submit_handler))
        .route("/dashboard/options", post(dashboard_options_handler))
        .route("/dashboard/run", post(dashboard_run_handler))
        .route("/api/state", get(state_handler))
        .with_state(state)
}

/// Start the dashboard server, returning when ctrl-c is received
pub async fn start_server(state: ServerState, host: &str, port: u16) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    let addr: SocketAddr = listener.local_addr()?;

    info!("Dashboard server running on http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down dashboard server");
        })
        .await
}

async fn render(state: &ServerState) -> Html<String> {
    let app = state.session.read().await;
    Html(ui::render_view(&app, &state.public_url, now_secs()))
}

async fn index_handler() -> Html<String> {
    Html(ui::page_shell())
}

async fn view_handler(
    State(state): State<ServerState>,
    Query(query): Query<ViewQuery>,
) -> Html<String> {
    state.session.write().await.navigate(&query.fragment);
    render(&state).await
}

async fn landing_base_url_handler(
    State(state): State<ServerState>,
    Form(form): Form<BaseUrlForm>,
) -> StatusCode {
    let mut app = state.session.write().await;
    match app.landing_mut() {
        Some(view) => {
            view.set_base_url(form.base_url);
            StatusCode::NO_CONTENT
        }
        None => StatusCode::CONFLICT,
    }
}

async fn landing_reset_handler(State(state): State<ServerState>) -> Html<String> {
    if let Some(view) = state.session.write().await.landing_mut() {
        view.reset_base_url();
    }
    render(&state).await
}

async fn landing_submit_handler(
    State(state): State<ServerState>,
    Form(form): Form<SubmitForm>,
) -> Json<serde_json::Value> {
    let mut app = state.session.write().await;
    let fragment = app.landing_mut().and_then(|view| {
        view.set_address(form.address);
        view.submit().map(|route| route.to_fragment())
    });
    Json(json!({ "fragment": fragment }))
}

async fn dashboard_options_handler(
    State(state): State<ServerState>,
    Form(form): Form<OptionsForm>,
) -> Html<String> {
    if let Some(view) = state.session.write().await.dashboard_mut() {
        if let Some(base_url) = form.base_url.filter(|b| b != view.base_url()) {
            view.set_base_url(base_url);
        }
        if let Some(period) = form.period.and_then(|p| p.parse::<Period>().ok()) {
            if period != view.period() {
                view.set_period(period);
            }
        }
        if let Some(positions) = form.positions {
            view.set_show_positions(flag(&positions));
        }
        if let Some(closed) = form.closed {
            view.set_show_closed(flag(&closed));
        }
    }
    render(&state).await
}

async fn dashboard_run_handler(State(state): State<ServerState>) -> Html<String> {
    // The lock is not held while the request is in flight
    let ticket = state.session.write().await.begin_run(now_secs());

    if let Some(ticket) = ticket {
        let fetch = ticket.fetch();
        let result = state
            .fetcher
            .fetch_json(fetch.url(), fetch.options())
            .await;
        let applied = state.session.write().await.complete_run(&ticket, result);
        debug!("Run #{} applied: {}", fetch.generation(), applied);
    }

    render(&state).await
}

async fn state_handler(State(state): State<ServerState>) -> Json<serde_json::Value> {
    let app = state.session.read().await;
    Json(serde_json::to_value(app.snapshot()).unwrap_or_default())
}
