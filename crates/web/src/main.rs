use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Redirect},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bedin_core::domain::day::{DayCategory, DayInfo};
use bedin_core::horoscope::orchestrator::HoroscopeService;
use bedin_core::horoscope::state::{RequestState, Session};
use bedin_core::llm::gemini::GeminiClient;

mod page;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = bedin_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    if settings.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY missing; horoscope requests will fail until it is set");
    }

    if let Err(e) = serve().await {
        sentry_anyhow::capture_anyhow(&e);
        tracing::error!(error = %e, "web server stopped");
        return Err(e);
    }
    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    let gemini = GeminiClient::from_env()?;
    tracing::info!(model = gemini.model(), "using Gemini");

    let session = Session::new(HoroscopeService::new(Arc::new(gemini)));
    let app = router(AppState { session });

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "web listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/select/:day", post(select_form))
        .route("/horoscope", post(submit_form))
        .route("/healthz", get(healthz))
        .route("/api/days", get(list_days))
        .route("/api/state", get(get_state))
        .route("/api/select", post(select_day))
        .route("/api/horoscope", post(submit))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

/// The page is single-user: one selection and one outcome per process.
#[derive(Clone)]
struct AppState {
    session: Session,
}

#[derive(Debug, Deserialize)]
struct SelectBody {
    day: String,
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(page::render(&state.session.snapshot().await))
}

async fn select_form(
    State(state): State<AppState>,
    Path(day): Path<String>,
) -> Result<Redirect, StatusCode> {
    let day = parse_day(&day)?;
    state.session.select(day).await;
    Ok(Redirect::to("/"))
}

async fn submit_form(State(state): State<AppState>) -> Redirect {
    state.session.submit().await;
    Redirect::to("/")
}

async fn list_days() -> Json<Vec<DayInfo>> {
    Json(DayCategory::ALL.into_iter().map(DayInfo::from).collect())
}

async fn get_state(State(state): State<AppState>) -> Json<RequestState> {
    Json(state.session.snapshot().await)
}

async fn select_day(
    State(state): State<AppState>,
    Json(body): Json<SelectBody>,
) -> Result<Json<RequestState>, StatusCode> {
    let day = parse_day(&body.day)?;
    state.session.select(day).await;
    Ok(Json(state.session.snapshot().await))
}

async fn submit(State(state): State<AppState>) -> Json<RequestState> {
    Json(state.session.submit().await)
}

fn parse_day(id: &str) -> Result<DayCategory, StatusCode> {
    id.parse::<DayCategory>().map_err(|e| {
        tracing::debug!(error = %e, "rejected day id");
        StatusCode::BAD_REQUEST
    })
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &bedin_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
