use crate::ads::AdSlots;
use crate::config::Settings;
use crate::models::MediaType;
use crate::tmdb::{TmdbApi, TmdbClient};
use crate::view::page::{Page, Presented};
use crate::view::{self, NotFound};
use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub tmdb: Arc<dyn TmdbApi>,
    pub settings: Arc<Settings>,
    pub ads: AdSlots,
}

impl AppState {
    pub fn new(tmdb: Arc<dyn TmdbApi>, settings: Settings) -> Self {
        let ads = AdSlots::new(settings.ad_scripts.clone());
        Self {
            tmdb,
            settings: Arc::new(settings),
            ads,
        }
    }
}

pub async fn run_server(settings: Settings) -> Result<()> {
    let tmdb: Arc<dyn TmdbApi> = Arc::new(TmdbClient::new(
        &settings.api_base_url,
        &settings.api_key,
    )?);
    info!(
        "Catalog at {} for site '{}'",
        settings.api_base_url, settings.branding.site_name
    );
    let addr = settings.bind_addr;
    let app = build_router(AppState::new(tmdb, settings));

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/search/:query", get(search))
        .route("/genre/:media_type/:id", get(genre))
        .route("/watch/:media_type/:id", get(watch))
        .route("/details/:media_type/:id/:slug", get(media_detail_slugged))
        .route("/:media_type/category/:category", get(category))
        .route("/:media_type/:id", get(media_detail))
        .route("/:media_type/:id/:slug", get(media_detail_slugged))
        .fallback(fallback)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn home(State(state): State<AppState>) -> Response {
    let lease = state.ads.acquire("home");
    let view = view::build_home_view(state.tmdb.as_ref()).await;
    render(&state, &lease, Ok(view))
}

async fn media_detail(
    State(state): State<AppState>,
    Path((media_type, id)): Path<(String, String)>,
) -> Response {
    detail_page(&state, &media_type, &id).await
}

// The slug is cosmetic; lookup goes by id alone.
async fn media_detail_slugged(
    State(state): State<AppState>,
    Path((media_type, id, _slug)): Path<(String, String, String)>,
) -> Response {
    detail_page(&state, &media_type, &id).await
}

async fn detail_page(state: &AppState, media_type: &str, id: &str) -> Response {
    let lease = state.ads.acquire("detail");
    let result = match parse_media_type(media_type) {
        Ok(media_type) => view::build_media_view(state.tmdb.as_ref(), media_type, id).await,
        Err(e) => Err(e),
    };
    render(state, &lease, result)
}

async fn watch(
    State(state): State<AppState>,
    Path((media_type, id)): Path<(String, String)>,
) -> Response {
    let lease = state.ads.acquire("watch");
    let result = match parse_media_type(&media_type) {
        Ok(media_type) => {
            view::build_watch_view(
                state.tmdb.as_ref(),
                &state.settings.embed_templates,
                media_type,
                &id,
            )
            .await
        }
        Err(e) => Err(e),
    };
    render(&state, &lease, result)
}

async fn category(
    State(state): State<AppState>,
    Path((media_type, category)): Path<(String, String)>,
) -> Response {
    let lease = state.ads.acquire("category");
    let result = match MediaType::from_category_route(&media_type) {
        Ok(media_type) => {
            view::build_category_view(state.tmdb.as_ref(), media_type, &category).await
        }
        Err(e) => Err(NotFound::new(e.to_string())),
    };
    render(&state, &lease, result)
}

async fn genre(
    State(state): State<AppState>,
    Path((media_type, id)): Path<(String, String)>,
) -> Response {
    let lease = state.ads.acquire("genre");
    let result = match parse_media_type(&media_type) {
        Ok(media_type) => view::build_genre_view(state.tmdb.as_ref(), media_type, &id).await,
        Err(e) => Err(e),
    };
    render(&state, &lease, result)
}

async fn search(State(state): State<AppState>, Path(query): Path<String>) -> Response {
    let lease = state.ads.acquire("search");
    let result = view::build_search_view(state.tmdb.as_ref(), &query).await;
    render(&state, &lease, result)
}

async fn fallback(State(state): State<AppState>) -> Response {
    not_found(&state, &NotFound::new("route"))
}

fn parse_media_type(raw: &str) -> Result<MediaType, NotFound> {
    raw.parse::<MediaType>()
        .map_err(|e| NotFound::new(e.to_string()))
}

fn render<T>(state: &AppState, lease: &crate::ads::AdLease, result: Result<T, NotFound>) -> Response
where
    T: Presented + Serialize,
{
    match result {
        Ok(view) => {
            let page = Page::new(view, &state.settings.branding, lease);
            (StatusCode::OK, Json(page)).into_response()
        }
        Err(e) => not_found(state, &e),
    }
}

fn not_found(state: &AppState, err: &NotFound) -> Response {
    warn!("Responding 404: {}", err);
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "status": "error",
            "message": state.settings.branding.not_found,
        })),
    )
        .into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        term.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Shutdown signal received (Ctrl+C)");
        }
        _ = terminate => {
            info!("Shutdown signal received (SIGTERM)");
        }
    }
}
