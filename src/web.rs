use crate::{
    batch::{self, BatchError, BatchResponse},
    config::Config,
};
use anyhow::Context;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
struct SharedState {
    config: Arc<Config>,
}

pub fn router(config: Arc<Config>) -> Router {
    let shared_state = Arc::new(SharedState { config });

    Router::new()
        .route("/", get(root))
        .route("/scrape", post(scrape))
        .layer(CorsLayer::very_permissive())
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(
                    tower_http::trace::DefaultMakeSpan::new().level(tracing::Level::INFO),
                )
                .on_response(
                    tower_http::trace::DefaultOnResponse::new().level(tracing::Level::INFO),
                ),
        )
        .with_state(shared_state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            log::error!("failed to install Ctrl+C handler: {err}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => log::error!("failed to install signal handler: {err}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    log::warn!("shutting down");
}

async fn start_app(config: Arc<Config>) -> anyhow::Result<()> {
    let listen = config.listen.clone();
    let app = router(config);

    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .with_context(|| format!("failed to bind {listen}"))?;
    log::info!("listening on {listen}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

pub fn start_daemon(config: Config) -> anyhow::Result<()> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?
        .block_on(start_app(Arc::new(config)))
}

#[derive(Debug)]
struct HttpError(BatchError);

// Missing input is reported in the body of a 200.
impl IntoResponse for HttpError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.0 {
            BatchError::MissingInput => axum::http::StatusCode::OK,
            BatchError::Transport(_) => {
                log::error!("{:?}", self.0);
                axum::http::StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({"error": self.0.to_string()}))).into_response()
    }
}

impl From<BatchError> for HttpError {
    fn from(err: BatchError) -> Self {
        Self(err)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ScrapeRequest {
    #[serde(default)]
    pub urls: Option<Vec<String>>,
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({"message": "Hello World"}))
}

async fn scrape(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<ScrapeRequest>,
) -> Result<Json<BatchResponse>, HttpError> {
    log::debug!("payload: {payload:?}");

    let config = state.config.clone();

    // fetching is blocking
    tokio::task::block_in_place(move || batch::run(payload.urls, &config.scrape))
        .map(Json)
        .map_err(Into::into)
}
