use std::sync::Arc;

use askama::Template;
use askama_web::WebTemplate;
use axum::body::Body;
use axum::http::header;
use axum::response::Response;
use axum::{extract::FromRef, http::StatusCode, routing::get, Router};
use prometheus::{Encoder, TextEncoder};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::routes::{question_check_router, ApiResponse};
use crate::configuration::ApplicationSettings;
use crate::questions::QuestionSource;
use crate::view::{Diagnostics, ModalSurface, QuestionCheck};

#[derive(FromRef, Clone)]
pub struct AppState {
    pub view: QuestionCheck,
    pub modal: Arc<ModalSurface>,
}

impl AppState {
    pub fn new(source: Arc<dyn QuestionSource>, diagnostics: Arc<dyn Diagnostics>) -> Self {
        let modal = Arc::new(ModalSurface::default());
        let view = QuestionCheck::new(source, diagnostics, modal.clone());
        Self { view, modal }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/metrics", get(metrics))
        .merge(question_check_router(state))
        .fallback(|| async {
            tracing::info!("Fallback");
            StatusCode::NOT_FOUND
        })
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(settings: &ApplicationSettings, state: AppState) -> anyhow::Result<()> {
    let addr = settings.address();
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Serving on {addr}");
    axum::serve(listener, app(state)).await?;
    Ok(())
}

async fn index() -> IndexPage {
    IndexPage
}

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
struct IndexPage;

async fn metrics() -> ApiResponse<Response> {
    let encoder = TextEncoder::new();
    let metrics = prometheus::gather();
    let mut buf = vec![];
    encoder.encode(&metrics, &mut buf)?;
    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, encoder.format_type())
        .body(Body::from(buf))?)
}
