use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::export::html::render_html;
use crate::export::model::GraphExport;

/// Shared, read-only state: the graph of one finished trace.
#[derive(Clone)]
pub struct WebState {
    pub export: Arc<GraphExport>,
}

/// Routes:
/// - `GET /`: the force-graph page with the graph embedded
/// - `GET /api/graph`: the raw `{"nodes", "links"}` document
pub fn build_router(export: GraphExport) -> Router {
    let state = WebState {
        export: Arc::new(export),
    };

    Router::new()
        .route("/", get(index))
        .route("/api/graph", get(graph))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(export: GraphExport, addr: SocketAddr) -> Result<()> {
    let app = build_router(export);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("serving import graph on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}

async fn index(State(state): State<WebState>) -> impl IntoResponse {
    match render_html(&state.export) {
        Ok(page) => Html(page).into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

async fn graph(State(state): State<WebState>) -> impl IntoResponse {
    Json(state.export.as_ref().clone())
}
