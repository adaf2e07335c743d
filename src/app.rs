use crate::config::{Config, Transport};
use crate::mcp;
use crate::tools::Toolbox;
use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

const MAX_BODY_BYTES: usize = 1024 * 1024; // 1MB safety cap

#[derive(Clone)]
pub struct AppState {
    pub toolbox: Toolbox,
}

pub async fn run(config: &Config, toolbox: Toolbox) -> Result<()> {
    match config.transport {
        Transport::Stdio => run_stdio(toolbox).await,
        Transport::Http => run_http(toolbox, config.bind_addr).await,
    }
}

/// Newline-delimited JSON-RPC over stdin/stdout until EOF or a shutdown signal.
pub async fn run_stdio(toolbox: Toolbox) -> Result<()> {
    info!("Serving MCP over stdio");
    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();
    tokio::select! {
        result = serve_lines(&toolbox, reader, writer) => result,
        _ = shutdown_signal() => Ok(()),
    }
}

/// One request per line in, one response per line out. Notifications produce no line.
pub async fn serve_lines<R, W>(toolbox: &Toolbox, mut reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .await
            .context("failed to read request line")?;
        if read == 0 {
            break;
        }
        let response = match std::str::from_utf8(&buf) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => mcp::handle_message(toolbox, line.trim_end()).await,
            Err(e) => {
                warn!("Request line is not valid UTF-8: {}", e);
                Some(mcp::parse_error())
            }
        };
        let Some(response) = response else {
            continue;
        };
        let mut out = serde_json::to_vec(&response)?;
        out.push(b'\n');
        writer.write_all(&out).await?;
        writer.flush().await?;
    }
    debug!("Input closed");
    Ok(())
}

pub async fn run_http(toolbox: Toolbox, addr: SocketAddr) -> Result<()> {
    let app = build_router(AppState { toolbox });

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/mcp", post(handle_mcp))
        .route("/health", get(health))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn handle_mcp(State(state): State<AppState>, body: String) -> Response {
    match mcp::handle_message(&state.toolbox, &body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
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
