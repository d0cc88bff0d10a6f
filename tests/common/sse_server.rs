//! Local HTTP server that replays a fixed SSE body.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use futures::StreamExt;
use parking_lot::Mutex;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub const ANALYZE_PATH: &str = "/analyze";

#[derive(Clone)]
enum Reply {
    Stream {
        pieces: Vec<Vec<u8>>,
        interval: Duration,
    },
    Status { status: StatusCode, body: String },
}

#[derive(Clone)]
struct ServerState {
    reply: Reply,
    received: Arc<Mutex<Vec<serde_json::Value>>>,
}

pub struct SseServer {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<serde_json::Value>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    _handle: JoinHandle<()>,
}

impl SseServer {
    pub fn url(&self) -> String {
        format!("http://{}{}", self.addr, ANALYZE_PATH)
    }

    /// JSON bodies posted so far.
    pub fn received(&self) -> Vec<serde_json::Value> {
        self.received.lock().clone()
    }
}

impl Drop for SseServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn analyze(
    State(state): State<ServerState>,
    axum::Json(body): axum::Json<serde_json::Value>,
) -> Response {
    state.received.lock().push(body);

    match state.reply {
        Reply::Stream { pieces, interval } => {
            let stream = futures::stream::iter(pieces).then(move |piece| async move {
                if !interval.is_zero() {
                    tokio::time::sleep(interval).await;
                }
                Ok::<_, Infallible>(piece)
            });
            (
                [(header::CONTENT_TYPE, "text/event-stream")],
                Body::from_stream(stream),
            )
                .into_response()
        }
        Reply::Status { status, body } => (status, body).into_response(),
    }
}

async fn spawn(reply: Reply) -> std::io::Result<SseServer> {
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = ServerState {
        reply,
        received: Arc::clone(&received),
    };
    let app = Router::new()
        .route(ANALYZE_PATH, post(analyze))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    Ok(SseServer {
        addr,
        received,
        shutdown_tx: Some(shutdown_tx),
        _handle: handle,
    })
}

fn split(body: &str, piece_len: usize) -> Vec<Vec<u8>> {
    body.as_bytes()
        .chunks(piece_len.max(1))
        .map(<[u8]>::to_vec)
        .collect()
}

/// Serves `body` split into `piece_len`-byte pieces.
pub async fn spawn_sse_server(body: String, piece_len: usize) -> std::io::Result<SseServer> {
    spawn_paced_sse_server(body, piece_len, Duration::ZERO).await
}

/// Like [`spawn_sse_server`], sleeping `interval` before each piece.
pub async fn spawn_paced_sse_server(
    body: String,
    piece_len: usize,
    interval: Duration,
) -> std::io::Result<SseServer> {
    spawn(Reply::Stream {
        pieces: split(&body, piece_len),
        interval,
    })
    .await
}

pub async fn spawn_status_server(status: StatusCode, body: &str) -> std::io::Result<SseServer> {
    spawn(Reply::Status {
        status,
        body: body.to_string(),
    })
    .await
}

/// A local address nothing is listening on.
pub async fn unused_addr() -> std::io::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    listener.local_addr()
}
