//! In-process stand-in for the product server (and a deployed site's proxy route).

#![allow(dead_code)]

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::{net::TcpListener, sync::oneshot};

/// Behavior of the stub server
#[derive(Debug, Clone)]
pub struct StubConfig {
    /// Status of `/`, standing in for a deployed site's landing page
    pub root_status: u16,
    pub health_status: u16,
    pub products_status: u16,
    pub sites_status: u16,
    /// `count` field of /products; omitted when None
    pub count: Option<u64>,
    pub products: Vec<Value>,
    pub sites: Vec<String>,
    /// Delay every /products call whose zero-based index is >= the first value
    pub products_delay: Option<(usize, Duration)>,
}

impl StubConfig {
    /// Healthy server with `n` products from amazon and cabelas
    pub fn healthy(n: usize) -> Self {
        Self {
            root_status: 200,
            health_status: 200,
            products_status: 200,
            sites_status: 200,
            count: Some(n as u64),
            products: sample_products(n),
            sites: vec!["amazon".to_string(), "cabelas".to_string()],
            products_delay: None,
        }
    }
}

pub fn sample_products(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            let source = if i % 2 == 0 { "amazon" } else { "cabelas" };
            json!({
                "id": format!("p-{i}"),
                "name": format!("Trail Product {i}"),
                "description": "Built for long days outside",
                "price": format!("${}.99", 20 + i),
                "image_url": format!("https://img.example.com/{i}.jpg"),
                "affiliate_url": format!("https://shop.example.com/{i}"),
                "rating": 4.5,
                "review_count": 10 + i,
                "category": "hiking-gear",
                "source": source
            })
        })
        .collect()
}

struct StubState {
    config: StubConfig,
    product_calls: AtomicUsize,
}

pub struct StubServer {
    url: String,
    state: Arc<StubState>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<()>,
}

impl StubServer {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn product_calls(&self) -> usize {
        self.state.product_calls.load(Ordering::SeqCst)
    }

    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = self.handle.await;
    }
}

pub async fn start_stub(config: StubConfig) -> StubServer {
    let state = Arc::new(StubState {
        config,
        product_calls: AtomicUsize::new(0),
    });

    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/products", get(products))
        .route("/sites", get(sites))
        .route("/api/products", get(proxy_products))
        .with_state(Arc::clone(&state));

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub server");
    let addr = listener.local_addr().expect("stub address");
    let url = format!("http://{addr}");

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let handle = tokio::spawn(async move {
        let server = axum::serve(listener, app).with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        });
        if let Err(err) = server.await {
            eprintln!("stub server error: {err}");
        }
    });

    StubServer {
        url,
        state,
        shutdown: Some(shutdown_tx),
        handle,
    }
}

/// URL on which nothing is listening
pub async fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("address");
    drop(listener);
    format!("http://{addr}")
}

/// Bundled niche configuration directory
pub fn niche_config_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config")
}

async fn root(State(state): State<Arc<StubState>>) -> (StatusCode, &'static str) {
    (status_code(state.config.root_status), "ok")
}

async fn health(State(state): State<Arc<StubState>>) -> (StatusCode, Json<Value>) {
    let status = status_code(state.config.health_status);
    let label = if status.is_success() { "ok" } else { "down" };
    (status, Json(json!({ "status": label })))
}

fn status_code(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

async fn products(State(state): State<Arc<StubState>>) -> (StatusCode, Json<Value>) {
    let call = state.product_calls.fetch_add(1, Ordering::SeqCst);
    if let Some((from, delay)) = state.config.products_delay {
        if call >= from {
            tokio::time::sleep(delay).await;
        }
    }

    let status = status_code(state.config.products_status);
    if !status.is_success() {
        return (status, Json(json!({ "error": "products unavailable" })));
    }

    let mut body = json!({ "products": state.config.products });
    if let Some(count) = state.config.count {
        body["count"] = json!(count);
    }
    (status, Json(body))
}

async fn sites(State(state): State<Arc<StubState>>) -> (StatusCode, Json<Value>) {
    let status = status_code(state.config.sites_status);
    if !status.is_success() {
        return (status, Json(json!({ "error": "sites unavailable" })));
    }
    (status, Json(json!({ "sites": state.config.sites })))
}

async fn proxy_products(State(state): State<Arc<StubState>>) -> Json<Value> {
    Json(json!({
        "count": state.config.products.len(),
        "products": state.config.products,
        "source": "live-api"
    }))
}
