//! Mock search API server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves:
//! - `GET /` - liveness document used by the connectivity probe
//! - `GET /search?q=` - keyword scoring over a fixed five-document corpus
//! - `GET /broken/search` - 200 with an HTML body
//! - `GET /down/search` - always 500 (its base path `/down` is healthy)
//!
//! Every `/search`-style request is recorded with its `q` parameter and
//! headers so tests can assert on what the collector sent.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

const STOP_WORDS: &[&str] = &["the", "is", "at", "which", "on", "a", "an", "and", "or", "but"];

struct Document {
    id: i64,
    title: &'static str,
    content: &'static str,
}

const DOCUMENTS: &[Document] = &[
    Document {
        id: 1,
        title: "Introduction to Python",
        content: "Python is a great programming language",
    },
    Document {
        id: 2,
        title: "Python for Beginners",
        content: "Learn Python programming basics",
    },
    Document {
        id: 3,
        title: "Advanced Python",
        content: "Advanced concepts in Python programming",
    },
    Document {
        id: 4,
        title: "Web Development",
        content: "Building web applications with Python",
    },
    Document {
        id: 5,
        title: "Data Science",
        content: "Data analysis using Python libraries",
    },
];

/// One request as seen by the server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: &'static str,
    pub query: Option<String>,
    pub user_agent: Option<String>,
    pub accept: Option<String>,
}

#[derive(Default)]
struct ApiState {
    requests: Vec<RecordedRequest>,
}

type SharedState = Arc<Mutex<ApiState>>;

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

/// Handle to the running mock search API.
pub struct MockSearchApi {
    addr: SocketAddr,
    state: SharedState,
}

impl MockSearchApi {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state: SharedState = Arc::new(Mutex::new(ApiState::default()));

        let app = Router::new()
            .route("/", get(root))
            .route("/search", get(search))
            .route("/broken", get(root))
            .route("/broken/search", get(broken_search))
            .route("/down", get(root))
            .route("/down/search", get(down_search))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the task a moment to register.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        Ok(Self { addr, state })
    }

    /// Base URL (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// The healthy search endpoint.
    pub fn search_url(&self) -> String {
        format!("{}/search", self.base_url())
    }

    pub fn broken_url(&self) -> String {
        format!("{}/broken/search", self.base_url())
    }

    pub fn down_url(&self) -> String {
        format!("{}/down/search", self.base_url())
    }

    /// Search-style requests received so far.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().await.requests.clone()
    }
}

async fn record(
    state: &SharedState,
    path: &'static str,
    query: Option<String>,
    headers: &HeaderMap,
) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.lock().await.requests.push(RecordedRequest {
        path,
        query,
        user_agent: header("user-agent"),
        accept: header("accept"),
    });
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn root() -> impl IntoResponse {
    Json(json!({"status": "ok", "message": "Mock Search Server is running"}))
}

async fn search(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
    headers: HeaderMap,
) -> impl IntoResponse {
    record(&state, "/search", params.q.clone(), &headers).await;
    match params.q.as_deref() {
        None | Some("") => Json(Vec::new()),
        Some(q) => Json(search_documents(q)),
    }
}

async fn broken_search(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
    headers: HeaderMap,
) -> impl IntoResponse {
    record(&state, "/broken/search", params.q, &headers).await;
    (StatusCode::OK, "<html><body>maintenance</body></html>")
}

async fn down_search(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
    headers: HeaderMap,
) -> impl IntoResponse {
    record(&state, "/down/search", params.q, &headers).await;
    (StatusCode::INTERNAL_SERVER_ERROR, "index offline")
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Keyword scoring: whole-query containment, per-term containment, a
/// one-edit fuzzy bonus. Scores below 1.0 are labelled `fuzzy`.
pub fn search_documents(query: &str) -> Vec<Value> {
    let query: String = query
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    let terms: Vec<&str> = query
        .split_whitespace()
        .filter(|t| !STOP_WORDS.contains(t))
        .collect();

    let mut results: Vec<(f64, Value)> = Vec::new();
    for doc in DOCUMENTS {
        let title = doc.title.to_lowercase();
        let content = doc.content.to_lowercase();
        let searchable = format!("{} {}", title, content);
        let mut score = 0.0;

        if title.contains(&query) {
            score += 2.0;
        }
        if content.contains(&query) {
            score += 1.0;
        }
        for term in &terms {
            if title.contains(term) {
                score += 0.7;
            }
            if content.contains(term) {
                score += 0.3;
            }
        }
        if terms.iter().any(|t| fuzzy_match(t, &searchable)) {
            score += 0.3;
        }

        if score > 0.0 {
            let score = (score * 100.0_f64).round() / 100.0;
            results.push((
                score,
                json!({
                    "id": doc.id,
                    "title": doc.title,
                    "score": score,
                    "matched": if score < 1.0 { "fuzzy" } else { "exact" },
                    "publication_date": "",
                    "popularity": {},
                }),
            ));
        }
    }

    results.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    results.into_iter().take(20).map(|(_, v)| v).collect()
}

fn fuzzy_match(term: &str, content: &str) -> bool {
    content.split_whitespace().any(|word| {
        let length_gap = (word.chars().count() as i64 - term.chars().count() as i64).abs();
        let mismatches = term.chars().zip(word.chars()).filter(|(a, b)| a != b).count();
        length_gap <= 1 && mismatches <= 1
    })
}
