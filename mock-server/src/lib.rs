//! Plain HTTP server the client is exercised against.
//!
//! Every route answers with a small, predictable body so tests can compare
//! what the raw client decodes with what was served.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tokio::{net::TcpListener, sync::RwLock};

pub type Notes = Arc<RwLock<BTreeMap<String, String>>>;

pub fn app() -> Router {
    let notes: Notes = Arc::new(RwLock::new(BTreeMap::new()));
    Router::new()
        .route("/hello", get(hello))
        .route("/items/{id}", get(get_item))
        .route("/status/{code}", get(status))
        .route("/form", post(echo_form))
        .route("/notes", get(list_notes).post(add_notes))
        .route("/notes/{key}", get(get_note))
        .with_state(notes)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn hello() -> &'static str {
    "hello, wörld"
}

async fn get_item(Path(id): Path<String>) -> String {
    format!("item {id}")
}

async fn status(Path(code): Path<u16>) -> (StatusCode, String) {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
    (status, format!("status {}", status.as_u16()))
}

/// Answers with the submitted fields, in order, as a JSON array of pairs.
async fn echo_form(Form(fields): Form<Vec<(String, String)>>) -> Json<Vec<(String, String)>> {
    Json(fields)
}

async fn list_notes(State(notes): State<Notes>) -> Json<BTreeMap<String, String>> {
    Json(notes.read().await.clone())
}

async fn add_notes(
    State(notes): State<Notes>,
    Form(fields): Form<Vec<(String, String)>>,
) -> (StatusCode, String) {
    let mut notes = notes.write().await;
    let added = fields.len();
    notes.extend(fields);
    (StatusCode::CREATED, format!("added {added}"))
}

async fn get_note(
    State(notes): State<Notes>,
    Path(key): Path<String>,
) -> Result<String, StatusCode> {
    notes.read().await.get(&key).cloned().ok_or(StatusCode::NOT_FOUND)
}
