//! Axum route handlers for the notes HTTP API.

use crate::error::NoteResult;
use crate::store::NoteStore;
use axum::Router;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use notes_types::*;
use std::sync::Arc;

pub struct AppState {
    pub store: NoteStore,
}

impl AppState {
    pub fn new(store: NoteStore) -> Self {
        Self { store }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/notas", get(list_notes).post(create_note))
        .route(
            "/notas/:titulo",
            get(get_note).put(update_note).delete(delete_note),
        )
        .route("/buscar/:texto", get(search_notes))
        .route("/estadisticas", get(stats))
        .with_state(state)
}

// GET /
pub async fn root() -> Json<WelcomeMessage> {
    Json(WelcomeMessage::default())
}

// GET /notas?categoria=&importante=
pub async fn list_notes(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListNotesQuery>, QueryRejection>,
) -> NoteResult<Json<Vec<Note>>> {
    let Query(query) = query?;
    Ok(Json(state.store.list(&query)))
}

// GET /notas/:titulo
pub async fn get_note(
    State(state): State<Arc<AppState>>,
    titulo: Result<Path<String>, PathRejection>,
) -> NoteResult<Json<Note>> {
    let Path(titulo) = titulo?;
    state.store.get(&titulo).map(Json)
}

// POST /notas
pub async fn create_note(
    State(state): State<Arc<AppState>>,
    req: Result<Json<NoteCreate>, JsonRejection>,
) -> NoteResult<(StatusCode, Json<Note>)> {
    let Json(req) = req?;
    let note = state.store.create(req)?;
    Ok((StatusCode::CREATED, Json(note)))
}

// PUT /notas/:titulo
pub async fn update_note(
    State(state): State<Arc<AppState>>,
    titulo: Result<Path<String>, PathRejection>,
    req: Result<Json<NoteCreate>, JsonRejection>,
) -> NoteResult<Json<Note>> {
    let Path(titulo) = titulo?;
    let Json(req) = req?;
    state.store.update(&titulo, req).map(Json)
}

// DELETE /notas/:titulo
pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    titulo: Result<Path<String>, PathRejection>,
) -> NoteResult<Json<DeletedNote>> {
    let Path(titulo) = titulo?;
    let removed = state.store.delete(&titulo)?;
    Ok(Json(DeletedNote::new(removed)))
}

// GET /buscar/:texto
pub async fn search_notes(
    State(state): State<Arc<AppState>>,
    texto: Result<Path<String>, PathRejection>,
) -> NoteResult<Json<Vec<Note>>> {
    let Path(texto) = texto?;
    Ok(Json(state.store.search(&texto)))
}

// GET /estadisticas
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<NoteStats> {
    Json(state.store.stats())
}
