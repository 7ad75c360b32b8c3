//! This module includes all routes used for managing notes.
use std::sync::{RwLockReadGuard, RwLockWriteGuard};

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use tracing::{debug, error, instrument, warn};

use crate::{
    notes::{response::NotesResponse, store::NoteStore, NoteError, NotePayload},
    state::SharedState,
};

fn read_store(state: &SharedState) -> Result<RwLockReadGuard<'_, NoteStore>, NoteError> {
    state.notes.read().map_err(|err| {
        error!("error acquiring the lock for the note store: {:?}", err);
        NoteError::OperationFailed
    })
}

fn write_store(state: &SharedState) -> Result<RwLockWriteGuard<'_, NoteStore>, NoteError> {
    state.notes.write().map_err(|err| {
        error!("error acquiring the lock for the note store: {:?}", err);
        NoteError::OperationFailed
    })
}

/// Returns every stored note.
#[instrument(skip(state))]
pub async fn list_notes(
    Extension(state): Extension<SharedState>,
) -> Result<Json<NotesResponse>, NoteError> {
    let notes = read_store(&state)?;

    if notes.is_empty() {
        debug!("listing an empty store");
    } else {
        debug!("listing {} notes", notes.len());
    }

    Ok(Json(notes.list()))
}

/// Returns a single note.
#[instrument(skip(state))]
pub async fn get_note(
    Extension(state): Extension<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<NotesResponse>, NoteError> {
    let notes = read_store(&state)?;

    match notes.get(&id) {
        Some(text) => Ok(Json(NotesResponse::single(id, text.clone()))),
        None => {
            debug!("note {:?} does not exist", id);
            Err(NoteError::NotFound(id))
        }
    }
}

/// Stores a new note under a freshly assigned id.
#[instrument(skip(state, payload))]
pub async fn create_note(
    Extension(state): Extension<SharedState>,
    NotePayload(payload): NotePayload,
) -> Result<Response, NoteError> {
    let mut notes = write_store(&state)?;
    let id = notes.create(payload.text.clone());

    debug!("created note {:?}", id);

    let body = Json(NotesResponse::single(id, payload.text));

    Ok((StatusCode::CREATED, body).into_response())
}

/// Replaces the text of an existing note.
#[instrument(skip(state, payload))]
pub async fn update_note(
    Extension(state): Extension<SharedState>,
    Path(id): Path<String>,
    NotePayload(payload): NotePayload,
) -> Result<Json<NotesResponse>, NoteError> {
    let mut notes = write_store(&state)?;

    if !notes.update(&id, payload.text.clone()) {
        warn!("attempted to update missing note {:?}", id);
        return Err(NoteError::NotFound(id));
    }

    debug!("updated note {:?}", id);

    Ok(Json(NotesResponse::single(id, payload.text)))
}

/// Removes a note.
#[instrument(skip(state))]
pub async fn delete_note(
    Extension(state): Extension<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, NoteError> {
    let mut notes = write_store(&state)?;

    match notes.delete(&id) {
        Some(_) => {
            debug!("deleted note {:?}", id);
            Ok(StatusCode::NO_CONTENT)
        }
        None => {
            warn!("attempted to delete missing note {:?}", id);
            Err(NoteError::NotFound(id))
        }
    }
}
