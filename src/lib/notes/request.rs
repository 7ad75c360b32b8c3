//! This module declares all types that may be used as request payloads.
use serde::{Deserialize, Serialize};

/// The body of a create or update request. A missing `text` field is
/// treated as an empty note.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct NoteRequest {
    #[serde(default)]
    pub text: String,
}
