//! This module declares all types that may be used as response payloads.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Notes keyed by their id, serialized as a plain JSON object such as
/// `{"1": "buy milk"}`. Single-note responses use the same shape.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct NotesResponse(pub BTreeMap<String, String>);

impl NotesResponse {
    /// Creates a response holding exactly one note.
    pub fn single(id: impl Into<String>, text: impl Into<String>) -> Self {
        NotesResponse(BTreeMap::from([(id.into(), text.into())]))
    }
}

impl FromIterator<(String, String)> for NotesResponse {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        NotesResponse(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_note_serializes_as_object_keyed_by_id() {
        let body = serde_json::to_string(&NotesResponse::single("1", "a")).unwrap();

        assert_eq!(body, r#"{"1":"a"}"#);
    }
}
