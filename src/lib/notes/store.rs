//! This module holds the in-memory collection of notes.
use std::collections::BTreeMap;

use super::response::NotesResponse;

/// The in-memory mapping from note ids to their text.
///
/// Ids come from a counter owned by the store, so an id is never handed out
/// twice, even after the note it belonged to has been deleted.
#[derive(Debug)]
pub struct NoteStore {
    notes: BTreeMap<u64, String>,
    next_id: u64,
}

impl NoteStore {
    /// Creates a new, empty [`NoteStore`]. The first note gets id 1.
    pub fn new() -> Self {
        NoteStore {
            notes: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Returns every note, keyed by id.
    pub fn list(&self) -> NotesResponse {
        self.notes
            .iter()
            .map(|(id, text)| (id.to_string(), text.clone()))
            .collect()
    }

    /// Returns the text of a note, if it exists.
    pub fn get(&self, id: &str) -> Option<&String> {
        self.notes.get(&parse_id(id)?)
    }

    /// Stores a new note and returns the id assigned to it.
    pub fn create(&mut self, text: String) -> String {
        let id = self.next_id;

        self.next_id += 1;
        self.notes.insert(id, text);

        id.to_string()
    }

    /// Replaces the text of an existing note. Returns `false` without
    /// touching the store when the note does not exist.
    pub fn update(&mut self, id: &str, text: String) -> bool {
        match parse_id(id).and_then(|id| self.notes.get_mut(&id)) {
            Some(existing) => {
                *existing = text;
                true
            }
            None => false,
        }
    }

    /// Removes a note, returning its text if it existed.
    pub fn delete(&mut self, id: &str) -> Option<String> {
        self.notes.remove(&parse_id(id)?)
    }

    /// Returns how many notes are stored.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Returns `true` when no notes are stored.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl Default for NoteStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Ids travel as canonical decimal strings, so "01" or "+1" can't name a note.
fn parse_id(id: &str) -> Option<u64> {
    id.parse().ok().filter(|n: &u64| n.to_string() == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut store = NoteStore::new();

        assert!(store.is_empty());
        assert_eq!(store.create("a".to_string()), "1");
        assert_eq!(store.create("b".to_string()), "2");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = NoteStore::new();

        store.create("a".to_string());
        store.create("b".to_string());
        assert_eq!(store.delete("1"), Some("a".to_string()));

        let id = store.create("c".to_string());

        assert_eq!(id, "3");
        assert_eq!(store.get("2"), Some(&"b".to_string()));
        assert_eq!(store.get("3"), Some(&"c".to_string()));
    }

    #[test]
    fn update_of_missing_note_leaves_store_alone() {
        let mut store = NoteStore::new();

        store.create("a".to_string());

        assert!(!store.update("7", "x".to_string()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("1"), Some(&"a".to_string()));
        assert!(store.get("7").is_none());
    }

    #[test]
    fn update_overwrites_text() {
        let mut store = NoteStore::new();
        let id = store.create("a".to_string());

        assert!(store.update(&id, "b".to_string()));
        assert_eq!(store.get(&id), Some(&"b".to_string()));
    }

    #[test]
    fn non_numeric_ids_are_never_found() {
        let mut store = NoteStore::new();

        store.create("a".to_string());

        assert!(store.get("one").is_none());
        assert!(!store.update("-1", "x".to_string()));
        assert!(store.delete("").is_none());
        assert!(store.get("01").is_none());
        assert!(store.get("+1").is_none());
    }

    #[test]
    fn list_returns_every_note_keyed_by_id() {
        let mut store = NoteStore::new();

        store.create("a".to_string());
        store.create("b".to_string());

        let notes = store.list().0;

        assert_eq!(notes.len(), 2);
        assert_eq!(notes.get("1"), Some(&"a".to_string()));
        assert_eq!(notes.get("2"), Some(&"b".to_string()));
    }
}
