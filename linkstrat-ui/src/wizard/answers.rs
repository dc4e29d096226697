//! Answer storage
//!
//! Single source of truth for collected answers. Keys appear only once a
//! question has been answered, in answer order, and the store serializes as a
//! plain JSON object so persisted progress and submissions share one shape.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Answer value, polymorphic by the owning question's kind
///
/// Single-choice answers are plain strings; multi-choice and tag-list answers
/// are string arrays. Untagged so the JSON shape stays `"value"` / `["a","b"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    List(Vec<String>),
}

/// Insertion-ordered mapping from question id to answer value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerStore {
    entries: Vec<(String, AnswerValue)>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: &str) -> Option<&AnswerValue> {
        self.entries
            .iter()
            .find(|(id, _)| id == question_id)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.entries.iter().map(|(id, value)| (id.as_str(), value))
    }

    /// Replace (or create) a single-choice answer unconditionally
    pub fn set_text(&mut self, question_id: &str, value: String) {
        self.insert(question_id, AnswerValue::Text(value));
    }

    /// Toggle a value in a multi-choice selection set
    ///
    /// Removing always succeeds. Adding is a silent no-op when the selection
    /// is already at `max_selections`.
    pub fn toggle_in_list(&mut self, question_id: &str, value: &str, max_selections: Option<usize>) {
        let list = self.list_mut(question_id);
        if let Some(pos) = list.iter().position(|v| v == value) {
            list.remove(pos);
        } else if max_selections.map_or(true, |max| list.len() < max) {
            list.push(value.to_string());
        }
    }

    /// Append a tag after trimming
    ///
    /// Silent no-op when the trimmed value is empty, already present, or the
    /// list is at `max_selections`.
    pub fn add_tag(&mut self, question_id: &str, value: &str, max_selections: Option<usize>) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return;
        }
        let list = self.list_mut(question_id);
        if list.iter().any(|v| v == trimmed) {
            return;
        }
        if max_selections.map_or(true, |max| list.len() < max) {
            list.push(trimmed.to_string());
        }
    }

    /// Remove a tag if present; always succeeds
    pub fn remove_tag(&mut self, question_id: &str, value: &str) {
        if let Some(AnswerValue::List(list)) = self.get_mut(question_id) {
            list.retain(|v| v != value);
        }
    }

    fn insert(&mut self, question_id: &str, value: AnswerValue) {
        match self.get_mut(question_id) {
            Some(slot) => *slot = value,
            None => self.entries.push((question_id.to_string(), value)),
        }
    }

    fn get_mut(&mut self, question_id: &str) -> Option<&mut AnswerValue> {
        self.entries
            .iter_mut()
            .find(|(id, _)| id == question_id)
            .map(|(_, value)| value)
    }

    /// Mutable list access, creating an empty list entry on first touch
    fn list_mut(&mut self, question_id: &str) -> &mut Vec<String> {
        let needs_list = !matches!(self.get(question_id), Some(AnswerValue::List(_)));
        if needs_list {
            self.insert(question_id, AnswerValue::List(Vec::new()));
        }
        match self.get_mut(question_id) {
            Some(AnswerValue::List(list)) => list,
            _ => unreachable!("entry was just set to a list"),
        }
    }
}

impl Serialize for AnswerStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, value) in &self.entries {
            map.serialize_entry(id, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AnswerStore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StoreVisitor;

        impl<'de> Visitor<'de> for StoreVisitor {
            type Value = AnswerStore;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of question id to answer value")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((id, value)) = access.next_entry::<String, AnswerValue>()? {
                    entries.push((id, value));
                }
                Ok(AnswerStore { entries })
            }
        }

        deserializer.deserialize_map(StoreVisitor)
    }
}
