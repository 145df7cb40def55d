//! Form state
//!
//! What the user has typed into a create / edit form, and the latch that
//! stops a second submit while one is in flight.

use serde_json::{Map, Value};

use crate::domain::{FeatureKind, Item, ItemDraft};

/// Boolean latch, not a queue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitLatch {
    submitting: bool,
}

impl SubmitLatch {
    /// Take the latch. Returns false while a submission is in flight.
    pub fn try_begin(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.submitting = true;
        true
    }

    pub fn finish(&mut self) {
        self.submitting = false;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }
}

/// Raw form input for one feature
#[derive(Debug, Clone, PartialEq)]
pub struct DraftForm {
    pub kind: FeatureKind,
    pub title: String,
    pub description: String,
    /// Feature field values as typed, keyed by wire name
    pub fields: Vec<(String, String)>,
    pub latch: SubmitLatch,
}

impl DraftForm {
    pub fn new(kind: FeatureKind) -> Self {
        Self {
            kind,
            title: String::new(),
            description: String::new(),
            fields: kind
                .extra_fields()
                .iter()
                .map(|(name, _)| (name.to_string(), String::new()))
                .collect(),
            latch: SubmitLatch::default(),
        }
    }

    /// Pre-fill from an existing item for editing
    pub fn from_item(kind: FeatureKind, item: &Item) -> Self {
        let mut form = Self::new(kind);
        form.title = item.title.clone();
        form.description = item.description.clone();
        for (name, value) in form.fields.iter_mut() {
            *value = item.field_text(name).unwrap_or_default();
        }
        form
    }

    pub fn field(&self, name: &str) -> &str {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    /// Trimmed request body. Blank feature fields are left out; `topics`
    /// style comma lists become JSON arrays.
    pub fn to_draft(&self) -> ItemDraft {
        let mut fields = Map::new();
        for (name, raw) in &self.fields {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            let value = if name == "topics" {
                Value::Array(
                    raw.split(',')
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(|t| Value::String(t.to_string()))
                        .collect(),
                )
            } else {
                Value::String(raw.to_string())
            };
            fields.insert(name.clone(), value);
        }
        ItemDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            fields,
        }
    }

    /// Clear entered values after a successful submit
    pub fn reset(&mut self) {
        *self = Self::new(self.kind);
    }
}
