//! Request bodies for create / update and comments

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::session::Viewer;

/// Fields a feature may require before a draft is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Description,
    /// A named feature field, e.g. `eventDate`
    Extra(&'static str),
}

impl DraftField {
    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Title => "Title",
            DraftField::Description => "Description",
            DraftField::Extra(name) => *name,
        }
    }
}

/// Create / update body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub title: String,
    pub description: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ItemDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// Whether `field` holds a non-blank value
    pub fn has(&self, field: DraftField) -> bool {
        match field {
            DraftField::Title => !self.title.trim().is_empty(),
            DraftField::Description => !self.description.trim().is_empty(),
            DraftField::Extra(name) => match self.fields.get(name) {
                None | Some(Value::Null) => false,
                Some(Value::String(s)) => !s.trim().is_empty(),
                Some(Value::Array(a)) => !a.is_empty(),
                Some(_) => true,
            },
        }
    }
}

/// Comment add / edit body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDraft {
    pub user_id: String,
    pub user_name: String,
    pub content: String,
}

impl CommentDraft {
    pub fn new(viewer: &Viewer, content: impl Into<String>) -> Self {
        Self {
            user_id: viewer.user_id.clone(),
            user_name: viewer.user_name.clone(),
            content: content.into(),
        }
    }
}
