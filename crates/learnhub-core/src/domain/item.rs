//! Item Entity
//!
//! A user-authored post: learning plan, skill-sharing post, progress update,
//! event or resource. Feature specific content lives in `fields`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entity::Entity;
use super::id::Id;
use super::session::Viewer;
use super::timestamp::lenient;

/// A single like, at most one per user on an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
}

impl Like {
    pub fn from_viewer(viewer: &Viewer) -> Self {
        Self {
            user_id: viewer.user_id.clone(),
            user_name: viewer.user_name.clone(),
        }
    }
}

/// A comment on an item, ordered as the server returned it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Id,
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    pub content: String,
    #[serde(default, with = "lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn is_authored_by(&self, viewer: &Viewer) -> bool {
        self.user_id == viewer.user_id
    }
}

/// A post in any feature collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WireItem")]
pub struct Item {
    pub id: Id,
    /// Owner user id, read from `userId` or else `ownerId`
    #[serde(rename = "userId")]
    pub owner_id: String,
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_avatar: Option<String>,
    pub title: String,
    /// Read from `description` or else `content` (skill-sharing posts)
    pub description: String,
    #[serde(with = "lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(with = "lenient")]
    pub updated_at: Option<DateTime<Utc>>,
    pub likes: Vec<Like>,
    pub comments: Vec<Comment>,
    /// Feature specific content (topics, eventDate, url, ...)
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Item as the collections send it; the owner and body go by two names
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireItem {
    id: Id,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    owner_id: Option<String>,
    #[serde(default)]
    user_name: Option<String>,
    #[serde(default)]
    user_avatar: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default, with = "lenient")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "lenient")]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    likes: Vec<Like>,
    #[serde(default)]
    comments: Vec<Comment>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl From<WireItem> for Item {
    fn from(wire: WireItem) -> Self {
        let non_empty = |s: &Option<String>| s.as_deref().is_some_and(|s| !s.is_empty());
        let owner_id = if non_empty(&wire.user_id) { wire.user_id } else { wire.owner_id };
        let description = if wire.description.is_some() { wire.description } else { wire.content };
        Self {
            id: wire.id,
            owner_id: owner_id.unwrap_or_default(),
            user_name: wire.user_name.unwrap_or_default(),
            user_avatar: wire.user_avatar,
            title: wire.title.unwrap_or_default(),
            description: description.unwrap_or_default(),
            created_at: wire.created_at,
            updated_at: wire.updated_at,
            likes: wire.likes,
            comments: wire.comments,
            fields: wire.fields,
        }
    }
}

impl Entity for Item {
    type Id = Id;

    fn id(&self) -> &Id {
        &self.id
    }
}

impl Item {
    pub fn new(id: impl Into<Id>, owner_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            user_name: String::new(),
            user_avatar: None,
            title: String::new(),
            description: String::new(),
            created_at: None,
            updated_at: None,
            likes: Vec::new(),
            comments: Vec::new(),
            fields: Map::new(),
        }
    }

    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|like| like.user_id == user_id)
    }

    pub fn is_owned_by(&self, viewer: &Viewer) -> bool {
        self.owner_id == viewer.user_id
    }

    pub fn comment(&self, comment_id: &Id) -> Option<&Comment> {
        self.comments.iter().find(|c| &c.id == comment_id)
    }

    /// Feature field rendered as display text
    pub fn field_text(&self, name: &str) -> Option<String> {
        match self.fields.get(name)? {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Array(values) => Some(
                values
                    .iter()
                    .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            other => Some(other.to_string()),
        }
    }

    /// Copy without the like from `user_id`
    pub fn without_like(&self, user_id: &str) -> Self {
        let mut next = self.clone();
        next.likes.retain(|like| like.user_id != user_id);
        next
    }

    /// Copy without the comment `comment_id`
    pub fn without_comment(&self, comment_id: &Id) -> Self {
        let mut next = self.clone();
        next.comments.retain(|c| &c.id != comment_id);
        next
    }

    /// Copy with the comment `comment_id` rewritten
    pub fn with_comment_content(&self, comment_id: &Id, content: &str, at: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        if let Some(comment) = next.comments.iter_mut().find(|c| &c.id == comment_id) {
            comment.content = content.to_string();
            comment.updated_at = Some(at);
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_learning_plan() {
        let item: Item = serde_json::from_value(json!({
            "id": "p1",
            "userId": "u1",
            "userName": "Ada",
            "title": "Rust in 30 days",
            "description": "Ownership first",
            "topics": ["rust", "systems"],
            "createdAt": "2024-05-01T09:00:00",
            "likes": [{"userId": "u2", "userName": "Bob"}],
            "comments": [{"id": "c1", "userId": "u2", "userName": "Bob", "content": "nice"}]
        }))
        .unwrap();

        assert_eq!(item.id, Id::from("p1"));
        assert_eq!(item.owner_id, "u1");
        assert!(item.created_at.is_some());
        assert!(item.is_liked_by("u2"));
        assert!(!item.is_liked_by("u1"));
        assert_eq!(item.field_text("topics").as_deref(), Some("rust, systems"));
        assert_eq!(item.comments[0].content, "nice");
    }

    #[test]
    fn test_post_content_alias_and_minimal_item() {
        let item: Item = serde_json::from_value(json!({"id": 7, "content": "hello"})).unwrap();
        assert_eq!(item.id, Id::from("7"));
        assert_eq!(item.description, "hello");
        assert!(item.likes.is_empty());
        assert!(item.comments.is_empty());
    }

    #[test]
    fn test_both_owner_keys_prefer_user_id() {
        let item: Item = serde_json::from_value(json!({
            "id": 3,
            "userId": "u1",
            "ownerId": "legacy",
            "description": "body",
            "content": "older body"
        }))
        .unwrap();
        assert_eq!(item.owner_id, "u1");
        assert_eq!(item.description, "body");
        assert!(item.fields.is_empty());

        let item: Item = serde_json::from_value(json!({"id": 4, "ownerId": "u9"})).unwrap();
        assert_eq!(item.owner_id, "u9");
    }

    #[test]
    fn test_odd_timestamps_do_not_fail_the_list() {
        let items: Vec<Item> = serde_json::from_value(json!([
            {"id": 1, "title": "millis", "createdAt": 1714554000000u64},
            {"id": 2, "title": "parts", "createdAt": [2024, 5, 1, 9, 0, 0], "updatedAt": {"bogus": true}},
            {"id": 3, "title": "null", "createdAt": null}
        ]))
        .unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].created_at, items[1].created_at);
        assert!(items[0].created_at.is_some());
        assert!(items[1].updated_at.is_none());
        assert!(items[2].created_at.is_none());
    }

    #[test]
    fn test_copies_leave_original_untouched() {
        let mut item = Item::new("1", "u1");
        item.likes.push(Like { user_id: "u2".into(), user_name: "Bob".into() });
        let unliked = item.without_like("u2");
        assert!(unliked.likes.is_empty());
        assert_eq!(item.likes.len(), 1);
    }
}
