//! REST endpoint table
//!
//! Maps each gateway action to its verb and path under the feature's base
//! path. Path segments are percent-encoded.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::domain::{FeatureKind, Id};

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'&')
    .add(b'+')
    .add(b'=')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint<'a> {
    List,
    Create { user_id: &'a str },
    Update { id: &'a Id, user_id: &'a str },
    Delete { id: &'a Id, user_id: &'a str },
    AddLike { id: &'a Id },
    RemoveLike { id: &'a Id, user_id: &'a str },
    AddComment { id: &'a Id },
    UpdateComment { id: &'a Id, comment_id: &'a Id },
    DeleteComment { id: &'a Id, comment_id: &'a Id, user_id: &'a str },
    Register { id: &'a Id, user_id: &'a str },
}

fn seg(raw: &str) -> String {
    utf8_percent_encode(raw, SEGMENT).to_string()
}

impl Endpoint<'_> {
    pub fn verb(&self) -> Verb {
        match self {
            Endpoint::List => Verb::Get,
            Endpoint::Create { .. } | Endpoint::AddLike { .. } | Endpoint::AddComment { .. } | Endpoint::Register { .. } => {
                Verb::Post
            }
            Endpoint::Update { .. } | Endpoint::UpdateComment { .. } => Verb::Put,
            Endpoint::Delete { .. } | Endpoint::RemoveLike { .. } | Endpoint::DeleteComment { .. } => Verb::Delete,
        }
    }

    /// Path including the query string, relative to the API root
    pub fn path(&self, kind: FeatureKind) -> String {
        let base = kind.base_path();
        match self {
            Endpoint::List => base.to_string(),
            Endpoint::Create { user_id } => format!("{}/user/{}", base, seg(user_id)),
            Endpoint::Update { id, user_id } | Endpoint::Delete { id, user_id } => {
                format!("{}/{}/user/{}", base, seg(id.as_str()), seg(user_id))
            }
            Endpoint::AddLike { id } => format!("{}/{}/likes", base, seg(id.as_str())),
            Endpoint::RemoveLike { id, user_id } => {
                format!("{}/{}/likes/{}", base, seg(id.as_str()), seg(user_id))
            }
            Endpoint::AddComment { id } => format!("{}/{}/comments", base, seg(id.as_str())),
            Endpoint::UpdateComment { id, comment_id } => {
                format!("{}/{}/comments/{}", base, seg(id.as_str()), seg(comment_id.as_str()))
            }
            Endpoint::DeleteComment { id, comment_id, user_id } => format!(
                "{}/{}/comments/{}?userId={}",
                base,
                seg(id.as_str()),
                seg(comment_id.as_str()),
                seg(user_id)
            ),
            Endpoint::Register { id, user_id } => {
                format!("{}/{}/register/user/{}", base, seg(id.as_str()), seg(user_id))
            }
        }
    }
}
