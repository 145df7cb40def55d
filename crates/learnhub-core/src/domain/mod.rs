//! Domain Layer
//!
//! Wire-compatible data model shared by every feature page.
//! No networking or UI here, only serde.

mod entity;
mod id;
mod item;
mod draft;
mod kind;
mod session;
mod timestamp;

pub use entity::Entity;
pub use id::Id;
pub use item::{Comment, Item, Like};
pub use draft::{CommentDraft, DraftField, ItemDraft};
pub use kind::{Capabilities, Capability, FeatureKind};
pub use session::{AuthToken, Session, Viewer};
