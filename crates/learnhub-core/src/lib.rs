//! LearnHub Core
//!
//! Layered client logic behind every feature page:
//! - domain: wire data model and feature kinds
//! - store: the in-memory collection mirrored from the server
//! - gateway: REST access
//! - reconciler: turns action outcomes into store patches
//! - modal / notify / form: UI state that has rules worth testing

pub mod config;
pub mod domain;
pub mod error;
pub mod form;
pub mod gateway;
pub mod modal;
pub mod notify;
pub mod reconciler;
pub mod store;

pub use config::ClientConfig;
pub use domain::{AuthToken, Comment, CommentDraft, FeatureKind, Id, Item, ItemDraft, Like, Session, Viewer};
pub use error::{ActionError, GatewayError};
pub use reconciler::{settle, Patch, ReconcilePolicy, Reconciler};
pub use store::CollectionStore;
