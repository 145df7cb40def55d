//! Fetch Gateway
//!
//! One async operation per REST action. Implementations: `HttpGateway`
//! (reqwest) and, for tests, `InMemoryGateway`.

mod endpoint;
mod http;
#[cfg(any(test, feature = "test-util"))]
mod memory;

use async_trait::async_trait;

use crate::domain::{AuthToken, CommentDraft, FeatureKind, Id, Item, ItemDraft, Like};
use crate::error::GatewayResult;

pub use endpoint::{Endpoint, Verb};
pub use http::HttpGateway;
#[cfg(any(test, feature = "test-util"))]
pub use memory::{GatewayCall, InMemoryGateway};

/// REST operations of a feature collection
///
/// Futures are not `Send`: in the browser they run on the single UI thread.
#[async_trait(?Send)]
pub trait FeedGateway {
    /// List the collection; the token is attached when present
    async fn list(&self, kind: FeatureKind, token: Option<&AuthToken>) -> GatewayResult<Vec<Item>>;

    async fn create(
        &self,
        kind: FeatureKind,
        user_id: &str,
        draft: &ItemDraft,
        token: &AuthToken,
    ) -> GatewayResult<Item>;

    async fn update(
        &self,
        kind: FeatureKind,
        id: &Id,
        user_id: &str,
        draft: &ItemDraft,
        token: &AuthToken,
    ) -> GatewayResult<Item>;

    async fn delete(&self, kind: FeatureKind, id: &Id, user_id: &str, token: &AuthToken) -> GatewayResult<()>;

    /// Returns the item with the like applied
    async fn add_like(&self, kind: FeatureKind, id: &Id, like: &Like, token: &AuthToken) -> GatewayResult<Item>;

    async fn remove_like(&self, kind: FeatureKind, id: &Id, user_id: &str, token: &AuthToken) -> GatewayResult<()>;

    /// Returns the item with the new comment
    async fn add_comment(
        &self,
        kind: FeatureKind,
        id: &Id,
        draft: &CommentDraft,
        token: &AuthToken,
    ) -> GatewayResult<Item>;

    async fn update_comment(
        &self,
        kind: FeatureKind,
        id: &Id,
        comment_id: &Id,
        draft: &CommentDraft,
        token: &AuthToken,
    ) -> GatewayResult<()>;

    async fn delete_comment(
        &self,
        kind: FeatureKind,
        id: &Id,
        comment_id: &Id,
        user_id: &str,
        token: &AuthToken,
    ) -> GatewayResult<()>;

    /// Event registration
    async fn register(&self, kind: FeatureKind, id: &Id, user_id: &str, token: &AuthToken) -> GatewayResult<()>;
}
