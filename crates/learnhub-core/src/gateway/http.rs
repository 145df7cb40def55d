//! HTTP gateway
//!
//! `reqwest` client talking JSON to the REST API with a bearer token.
//! Runs on the browser `fetch` backend when compiled for wasm32.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::endpoint::{Endpoint, Verb};
use super::FeedGateway;
use crate::domain::{AuthToken, CommentDraft, FeatureKind, Id, Item, ItemDraft, Like};
use crate::error::{GatewayError, GatewayResult};

pub struct HttpGateway {
    client: Client,
    api_base_url: String,
}

impl HttpGateway {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_base_url)
    }

    pub fn with_client(client: Client, api_base_url: impl Into<String>) -> Self {
        let api_base_url = api_base_url.into().trim_end_matches('/').to_string();
        Self { client, api_base_url }
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn request(&self, kind: FeatureKind, endpoint: &Endpoint<'_>, token: Option<&AuthToken>) -> GatewayResult<RequestBuilder> {
        let method = match endpoint.verb() {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Delete => Method::DELETE,
        };
        let url = format!("{}{}", self.api_base_url, endpoint.path(kind));
        log::debug!("{} {}", method, url);

        let builder = self.client.request(method, url);
        match token {
            Some(token) if token.is_blank() => Err(GatewayError::Auth("empty bearer token".to_string())),
            Some(token) => Ok(builder.bearer_auth(token.as_str())),
            None => Ok(builder),
        }
    }

    async fn send(&self, builder: RequestBuilder) -> GatewayResult<Response> {
        let response = builder.send().await.map_err(|e| {
            log::warn!("Request failed: {}", e);
            GatewayError::Network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        log::warn!("Request returned {}: {}", status, body);
        Err(GatewayError::from_status(status.as_u16(), body))
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> GatewayResult<T> {
        let response = self.send(builder).await?;
        response.json::<T>().await.map_err(|e| {
            log::warn!("Could not decode response: {}", e);
            GatewayError::Decode(e.to_string())
        })
    }

    async fn send_empty(&self, builder: RequestBuilder) -> GatewayResult<()> {
        self.send(builder).await.map(|_| ())
    }

    async fn call<B, T>(&self, kind: FeatureKind, endpoint: Endpoint<'_>, body: Option<&B>, token: &AuthToken) -> GatewayResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut builder = self.request(kind, &endpoint, Some(token))?;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.send_json(builder).await
    }

    async fn call_empty<B>(&self, kind: FeatureKind, endpoint: Endpoint<'_>, body: Option<&B>, token: &AuthToken) -> GatewayResult<()>
    where
        B: Serialize + ?Sized,
    {
        let mut builder = self.request(kind, &endpoint, Some(token))?;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.send_empty(builder).await
    }
}

#[async_trait(?Send)]
impl FeedGateway for HttpGateway {
    async fn list(&self, kind: FeatureKind, token: Option<&AuthToken>) -> GatewayResult<Vec<Item>> {
        let builder = self.request(kind, &Endpoint::List, token)?;
        self.send_json(builder).await
    }

    async fn create(&self, kind: FeatureKind, user_id: &str, draft: &ItemDraft, token: &AuthToken) -> GatewayResult<Item> {
        self.call(kind, Endpoint::Create { user_id }, Some(draft), token).await
    }

    async fn update(
        &self,
        kind: FeatureKind,
        id: &Id,
        user_id: &str,
        draft: &ItemDraft,
        token: &AuthToken,
    ) -> GatewayResult<Item> {
        self.call(kind, Endpoint::Update { id, user_id }, Some(draft), token).await
    }

    async fn delete(&self, kind: FeatureKind, id: &Id, user_id: &str, token: &AuthToken) -> GatewayResult<()> {
        self.call_empty::<()>(kind, Endpoint::Delete { id, user_id }, None, token).await
    }

    async fn add_like(&self, kind: FeatureKind, id: &Id, like: &Like, token: &AuthToken) -> GatewayResult<Item> {
        self.call(kind, Endpoint::AddLike { id }, Some(like), token).await
    }

    async fn remove_like(&self, kind: FeatureKind, id: &Id, user_id: &str, token: &AuthToken) -> GatewayResult<()> {
        self.call_empty::<()>(kind, Endpoint::RemoveLike { id, user_id }, None, token).await
    }

    async fn add_comment(&self, kind: FeatureKind, id: &Id, draft: &CommentDraft, token: &AuthToken) -> GatewayResult<Item> {
        self.call(kind, Endpoint::AddComment { id }, Some(draft), token).await
    }

    async fn update_comment(
        &self,
        kind: FeatureKind,
        id: &Id,
        comment_id: &Id,
        draft: &CommentDraft,
        token: &AuthToken,
    ) -> GatewayResult<()> {
        self.call_empty(kind, Endpoint::UpdateComment { id, comment_id }, Some(draft), token).await
    }

    async fn delete_comment(
        &self,
        kind: FeatureKind,
        id: &Id,
        comment_id: &Id,
        user_id: &str,
        token: &AuthToken,
    ) -> GatewayResult<()> {
        self.call_empty::<()>(kind, Endpoint::DeleteComment { id, comment_id, user_id }, None, token)
            .await
    }

    async fn register(&self, kind: FeatureKind, id: &Id, user_id: &str, token: &AuthToken) -> GatewayResult<()> {
        self.call_empty::<()>(kind, Endpoint::Register { id, user_id }, None, token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let gateway = HttpGateway::new("http://localhost:8080/api/");
        assert_eq!(gateway.api_base_url(), "http://localhost:8080/api");
    }

    #[tokio::test]
    async fn test_blank_token_fails_before_sending() {
        let gateway = HttpGateway::new("http://127.0.0.1:9");
        let result = gateway
            .delete(FeatureKind::Resources, &Id::from("1"), "u1", &AuthToken::new(""))
            .await;
        assert!(matches!(result, Err(GatewayError::Auth(_))));
    }
}
