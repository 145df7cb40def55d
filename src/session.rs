//! Session lookup
//!
//! Token issuance happens elsewhere; the sign-in page leaves the viewer and
//! bearer token in localStorage.

use learnhub_core::{AuthToken, Session, Viewer};

const VIEWER_KEY: &str = "learnhub.viewer";
const TOKEN_KEY: &str = "learnhub.token";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Read the session left by the sign-in page, if any
pub fn load_session() -> Option<Session> {
    let storage = storage()?;
    let raw_viewer = storage.get_item(VIEWER_KEY).ok()??;
    let token = storage.get_item(TOKEN_KEY).ok()??;
    parse_session(&raw_viewer, &token)
}

/// Forget the stored session
pub fn clear_session() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(VIEWER_KEY);
        let _ = storage.remove_item(TOKEN_KEY);
    }
}

fn parse_session(raw_viewer: &str, token: &str) -> Option<Session> {
    let viewer: Viewer = match serde_json::from_str(raw_viewer) {
        Ok(viewer) => viewer,
        Err(e) => {
            log::warn!("Ignoring malformed stored viewer: {}", e);
            return None;
        }
    };
    let token = AuthToken::new(token);
    if viewer.user_id.is_empty() || token.is_blank() {
        return None;
    }
    Some(Session::new(viewer, token))
}
