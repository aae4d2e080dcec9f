//! Session creation

use crate::error::{Result, StoryError};
use tracing::{debug, warn};
use uuid::Uuid;

/// Authenticated session; only its id is ever used, as an entry's author
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub uid: String,
    pub anonymous: bool,
}

/// Sign in with a pre-supplied token when one is given, anonymously otherwise.
///
/// A token maps to a stable UUID v5 so repeated sign-ins with the same token
/// yield the same author id. The token itself is never stored.
pub async fn sign_in(token: Option<&str>) -> Result<Session> {
    match token.map(str::trim) {
        Some("") => Err(StoryError::Auth("auth token is empty".to_string())),
        Some(token) => {
            let uid = Uuid::new_v5(&Uuid::NAMESPACE_OID, token.as_bytes())
                .simple()
                .to_string();
            debug!(%uid, "signed in with token");
            Ok(Session {
                uid,
                anonymous: false,
            })
        }
        None => {
            let uid = format!("anon-{}", Uuid::new_v4().simple());
            debug!(%uid, "signed in anonymously");
            Ok(Session {
                uid,
                anonymous: true,
            })
        }
    }
}

/// Author id to attach to new entries; sign-in failures leave it null
pub async fn author_id(token: Option<&str>) -> Option<String> {
    match sign_in(token).await {
        Ok(session) => Some(session.uid),
        Err(e) => {
            warn!(error = %e, "sign-in failed, entries will have no author");
            None
        }
    }
}
