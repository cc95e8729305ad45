//! Session context and token storage.
//!
//! The browser build of this app kept its session in local storage; here the
//! same three values (access token, refresh token, serialized user profile)
//! live behind the `SessionStore` trait so the CLI can persist them to a JSON
//! file and tests can use a purely in-memory store.
//!
//! Presence of an access token is the sole client-side authorization signal.
//! The only claim the client ever reads is the token's embedded expiry: the
//! payload is base64url-decoded without any signature verification, which is
//! all a client can meaningfully do.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::models::user::{Role, User};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    pub access_token: String,
    pub refresh_token: String,
    pub user: Option<User>,
}

impl SessionContext {
    /// Authenticated means: token present and its `exp` claim not in the
    /// past. A token we cannot decode counts as expired.
    pub fn is_authenticated(&self) -> bool {
        !self.access_token.is_empty() && !token_is_expired(&self.access_token)
    }

    pub fn is_admin(&self) -> bool {
        matches!(&self.user, Some(u) if u.role == Role::Admin)
    }

    /// The `userId` claim of the access token, if decodable.
    pub fn user_id(&self) -> Option<String> {
        decode_claims(&self.access_token).and_then(|c| c.user_id)
    }

    pub fn owns_resource(&self, resource_user_id: &str) -> bool {
        self.user_id().as_deref() == Some(resource_user_id)
    }

    pub fn can_access_resource(&self, resource_user_id: &str) -> bool {
        self.is_admin() || self.owns_resource(resource_user_id)
    }
}

// ── token inspection ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenClaims {
    exp: i64,
    #[serde(default)]
    user_id: Option<String>,
}

fn decode_claims(token: &str) -> Option<TokenClaims> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// True when the token's `exp` claim is in the past, or the token is
/// malformed.
pub fn token_is_expired(token: &str) -> bool {
    token_expired_at(token, Utc::now().timestamp())
}

fn token_expired_at(token: &str, now_secs: i64) -> bool {
    match decode_claims(token) {
        Some(claims) => claims.exp < now_secs,
        None => true,
    }
}

// ── storage ─────────────────────────────────────────────────────────────────

/// Where the session lives between invocations. `load` returns `None` when
/// no session has been saved yet.
pub trait SessionStore {
    fn load(&self) -> Result<Option<SessionContext>, AppError>;
    fn save(&self, session: &SessionContext) -> Result<(), AppError>;
    fn clear(&self) -> Result<(), AppError>;
}

/// JSON file under the data directory — the local-storage analog for a CLI.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> Result<Option<SessionContext>, AppError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, session: &SessionContext) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(session)?)?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests and embedding.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Option<SessionContext>>,
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<Option<SessionContext>, AppError> {
        Ok(self.inner.lock().expect("session store poisoned").clone())
    }

    fn save(&self, session: &SessionContext) -> Result<(), AppError> {
        *self.inner.lock().expect("session store poisoned") = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        *self.inner.lock().expect("session store poisoned") = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    /// Unsigned token with the given claims payload; the signature segment is
    /// junk, which the client never checks.
    fn make_token(exp: i64, user_id: &str) -> String {
        let payload = serde_json::json!({ "userId": user_id, "exp": exp });
        let encoded = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("e30.{encoded}.sig")
    }

    fn make_session(exp_offset_secs: i64) -> SessionContext {
        SessionContext {
            access_token: make_token(Utc::now().timestamp() + exp_offset_secs, "u1"),
            refresh_token: "refresh".to_string(),
            user: None,
        }
    }

    #[test]
    fn test_future_exp_is_not_expired() {
        assert!(!token_is_expired(&make_token(
            Utc::now().timestamp() + 3600,
            "u1"
        )));
    }

    #[test]
    fn test_past_exp_is_expired() {
        assert!(token_is_expired(&make_token(
            Utc::now().timestamp() - 10,
            "u1"
        )));
    }

    #[test]
    fn test_malformed_token_counts_as_expired() {
        assert!(token_is_expired("not-a-jwt"));
        assert!(token_is_expired(""));
        assert!(token_is_expired("a.!!!.c"));
    }

    #[test]
    fn test_user_id_claim() {
        let session = make_session(3600);
        assert_eq!(session.user_id().as_deref(), Some("u1"));
        assert!(session.owns_resource("u1"));
        assert!(!session.owns_resource("u2"));
    }

    #[test]
    fn test_admin_access_overrides_ownership() {
        use crate::models::user::User;
        let mut session = make_session(3600);
        assert!(!session.can_access_resource("someone-else"));

        session.user = Some(User {
            id: "u1".to_string(),
            name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
            role: Role::Admin,
            avatar: None,
            email_verified: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
        assert!(session.can_access_resource("someone-else"));
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::default();
        assert!(store.load().unwrap().is_none());

        let session = make_session(3600);
        store.save(&session).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.refresh_token, "refresh");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("session.json"));

        assert!(store.load().unwrap().is_none());
        store.save(&make_session(3600)).unwrap();
        assert!(store.load().unwrap().is_some());

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // Clearing an absent session stays quiet.
        store.clear().unwrap();
    }
}
