// site/src/services/session.rs

//! Bearer-token sessions for the admin dashboard, held in process memory.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rand_core::{OsRng, RngCore};
use std::collections::HashMap;
use std::fmt::Write;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
  pub admin_id: Uuid,
  pub email: String,
  pub issued_at: DateTime<Utc>,
}

struct Entry {
  session: AdminSession,
  /// `None` when the TTL reaches past what `Instant` can represent.
  expires: Option<Instant>,
}

impl Entry {
  fn is_live(&self, now: Instant) -> bool {
    self.expires.map_or(true, |expires| expires > now)
  }
}

pub struct SessionRegistry {
  ttl: Duration,
  sessions: RwLock<HashMap<String, Entry>>,
}

fn new_token() -> String {
  let mut bytes = [0u8; 32];
  OsRng.fill_bytes(&mut bytes);
  bytes.iter().fold(String::with_capacity(64), |mut out, b| {
    let _ = write!(out, "{:02x}", b);
    out
  })
}

impl SessionRegistry {
  pub fn new(ttl: Duration) -> Self {
    Self {
      ttl,
      sessions: RwLock::new(HashMap::new()),
    }
  }

  pub fn ttl(&self) -> Duration {
    self.ttl
  }

  /// Opens a session and returns its token. Expired entries are swept here.
  pub fn issue(&self, admin_id: Uuid, email: &str) -> String {
    let token = new_token();
    let now = Instant::now();
    let mut sessions = self.sessions.write();
    sessions.retain(|_, entry| entry.is_live(now));
    sessions.insert(
      token.clone(),
      Entry {
        session: AdminSession {
          admin_id,
          email: email.to_string(),
          issued_at: Utc::now(),
        },
        expires: now.checked_add(self.ttl),
      },
    );
    info!(%admin_id, active = sessions.len(), "Admin session issued.");
    token
  }

  /// The live session for a token, if any.
  pub fn resolve(&self, token: &str) -> Option<AdminSession> {
    let sessions = self.sessions.read();
    let entry = sessions.get(token)?;
    if !entry.is_live(Instant::now()) {
      debug!("Session token expired.");
      return None;
    }
    Some(entry.session.clone())
  }

  /// Ends a session. Returns whether the token was known.
  pub fn revoke(&self, token: &str) -> bool {
    self.sessions.write().remove(token).is_some()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn issue_resolve_revoke() {
    let registry = SessionRegistry::new(Duration::from_secs(60));
    let admin_id = Uuid::new_v4();
    let token = registry.issue(admin_id, "admin@pharaoh.test");
    assert_eq!(token.len(), 64);

    let session = registry.resolve(&token).unwrap();
    assert_eq!(session.admin_id, admin_id);
    assert_eq!(session.email, "admin@pharaoh.test");

    assert!(registry.revoke(&token));
    assert!(registry.resolve(&token).is_none());
    assert!(!registry.revoke(&token));
  }

  #[test]
  fn tokens_expire_and_are_unique() {
    let registry = SessionRegistry::new(Duration::ZERO);
    let first = registry.issue(Uuid::new_v4(), "a@x.com");
    let second = registry.issue(Uuid::new_v4(), "a@x.com");
    assert_ne!(first, second);
    assert!(registry.resolve(&second).is_none());
  }

  #[test]
  fn unrepresentable_ttl_never_expires() {
    let registry = SessionRegistry::new(Duration::MAX);
    let token = registry.issue(Uuid::new_v4(), "a@x.com");
    assert!(registry.resolve(&token).is_some());
  }
}
