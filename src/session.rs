use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{User, UserRole};

/// The identity a session holds while it is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub profile_image: Option<String>,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            profile_image: user.profile_image.clone(),
        }
    }
}

/// One client's session: at most one active user at a time.
#[derive(Debug, Default)]
pub struct Session {
    user: Option<SessionUser>,
    expires_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn login(&mut self, user: SessionUser, expires_at: DateTime<Utc>) {
        self.user = Some(user);
        self.expires_at = Some(expires_at);
    }

    pub fn logout(&mut self) -> Option<SessionUser> {
        self.expires_at = None;
        self.user.take()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(true, |expires_at| expires_at <= now)
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<UserRole> {
        self.user.as_ref().map(|user| user.role)
    }
}

/// Live sessions keyed by session id. A session lives as long as its access token.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Opens a session and drops every one that has expired.
    pub async fn open(&self, user: SessionUser) -> Uuid {
        let now = Utc::now();
        let session_id = Uuid::new_v4();
        let mut session = Session::default();
        session.login(user, now + self.ttl);

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, existing| !existing.is_expired(now));
        let pruned = before - sessions.len();
        if pruned > 0 {
            tracing::debug!(pruned, "Expired sessions removed");
        }

        sessions.insert(session_id, session);
        session_id
    }

    pub async fn current(&self, session_id: Uuid) -> Option<SessionUser> {
        self.sessions
            .read()
            .await
            .get(&session_id)
            .filter(|session| !session.is_expired(Utc::now()))
            .and_then(|session| session.user().cloned())
    }

    pub async fn close(&self, session_id: Uuid) -> Option<SessionUser> {
        let mut sessions = self.sessions.write().await;
        let user = sessions.get_mut(&session_id).and_then(Session::logout);
        sessions.remove(&session_id);
        user
    }

    /// Pushes profile changes into every open session of that user.
    pub async fn refresh_user(&self, user: SessionUser) {
        let mut sessions = self.sessions.write().await;
        for session in sessions.values_mut() {
            if let Some(current) = session.user.as_mut().filter(|current| current.id == user.id) {
                *current = user.clone();
            }
        }
    }

    pub async fn active_count(&self) -> usize {
        let now = Utc::now();
        self.sessions
            .read()
            .await
            .values()
            .filter(|session| !session.is_expired(now))
            .count()
    }
}
