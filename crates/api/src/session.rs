//! Browser sessions and their in-memory chat histories.
//!
//! A session is a random UUID carried in the [`SESSION_COOKIE`] cookie.
//! Histories live only in server memory and vanish on restart.

use std::collections::{HashMap, VecDeque};
use std::time::Instant;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Name of the cookie holding the session ID.
pub const SESSION_COOKIE: &str = "sociallens_session";

/// Entries kept per session; the oldest is dropped beyond this.
pub const MAX_HISTORY: usize = 50;

/// Sessions kept in memory; the least recently used is evicted beyond this.
pub const MAX_SESSIONS: usize = 1_000;

/// One answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatEntry {
    pub question: String,
    pub answer: String,
    /// Local wall-clock time, `HH:MM:SS`.
    pub timestamp: String,
}

impl ChatEntry {
    /// Stamp a new entry with the current local time.
    pub fn now(question: String, answer: String) -> Self {
        Self {
            question,
            answer,
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
        }
    }
}

struct SessionHistory {
    entries: VecDeque<ChatEntry>,
    last_seen: Instant,
}

/// Chat histories keyed by session ID.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionHistory>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return the session's history, oldest first.
    pub async fn append(&self, session: Uuid, entry: ChatEntry) -> Vec<ChatEntry> {
        let mut sessions = self.sessions.write().await;

        if !sessions.contains_key(&session) && sessions.len() >= MAX_SESSIONS {
            let stalest = sessions
                .iter()
                .min_by_key(|(_, h)| h.last_seen)
                .map(|(id, _)| *id);
            if let Some(id) = stalest {
                sessions.remove(&id);
                tracing::debug!(session = %id, "Evicted stale chat session");
            }
        }

        let history = sessions.entry(session).or_insert_with(|| SessionHistory {
            entries: VecDeque::new(),
            last_seen: Instant::now(),
        });
        history.last_seen = Instant::now();
        history.entries.push_back(entry);
        while history.entries.len() > MAX_HISTORY {
            history.entries.pop_front();
        }

        history.entries.iter().cloned().collect()
    }

    /// The session's history, oldest first. Unknown sessions are empty.
    ///
    /// Reading counts as activity for eviction.
    pub async fn history(&self, session: Uuid) -> Vec<ChatEntry> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&session) {
            Some(history) => {
                history.last_seen = Instant::now();
                history.entries.iter().cloned().collect()
            }
            None => Vec::new(),
        }
    }
}

/// Session ID carried by `jar`. A missing or malformed cookie is replaced
/// by a fresh session, which the returned jar sends back as `Set-Cookie`.
pub fn resolve_session(jar: CookieJar) -> (Uuid, CookieJar) {
    let existing = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok());
    if let Some(id) = existing {
        return (id, jar);
    }

    let id = Uuid::new_v4();
    let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (id, jar.add(cookie))
}
