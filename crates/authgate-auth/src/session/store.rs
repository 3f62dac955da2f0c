//! In-process session table.
//!
//! Maps an opaque [`SessionToken`] to the owning user and an absolute expiry.
//! Expiry is lazy: an expired record is dropped the first time it is looked
//! up, and [`SessionStore::purge_expired`] lets a sweeper reclaim records
//! nobody asks about again.
//!
//! The table is a sharded [`DashMap`]. Every operation takes the shard lock
//! for its token only, never across an `.await`, so create, validate and
//! invalidate on the same token are serialized.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{debug, warn};

use authgate_core::config::SessionConfig;
use authgate_core::traits::Clock;
use authgate_entity::session::SessionToken;
use authgate_entity::user::UserId;

use super::token::generate_token;

/// Default session lifetime.
pub const DEFAULT_TTL: Duration = Duration::hours(1);

#[derive(Debug, Clone, Copy)]
struct SessionRecord {
    user_id: UserId,
    expires_at: DateTime<Utc>,
}

/// A freshly created session.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// Token to hand to the client.
    pub token: SessionToken,
    /// Instant after which the token no longer validates.
    pub expires_at: DateTime<Utc>,
}

/// Concurrent token → session table.
///
/// Constructed once by the process entry point and shared through an `Arc`;
/// tests build as many independent stores as they like.
pub struct SessionStore {
    sessions: DashMap<SessionToken, SessionRecord>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl SessionStore {
    /// Create an empty store whose sessions live for `ttl`.
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            clock,
            ttl,
        }
    }

    /// Create an empty store using the configured TTL.
    pub fn from_config(config: &SessionConfig, clock: Arc<dyn Clock>) -> Self {
        Self::new(clock, config.ttl())
    }

    /// Create a session for `user_id` and return its token.
    pub fn create(&self, user_id: UserId) -> SessionToken {
        self.issue(user_id).token
    }

    /// Create a session for `user_id`, returning the token with its expiry.
    ///
    /// A token that happens to collide with a live one is discarded and a
    /// new one drawn; existing sessions are never overwritten.
    pub fn issue(&self, user_id: UserId) -> IssuedSession {
        let expires_at = self
            .clock
            .now()
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        loop {
            match self.sessions.entry(generate_token()) {
                Entry::Vacant(slot) => {
                    let token = slot.key().clone();
                    slot.insert(SessionRecord {
                        user_id,
                        expires_at,
                    });
                    debug!(
                        user_id = user_id,
                        token = token.fingerprint(),
                        %expires_at,
                        "Session created"
                    );
                    return IssuedSession { token, expires_at };
                }
                Entry::Occupied(slot) => {
                    warn!(
                        token = slot.key().fingerprint(),
                        "Generated session token already in use, drawing another"
                    );
                }
            }
        }
    }

    /// Resolve a token to its user.
    ///
    /// Returns `None` for unknown tokens and for expired ones; an expired
    /// record is removed on the spot, so it stays gone even if the clock
    /// later moves backward.
    pub fn validate(&self, token: &str) -> Option<UserId> {
        let now = self.clock.now();

        match self.sessions.entry(SessionToken::new(token)) {
            Entry::Occupied(slot) if slot.get().expires_at <= now => {
                let (token, record) = slot.remove_entry();
                debug!(
                    user_id = record.user_id,
                    token = token.fingerprint(),
                    "Session expired"
                );
                None
            }
            Entry::Occupied(slot) => Some(slot.get().user_id),
            Entry::Vacant(_) => None,
        }
    }

    /// Remove a token. Unknown or already-removed tokens are ignored.
    pub fn invalidate(&self, token: &str) {
        if let Some((token, record)) = self.sessions.remove(token) {
            debug!(
                user_id = record.user_id,
                token = token.fingerprint(),
                "Session invalidated"
            );
        }
    }

    /// Drop every expired record and return how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut purged = 0;

        self.sessions.retain(|_, record| {
            let live = record.expires_at > now;
            if !live {
                purged += 1;
            }
            live
        });

        purged
    }

    /// Number of records held, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Session lifetime applied at creation.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("sessions", &self.sessions.len())
            .field("ttl", &self.ttl)
            .finish()
    }
}
