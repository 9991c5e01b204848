use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use catch_core::{hit_test, sample_motion, Click, Motion, SessionRecord};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use uuid::Uuid;

/// Errors returned by [`SessionStore`] operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// No live session has this id
    #[error("session not found: {id}")]
    NotFound { id: String },
}

/// Verdict for a single click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validation {
    /// Whether the click landed within the acceptance threshold
    pub valid: bool,
    /// Catch count after this click was applied
    pub catch_count: u64,
}

#[derive(Debug)]
struct Session {
    motion: Motion,
    created_at: DateTime<Utc>,
    catch_count: u64,
}

struct Inner<R> {
    sessions: HashMap<String, Session>,
    rng: R,
}

impl<R> Inner<R> {
    fn insert(&mut self, motion: Motion) -> SessionRecord {
        loop {
            let id = Uuid::new_v4().simple().to_string();
            if let Entry::Vacant(slot) = self.sessions.entry(id.clone()) {
                let created_at = Utc::now();
                slot.insert(Session {
                    motion,
                    created_at,
                    catch_count: 0,
                });
                return SessionRecord::new(id, &motion, created_at, 0);
            }
        }
    }
}

/// In-memory registry of game sessions.
///
/// Owns the random source used for parameter sampling. One lock guards both
/// the map and the source, so every lookup-validate-increment sequence is
/// atomic with respect to other callers. Sessions are never evicted; they
/// live as long as the store.
pub struct SessionStore<R = StdRng> {
    inner: Mutex<Inner<R>>,
}

impl SessionStore<StdRng> {
    /// Store seeded from the operating system's entropy source.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }
}

impl Default for SessionStore<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> SessionStore<R> {
    /// Store drawing session parameters from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self {
            inner: Mutex::new(Inner {
                sessions: HashMap::new(),
                rng,
            }),
        }
    }

    // Nothing panics while the lock is held, and even if it did the map
    // would still hold complete entries.
    fn lock(&self) -> MutexGuard<'_, Inner<R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a new round with freshly sampled parameters.
    pub fn create_session(&self) -> SessionRecord {
        let mut inner = self.lock();
        let motion = sample_motion(&mut inner.rng);
        let record = inner.insert(motion);
        tracing::debug!(
            "Created session {} (mode: {}, live sessions: {})",
            record.id,
            record.mode,
            inner.sessions.len()
        );
        record
    }

    /// Start a new round with the given parameters.
    pub fn open_session(&self, motion: Motion) -> SessionRecord {
        let record = self.lock().insert(motion);
        tracing::debug!("Opened session {} (mode: {})", record.id, record.mode);
        record
    }

    /// Check a click against the session's trajectory.
    ///
    /// A valid click bumps the catch count by one. Invalid clicks and unknown
    /// ids leave the store untouched.
    pub fn validate_click(&self, id: &str, click: &Click) -> Result<Validation, SessionError> {
        let mut inner = self.lock();
        let session = inner
            .sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound { id: id.to_owned() })?;

        let hit = hit_test(&session.motion, click);
        if hit.valid {
            session.catch_count += 1;
        }

        tracing::debug!(
            "Validated click for session {}: distance={:.2}, valid={}, catch_count={}",
            id,
            hit.distance,
            hit.valid,
            session.catch_count
        );

        Ok(Validation {
            valid: hit.valid,
            catch_count: session.catch_count,
        })
    }

    /// Current record of a session, if it exists.
    pub fn session(&self, id: &str) -> Option<SessionRecord> {
        let inner = self.lock();
        inner.sessions.get(id).map(|s| {
            SessionRecord::new(id.to_owned(), &s.motion, s.created_at, s.catch_count)
        })
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.lock().sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
