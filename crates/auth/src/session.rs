//! Session/Identity Store: the single source of truth for who is using the
//! application.
//!
//! The store is an explicit context object. Callers own an `Arc<SessionStore>`
//! and hand it to whatever needs it; there is no global session.
//!
//! Lifecycle:
//! - `initialize` resolves the persisted marker once per store (one "load").
//! - `set_principal` / `login` sign a principal in and persist the role marker.
//! - `logout` clears the principal and the marker.
//!
//! Every sign-in/sign-out bumps an epoch. `initialize` records the epoch before
//! it suspends and discards its result if the epoch moved, so a logout that
//! lands first is never undone by a late resolution.
//!
//! Snapshots are published to subscribers while the state lock is held, so the
//! change feed never disagrees with `snapshot()`. Writers that touch the
//! persisted marker are serialized on a separate lock; readers never wait on
//! marker I/O.

use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{DirectoryError, MarkerError, MarkerStore, Principal, PrincipalDirectory, Role};

/// Point-in-time view of the session, handed to guards and views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub principal: Option<Principal>,
    pub is_loading: bool,
    pub signed_in_at: Option<DateTime<Utc>>,
}

impl SessionSnapshot {
    pub fn loading() -> Self {
        Self {
            principal: None,
            is_loading: true,
            signed_in_at: None,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            principal: None,
            is_loading: false,
            signed_in_at: None,
        }
    }

    pub fn signed_in(principal: Principal, at: DateTime<Utc>) -> Self {
        Self {
            principal: Some(principal),
            is_loading: false,
            signed_in_at: Some(at),
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.principal.as_ref().map(|p| p.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session marker: {0}")]
    Marker(#[from] MarkerError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("no principal is registered for role '{0}'")]
    UnknownRole(Role),
}

#[derive(Debug)]
struct SessionState {
    snapshot: SessionSnapshot,
    epoch: u64,
    init_started: bool,
}

pub struct SessionStore {
    state: RwLock<SessionState>,
    writers: Mutex<()>,
    marker: Arc<dyn MarkerStore>,
    directory: Arc<dyn PrincipalDirectory>,
    changes: watch::Sender<SessionSnapshot>,
}

impl SessionStore {
    /// A fresh store in the loading state.
    pub fn new(marker: Arc<dyn MarkerStore>, directory: Arc<dyn PrincipalDirectory>) -> Self {
        let (changes, _) = watch::channel(SessionSnapshot::loading());
        Self {
            state: RwLock::new(SessionState {
                snapshot: SessionSnapshot::loading(),
                epoch: 0,
                init_started: false,
            }),
            writers: Mutex::new(()),
            marker,
            directory,
            changes,
        }
    }

    // Writers replace the snapshot wholesale, so a poisoned lock is still coherent.
    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    fn writer(&self) -> MutexGuard<'_, ()> {
        self.writers.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Install `snapshot` and notify subscribers. Takes the held guard so the
    /// feed is updated in the same critical section as the state.
    fn install(
        &self,
        state: &mut RwLockWriteGuard<'_, SessionState>,
        snapshot: SessionSnapshot,
    ) -> SessionSnapshot {
        state.snapshot = snapshot;
        self.changes.send_replace(state.snapshot.clone());
        state.snapshot.clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .snapshot
            .clone()
    }

    /// Change feed; the receiver always holds the latest snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.changes.subscribe()
    }

    /// Resolve the persisted marker into a principal.
    ///
    /// Runs once per store. A second caller gets the current snapshot, which
    /// may still be loading if the first resolution has not finished.
    /// Resolution failures never escape: they leave the session signed out.
    pub async fn initialize(&self) -> SessionSnapshot {
        let epoch = {
            let mut state = self.write();
            if state.init_started {
                return state.snapshot.clone();
            }
            state.init_started = true;
            state.epoch
        };

        let resolved = self.resolve_marker().await;

        let snapshot = {
            let mut state = self.write();
            let next = if state.epoch == epoch {
                match resolved {
                    Some(principal) => SessionSnapshot::signed_in(principal, Utc::now()),
                    None => SessionSnapshot::signed_out(),
                }
            } else {
                debug!("session changed during initialization; discarding resolved principal");
                SessionSnapshot {
                    is_loading: false,
                    ..state.snapshot.clone()
                }
            };
            self.install(&mut state, next)
        };

        debug!(
            authenticated = snapshot.is_authenticated(),
            role = snapshot.role().map(|r| r.as_str()),
            "session initialized"
        );
        snapshot
    }

    async fn resolve_marker(&self) -> Option<Principal> {
        let raw = match self.marker.load() {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no session marker; starting signed out");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "session marker unreadable; starting signed out");
                return None;
            }
        };

        let role: Role = match raw.parse() {
            Ok(role) => role,
            Err(e) => {
                warn!(error = %e, "session marker corrupt; starting signed out");
                return None;
            }
        };

        match self.directory.resolve(role).await {
            Ok(Some(principal)) if principal.role == role => Some(principal),
            Ok(Some(principal)) => {
                warn!(
                    expected = %role,
                    actual = %principal.role,
                    "directory returned a principal with a different role; starting signed out"
                );
                None
            }
            Ok(None) => {
                warn!(%role, "no principal for persisted role; starting signed out");
                None
            }
            Err(e) => {
                warn!(error = %e, %role, "principal lookup failed; starting signed out");
                None
            }
        }
    }

    /// Sign `principal` in and persist its role marker.
    ///
    /// The marker is written first; if that fails the session is untouched.
    pub fn set_principal(&self, principal: Principal) -> Result<SessionSnapshot, SessionError> {
        let _writer = self.writer();
        self.marker.save(principal.role.as_str())?;

        let (id, role) = (principal.id.clone(), principal.role);
        let snapshot = {
            let mut state = self.write();
            state.epoch += 1;
            self.install(&mut state, SessionSnapshot::signed_in(principal, Utc::now()))
        };
        info!(principal_id = %id, %role, "principal signed in");
        Ok(snapshot)
    }

    /// Look up the principal for `role` and sign it in.
    pub async fn login(&self, role: Role) -> Result<SessionSnapshot, SessionError> {
        let principal = self
            .directory
            .resolve(role)
            .await?
            .ok_or(SessionError::UnknownRole(role))?;
        self.set_principal(principal)
    }

    /// Sign out.
    ///
    /// The in-memory principal is always cleared, even when removing the
    /// persisted marker fails; that failure is still reported.
    pub fn logout(&self) -> Result<(), SessionError> {
        let _writer = self.writer();
        {
            let mut state = self.write();
            state.epoch += 1;
            self.install(&mut state, SessionSnapshot::signed_out());
        }

        info!("principal signed out");
        let cleared = self.marker.clear();
        if let Err(e) = &cleared {
            warn!(error = %e, "failed to clear session marker");
        }
        cleared.map_err(SessionError::from)
    }
}

impl core::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionStore")
            .field("snapshot", &self.snapshot())
            .finish_non_exhaustive()
    }
}
