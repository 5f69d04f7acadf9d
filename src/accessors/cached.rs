//! Session caching in front of another accessor
//!
//! The comparison core is stateless; repeated loads of the same session are
//! served from here instead. Sessions are stored once under their canonical
//! [`SessionKey`] (see [`Session::key`]) and every query key that resolved to
//! them is kept as an alias, so a different season, event or session kind
//! never hits another session's entry while `"abu dhabi"` and
//! `"Abu Dhabi Grand Prix"` share one copy.
//!
//! The cache is unbounded; entries live until [`CachedAccessor::clear`].

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::Result;
use crate::accessor::SessionAccessor;
use crate::session::{EventInfo, Session, SessionKey, TelemetrySample};

#[derive(Default)]
struct Entries {
    /// Canonical key -> session
    sessions: HashMap<SessionKey, Arc<Session>>,
    /// Query key -> canonical key
    aliases: HashMap<SessionKey, SessionKey>,
}

impl Entries {
    fn get(&self, key: &SessionKey) -> Option<&Arc<Session>> {
        let canonical = self.aliases.get(key).unwrap_or(key);
        self.sessions.get(canonical)
    }
}

/// Accessor wrapper that memoises loaded sessions
pub struct CachedAccessor<A> {
    inner: A,
    entries: RwLock<Entries>,
}

impl<A: SessionAccessor> CachedAccessor<A> {
    pub fn new(inner: A) -> Self {
        Self { inner, entries: RwLock::new(Entries::default()) }
    }

    /// The wrapped accessor
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Number of distinct cached sessions
    pub async fn len(&self) -> usize {
        self.entries.read().await.sessions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.sessions.is_empty()
    }

    /// Get a cached session by query or canonical key without loading
    pub async fn get_cached(&self, key: &SessionKey) -> Option<Arc<Session>> {
        self.entries.read().await.get(key).cloned()
    }

    /// Drop every cached session and alias
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.sessions.clear();
        entries.aliases.clear();
    }
}

#[async_trait::async_trait]
impl<A: SessionAccessor> SessionAccessor for CachedAccessor<A> {
    async fn event_schedule(&self, year: u16) -> Result<Vec<EventInfo>> {
        self.inner.event_schedule(year).await
    }

    async fn load_session(&self, key: &SessionKey) -> Result<Arc<Session>> {
        if let Some(session) = self.get_cached(key).await {
            debug!(%key, "Using cached session");
            return Ok(session);
        }

        // Failures are not cached; the next request asks the inner accessor again.
        let loaded = self.inner.load_session(key).await?;
        let canonical = loaded.key();

        let mut entries = self.entries.write().await;
        let session = Arc::clone(entries.sessions.entry(canonical.clone()).or_insert(loaded));
        if *key != canonical {
            entries.aliases.insert(key.clone(), canonical.clone());
        }
        debug!(%key, %canonical, sessions = entries.sessions.len(), "Cached session");
        Ok(session)
    }

    async fn fastest_lap_telemetry(
        &self,
        session: &Session,
        driver: &str,
    ) -> Result<Vec<TelemetrySample>> {
        self.inner.fastest_lap_telemetry(session, driver).await
    }
}
