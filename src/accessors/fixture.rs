//! Fixture accessor for YAML session files
//!
//! Directory layout:
//!
//! ```text
//! <root>/<year>/schedule.yaml
//! <root>/<year>/<event-slug>/<CODE>.yaml
//! ```
//!
//! where `CODE` is the session kind code (`R`, `Q`, `FP1`, ...).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, trace};

use crate::accessor::SessionAccessor;
use crate::session::{EventInfo, Session, SessionKey, TelemetrySample};
use crate::{AccessError, Result};

/// Accessor that reads sessions from a directory of YAML files
#[derive(Debug, Clone)]
pub struct FixtureAccessor {
    root: PathBuf,
}

impl FixtureAccessor {
    /// Create an accessor rooted at `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory-safe event name: lowercase, non-alphanumeric runs become `-`
    pub fn slug(name: &str) -> String {
        let mut slug = String::with_capacity(name.len());
        for ch in name.chars() {
            if ch.is_alphanumeric() {
                slug.extend(ch.to_lowercase());
            } else if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        while slug.ends_with('-') {
            slug.pop();
        }
        slug
    }

    fn schedule_path(&self, year: u16) -> PathBuf {
        self.root.join(year.to_string()).join("schedule.yaml")
    }

    /// Resolve an event query to its directory slug.
    ///
    /// With a schedule present the first event whose name contains the query
    /// (case-insensitive) wins; without one the query itself is slugged.
    async fn resolve_event(&self, year: u16, query: &str) -> Result<String> {
        let schedule = match self.event_schedule(year).await {
            Ok(schedule) => schedule,
            Err(AccessError::File { source, .. }) if source.kind() == ErrorKind::NotFound => {
                trace!(year, "No schedule file, using event query as slug");
                return Ok(Self::slug(query));
            }
            Err(e) => return Err(e),
        };

        let needle = query.to_lowercase();
        schedule
            .iter()
            .find(|event| event.event_name.to_lowercase().contains(&needle))
            .map(|event| Self::slug(&event.event_name))
            .ok_or_else(|| AccessError::EventNotFound { year, query: query.to_string() })
    }

    /// Path of the session file for a key
    pub async fn session_path(&self, key: &SessionKey) -> Result<PathBuf> {
        let slug = self.resolve_event(key.year, &key.event).await?;
        Ok(self
            .root
            .join(key.year.to_string())
            .join(slug)
            .join(format!("{}.yaml", key.kind.code())))
    }

    async fn read_file(path: &Path) -> Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AccessError::file_error(path.to_path_buf(), e))
    }
}

#[async_trait::async_trait]
impl SessionAccessor for FixtureAccessor {
    async fn event_schedule(&self, year: u16) -> Result<Vec<EventInfo>> {
        let path = self.schedule_path(year);
        let yaml = Self::read_file(&path).await?;
        let mut schedule: Vec<EventInfo> = serde_yaml_ng::from_str(&yaml).map_err(|e| {
            AccessError::parse_error(format!("Schedule {}", path.display()), e.to_string())
        })?;
        schedule.sort_by_key(|event| event.round_number);
        debug!(year, events = schedule.len(), "Loaded event schedule");
        Ok(schedule)
    }

    async fn load_session(&self, key: &SessionKey) -> Result<Arc<Session>> {
        let path = self.session_path(key).await?;
        debug!(%key, path = %path.display(), "Reading session file");

        let yaml = match Self::read_file(&path).await {
            Ok(yaml) => yaml,
            Err(AccessError::File { source, .. }) if source.kind() == ErrorKind::NotFound => {
                return Err(AccessError::SessionNotFound { key: key.clone() });
            }
            Err(e) => return Err(e),
        };

        let session = Session::parse(&yaml)?;
        info!(
            "Loaded {} - {}: {} drivers, {} laps",
            session.event_name,
            session.name,
            session.drivers.len(),
            session.laps.len()
        );
        Ok(Arc::new(session))
    }

    async fn fastest_lap_telemetry(
        &self,
        session: &Session,
        driver: &str,
    ) -> Result<Vec<TelemetrySample>> {
        let lap = session
            .fastest_lap(driver)
            .ok_or_else(|| AccessError::NoValidLap { driver: driver.to_string() })?;

        match session.telemetry_for(driver, lap.lap_number) {
            Some(samples) if !samples.is_empty() => {
                trace!(driver, lap = lap.lap_number, samples = samples.len(), "Fastest lap telemetry");
                Ok(samples.to_vec())
            }
            _ => Err(AccessError::telemetry_unavailable(
                driver,
                format!("no samples recorded for lap {}", lap.lap_number),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SessionKind;
    use crate::test_utils::{sample_session, sessions_fixture_root, write_fixture_tree};

    #[test]
    fn slug_collapses_separators() {
        assert_eq!(FixtureAccessor::slug("Abu Dhabi Grand Prix"), "abu-dhabi-grand-prix");
        assert_eq!(FixtureAccessor::slug("  São Paulo -- GP "), "são-paulo-gp");
        assert_eq!(FixtureAccessor::slug("Emilia Romagna (Imola)"), "emilia-romagna-imola");
    }

    #[tokio::test]
    async fn loads_session_by_partial_event_name() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_tree(dir.path(), &sample_session());
        let accessor = FixtureAccessor::new(dir.path());

        let key = SessionKey::new(2024, "abu dhabi", SessionKind::Race);
        let session = accessor.load_session(&key).await.unwrap();
        assert_eq!(session.event_name, "Abu Dhabi Grand Prix");
        assert_eq!(session.drivers.len(), 3);
    }

    #[tokio::test]
    async fn missing_session_kind_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_tree(dir.path(), &sample_session());
        let accessor = FixtureAccessor::new(dir.path());

        let key = SessionKey::new(2024, "Abu Dhabi", SessionKind::Sprint);
        let err = accessor.load_session(&key).await.unwrap_err();
        assert!(matches!(err, AccessError::SessionNotFound { .. }));
    }

    #[tokio::test]
    async fn unknown_event_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_tree(dir.path(), &sample_session());
        let accessor = FixtureAccessor::new(dir.path());

        let key = SessionKey::new(2024, "Monaco", SessionKind::Race);
        let err = accessor.load_session(&key).await.unwrap_err();
        assert!(matches!(err, AccessError::EventNotFound { year: 2024, .. }));
    }

    #[tokio::test]
    async fn missing_schedule_falls_back_to_slug() {
        let dir = tempfile::tempdir().unwrap();
        let accessor = FixtureAccessor::new(dir.path());

        let key = SessionKey::new(2023, "Monaco Grand Prix", SessionKind::Qualifying);
        let path = accessor.session_path(&key).await.unwrap();
        assert!(path.ends_with("2023/monaco-grand-prix/Q.yaml"));
    }

    #[tokio::test]
    async fn fastest_lap_telemetry_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_tree(dir.path(), &sample_session());
        let accessor = FixtureAccessor::new(dir.path());
        let session = sample_session();

        let samples = accessor.fastest_lap_telemetry(&session, "1").await.unwrap();
        assert!(!samples.is_empty());
        assert!(samples.windows(2).all(|w| w[0].distance <= w[1].distance));

        let err = accessor.fastest_lap_telemetry(&session, "16").await.unwrap_err();
        assert!(matches!(err, AccessError::TelemetryUnavailable { .. }));

        let err = accessor.fastest_lap_telemetry(&session, "44").await.unwrap_err();
        assert!(matches!(err, AccessError::NoValidLap { .. }));
    }

    #[tokio::test]
    async fn reads_committed_fixture_tree() {
        let accessor = FixtureAccessor::new(sessions_fixture_root());

        let schedule = accessor.event_schedule(2024).await.unwrap();
        assert!(schedule.windows(2).all(|w| w[0].round_number < w[1].round_number));

        for kind in [SessionKind::Race, SessionKind::Qualifying] {
            let key = SessionKey::new(2024, "Abu Dhabi", kind);
            let session = accessor.load_session(&key).await.unwrap();
            assert_eq!(session.kind, kind);
            assert_eq!(session.drivers.len(), 4);
        }
    }
}
