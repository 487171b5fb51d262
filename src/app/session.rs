// InternDesk - app/session.rs
//
// Session persistence: save and restore the active screen, notification
// filter and chart year between application restarts.
//
// - Saved atomically (write temp, rename) so a crash during save never
//   corrupts the previous good session.
// - Load errors are discarded; a corrupt or incompatible session just
//   starts the app fresh.
// - Fetched data and the favorite toggle are never persisted.

use crate::app::fetch::Screen;
use crate::app::state::AppState;
use crate::core::model::NotificationFilter;
use crate::util::constants::SESSION_FILE_NAME;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Version stamp. Mismatches silently discard the session.
pub const SESSION_VERSION: u32 = 1;

/// Persistent UI session snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub version: u32,

    #[serde(default)]
    pub active_screen: Screen,

    #[serde(default)]
    pub notification_filter: NotificationFilter,

    /// Chart year; `None` means "current year".
    #[serde(default)]
    pub chart_year: Option<i32>,
}

impl SessionData {
    /// Snapshot the persistable parts of `state`.
    pub fn capture(state: &AppState) -> Self {
        Self {
            version: SESSION_VERSION,
            active_screen: state.active_screen,
            notification_filter: state.notifications.filter,
            chart_year: Some(state.dashboard.chart_year),
        }
    }

    /// Restore into `state`. Call before the first loads are queued so the
    /// dashboard fetch uses the restored year.
    pub fn restore(&self, state: &mut AppState) {
        state.active_screen = self.active_screen;
        state.set_notification_filter(self.notification_filter);
        if let Some(year) = self.chart_year {
            state.set_chart_year(year, Instant::now());
        }
    }
}

/// `session.json` under the platform data directory.
pub fn session_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE_NAME)
}

/// Write `bytes` next to `path` first, then swap it into place.
fn write_replacing(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let staging = path.with_extension("json.tmp");
    std::fs::write(&staging, bytes)?;
    if let Err(e) = std::fs::rename(&staging, path) {
        let _ = std::fs::remove_file(&staging);
        return Err(e);
    }
    Ok(())
}

/// Persist `data` at `path`.
///
/// The error string is only logged; a failed save never reaches the user.
pub fn save(data: &SessionData, path: &Path) -> Result<(), String> {
    let body = serde_json::to_vec_pretty(data).map_err(|e| format!("encode session: {e}"))?;
    write_replacing(path, &body)
        .map_err(|e| format!("write session '{}': {e}", path.display()))?;
    tracing::debug!(path = %path.display(), screen = ?data.active_screen, "Session stored");
    Ok(())
}

/// Read the saved session. `None` means "start fresh".
pub fn load(path: &Path) -> Option<SessionData> {
    let raw = match std::fs::read(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Session unreadable");
            return None;
        }
    };

    let data = match serde_json::from_slice::<SessionData>(&raw) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Discarding corrupt session");
            return None;
        }
    };

    if data.version != SESSION_VERSION {
        tracing::warn!(
            stored = data.version,
            current = SESSION_VERSION,
            "Discarding session from another version"
        );
        return None;
    }

    tracing::info!(path = %path.display(), screen = ?data.active_screen, "Session restored");
    Some(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::context::SessionContext;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn saved() -> SessionData {
        SessionData {
            version: SESSION_VERSION,
            active_screen: Screen::Notifications,
            notification_filter: NotificationFilter::ActionRequired,
            chart_year: Some(2024),
        }
    }

    #[test]
    fn test_saved_session_reloads() {
        let tmp = TempDir::new().unwrap();
        let path = session_path(tmp.path());
        save(&saved(), &path).expect("session should save");
        assert_eq!(load(&path), Some(saved()));
    }

    #[test]
    fn test_first_run_has_no_session() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(load(&session_path(tmp.path())), None);
    }

    #[test]
    fn test_corrupt_session_is_discarded() {
        let tmp = TempDir::new().unwrap();
        let path = session_path(tmp.path());
        std::fs::write(&path, b"{\"version\": 1, \"active_screen\": ").unwrap();
        assert_eq!(load(&path), None);
    }

    #[test]
    fn test_session_from_other_version_is_discarded() {
        let tmp = TempDir::new().unwrap();
        let path = session_path(tmp.path());
        let future = SessionData {
            version: SESSION_VERSION + 1,
            ..saved()
        };
        save(&future, &path).unwrap();
        assert_eq!(load(&path), None);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = session_path(tmp.path());
        std::fs::write(&path, br#"{"version":1}"#).unwrap();
        let data = load(&path).unwrap();
        assert_eq!(data.active_screen, Screen::Dashboard);
        assert_eq!(data.notification_filter, NotificationFilter::All);
        assert_eq!(data.chart_year, None);
    }

    #[test]
    fn test_leftover_temp_file_does_not_block_save() {
        let tmp = TempDir::new().unwrap();
        let path = session_path(tmp.path());
        save(&saved(), &path).unwrap();
        std::fs::write(path.with_extension("json.tmp"), b"garbage").unwrap();

        let mut updated = saved();
        updated.chart_year = Some(2023);
        save(&updated, &path).unwrap();
        assert_eq!(load(&path).unwrap().chart_year, Some(2023));
    }

    #[test]
    fn test_capture_and_restore_state() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let mut state = AppState::new(SessionContext::new("u", "c"), today, true, true);
        saved().restore(&mut state);
        assert_eq!(state.active_screen, Screen::Notifications);
        assert_eq!(state.dashboard.chart_year, 2024);

        let captured = SessionData::capture(&state);
        assert_eq!(captured, saved());
        // Favorite is view-only.
        state.toggle_favorite();
        assert_eq!(SessionData::capture(&state), saved());
    }
}
