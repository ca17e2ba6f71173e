use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;
use crate::model::session::{AttendanceSession, CheckMode};

/// Persisted slice of the session. Keys match the device's key-value store:
/// `userName`, `userId`, `checkInMode`, `checkInTime`, `checkOutTime`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoredState {
    pub user_name: String,
    pub user_id: String,
    pub check_in_mode: bool,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
}

impl StoredState {
    pub fn into_session(self) -> AttendanceSession {
        AttendanceSession {
            user_name: self.user_name,
            user_id: self.user_id,
            mode: CheckMode::from_flag(self.check_in_mode),
            check_in_time: self.check_in_time,
            check_out_time: self.check_out_time,
            pending_photo: None,
            location: None,
        }
    }
}

impl From<&AttendanceSession> for StoredState {
    fn from(session: &AttendanceSession) -> Self {
        Self {
            user_name: session.user_name.clone(),
            user_id: session.user_id.clone(),
            check_in_mode: session.mode.as_flag(),
            check_in_time: session.check_in_time.clone(),
            check_out_time: session.check_out_time.clone(),
        }
    }
}

/// Read once at startup, written only on successful transitions.
pub trait SessionStore {
    fn load(&self) -> Result<StoredState, Error>;
    fn save(&self, state: &StoredState) -> Result<(), Error>;
}

/// JSON document on local disk.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> Result<StoredState, Error> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no session document yet, starting fresh");
            return Ok(StoredState::default());
        }

        let raw = fs::read_to_string(&self.path)
            .map_err(|e| Error::Store(format!("read {}: {e}", self.path.display())))?;

        serde_json::from_str(&raw)
            .map_err(|e| Error::Store(format!("parse {}: {e}", self.path.display())))
    }

    fn save(&self, state: &StoredState) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| Error::Store(format!("create {}: {e}", parent.display())))?;
            }
        }

        let raw = serde_json::to_string_pretty(state)
            .map_err(|e| Error::Store(format!("encode session: {e}")))?;

        fs::write(&self.path, raw)
            .map_err(|e| Error::Store(format!("write {}: {e}", self.path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hrm-checkin-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn missing_document_loads_defaults() {
        let store = FileStore::new(temp_path("missing"));
        let state = store.load().unwrap();
        assert_eq!(state, StoredState::default());
        assert!(!state.check_in_mode);
    }

    #[test]
    fn save_then_load_round_trips() {
        let path = temp_path("roundtrip");
        let store = FileStore::new(path.clone());

        let state = StoredState {
            user_name: "Ayesha".to_string(),
            user_id: "emp-7".to_string(),
            check_in_mode: true,
            check_in_time: Some("09:02:11".to_string()),
            check_out_time: None,
        };
        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), state);

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn document_uses_the_device_store_keys() {
        let state = StoredState {
            user_name: "Ayesha".to_string(),
            user_id: "emp-7".to_string(),
            check_in_mode: true,
            check_in_time: Some("09:02:11".to_string()),
            check_out_time: None,
        };

        let value = serde_json::to_value(&state).unwrap();
        let obj = value.as_object().unwrap();
        for key in ["userName", "userId", "checkInMode", "checkInTime", "checkOutTime"] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
    }

    #[test]
    fn partial_document_fills_in_defaults() {
        let state: StoredState =
            serde_json::from_str(r#"{ "userName": "Rafi", "userId": "emp-9" }"#).unwrap();
        assert_eq!(state.user_name, "Rafi");
        assert!(!state.check_in_mode);
        assert_eq!(state.check_in_time, None);
    }
}
