use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Current attendance state. A toggle always targets the opposite mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckMode {
    #[default]
    CheckedOut,
    CheckedIn,
}

impl CheckMode {
    pub fn opposite(self) -> Self {
        match self {
            CheckMode::CheckedOut => CheckMode::CheckedIn,
            CheckMode::CheckedIn => CheckMode::CheckedOut,
        }
    }

    /// The transition that *enters* this mode.
    pub fn transition(self) -> Transition {
        match self {
            CheckMode::CheckedIn => Transition::CheckIn,
            CheckMode::CheckedOut => Transition::CheckOut,
        }
    }

    /// Persisted as the `checkInMode` boolean.
    pub fn from_flag(checked_in: bool) -> Self {
        if checked_in {
            CheckMode::CheckedIn
        } else {
            CheckMode::CheckedOut
        }
    }

    pub fn as_flag(self) -> bool {
        self == CheckMode::CheckedIn
    }
}

/// Wire-level transition type; the backend expects the hyphenated names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum Transition {
    #[serde(rename = "check-in")]
    #[strum(serialize = "check-in")]
    CheckIn,
    #[serde(rename = "check-out")]
    #[strum(serialize = "check-out")]
    CheckOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Opaque handle to a captured image on disk. Owned by the session until the
/// submission consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoHandle {
    path: PathBuf,
}

impl PhotoHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string())
    }

    /// MIME type derived from the file extension, `image/jpeg` when missing.
    pub fn mime_type(&self) -> String {
        let ext = self
            .path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_else(|| "jpeg".to_string());
        format!("image/{ext}")
    }
}

/// Snapshot of the check-in screen's session. All mutations go through the
/// controller; the UI only renders this and dispatches intents.
#[derive(Debug, Clone, Default)]
pub struct AttendanceSession {
    pub user_name: String,
    pub user_id: String,
    pub mode: CheckMode,
    pub check_in_time: Option<String>,
    pub check_out_time: Option<String>,
    pub pending_photo: Option<PhotoHandle>,
    pub location: Option<GeoPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn transition_labels_round_trip() {
        assert_eq!(Transition::CheckIn.to_string(), "check-in");
        assert_eq!(Transition::CheckOut.to_string(), "check-out");
        assert_eq!(Transition::from_str("check-in").unwrap(), Transition::CheckIn);
        assert_eq!(Transition::from_str("check-out").unwrap(), Transition::CheckOut);
    }

    #[test]
    fn mode_maps_to_entering_transition() {
        assert_eq!(CheckMode::CheckedIn.transition(), Transition::CheckIn);
        assert_eq!(CheckMode::CheckedOut.transition(), Transition::CheckOut);
        assert_eq!(CheckMode::CheckedOut.opposite(), CheckMode::CheckedIn);
        assert!(!CheckMode::default().as_flag());
    }

    #[test]
    fn photo_metadata_comes_from_the_file_name() {
        let photo = PhotoHandle::new("/data/captures/selfie.png");
        assert_eq!(photo.file_name(), "selfie.png");
        assert_eq!(photo.mime_type(), "image/png");

        let bare = PhotoHandle::new("/data/captures/selfie");
        assert_eq!(bare.mime_type(), "image/jpeg");
    }
}
