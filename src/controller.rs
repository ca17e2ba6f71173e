use chrono::{Local, Utc};
use tracing::{debug, info};

use crate::api::backend::Backend;
use crate::error::Error;
use crate::model::record::CheckRecord;
use crate::model::session::{AttendanceSession, CheckMode, GeoPoint, PhotoHandle, Transition};
use crate::store::{SessionStore, StoredState};
use crate::utils::timefmt;

/// Result of a committed transition.
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    pub transition: Transition,
    pub mode: CheckMode,
    pub time: String,
}

/// Owns the attendance session and is the only writer to it. The UI renders
/// `session()` snapshots and dispatches intents here.
///
/// Transition attempts are serialized structurally: `request_transition`
/// takes `&mut self`, so a second attempt cannot start while one is awaiting
/// the backend.
pub struct SessionController<B, S> {
    backend: B,
    store: S,
    session: AttendanceSession,
}

impl<B: Backend, S: SessionStore> SessionController<B, S> {
    /// Hydrate the session from the persisted document.
    pub fn load(backend: B, store: S) -> Result<Self, Error> {
        let session = store.load()?.into_session();
        Ok(Self {
            backend,
            store,
            session,
        })
    }

    pub fn session(&self) -> &AttendanceSession {
        &self.session
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// A fresh capture replaces any photo still pending.
    pub fn attach_photo(&mut self, photo: PhotoHandle) {
        self.session.pending_photo = Some(photo);
    }

    pub fn clear_photo(&mut self) {
        self.session.pending_photo = None;
    }

    /// Record the most recent fix.
    pub fn update_location(&mut self, point: GeoPoint) {
        self.session.location = Some(point);
    }

    /// Toggle into the opposite mode, the switch gesture on the screen.
    pub async fn toggle(&mut self) -> Result<TransitionOutcome, Error> {
        self.request_transition(self.session.mode.opposite()).await
    }

    /// Guarded transition: requires a pending photo and a known location,
    /// and only commits after the backend accepts the submission. On any
    /// failure the session is left untouched so the user can retry.
    pub async fn request_transition(
        &mut self,
        target: CheckMode,
    ) -> Result<TransitionOutcome, Error> {
        let photo = self
            .session
            .pending_photo
            .clone()
            .ok_or(Error::MissingPhoto)?;
        let location = self.session.location.ok_or(Error::MissingLocation)?;

        let transition = target.transition();
        let time = timefmt::format_time_of_day(Local::now().time());
        let record = CheckRecord {
            user_id: self.session.user_id.clone(),
            // Calendar date in UTC, time of day on the local clock.
            date: Utc::now().date_naive(),
            kind: transition,
            location,
            time: time.clone(),
        };

        debug!(kind = %transition, user_id = %record.user_id, "submitting transition");
        self.backend.submit(&record, &photo).await?;

        self.session.mode = target;
        match transition {
            Transition::CheckIn => self.session.check_in_time = Some(time.clone()),
            Transition::CheckOut => self.session.check_out_time = Some(time.clone()),
        }
        // The photo is consumed; the next transition needs a fresh capture.
        self.session.pending_photo = None;

        self.store.save(&StoredState::from(&self.session))?;

        info!(kind = %transition, time = %time, "transition committed");
        Ok(TransitionOutcome {
            transition,
            mode: target,
            time,
        })
    }
}
