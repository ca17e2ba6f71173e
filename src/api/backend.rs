use chrono::{DateTime, NaiveDate};
use reqwest::multipart::{Form, Part};
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::error::Error;
use crate::model::record::CheckRecord;
use crate::model::session::{PhotoHandle, Transition};

/// What the controller needs from the remote backend. Kept narrow so tests
/// can stub submissions.
pub trait Backend {
    async fn submit(&self, record: &CheckRecord, photo: &PhotoHandle) -> Result<(), Error>;
    async fn marked_dates(&self) -> Result<Vec<NaiveDate>, Error>;
}

/// HTTPS client for the attendance backend.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| Error::Submission(format!("http client init: {e}")))?;

        Ok(Self {
            http,
            base_url: config.backend_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, transition: Transition) -> String {
        match transition {
            Transition::CheckIn => format!("{}/checkin", self.base_url),
            Transition::CheckOut => format!("{}/checkout", self.base_url),
        }
    }
}

impl Backend for BackendClient {
    /// Multipart POST: `data` carries the JSON record, `photo` the image
    /// bytes with filename and MIME type taken from the captured file.
    async fn submit(&self, record: &CheckRecord, photo: &PhotoHandle) -> Result<(), Error> {
        let bytes = tokio::fs::read(photo.path())
            .await
            .map_err(|e| Error::Submission(format!("read photo {}: {e}", photo.path().display())))?;

        let data = serde_json::to_string(record)
            .map_err(|e| Error::Submission(format!("encode record: {e}")))?;

        let photo_part = Part::bytes(bytes)
            .file_name(photo.file_name())
            .mime_str(&photo.mime_type())
            .map_err(|e| Error::Submission(format!("photo part: {e}")))?;

        let form = Form::new().text("data", data).part("photo", photo_part);

        let url = self.endpoint(record.kind);
        debug!(%url, kind = %record.kind, "posting transition");

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, %url, "transition request failed");
                Error::Submission(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, body = %body, %url, "backend rejected transition");
            return Err(Error::Submission(format!("{status}: {body}")));
        }

        Ok(())
    }

    /// Dates with marked attendance, for the calendar. Entries that fail to
    /// parse are skipped.
    async fn marked_dates(&self) -> Result<Vec<NaiveDate>, Error> {
        let url = format!("{}/fetch-marked-dates", self.base_url);

        let raw: Vec<String> = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Submission(e.to_string()))?
            .error_for_status()
            .map_err(|e| Error::Submission(e.to_string()))?
            .json()
            .await
            .map_err(|e| Error::Submission(format!("decode marked dates: {e}")))?;

        Ok(parse_marked_dates(raw))
    }
}

/// Normalize the backend's date strings (plain dates or full timestamps) to
/// calendar days.
fn parse_marked_dates(raw: Vec<String>) -> Vec<NaiveDate> {
    raw.iter()
        .filter_map(|value| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .or_else(|| {
                    DateTime::parse_from_rfc3339(value)
                        .ok()
                        .map(|dt| dt.date_naive())
                })
                .or_else(|| {
                    warn!(%value, "skipping unparseable marked date");
                    None
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marked_dates_accepts_days_and_timestamps() {
        let dates = parse_marked_dates(vec![
            "2026-08-01".to_string(),
            "2026-08-02T00:00:00.000Z".to_string(),
            "not a date".to_string(),
        ]);
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 8, 2).unwrap(),
            ]
        );
    }

    #[test]
    fn endpoints_follow_the_transition() {
        let config = Config {
            backend_base_url: "https://attendance.example.com/".to_string(),
            ..Config::for_tests()
        };
        let client = BackendClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint(Transition::CheckIn),
            "https://attendance.example.com/checkin"
        );
        assert_eq!(
            client.endpoint(Transition::CheckOut),
            "https://attendance.example.com/checkout"
        );
    }
}
