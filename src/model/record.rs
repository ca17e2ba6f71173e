use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::session::{GeoPoint, Transition};

/// Submission payload for `POST /checkin` and `POST /checkout`, sent as the
/// JSON-encoded `data` part of the multipart form. Field names are fixed by
/// the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRecord {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: Transition,
    pub location: GeoPoint,
    pub time: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_the_backend_field_names() {
        let record = CheckRecord {
            user_id: "emp-42".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 8, 7).unwrap(),
            kind: Transition::CheckIn,
            location: GeoPoint {
                latitude: 23.81,
                longitude: 90.41,
            },
            time: "09:15:00".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "userId": "emp-42",
                "date": "2026-08-07",
                "type": "check-in",
                "location": { "latitude": 23.81, "longitude": 90.41 },
                "time": "09:15:00",
            })
        );
    }
}
