use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;

#[derive(Clone)]
pub struct Config {
    pub backend_base_url: String,
    pub state_path: PathBuf,
    pub http_timeout_secs: u64,

    // Kiosk deployments: provisioned position and optional address.
    // Absent coordinates behave like a denied location permission.
    pub kiosk_latitude: Option<f64>,
    pub kiosk_longitude: Option<f64>,
    pub kiosk_address: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            backend_base_url: env::var("BACKEND_BASE_URL").expect("BACKEND_BASE_URL must be set"),
            state_path: env::var("STATE_PATH")
                .unwrap_or_else(|_| "attendance-state.json".to_string())
                .into(),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap(),
            kiosk_latitude: env::var("KIOSK_LATITUDE").ok().map(|v| v.parse().unwrap()),
            kiosk_longitude: env::var("KIOSK_LONGITUDE").ok().map(|v| v.parse().unwrap()),
            kiosk_address: env::var("KIOSK_ADDRESS").ok(),
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            backend_base_url: "http://localhost:9999".to_string(),
            state_path: "attendance-state.json".into(),
            http_timeout_secs: 5,
            kiosk_latitude: None,
            kiosk_longitude: None,
            kiosk_address: None,
        }
    }
}
