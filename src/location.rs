use serde::Deserialize;
use tracing::warn;

use crate::error::Error;
use crate::model::session::GeoPoint;
use crate::utils::geocode_cache;

/// Platform positioning, behind a seam so the core never touches the SDK.
/// A denied permission surfaces as `Error::PermissionDenied`.
pub trait LocationProvider {
    async fn current_location(&self) -> Result<GeoPoint, Error>;
}

/// Reverse geocoding. `Ok(None)` means the position resolved to nothing.
pub trait Geocoder {
    async fn reverse_geocode(&self, point: GeoPoint) -> Result<Option<Address>, Error>;
}

/// Components a reverse-geocode lookup may return; any of them can be absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Address {
    pub formatted: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// Single display string assembled from whatever components are present.
    pub fn display(&self) -> String {
        let part = |v: &Option<String>| v.clone().unwrap_or_default();
        format!(
            " {}, {}, {}, {}, {}",
            part(&self.formatted),
            part(&self.city),
            part(&self.region),
            part(&self.postal_code),
            part(&self.country),
        )
        .trim()
        .to_string()
    }
}

/// Resolve a position to a display address, consulting the geocode cache
/// first. Lookup failure is non-fatal and degrades to a placeholder.
pub async fn resolve_address<G: Geocoder>(geocoder: &G, point: GeoPoint) -> String {
    if let Some(cached) = geocode_cache::lookup(&point).await {
        return cached;
    }

    match geocoder.reverse_geocode(point).await {
        Ok(Some(address)) => {
            let display = address.display();
            geocode_cache::record(&point, &display).await;
            display
        }
        Ok(None) => "Address not found".to_string(),
        Err(e) => {
            warn!(error = %e, "reverse geocode failed");
            "Error fetching address".to_string()
        }
    }
}

/// Shareable link to the current position.
pub fn maps_url(point: GeoPoint) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={},{}",
        point.latitude, point.longitude
    )
}

/// Kiosk deployments sit at a provisioned position; the mobile SDK provider
/// lives outside this crate. A device without a provisioned position behaves
/// like one whose location permission was refused.
pub struct FixedLocation {
    point: Option<GeoPoint>,
}

impl FixedLocation {
    pub fn new(point: Option<GeoPoint>) -> Self {
        Self { point }
    }
}

impl LocationProvider for FixedLocation {
    async fn current_location(&self) -> Result<GeoPoint, Error> {
        self.point.ok_or_else(|| {
            Error::PermissionDenied("no position provisioned for this device".to_string())
        })
    }
}

/// Companion geocoder for fixed deployments: one provisioned address string,
/// or nothing.
pub struct FixedAddress {
    formatted: Option<String>,
}

impl FixedAddress {
    pub fn new(formatted: Option<String>) -> Self {
        Self { formatted }
    }
}

impl Geocoder for FixedAddress {
    async fn reverse_geocode(&self, _point: GeoPoint) -> Result<Option<Address>, Error> {
        Ok(self.formatted.clone().map(|formatted| Address {
            formatted: Some(formatted),
            ..Address::default()
        }))
    }
}
