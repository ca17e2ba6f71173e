use moka::future::Cache;
use once_cell::sync::Lazy;
use std::time::Duration;

use crate::model::session::GeoPoint;

/// key => formatted address for that position
pub static GEOCODE_CACHE: Lazy<Cache<String, String>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(10_000)
        .time_to_live(Duration::from_secs(86400)) // 24h TTL
        .build()
});

/// Positions within ~1m share a cache entry.
fn cache_key(point: &GeoPoint) -> String {
    format!("{:.5},{:.5}", point.latitude, point.longitude)
}

/// Remember the resolved address for a position
pub async fn record(point: &GeoPoint, address: &str) {
    GEOCODE_CACHE
        .insert(cache_key(point), address.to_string())
        .await;
}

/// Check for a previously resolved address
pub async fn lookup(point: &GeoPoint) -> Option<String> {
    GEOCODE_CACHE.get(&cache_key(point)).await
}

/// Batch record resolved addresses
async fn batch_record(entries: &[(GeoPoint, String)]) {
    let futures: Vec<_> = entries
        .iter()
        .map(|(point, address)| GEOCODE_CACHE.insert(cache_key(point), address.clone()))
        .collect();

    // Await all insertions concurrently
    futures::future::join_all(futures).await;
}

/// Seed the cache with known positions (e.g. the kiosk's provisioned address)
pub async fn warm(entries: Vec<(GeoPoint, String)>) {
    let total = entries.len();
    batch_record(&entries).await;
    tracing::info!(total, "geocode cache warmup complete");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn warm_then_lookup() {
        let point = GeoPoint {
            latitude: 52.52001,
            longitude: 13.40495,
        };
        assert_eq!(lookup(&point).await, None);

        warm(vec![(point, "Berlin, Germany".to_string())]).await;
        assert_eq!(lookup(&point).await, Some("Berlin, Germany".to_string()));
    }

    #[tokio::test]
    async fn nearby_positions_share_an_entry() {
        let a = GeoPoint {
            latitude: 40.712800,
            longitude: -74.006000,
        };
        let b = GeoPoint {
            latitude: 40.712801, // rounds to the same 5-decimal key
            longitude: -74.006001,
        };
        record(&a, "NYC").await;
        assert_eq!(lookup(&b).await, Some("NYC".to_string()));
    }
}
