pub mod geocode_cache;
pub mod timefmt;
