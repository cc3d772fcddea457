//! Process-wide tracing bootstrap.
//!
//! Called exactly once at startup; the two effective settings are the
//! minimum level and the structured-vs-human output flag. There is no
//! runtime reconfiguration, teardown happens implicitly at process exit.
//! Every emitted line inherits the `request_id` field from the per-request
//! span opened in [`crate::middleware::request_id`].

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

pub fn init(cfg: &LogConfig) {
    // RUST_LOG still wins for ad-hoc debugging.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));

    if cfg.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .flatten_event(true)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
