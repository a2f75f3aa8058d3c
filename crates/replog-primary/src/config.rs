use std::time::Duration;

use replog_core::{parse_secondary_urls, Mode};
use url::Url;

/// Alias so `clap`'s derive macro treats this field as a single value parsed
/// by `parse_secondary_urls`, rather than inferring "one value per
/// occurrence" from a literal `Vec<Url>` field type.
type SecondaryUrls = Vec<Url>;

#[derive(clap::Parser, Debug)]
#[clap(author, version, about = "Primary node of a replicated append-only log")]
pub struct Args {
    /// Declared process role. This binary only ever runs as `primary`; any
    /// other value is a startup-fatal misconfiguration, checked in `main`.
    #[clap(long, env = "APP_MODE", value_enum, default_value_t = Mode::Primary)]
    pub mode: Mode,

    /// Port the primary HTTP server binds to.
    #[clap(long, env = "PRIMARY_SERVER_PORT", default_value = "8000")]
    pub port: u16,

    /// Comma-separated list of secondary base URLs. Required: startup-fatal
    /// if missing, empty, or containing an entry without scheme+host.
    #[clap(long, env = "SECONDARY_URLS", value_parser = parse_secondary_urls)]
    pub secondary_urls: SecondaryUrls,

    /// Per-request timeout applied to both health probes and replicate POSTs.
    #[clap(long, env = "REQUEST_TIMEOUT_MILLISECONDS", default_value = "50")]
    pub request_timeout_ms: u64,

    /// Health-check probe period.
    #[clap(long, env = "HEALTHCHECK_PERIOD_MILLISECOND", default_value = "500")]
    pub healthcheck_period_ms: u64,

    /// Base delay for the delivery worker's jittered exponential backoff.
    #[clap(long, env = "BACKOFF_BASE_MILLISECONDS", default_value = "10")]
    pub backoff_base_ms: u64,
}

impl Args {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn healthcheck_period(&self) -> Duration {
        Duration::from_millis(self.healthcheck_period_ms)
    }

    pub fn backoff_base(&self) -> Duration {
        Duration::from_millis(self.backoff_base_ms)
    }
}
