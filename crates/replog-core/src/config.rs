use std::fmt;

use url::Url;

/// Declared process role, set via `--mode`/`APP_MODE`. Each binary knows its
/// own role already (it's a different executable), so this exists purely as
/// a config knob to validate against: a primary started with `mode=secondary`
/// (or vice versa) is a startup-fatal misconfiguration rather than a silent
/// no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    Primary,
    Secondary,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Primary => write!(f, "primary"),
            Mode::Secondary => write!(f, "secondary"),
        }
    }
}

/// Parses `SECONDARY_URLS`/`--secondary-urls`: a comma-separated list of
/// absolute URLs. Fatal (a `clap` validation error via `value_parser`) if the
/// list is empty or any entry lacks a scheme and host, so a bad config exits
/// the process before the listener ever binds, with no hand-rolled
/// process-exit logic needed.
pub fn parse_secondary_urls(raw: &str) -> Result<Vec<Url>, String> {
    let urls: Result<Vec<Url>, String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let url = Url::parse(s).map_err(|e| format!("invalid secondary url {s:?}: {e}"))?;
            if url.host_str().is_none() {
                return Err(format!("secondary url {s:?} has no host"));
            }
            Ok(url)
        })
        .collect();
    let urls = urls?;

    if urls.is_empty() {
        return Err("SECONDARY_URLS must contain at least one url".to_string());
    }
    Ok(urls)
}
