use std::time::Duration;
use tracing::{warn, Level};

const DEFAULT_POLL_INTERVAL_MINUTES: u64 = 10;
/// One week
const MAX_POLL_INTERVAL_MINUTES: u64 = 7 * 24 * 60;

#[derive(Debug, Clone)]
pub struct PollerConfig {
    pub poll_interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_MINUTES * 60),
        }
    }
}

impl PollerConfig {
    /// Reads `POLL_INTERVAL` (minutes). Call after logging is set up so
    /// fallbacks are reported.
    pub fn from_env() -> Self {
        let raw = std::env::var("POLL_INTERVAL").ok();
        Self {
            poll_interval: parse_poll_interval(raw.as_deref()),
        }
    }
}

/// Max log level from `LOG_LEVEL`, `info` when unset or unknown.
pub fn log_level_from_env() -> Level {
    parse_log_level(std::env::var("LOG_LEVEL").ok().as_deref())
}

fn parse_log_level(raw: Option<&str>) -> Level {
    raw.and_then(|level| level.trim().to_ascii_lowercase().parse().ok())
        .unwrap_or(Level::INFO)
}

fn parse_poll_interval(raw: Option<&str>) -> Duration {
    let minutes = raw
        .map(str::trim)
        .and_then(|minutes| minutes.parse::<u64>().ok())
        .filter(|minutes| (1..=MAX_POLL_INTERVAL_MINUTES).contains(minutes));

    match minutes.and_then(|minutes| minutes.checked_mul(60)) {
        Some(seconds) => Duration::from_secs(seconds),
        None => {
            warn!(
                "failed to parse poll interval from [{}], expected 1 to {} minutes. Using fallback of {} minutes.",
                raw.unwrap_or_default(),
                MAX_POLL_INTERVAL_MINUTES,
                DEFAULT_POLL_INTERVAL_MINUTES
            );
            PollerConfig::default().poll_interval
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_interval_is_given_in_minutes() {
        assert_eq!(parse_poll_interval(Some("5")), Duration::from_secs(300));
        assert_eq!(parse_poll_interval(Some(" 1 ")), Duration::from_secs(60));
    }

    #[test]
    fn poll_interval_falls_back_to_ten_minutes() {
        let fallback = Duration::from_secs(600);
        assert_eq!(parse_poll_interval(None), fallback);
        assert_eq!(parse_poll_interval(Some("soon")), fallback);
        assert_eq!(parse_poll_interval(Some("0")), fallback);
        assert_eq!(parse_poll_interval(Some("-3")), fallback);
    }

    #[test]
    fn out_of_range_poll_interval_falls_back() {
        let fallback = Duration::from_secs(600);
        assert_eq!(parse_poll_interval(Some("18446744073709551615")), fallback);
        assert_eq!(parse_poll_interval(Some("307445734561825861")), fallback);
        assert_eq!(parse_poll_interval(Some("10081")), fallback);
        assert_eq!(
            parse_poll_interval(Some("10080")),
            Duration::from_secs(10080 * 60)
        );
    }

    #[test]
    fn log_level_defaults_to_info() {
        assert_eq!(parse_log_level(Some("debug")), Level::DEBUG);
        assert_eq!(parse_log_level(Some("WARN")), Level::WARN);
        assert_eq!(parse_log_level(Some("loud")), Level::INFO);
        assert_eq!(parse_log_level(None), Level::INFO);
    }
}
