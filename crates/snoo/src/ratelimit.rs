//! Rate-limit counters reported by the server.

use reqwest::header::HeaderMap;

/// Header carrying the number of requests used in the current window.
pub const HEADER_USED: &str = "x-ratelimit-used";
/// Header carrying the number of requests left in the current window.
pub const HEADER_REMAINING: &str = "x-ratelimit-remaining";
/// Header carrying the seconds until the window resets.
pub const HEADER_RESET: &str = "x-ratelimit-reset";

/// Rate-limit usage as last reported by the server.
///
/// This is bookkeeping only. Nothing in the crate waits or throttles based on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimit {
    /// Requests used in the current window.
    pub used: u32,
    /// Requests remaining in the current window.
    pub remaining: u32,
    /// Seconds until the window resets.
    pub reset_seconds: u32,
}

impl RateLimit {
    /// Overwrite counters from response headers.
    ///
    /// An absent header leaves its counter untouched; a header that is
    /// present but unparsable resets the counter to zero.
    pub fn update_from_headers(&mut self, headers: &HeaderMap) {
        apply(&mut self.used, headers, HEADER_USED);
        apply(&mut self.remaining, headers, HEADER_REMAINING);
        apply(&mut self.reset_seconds, headers, HEADER_RESET);
    }
}

fn apply(counter: &mut u32, headers: &HeaderMap, name: &str) {
    if let Some(value) = headers.get(name) {
        *counter = value.to_str().ok().and_then(parse_counter).unwrap_or(0);
    }
}

/// Parse a non-negative counter. The server sometimes sends "598.0".
fn parse_counter(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u32>() {
        return Some(n);
    }
    let f = raw.parse::<f64>().ok()?;
    (f.is_finite() && f >= 0.0 && f <= f64::from(u32::MAX)).then(|| f.trunc() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn reads_all_three_counters() {
        let mut limit = RateLimit::default();
        limit.update_from_headers(&headers(&[
            ("x-ratelimit-used", "4"),
            ("x-ratelimit-remaining", "596"),
            ("x-ratelimit-reset", "312"),
        ]));
        assert_eq!(
            limit,
            RateLimit {
                used: 4,
                remaining: 596,
                reset_seconds: 312
            }
        );
    }

    #[test]
    fn absent_headers_keep_last_known_values() {
        let mut limit = RateLimit {
            used: 1,
            remaining: 2,
            reset_seconds: 3,
        };
        limit.update_from_headers(&headers(&[("x-ratelimit-used", "7")]));
        assert_eq!(limit.used, 7);
        assert_eq!(limit.remaining, 2);
        assert_eq!(limit.reset_seconds, 3);
    }

    #[test]
    fn unparsable_headers_reset_to_zero() {
        let mut limit = RateLimit {
            used: 1,
            remaining: 2,
            reset_seconds: 3,
        };
        limit.update_from_headers(&headers(&[
            ("x-ratelimit-used", "lots"),
            ("x-ratelimit-remaining", "-4"),
        ]));
        assert_eq!(limit.used, 0);
        assert_eq!(limit.remaining, 0);
        assert_eq!(limit.reset_seconds, 3);
    }

    #[test]
    fn fractional_counters_are_truncated() {
        assert_eq!(parse_counter("598.0"), Some(598));
        assert_eq!(parse_counter("12.9"), Some(12));
        assert_eq!(parse_counter("NaN"), None);
    }
}
