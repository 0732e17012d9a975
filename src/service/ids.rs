//! Timestamp-derived identifier tokens for alerts and reports

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Prefix for alert identifiers
pub const ALERT_ID_PREFIX: &str = "EM";

/// Prefix for report identifiers
pub const REPORT_ID_PREFIX: &str = "RPT";

// Bare second-resolution timestamps collide when two calls land in the
// same second, so every token also carries a per-process sequence number.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// New alert identifier, e.g. `EM-20250812070000-0001`
pub fn alert_token() -> String {
    timestamp_token(ALERT_ID_PREFIX)
}

/// New report identifier, e.g. `RPT-20250812070000-0002`
pub fn report_token() -> String {
    timestamp_token(REPORT_ID_PREFIX)
}

fn timestamp_token(prefix: &str) -> String {
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed) % 10_000;
    format!("{}-{}-{:04}", prefix, Utc::now().format("%Y%m%d%H%M%S"), seq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tokens_carry_their_prefix() {
        assert!(alert_token().starts_with("EM-"));
        assert!(report_token().starts_with("RPT-"));
    }

    #[test]
    fn tokens_are_distinct_within_a_second() {
        let tokens: HashSet<String> = (0..100).map(|_| report_token()).collect();
        assert_eq!(tokens.len(), 100);
    }

    #[test]
    fn token_shape_is_prefix_timestamp_sequence() {
        let token = report_token();
        let parts: Vec<&str> = token.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "RPT");
        assert_eq!(parts[1].len(), 14);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 4);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
    }
}
