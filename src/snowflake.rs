use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Discord's epoch offset: first second of 2015, in milliseconds.
const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

/// Creation timestamp (unix milliseconds) encoded in a snowflake id.
/// Returns `None` when the id is not a valid unsigned integer string.
pub fn created_timestamp(id: &str) -> Option<u64> {
    id.parse::<u64>().ok().map(|id| (id >> 22) + DISCORD_EPOCH_MS)
}

/// Creation time encoded in a snowflake id.
pub fn created_at(id: &str) -> Option<SystemTime> {
    created_timestamp(id).map(|ms| UNIX_EPOCH + Duration::from_millis(ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_snowflake_timestamp() {
        let expected = (175928847299117063u64 >> 22) + 1_420_070_400_000;
        assert_eq!(created_timestamp("175928847299117063"), Some(expected));
    }

    #[test]
    fn non_numeric_id_yields_none() {
        assert_eq!(created_timestamp("not-a-snowflake"), None);
        assert_eq!(created_timestamp(""), None);
        assert_eq!(created_timestamp("-5"), None);
    }

    #[test]
    fn created_at_matches_timestamp() {
        let ms = created_timestamp("175928847299117063").unwrap();
        let at = created_at("175928847299117063").unwrap();
        assert_eq!(at, UNIX_EPOCH + Duration::from_millis(ms));
    }
}
