//! Object key naming for stored posts.

use crate::config::ObjectKeyStrategy;
use chrono::{DateTime, TimeZone};
use uuid::Uuid;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct ObjectKeyBuilder {
    prefix: String,
    strategy: ObjectKeyStrategy,
}

impl ObjectKeyBuilder {
    pub fn new(prefix: impl Into<String>, strategy: ObjectKeyStrategy) -> Self {
        let prefix: String = prefix.into();
        Self {
            prefix: prefix.trim_end_matches('/').to_string(),
            strategy,
        }
    }

    /// Key for a post generated at `now`. `invocation_id` falls back to a
    /// random UUID when the runtime did not supply one.
    pub fn key_for<Tz>(&self, now: &DateTime<Tz>, invocation_id: Option<&str>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let timestamp = now.format(TIMESTAMP_FORMAT);
        match self.strategy {
            ObjectKeyStrategy::Timestamp => format!("{}/{}.txt", self.prefix, timestamp),
            ObjectKeyStrategy::Unique => {
                let id = match invocation_id.filter(|id| !id.is_empty()) {
                    Some(id) => id.to_string(),
                    None => Uuid::new_v4().to_string(),
                };
                format!("{}/{}-{}.txt", self.prefix, timestamp, id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn at_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 12, 5, 7).unwrap()
    }

    #[test]
    fn timestamp_strategy_matches_legacy_layout() {
        let keys = ObjectKeyBuilder::new("blog-output", ObjectKeyStrategy::Timestamp);
        assert_eq!(
            keys.key_for(&at_noon(), Some("ignored")),
            "blog-output/2024-03-09 12:05:07.txt"
        );
    }

    #[test]
    fn unique_strategy_appends_invocation_id() {
        let keys = ObjectKeyBuilder::new("blog-output/", ObjectKeyStrategy::Unique);
        assert_eq!(
            keys.key_for(&at_noon(), Some("req-42")),
            "blog-output/2024-03-09 12:05:07-req-42.txt"
        );
    }

    #[test]
    fn unique_strategy_never_collides_within_a_second() {
        let keys = ObjectKeyBuilder::new("blog-output", ObjectKeyStrategy::Unique);
        let first = keys.key_for(&at_noon(), None);
        let second = keys.key_for(&at_noon(), None);
        assert_ne!(first, second);
        assert!(first.starts_with("blog-output/2024-03-09 12:05:07-"));
        assert!(first.ends_with(".txt"));
    }
}
