//! Transaction deadlines.
//!
//! A deadline is milliseconds since the Nemesis block
//! (2016-04-01T00:00:00Z). Nodes drop transactions whose deadline has
//! passed.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use std::time::Duration;

use crate::codec::FixedWidth;
use crate::config::{DEFAULT_DEADLINE_SECS, NEMESIS_EPOCH_MS};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Deadline(u64);

impl Deadline {
    pub const CATBUFFER_SIZE: usize = 8;

    /// Raw milliseconds since Nemesis.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// `duration` from now.
    pub fn create(duration: Duration) -> Self {
        let offset = i64::try_from(duration.as_millis()).unwrap_or(i64::MAX);
        Self::from_unix_millis(Utc::now().timestamp_millis().saturating_add(offset))
    }

    /// Deadlines before Nemesis clamp to zero.
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self::from_unix_millis(at.timestamp_millis())
    }

    fn from_unix_millis(millis: i64) -> Self {
        Self(u64::try_from(millis.saturating_sub(NEMESIS_EPOCH_MS)).unwrap_or(0))
    }

    pub fn to_datetime(self) -> Result<DateTime<Utc>> {
        let millis = i64::try_from(self.0)
            .ok()
            .and_then(|ms| ms.checked_add(NEMESIS_EPOCH_MS))
            .ok_or_else(|| Error::Overflow(format!("deadline {} out of range", self.0)))?;
        Utc.timestamp_millis_opt(millis)
            .single()
            .ok_or_else(|| Error::Overflow(format!("deadline {} out of range", self.0)))
    }

    pub fn to_dto(self) -> Value {
        self.0.to_dto()
    }

    pub fn from_dto(dto: &Value) -> Result<Self> {
        u64::from_dto(dto).map(Self)
    }
}

impl Default for Deadline {
    /// Two hours from now.
    fn default() -> Self {
        Self::create(Duration::from_secs(DEFAULT_DEADLINE_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nemesis_is_zero() {
        let nemesis = Utc.with_ymd_and_hms(2016, 4, 1, 0, 0, 0).unwrap();
        assert_eq!(Deadline::from_datetime(nemesis).value(), 0);
        assert_eq!(Deadline::new(0).to_datetime().unwrap(), nemesis);
    }

    #[test]
    fn create_is_in_the_future() {
        let now = Deadline::from_datetime(Utc::now());
        let later = Deadline::create(Duration::from_secs(60));
        let delta = later.value() - now.value();
        assert!((59_000..=61_000).contains(&delta), "delta was {delta}");
    }

    #[test]
    fn default_is_two_hours() {
        let now = Deadline::from_datetime(Utc::now()).value();
        let delta = Deadline::default().value() - now;
        assert!(delta >= 2 * 60 * 60 * 1000 - 1000);
    }

    #[test]
    fn dto_form() {
        let deadline = Deadline::new(0x1_0000_0002);
        assert_eq!(deadline.to_dto(), serde_json::json!([2, 1]));
        assert_eq!(Deadline::from_dto(&deadline.to_dto()).unwrap(), deadline);
    }
}
