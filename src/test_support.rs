use chrono::{DateTime, Local, Utc};
use mockable::Clock;

/// A clock frozen at one instant, given in Unix milliseconds.
#[derive(Debug, Clone, Copy)]
pub struct FrozenClock(pub i64);

impl Clock for FrozenClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.0).unwrap_or_default()
    }
}
