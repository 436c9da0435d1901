use std::sync::Arc;

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, Offset, Timelike, Utc};

/// Local wall clock used to stamp submissions and to decide what "today" is.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

pub type SharedClock = Arc<dyn Clock>;

/// Wall clock pinned to a fixed UTC offset, truncated to whole seconds.
#[derive(Debug, Clone, Copy)]
pub struct OffsetClock {
    offset: FixedOffset,
}

impl OffsetClock {
    /// Offsets outside +/- 24h fall back to UTC.
    pub fn from_minutes(minutes: i32) -> Self {
        let offset = FixedOffset::east_opt(minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix());
        Self { offset }
    }
}

impl Clock for OffsetClock {
    fn now(&self) -> NaiveDateTime {
        let local = Utc::now().with_timezone(&self.offset).naive_local();
        local.with_nanosecond(0).unwrap_or(local)
    }
}

/// A clock that always reports the same instant.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FrozenClock(pub NaiveDateTime);

#[cfg(test)]
impl Clock for FrozenClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
