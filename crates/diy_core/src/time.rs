//! Wall-clock helper shared by store and persistence.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current Unix time in epoch milliseconds. Clocks set before 1970 read as 0.
pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
