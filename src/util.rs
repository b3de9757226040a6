//! Day-granularity arithmetic shared by both trackers.
//!
//! All derived values (days remaining, days until next start, days since
//! start) divide a millisecond span into whole days. Euclidean division
//! keeps floor/ceiling correct for negative spans.

pub(crate) const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Ceiling division of a millisecond span into whole days.
pub(crate) fn ceil_days(ms: i64) -> i64 {
    let days = ms.div_euclid(MS_PER_DAY);
    if ms.rem_euclid(MS_PER_DAY) > 0 {
        days + 1
    } else {
        days
    }
}

/// Floor division of a millisecond span into whole days.
pub(crate) fn floor_days(ms: i64) -> i64 {
    ms.div_euclid(MS_PER_DAY)
}
