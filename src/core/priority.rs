//! Urgency score derived from remaining work and time left until a deadline.
//!
//! With `T = deadline - now` and `D = remaining`:
//!
//! * `T >= D`: `D / T`, below or at 1 while there is slack;
//! * `0 < T < D`: `D / T`, above 1 once the work no longer fits;
//! * `T <= 0`: `(D - T) / D`, growing as the overdue time accumulates.

use crate::errors::{Error, Result};
use chrono::{Duration, NaiveDateTime};

/// Priority given to a task whose score has a zero denominator.
pub const PRIORITY_CEILING: f64 = f64::MAX;

/// Tasks scoring above this are overdue or overcommitted.
pub const EMERGENCY_THRESHOLD: f64 = 1.0;

/// Priority of `remaining` work due at `deadline`, seen from `now`.
///
/// Degenerate inputs (`T == 0` with slack, or `D == 0` once overdue) resolve
/// to [`PRIORITY_CEILING`].
pub fn priority(remaining: Duration, deadline: NaiveDateTime, now: NaiveDateTime) -> f64 {
    try_priority(remaining, deadline, now).unwrap_or(PRIORITY_CEILING)
}

pub(crate) fn try_priority(
    remaining: Duration,
    deadline: NaiveDateTime,
    now: NaiveDateTime,
) -> Result<f64> {
    let to_deadline = deadline.signed_duration_since(now);
    let degenerate = || Error::DegenerateInterval {
        remaining,
        to_deadline,
    };

    let t = to_deadline.num_milliseconds() as f64;
    let d = remaining.num_milliseconds() as f64;

    if to_deadline >= remaining {
        if to_deadline.is_zero() {
            return Err(degenerate());
        }
        Ok(d / t)
    } else if to_deadline > Duration::zero() {
        // NOTE: same expression as the slack branch. Kept as-is; a distinct
        // formula was probably intended here.
        Ok(d / t)
    } else {
        if remaining.is_zero() {
            return Err(degenerate());
        }
        Ok((d - t) / d)
    }
}
