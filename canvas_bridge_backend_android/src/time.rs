// Copyright 2026 the Canvas Bridge Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Android host clock reads.
//!
//! `MotionEvent.getEventTime` and `Choreographer` timestamps are both
//! `CLOCK_MONOTONIC` nanoseconds, so gesture deadlines computed from event
//! times can be compared directly against [`now`].

use canvas_bridge_core::time::HostTime;
use rustix::time::{ClockId, Timespec, clock_gettime};

const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// Returns the current monotonic host time in nanoseconds.
#[must_use]
pub fn now() -> HostTime {
    timespec_to_host_time(clock_gettime(ClockId::Monotonic))
}

fn timespec_to_host_time(timespec: Timespec) -> HostTime {
    let seconds = u64::try_from(timespec.tv_sec).unwrap_or(0);
    let nanos = u64::try_from(timespec.tv_nsec)
        .unwrap_or(0)
        .min(999_999_999);

    let total = u128::from(seconds)
        .saturating_mul(NANOS_PER_SECOND)
        .saturating_add(u128::from(nanos));
    HostTime(u64::try_from(total).unwrap_or(u64::MAX))
}
