//! Earth-orientation policy.
//!
//! Precise sidereal time needs the UT1 time scale, whose offset from UTC is
//! published by the IERS and normally fetched over the network. This core
//! never performs that fetch: the offset is below a second, negligible at
//! the angular scale of a clash or availability search, and a network
//! dependency would make results non-deterministic. The engines call
//! [`init_offline`] once at the start of a computation; test suites may
//! call it directly.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::constants::MJD;

static OFFLINE: AtomicBool = AtomicBool::new(false);

/// Record, once per process, that Earth-orientation corrections are not
/// downloaded and UT1 is approximated by UTC. Idempotent.
pub fn init_offline() {
    if !OFFLINE.swap(true, Ordering::SeqCst) {
        log::debug!("Earth orientation corrections disabled; UT1-UTC taken as zero");
    }
}

pub fn is_offline() -> bool {
    OFFLINE.load(Ordering::SeqCst)
}

/// UT1 epoch corresponding to a UTC epoch under the offline policy.
pub(crate) fn ut1_from_utc_mjd(mjd: MJD) -> MJD {
    mjd
}

#[cfg(test)]
mod earth_orientation_test {
    use super::*;

    #[test]
    fn test_init_idempotent() {
        init_offline();
        assert!(is_offline());
        init_offline();
        assert!(is_offline());
    }
}
