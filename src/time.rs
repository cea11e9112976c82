//! Calendar helpers and sidereal time.

use hifitime::{Epoch, Unit};

use crate::constants::{Radian, DPI, MJD, T2000};

/// Length of a date range in days (negative when `end` precedes `start`).
pub fn days_between(start: Epoch, end: Epoch) -> f64 {
    (end - start).to_unit(Unit::Day)
}

/// Format an epoch's UTC calendar date as `YYYY-MM-DD`.
pub fn format_date(epoch: Epoch) -> String {
    let (year, month, day, ..) = epoch.to_gregorian_utc();
    format!("{year:04}-{month:02}-{day:02}")
}

/// Format a time of day given in seconds as `HH:MM`, wrapping past
/// midnight.
pub fn format_time_of_day(seconds: u64) -> String {
    let hours = (seconds / 3600) % 24;
    let minutes = (seconds % 3600) / 60;
    format!("{hours:02}:{minutes:02}")
}

/// Compute the Greenwich Mean Sidereal Time in radians for a Modified
/// Julian Date on the UT1 time scale.
///
/// Uses the IAU 1982 polynomial for mean sidereal time at 0h UT1 plus the
/// fractional-day term scaled by the sidereal-to-solar day ratio. The
/// result is normalized to [0, 2π).
pub fn gmst(tjm: MJD) -> Radian {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    let day_start = tjm.floor();
    let t = (day_start - T2000) / 36525.0;

    let mut gmst0 = ((C3 * t + C2) * t + C1) * t + C0;
    gmst0 *= DPI / 86400.0;

    let fraction_angle = tjm.fract() * DPI;
    let mut gmst = gmst0 + fraction_angle * RAP;

    let whole_turns = (gmst / DPI).floor();
    gmst - whole_turns * DPI
}
