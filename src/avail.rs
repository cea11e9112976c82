//! Target availability computation.
//!
//! Given a list of targets, a date range and an observing site, computes a
//! 2-D occupancy table: for a grid of date and time-of-day samples, how
//! many targets sit above the site's minimum elevation, plus per-target
//! visibility percentages.
//!
//! The altitude of every target at every sample is evaluated from one
//! batched matrix, after concatenating the target coordinates into a
//! single ICRS batch; transforming targets one by one would be far slower
//! than the single pass and is deliberately avoided.

use hifitime::{Epoch, Unit};
use nalgebra::DMatrix;
use serde::Serialize;

use crate::constants::{Degree, MAX_DATE_RANGE_DAYS, RADEG, SECONDS_PER_DAY};
use crate::coords::CoordBatch;
use crate::earth_orientation;
use crate::hedwig_errors::HedwigError;
use crate::site::ObservingSite;
use crate::targets::TargetObject;
use crate::time::{days_between, format_date, format_time_of_day, gmst};

/// Result of one availability computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Availability {
    /// Ordered by date: date string and the per-time-slot count of
    /// available targets.
    pub dates: Vec<(String, Vec<u32>)>,
    /// Formatted time-of-day labels for the columns of each date row.
    pub times: Vec<String>,
    /// Largest count in the table, at least 1 so displays can scale by it.
    pub max_count: u32,
    /// Ordered by input: target name and percentage of samples available.
    /// Empty unless more than one target was given.
    pub target_percent: Vec<(String, f64)>,
    /// The minimum elevation used, echoed for display.
    pub el_min: Degree,
}

/// Choose the date sampling step, in days, for a range of the given
/// length. Bounds the total sample count however wide a range the user
/// requests; an inverted or excessive range is rejected outright.
pub fn choose_date_step(days: f64) -> Result<i64, HedwigError> {
    if days < 0.0 {
        return Err(HedwigError::DateRangeInverted);
    }
    if days > MAX_DATE_RANGE_DAYS {
        return Err(HedwigError::DateRangeExcessive {
            days: days.ceil() as i64,
        });
    }
    Ok(if days <= 7.0 {
        1
    } else if days <= 92.0 {
        7
    } else if days <= 190.0 {
        14
    } else {
        28
    })
}

/// Time-of-day sampling step in seconds: hourly, or two-hourly for shifts
/// longer than twelve hours.
pub fn choose_time_step(shift_hours: f64) -> u64 {
    if shift_hours > 12.0 {
        7200
    } else {
        3600
    }
}

/// Compute the availability table for the given targets and date range.
pub fn compute_availability(
    targets: &[TargetObject],
    site: &ObservingSite,
    date_start: Epoch,
    date_end: Epoch,
) -> Result<Availability, HedwigError> {
    earth_orientation::init_offline();

    let range_days = days_between(date_start, date_end);
    let date_step = choose_date_step(range_days)?;

    // The shift is capped at a full day for sampling purposes even if
    // configured longer.
    let shift_hours = site.shift_duration.min(24.0);
    let time_step = choose_time_step(shift_hours);
    let shift_start_seconds = (site.shift_start * 3600.0).round() as u64;
    let n_times = ((shift_hours * 3600.0 / time_step as f64).ceil() as usize).max(1);

    let mut sample_dates = Vec::new();
    let mut date = date_start;
    while date <= date_end {
        sample_dates.push(date);
        date = date + Unit::Day * date_step;
    }

    let times: Vec<String> = (0..n_times)
        .map(|slot| format_time_of_day(shift_start_seconds + slot as u64 * time_step))
        .collect();

    // One batched evaluation over the whole (sample x target) grid.
    let batch = CoordBatch::concat_icrs(targets);
    let n_targets = batch.len();
    let sin_dec: Vec<f64> = batch.lat().iter().map(|&dec| dec.sin()).collect();
    let cos_dec: Vec<f64> = batch.lat().iter().map(|&dec| dec.cos()).collect();
    let ra = batch.lon();

    let site_lat = site.latitude * RADEG;
    let (sin_lat, cos_lat) = site_lat.sin_cos();
    let sin_el_min = (site.el_min * RADEG).sin();

    let n_samples = sample_dates.len() * n_times;
    let lst: Vec<f64> = sample_dates
        .iter()
        .flat_map(|date| {
            let mjd0 = date.to_mjd_utc_days();
            (0..n_times).map(move |slot| {
                let seconds = (shift_start_seconds + slot as u64 * time_step) as f64;
                let mjd = earth_orientation::ut1_from_utc_mjd(mjd0 + seconds / SECONDS_PER_DAY);
                gmst(mjd) + site.longitude * RADEG
            })
        })
        .collect();

    let sin_alt = DMatrix::from_fn(n_samples, n_targets, |sample, target| {
        sin_lat * sin_dec[target] + cos_lat * cos_dec[target] * (lst[sample] - ra[target]).cos()
    });

    // Strict comparison: a target exactly at the minimum elevation does
    // not count as available.
    let mut dates = Vec::with_capacity(sample_dates.len());
    let mut max_count = 1;
    let mut target_samples = vec![0usize; n_targets];
    for (date_index, date) in sample_dates.iter().enumerate() {
        let mut counts = Vec::with_capacity(n_times);
        for slot in 0..n_times {
            let sample = date_index * n_times + slot;
            let mut count = 0;
            for target in 0..n_targets {
                if sin_alt[(sample, target)] > sin_el_min {
                    count += 1;
                    target_samples[target] += 1;
                }
            }
            max_count = max_count.max(count);
            counts.push(count);
        }
        dates.push((format_date(*date), counts));
    }

    // A single target's percentage of itself is not meaningful.
    let target_percent = if n_targets > 1 && n_samples > 0 {
        targets
            .iter()
            .zip(&target_samples)
            .map(|(target, &available)| {
                (
                    target.name.clone(),
                    100.0 * available as f64 / n_samples as f64,
                )
            })
            .collect()
    } else {
        Vec::new()
    };

    Ok(Availability {
        dates,
        times,
        max_count,
        target_percent,
        el_min: site.el_min,
    })
}
