//! Four-pillar calculation.
//!
//! These formulas are a deliberately simplified rendition of the sexagenary
//! calendar: the year changes on 1 January rather than at the spring
//! solar term, and months are counted from the Gregorian month number.
//! Downstream reports depend on exactly these values.

use chrono::NaiveDate;

use super::types::{validate_birth_tuple, ElementHistogram, FourPillars, Pillar};
use crate::error::Result;

/// First year for which the day pillar is known to be meaningful.
pub const EPOCH_YEAR: i32 = 1900;

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(EPOCH_YEAR, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Index of the year in the stem cycle.
pub fn year_stem_index(year: i32) -> usize {
    (year as i64 - 4).rem_euclid(10) as usize
}

/// Index of the year in the branch cycle.
pub fn year_branch_index(year: i32) -> usize {
    (year as i64 - 4).rem_euclid(12) as usize
}

pub fn year_pillar(year: i32) -> Pillar {
    Pillar::from_indices(year_stem_index(year), year_branch_index(year))
}

/// `month` must already be validated to 1..=12.
pub(crate) fn month_pillar(year: i32, month: u32) -> Pillar {
    let stem_base = (year_stem_index(year) % 5) * 2;
    let stem = (stem_base + month as usize - 1) % 10;
    let branch = (month as usize + 1) % 12;
    Pillar::from_indices(stem, branch)
}

/// Whole days between 1900-01-01 and `date`; negative before the epoch.
pub fn days_since_epoch(date: NaiveDate) -> i64 {
    date.signed_duration_since(epoch()).num_days()
}

pub fn day_pillar(date: NaiveDate) -> Pillar {
    let diff = days_since_epoch(date);
    Pillar::from_indices(diff.rem_euclid(10) as usize, diff.rem_euclid(12) as usize)
}

/// Hour pillar, seeded by the day stem. `hour` is the block number and
/// doubles as the branch index; it must already be validated to 0..=11.
pub(crate) fn hour_pillar(day_stem_index: usize, hour: u32) -> Pillar {
    let stem_base = (day_stem_index % 5) * 2;
    let stem = (stem_base + hour as usize) % 10;
    Pillar::from_indices(stem, hour as usize)
}

/// Tally the stem and branch element of every pillar.
pub fn element_histogram(pillars: &[Pillar]) -> ElementHistogram {
    let mut histogram = ElementHistogram::new();
    for pillar in pillars {
        histogram.add(pillar.stem_element);
        histogram.add(pillar.branch_element);
    }
    histogram
}

/// Compute the four pillars of a birth tuple.
///
/// Fails on an out-of-range month or hour block, or a day that does not
/// exist in the given month. Years before 1900 are computed anyway; their
/// accuracy is unspecified.
pub fn compute_four_pillars(year: i32, month: u32, day: u32, hour: u32) -> Result<FourPillars> {
    let date = validate_birth_tuple(year, month, day, hour)?;
    if year < EPOCH_YEAR {
        log::warn!(
            "Year {} predates the {} epoch; pillar accuracy is unspecified",
            year,
            EPOCH_YEAR
        );
    }

    let year_p = year_pillar(year);
    let month_p = month_pillar(year, month);
    let day_p = day_pillar(date);
    // Must follow the day pillar.
    let hour_p = hour_pillar(day_p.stem.index(), hour);

    let element_histogram = element_histogram(&[year_p, month_p, day_p, hour_p]);

    let pillars = FourPillars {
        year: year_p,
        month: month_p,
        day: day_p,
        hour: hour_p,
        element_histogram,
        day_stem: day_p.stem,
    };
    log::debug!(
        "Pillars for {:04}-{:02}-{:02} block {}: {}",
        year,
        month,
        day,
        hour,
        pillars.text()
    );
    Ok(pillars)
}
