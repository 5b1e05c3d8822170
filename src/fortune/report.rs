use chrono::NaiveDateTime;
use serde::Serialize;

use super::attributes::{major_star, nayin, palace, zodiac};
use super::compatibility::{evaluate, CompatibilityResult};
use super::divination::{draw, Clock, HexagramDraw};
use super::pillars::compute_four_pillars;
use super::types::{BirthRecord, FourPillars, Zodiac};
use crate::error::Result;

/// Fixed third term of the headline score. A tuning value, not derived.
pub const BASELINE_WEIGHT: u32 = 70;

/// Mean of the two sub-scores and the baseline, rounded to the nearest integer.
pub fn overall_score(zodiac_score: u8, element_score: u8) -> u8 {
    let sum = zodiac_score as u32 + element_score as u32 + BASELINE_WEIGHT;
    // Thirds never land on .5, so (sum + 1) / 3 is round-to-nearest.
    ((sum + 1) / 3).min(100) as u8
}

/// Everything derived from one person's birth record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonProfile {
    pub record: BirthRecord,
    pub birthday: String,
    pub hour_label: String,
    pub pillars: FourPillars,
    pub bazi: String,
    pub zodiac: Zodiac,
    pub nayin: &'static str,
    pub major_star: &'static str,
    pub palace: String,
}

impl PersonProfile {
    pub fn from_record(record: BirthRecord) -> Result<Self> {
        let pillars = compute_four_pillars(record.year, record.month, record.day, record.hour)?;

        Ok(Self {
            birthday: record.birthday(),
            hour_label: record.hour_label(),
            bazi: pillars.text(),
            zodiac: zodiac(record.year),
            nayin: nayin(record.year),
            major_star: major_star(record.year, record.month, record.day, record.hour),
            palace: palace(record.month, record.hour),
            pillars,
            record,
        })
    }
}

/// Input for one reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FortuneRequest {
    pub person_a: BirthRecord,
    pub person_b: BirthRecord,
    pub still_in_contact: bool,
}

/// The complete structured result handed to the text-generation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FortuneReport {
    pub person_a: PersonProfile,
    pub person_b: PersonProfile,
    pub compatibility: CompatibilityResult,
    pub hexagram: HexagramDraw,
    pub overall_score: u8,
    pub still_in_contact: bool,
}

impl FortuneRequest {
    pub fn new(person_a: BirthRecord, person_b: BirthRecord, still_in_contact: bool) -> Self {
        Self {
            person_a,
            person_b,
            still_in_contact,
        }
    }

    /// Build the report as of `now`. Only the hexagram depends on `now`.
    pub fn compute(&self, now: NaiveDateTime) -> Result<FortuneReport> {
        // Fail on the names before any other work.
        let hexagram = draw(&self.person_a.name, &self.person_b.name, now)?;

        let person_a = PersonProfile::from_record(self.person_a.clone())?;
        let person_b = PersonProfile::from_record(self.person_b.clone())?;

        let compatibility = evaluate(
            person_a.zodiac,
            person_b.zodiac,
            &person_a.pillars.element_histogram,
            &person_b.pillars.element_histogram,
        );
        let overall_score = overall_score(compatibility.zodiac_score, compatibility.element_score);

        log::info!(
            "Report for {} & {}: {} / {} / {} -> {}",
            person_a.record.name,
            person_b.record.name,
            compatibility.zodiac_tier,
            compatibility.element_relation,
            hexagram.hexagram.name,
            overall_score
        );

        Ok(FortuneReport {
            person_a,
            person_b,
            compatibility,
            hexagram,
            overall_score,
            still_in_contact: self.still_in_contact,
        })
    }

    pub fn compute_with_clock(&self, clock: &dyn Clock) -> Result<FortuneReport> {
        self.compute(clock.now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fortune::compatibility::{
        DESTRUCTIVE_SCORE, GENERATIVE_SCORE, IDENTICAL_SCORE, NEUTRAL_ELEMENT_SCORE,
        NEUTRAL_ZODIAC_SCORE, SIX_CLASH_SCORE, SIX_HARMONY_SCORE, THREE_HARMONY_SCORE,
    };

    #[test]
    fn test_overall_score_rounds_to_nearest() {
        assert_eq!(overall_score(65, 90), 75);
        // (95 + 90 + 70) / 3 = 85
        assert_eq!(overall_score(95, 90), 85);
        // (40 + 45 + 70) / 3 = 51.67
        assert_eq!(overall_score(40, 45), 52);
        // (85 + 75 + 70) / 3 = 76.67
        assert_eq!(overall_score(85, 75), 77);
        // (65 + 70 + 70) / 3 = 68.33
        assert_eq!(overall_score(65, 70), 68);
    }

    #[test]
    fn test_overall_score_matches_float_rounding() {
        for z in 0..=100u8 {
            for e in 0..=100u8 {
                let expected = ((z as f64 + e as f64 + 70.0) / 3.0).round() as u8;
                assert_eq!(overall_score(z, e), expected);
            }
        }
    }

    #[test]
    fn test_overall_score_in_range_for_all_tier_scores() {
        let zodiac = [
            SIX_HARMONY_SCORE,
            THREE_HARMONY_SCORE,
            SIX_CLASH_SCORE,
            NEUTRAL_ZODIAC_SCORE,
        ];
        let element = [GENERATIVE_SCORE, DESTRUCTIVE_SCORE, IDENTICAL_SCORE, NEUTRAL_ELEMENT_SCORE];
        for z in zodiac {
            for e in element {
                assert!(overall_score(z, e) <= 100);
            }
        }
        assert_eq!(overall_score(100, 100), 90);
        assert_eq!(overall_score(0, 0), 23);
    }
}
