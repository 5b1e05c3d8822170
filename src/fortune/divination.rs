//! Hexagram draw. The only part of the engine that depends on the current
//! moment; the moment is always passed in so callers can pin it.

use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use serde::Serialize;

use super::tables::HEXAGRAMS;
use super::types::Hexagram;
use crate::error::{FortuneError, Result};

/// Source of the current moment.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same moment.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HexagramDraw {
    /// Position in the 64-entry table.
    pub index: usize,
    #[serde(flatten)]
    pub hexagram: Hexagram,
}

/// Weighted sum over the moment. The month term is zero-based (January is 0).
pub fn moment_seed(now: &NaiveDateTime) -> i64 {
    now.year() as i64
        + now.month0() as i64 * 31
        + now.day() as i64 * 17
        + now.hour() as i64 * 13
        + now.minute() as i64 * 7
        + now.second() as i64 * 3
}

/// Sum of the code points of every character in both names.
pub fn name_hash(name_a: &str, name_b: &str) -> i64 {
    name_a.chars().chain(name_b.chars()).map(|c| c as i64).sum()
}

/// Table index for an arbitrary seed; always in `0..64`.
pub fn hexagram_index(seed: i64) -> usize {
    seed.rem_euclid(HEXAGRAMS.len() as i64) as usize
}

pub fn draw(name_a: &str, name_b: &str, now: NaiveDateTime) -> Result<HexagramDraw> {
    if name_a.trim().is_empty() || name_b.trim().is_empty() {
        return Err(FortuneError::EmptyName);
    }

    let index = hexagram_index(moment_seed(&now) + name_hash(name_a, name_b));
    let hexagram = HEXAGRAMS[index];
    log::debug!("Drew hexagram {} ({}) at {}", hexagram.name, index, now);

    Ok(HexagramDraw { index, hexagram })
}

pub fn draw_with_clock(name_a: &str, name_b: &str, clock: &dyn Clock) -> Result<HexagramDraw> {
    draw(name_a, name_b, clock.now())
}
