//! Deterministic bazi compatibility engine.
//!
//! Turns two birth records into a [`FortuneReport`]: four pillars and an
//! element tally per person, zodiac and chart attributes, a zodiac/element
//! compatibility verdict, a hexagram draw and one headline score.
//!
//! Every function here is pure apart from [`divination`], which takes the
//! current moment as an explicit argument.

pub mod attributes;
pub mod compatibility;
pub mod divination;
pub mod pillars;
pub mod report;
pub mod tables;
pub mod types;

pub use compatibility::{evaluate, CompatibilityResult, ElementRelation, ZodiacTier};
pub use divination::{draw, Clock, FixedClock, HexagramDraw, SystemClock};
pub use pillars::compute_four_pillars;
pub use report::{overall_score, FortuneReport, FortuneRequest, PersonProfile};
pub use types::{
    BirthRecord, Branch, Element, ElementHistogram, FourPillars, Gender, Hexagram, Pillar, Stem,
    Zodiac,
};
