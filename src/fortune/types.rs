use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use strum::{Display, EnumString};

use super::tables::{BRANCH_ELEMENTS, STEM_ELEMENTS};
use crate::error::{FortuneError, Result};

/// Serialize a symbol as its display glyph rather than its variant name.
macro_rules! serialize_as_glyph {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(
                    &self,
                    serializer: S,
                ) -> std::result::Result<S::Ok, S::Error> {
                    serializer.collect_str(self)
                }
            }
        )+
    };
}

/// The five elements, declared in canonical iteration order.
///
/// The declaration order is load-bearing: histogram iteration and the
/// dominant-element tie-break both walk metal, wood, water, fire, earth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum Element {
    #[strum(to_string = "金")]
    Metal,
    #[strum(to_string = "木")]
    Wood,
    #[strum(to_string = "水")]
    Water,
    #[strum(to_string = "火")]
    Fire,
    #[strum(to_string = "土")]
    Earth,
}

impl Element {
    pub const ALL: [Element; 5] = [
        Element::Metal,
        Element::Wood,
        Element::Water,
        Element::Fire,
        Element::Earth,
    ];

    /// Position in the canonical order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The element this one feeds: wood → fire → earth → metal → water → wood.
    pub fn generates(self) -> Element {
        match self {
            Element::Wood => Element::Fire,
            Element::Fire => Element::Earth,
            Element::Earth => Element::Metal,
            Element::Metal => Element::Water,
            Element::Water => Element::Wood,
        }
    }

    /// The element this one overcomes: wood → earth → water → fire → metal → wood.
    pub fn controls(self) -> Element {
        match self {
            Element::Wood => Element::Earth,
            Element::Earth => Element::Water,
            Element::Water => Element::Fire,
            Element::Fire => Element::Metal,
            Element::Metal => Element::Wood,
        }
    }
}

/// Heavenly stems (天干).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Stem {
    #[strum(to_string = "甲")]
    Jia,
    #[strum(to_string = "乙")]
    Yi,
    #[strum(to_string = "丙")]
    Bing,
    #[strum(to_string = "丁")]
    Ding,
    #[strum(to_string = "戊")]
    Wu,
    #[strum(to_string = "己")]
    Ji,
    #[strum(to_string = "庚")]
    Geng,
    #[strum(to_string = "辛")]
    Xin,
    #[strum(to_string = "壬")]
    Ren,
    #[strum(to_string = "癸")]
    Gui,
}

impl Stem {
    pub const ALL: [Stem; 10] = [
        Stem::Jia,
        Stem::Yi,
        Stem::Bing,
        Stem::Ding,
        Stem::Wu,
        Stem::Ji,
        Stem::Geng,
        Stem::Xin,
        Stem::Ren,
        Stem::Gui,
    ];

    /// Stem at `index` modulo 10.
    pub fn from_index(index: usize) -> Stem {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn element(self) -> Element {
        STEM_ELEMENTS[self.index()]
    }
}

/// Earthly branches (地支). The index doubles as the two-hour block number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Branch {
    #[strum(to_string = "子")]
    Zi,
    #[strum(to_string = "丑")]
    Chou,
    #[strum(to_string = "寅")]
    Yin,
    #[strum(to_string = "卯")]
    Mao,
    #[strum(to_string = "辰")]
    Chen,
    #[strum(to_string = "巳")]
    Si,
    #[strum(to_string = "午")]
    Wu,
    #[strum(to_string = "未")]
    Wei,
    #[strum(to_string = "申")]
    Shen,
    #[strum(to_string = "酉")]
    You,
    #[strum(to_string = "戌")]
    Xu,
    #[strum(to_string = "亥")]
    Hai,
}

impl Branch {
    pub const ALL: [Branch; 12] = [
        Branch::Zi,
        Branch::Chou,
        Branch::Yin,
        Branch::Mao,
        Branch::Chen,
        Branch::Si,
        Branch::Wu,
        Branch::Wei,
        Branch::Shen,
        Branch::You,
        Branch::Xu,
        Branch::Hai,
    ];

    /// Branch at `index` modulo 12.
    pub fn from_index(index: usize) -> Branch {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn element(self) -> Element {
        BRANCH_ELEMENTS[self.index()]
    }

    /// Name of the two-hour block this branch labels, e.g. `卯時`.
    pub fn hour_label(self) -> String {
        format!("{}時", self)
    }
}

/// Zodiac animals (生肖), starting at rat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Zodiac {
    #[strum(to_string = "鼠")]
    Rat,
    #[strum(to_string = "牛")]
    Ox,
    #[strum(to_string = "虎")]
    Tiger,
    #[strum(to_string = "兔")]
    Rabbit,
    #[strum(to_string = "龍")]
    Dragon,
    #[strum(to_string = "蛇")]
    Snake,
    #[strum(to_string = "馬")]
    Horse,
    #[strum(to_string = "羊")]
    Goat,
    #[strum(to_string = "猴")]
    Monkey,
    #[strum(to_string = "雞")]
    Rooster,
    #[strum(to_string = "狗")]
    Dog,
    #[strum(to_string = "豬")]
    Pig,
}

impl Zodiac {
    pub const ALL: [Zodiac; 12] = [
        Zodiac::Rat,
        Zodiac::Ox,
        Zodiac::Tiger,
        Zodiac::Rabbit,
        Zodiac::Dragon,
        Zodiac::Snake,
        Zodiac::Horse,
        Zodiac::Goat,
        Zodiac::Monkey,
        Zodiac::Rooster,
        Zodiac::Dog,
        Zodiac::Pig,
    ];

    pub fn from_index(index: usize) -> Zodiac {
        Self::ALL[index % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[strum(to_string = "男", serialize = "male", serialize = "m")]
    Male,
    #[strum(to_string = "女", serialize = "female", serialize = "f")]
    Female,
}

serialize_as_glyph!(Element, Stem, Branch, Zodiac);

/// One person's birth data. Validated on construction and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthRecord {
    pub name: String,
    pub gender: Gender,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Two-hour block, 0 (子) through 11 (亥).
    pub hour: u32,
}

impl BirthRecord {
    pub fn new(
        name: impl Into<String>,
        gender: Gender,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(FortuneError::EmptyName);
        }
        validate_birth_tuple(year, month, day, hour)?;

        Ok(Self {
            name: name.trim().to_string(),
            gender,
            year,
            month,
            day,
            hour,
        })
    }

    /// Birthday formatted as `YYYY-MM-DD`.
    pub fn birthday(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// Label of the birth hour block, e.g. `卯時`.
    pub fn hour_label(&self) -> String {
        Branch::from_index(self.hour as usize).hour_label()
    }
}

/// Check the preconditions shared by every calculation over a birth tuple.
pub fn validate_birth_tuple(year: i32, month: u32, day: u32, hour: u32) -> Result<NaiveDate> {
    if !(1..=12).contains(&month) {
        return Err(FortuneError::InvalidMonth(month));
    }
    if hour > 11 {
        return Err(FortuneError::InvalidHour(hour));
    }
    NaiveDate::from_ymd_opt(year, month, day).ok_or(FortuneError::InvalidDate { year, month, day })
}

/// A stem/branch pair with the element of each half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
    pub stem_element: Element,
    pub branch_element: Element,
}

impl Pillar {
    pub fn new(stem: Stem, branch: Branch) -> Self {
        Self {
            stem,
            branch,
            stem_element: stem.element(),
            branch_element: branch.element(),
        }
    }

    pub fn from_indices(stem_index: usize, branch_index: usize) -> Self {
        Self::new(Stem::from_index(stem_index), Branch::from_index(branch_index))
    }
}

impl std::fmt::Display for Pillar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

/// Raw element counts over the eight stem/branch slots of a chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementHistogram {
    counts: [u8; 5],
}

impl ElementHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, element: Element) {
        self.counts[element.index()] += 1;
    }

    pub fn count(&self, element: Element) -> u8 {
        self.counts[element.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&c| c as u32).sum()
    }

    /// Counts in canonical element order.
    pub fn iter(&self) -> impl Iterator<Item = (Element, u8)> + '_ {
        Element::ALL.iter().map(move |&e| (e, self.count(e)))
    }

    /// The element with the strictly highest count; ties go to whichever
    /// comes first in canonical order.
    pub fn dominant(&self) -> Element {
        let mut best = Element::Metal;
        for (element, count) in self.iter() {
            if count > self.count(best) {
                best = element;
            }
        }
        best
    }
}

impl Serialize for ElementHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(Element::ALL.len()))?;
        for (element, count) in self.iter() {
            map.serialize_entry(&element.to_string(), &count)?;
        }
        map.end()
    }
}

/// The four pillars of one birth tuple plus the element tally over them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FourPillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
    pub element_histogram: ElementHistogram,
    /// Day master (日主); also the seed of the hour stem.
    pub day_stem: Stem,
}

impl FourPillars {
    pub fn pillars(&self) -> [Pillar; 4] {
        [self.year, self.month, self.day, self.hour]
    }

    /// Eight-character text, e.g. `庚午 庚午 庚午 己卯`.
    pub fn text(&self) -> String {
        self.pillars()
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One of the sixty-four hexagrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hexagram {
    pub name: &'static str,
    /// Upper and lower trigram glyphs.
    pub symbol: &'static str,
    pub maxim: &'static str,
}
