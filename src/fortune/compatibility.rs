use serde::Serialize;
use strum::Display;

use super::tables::{SIX_CLASH, SIX_HARMONY, THREE_HARMONY};
use super::types::{Element, ElementHistogram, Zodiac};

// Tuning values. None of these is derived from anything; changing one
// shifts every report.
pub const SIX_HARMONY_SCORE: u8 = 95;
pub const THREE_HARMONY_SCORE: u8 = 85;
pub const SIX_CLASH_SCORE: u8 = 40;
pub const NEUTRAL_ZODIAC_SCORE: u8 = 65;

pub const GENERATIVE_SCORE: u8 = 90;
pub const DESTRUCTIVE_SCORE: u8 = 45;
pub const IDENTICAL_SCORE: u8 = 75;
pub const NEUTRAL_ELEMENT_SCORE: u8 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum ZodiacTier {
    #[strum(to_string = "六合")]
    SixHarmony,
    #[strum(to_string = "三合")]
    ThreeHarmony,
    #[strum(to_string = "六沖")]
    SixClash,
    #[strum(to_string = "普通")]
    Neutral,
}

impl ZodiacTier {
    pub fn score(self) -> u8 {
        match self {
            ZodiacTier::SixHarmony => SIX_HARMONY_SCORE,
            ZodiacTier::ThreeHarmony => THREE_HARMONY_SCORE,
            ZodiacTier::SixClash => SIX_CLASH_SCORE,
            ZodiacTier::Neutral => NEUTRAL_ZODIAC_SCORE,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ZodiacTier::SixHarmony => "天作之合，緣分極深",
            ZodiacTier::ThreeHarmony => "志同道合，感情穩固",
            ZodiacTier::SixClash => "性格差異大，需要磨合",
            ZodiacTier::Neutral => "平淡中見真情",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum ElementRelation {
    #[strum(to_string = "相生")]
    Generative,
    #[strum(to_string = "相剋")]
    Destructive,
    #[strum(to_string = "比和")]
    Identical,
    #[strum(to_string = "中和")]
    Neutral,
}

impl ElementRelation {
    pub fn score(self) -> u8 {
        match self {
            ElementRelation::Generative => GENERATIVE_SCORE,
            ElementRelation::Destructive => DESTRUCTIVE_SCORE,
            ElementRelation::Identical => IDENTICAL_SCORE,
            ElementRelation::Neutral => NEUTRAL_ELEMENT_SCORE,
        }
    }

    /// One-line reading of the relation between two dominant elements.
    pub fn describe(self, a: Element, b: Element) -> String {
        match self {
            ElementRelation::Generative => format!("{}與{}相生，互相扶持", a, b),
            ElementRelation::Destructive => format!("{}與{}相剋，需注意包容", a, b),
            ElementRelation::Identical => format!("同屬{}，心意相通", a),
            ElementRelation::Neutral => format!("{}與{}，平穩相處", a, b),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompatibilityResult {
    pub zodiac_tier: ZodiacTier,
    pub zodiac_score: u8,
    pub element_relation: ElementRelation,
    pub element_score: u8,
    pub dominant_element_a: Element,
    pub dominant_element_b: Element,
}

impl CompatibilityResult {
    pub fn element_description(&self) -> String {
        self.element_relation
            .describe(self.dominant_element_a, self.dominant_element_b)
    }
}

fn pair_matches(pair: &(Zodiac, Zodiac), a: Zodiac, b: Zodiac) -> bool {
    (pair.0 == a && pair.1 == b) || (pair.0 == b && pair.1 == a)
}

/// Tier of a pair of animals. Precedence is six-harmony, three-harmony,
/// six-clash, then neutral; the first match wins.
pub fn zodiac_tier(a: Zodiac, b: Zodiac) -> ZodiacTier {
    if SIX_HARMONY.iter().any(|pair| pair_matches(pair, a, b)) {
        ZodiacTier::SixHarmony
    } else if THREE_HARMONY
        .iter()
        .any(|trio| trio.contains(&a) && trio.contains(&b))
    {
        ZodiacTier::ThreeHarmony
    } else if SIX_CLASH.iter().any(|pair| pair_matches(pair, a, b)) {
        ZodiacTier::SixClash
    } else {
        ZodiacTier::Neutral
    }
}

/// Relation between two dominant elements, checked in either direction.
pub fn element_relation(a: Element, b: Element) -> ElementRelation {
    if a.generates() == b || b.generates() == a {
        ElementRelation::Generative
    } else if a.controls() == b || b.controls() == a {
        ElementRelation::Destructive
    } else if a == b {
        ElementRelation::Identical
    } else {
        ElementRelation::Neutral
    }
}

pub fn evaluate(
    animal_a: Zodiac,
    animal_b: Zodiac,
    histogram_a: &ElementHistogram,
    histogram_b: &ElementHistogram,
) -> CompatibilityResult {
    let zodiac_tier = zodiac_tier(animal_a, animal_b);
    let dominant_element_a = histogram_a.dominant();
    let dominant_element_b = histogram_b.dominant();
    let element_relation = element_relation(dominant_element_a, dominant_element_b);

    log::debug!(
        "Compatibility {}/{} -> {}, {}/{} -> {}",
        animal_a,
        animal_b,
        zodiac_tier,
        dominant_element_a,
        dominant_element_b,
        element_relation
    );

    CompatibilityResult {
        zodiac_tier,
        zodiac_score: zodiac_tier.score(),
        element_relation,
        element_score: element_relation.score(),
        dominant_element_a,
        dominant_element_b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn histogram_of(elements: &[Element]) -> ElementHistogram {
        let mut h = ElementHistogram::new();
        for &e in elements {
            h.add(e);
        }
        h
    }

    #[test]
    fn test_zodiac_tiers() {
        assert_eq!(zodiac_tier(Zodiac::Rat, Zodiac::Ox), ZodiacTier::SixHarmony);
        assert_eq!(zodiac_tier(Zodiac::Ox, Zodiac::Rat), ZodiacTier::SixHarmony);
        assert_eq!(zodiac_tier(Zodiac::Monkey, Zodiac::Dragon), ZodiacTier::ThreeHarmony);
        assert_eq!(zodiac_tier(Zodiac::Horse, Zodiac::Rat), ZodiacTier::SixClash);
        assert_eq!(zodiac_tier(Zodiac::Horse, Zodiac::Dragon), ZodiacTier::Neutral);
    }

    #[test]
    fn test_same_animal_counts_as_three_harmony() {
        // An animal always shares its own trio.
        for animal in Zodiac::ALL {
            assert_eq!(zodiac_tier(animal, animal), ZodiacTier::ThreeHarmony);
        }
    }

    #[test]
    fn test_every_pair_gets_exactly_one_tier() {
        let mut counts = [0usize; 4];
        for a in Zodiac::ALL {
            for b in Zodiac::ALL {
                if a == b {
                    continue;
                }
                let idx = match zodiac_tier(a, b) {
                    ZodiacTier::SixHarmony => 0,
                    ZodiacTier::ThreeHarmony => 1,
                    ZodiacTier::SixClash => 2,
                    ZodiacTier::Neutral => 3,
                };
                counts[idx] += 1;
            }
        }
        // ordered pairs: 6*2, 4 trios * 3 pairs * 2, 6*2
        assert_eq!(counts[0], 12);
        assert_eq!(counts[1], 24);
        assert_eq!(counts[2], 12);
        assert_eq!(counts[0] + counts[1] + counts[2] + counts[3], 132);
    }

    #[test]
    fn test_element_relations() {
        assert_eq!(element_relation(Element::Metal, Element::Water), ElementRelation::Generative);
        assert_eq!(element_relation(Element::Water, Element::Metal), ElementRelation::Generative);
        assert_eq!(element_relation(Element::Wood, Element::Earth), ElementRelation::Destructive);
        assert_eq!(element_relation(Element::Fire, Element::Fire), ElementRelation::Identical);
    }

    #[test]
    fn test_every_distinct_pair_is_generative_or_destructive() {
        // With five elements each one feeds, is fed by, controls and is
        // controlled by a different element, so neutral is never reached.
        for a in Element::ALL {
            for b in Element::ALL {
                let relation = element_relation(a, b);
                if a == b {
                    assert_eq!(relation, ElementRelation::Identical);
                } else {
                    assert_ne!(relation, ElementRelation::Neutral);
                }
            }
        }
    }

    #[test]
    fn test_evaluate_uses_dominant_elements() {
        use Element::{Earth, Fire, Metal, Water, Wood};

        let a = histogram_of(&[Metal, Fire, Metal, Fire, Metal, Fire, Earth, Wood]);
        let b = histogram_of(&[Earth, Earth, Water, Water, Metal, Water, Fire, Metal]);
        let result = evaluate(Zodiac::Horse, Zodiac::Dragon, &a, &b);

        assert_eq!(result.dominant_element_a, Element::Metal);
        assert_eq!(result.dominant_element_b, Element::Water);
        assert_eq!(result.element_relation, ElementRelation::Generative);
        assert_eq!(result.element_score, 90);
        assert_eq!(result.zodiac_tier, ZodiacTier::Neutral);
        assert_eq!(result.zodiac_score, 65);
        assert_eq!(result.element_description(), "金與水相生，互相扶持");
    }
}
