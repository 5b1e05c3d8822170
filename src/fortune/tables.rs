//! Fixed lookup tables. All of these are read-only data; nothing in the crate
//! mutates them.

use super::types::{Element, Hexagram, Zodiac};

/// Element of each heavenly stem, by stem index.
pub const STEM_ELEMENTS: [Element; 10] = [
    Element::Wood,
    Element::Wood,
    Element::Fire,
    Element::Fire,
    Element::Earth,
    Element::Earth,
    Element::Metal,
    Element::Metal,
    Element::Water,
    Element::Water,
];

/// Element of each earthly branch, by branch index.
pub const BRANCH_ELEMENTS: [Element; 12] = [
    Element::Water,
    Element::Earth,
    Element::Wood,
    Element::Wood,
    Element::Earth,
    Element::Fire,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Metal,
    Element::Earth,
    Element::Water,
];

/// Thirty-entry nayin cycle, indexed by half-years since the cycle origin.
pub const NAYIN: [&str; 30] = [
    "海中金", "爐中火", "大林木", "路旁土", "劍鋒金", "山頭火",
    "澗下水", "城頭土", "白蠟金", "楊柳木", "泉中水", "屋上土",
    "霹靂火", "松柏木", "長流水", "砂石金", "山下火", "平地木",
    "壁上土", "金箔金", "覆燈火", "天河水", "大驛土", "釵釧金",
    "桑柘木", "大溪水", "沙中土", "天上火", "石榴木", "大海水",
];

/// Fourteen major stars of the purple-star chart.
pub const MAJOR_STARS: [&str; 14] = [
    "紫微", "天機", "太陽", "武曲", "天同", "廉貞", "天府",
    "太陰", "貪狼", "巨門", "天相", "天梁", "七殺", "破軍",
];

/// Suffix appended to a branch to name the life palace.
pub const PALACE_SUFFIX: &str = "宮";

pub const SIX_HARMONY: [(Zodiac, Zodiac); 6] = [
    (Zodiac::Rat, Zodiac::Ox),
    (Zodiac::Tiger, Zodiac::Pig),
    (Zodiac::Rabbit, Zodiac::Dog),
    (Zodiac::Dragon, Zodiac::Rooster),
    (Zodiac::Snake, Zodiac::Monkey),
    (Zodiac::Horse, Zodiac::Goat),
];

pub const THREE_HARMONY: [[Zodiac; 3]; 4] = [
    [Zodiac::Monkey, Zodiac::Rat, Zodiac::Dragon],
    [Zodiac::Tiger, Zodiac::Horse, Zodiac::Dog],
    [Zodiac::Snake, Zodiac::Rooster, Zodiac::Ox],
    [Zodiac::Pig, Zodiac::Rabbit, Zodiac::Goat],
];

pub const SIX_CLASH: [(Zodiac, Zodiac); 6] = [
    (Zodiac::Rat, Zodiac::Horse),
    (Zodiac::Ox, Zodiac::Goat),
    (Zodiac::Tiger, Zodiac::Monkey),
    (Zodiac::Rabbit, Zodiac::Rooster),
    (Zodiac::Dragon, Zodiac::Dog),
    (Zodiac::Snake, Zodiac::Pig),
];

const fn same(a: Zodiac, b: Zodiac) -> bool {
    a as u8 == b as u8
}

const fn in_pair(pair: (Zodiac, Zodiac), a: Zodiac, b: Zodiac) -> bool {
    (same(pair.0, a) && same(pair.1, b)) || (same(pair.0, b) && same(pair.1, a))
}

const fn in_trio(trio: [Zodiac; 3], animal: Zodiac) -> bool {
    same(trio[0], animal) || same(trio[1], animal) || same(trio[2], animal)
}

const fn in_any_pair(pairs: &[(Zodiac, Zodiac); 6], a: Zodiac, b: Zodiac) -> bool {
    let mut i = 0;
    while i < pairs.len() {
        if in_pair(pairs[i], a, b) {
            return true;
        }
        i += 1;
    }
    false
}

const fn in_any_trio(a: Zodiac, b: Zodiac) -> bool {
    let mut i = 0;
    while i < THREE_HARMONY.len() {
        if in_trio(THREE_HARMONY[i], a) && in_trio(THREE_HARMONY[i], b) {
            return true;
        }
        i += 1;
    }
    false
}

/// True when no two distinct animals fall into more than one tier table.
pub const fn zodiac_tiers_are_disjoint() -> bool {
    let mut a = 0;
    while a < Zodiac::ALL.len() {
        let mut b = 0;
        while b < Zodiac::ALL.len() {
            let (x, y) = (Zodiac::ALL[a], Zodiac::ALL[b]);
            if a != b {
                let hits = in_any_pair(&SIX_HARMONY, x, y) as u8
                    + in_any_trio(x, y) as u8
                    + in_any_pair(&SIX_CLASH, x, y) as u8;
                if hits > 1 {
                    return false;
                }
            }
            b += 1;
        }
        a += 1;
    }
    true
}

const _: () = assert!(zodiac_tiers_are_disjoint(), "zodiac tier tables overlap");

#[rustfmt::skip]
pub const HEXAGRAMS: [Hexagram; 64] = [
    Hexagram { name: "乾", symbol: "☰☰", maxim: "天行健，君子以自強不息" },
    Hexagram { name: "坤", symbol: "☷☷", maxim: "地勢坤，君子以厚德載物" },
    Hexagram { name: "屯", symbol: "☵☳", maxim: "雷雨之動滿盈，宜建侯" },
    Hexagram { name: "蒙", symbol: "☶☵", maxim: "蒙以養正，聖功也" },
    Hexagram { name: "需", symbol: "☵☰", maxim: "需者，飲食之道也" },
    Hexagram { name: "訟", symbol: "☰☵", maxim: "訟，有孚窒惕" },
    Hexagram { name: "師", symbol: "☷☵", maxim: "師者，眾也" },
    Hexagram { name: "比", symbol: "☵☷", maxim: "比，輔也" },
    Hexagram { name: "小畜", symbol: "☴☰", maxim: "風行天上，蓄養" },
    Hexagram { name: "履", symbol: "☰☱", maxim: "履虎尾，不咥人" },
    Hexagram { name: "泰", symbol: "☷☰", maxim: "天地交泰，萬物通" },
    Hexagram { name: "否", symbol: "☰☷", maxim: "天地不交，否" },
    Hexagram { name: "同人", symbol: "☰☲", maxim: "同人於野，亨" },
    Hexagram { name: "大有", symbol: "☲☰", maxim: "火在天上，大有" },
    Hexagram { name: "謙", symbol: "☷☶", maxim: "謙亨，君子有終" },
    Hexagram { name: "豫", symbol: "☳☷", maxim: "豫，利建侯行師" },
    Hexagram { name: "隨", symbol: "☱☳", maxim: "隨，元亨利貞" },
    Hexagram { name: "蠱", symbol: "☶☴", maxim: "蠱元亨，利涉大川" },
    Hexagram { name: "臨", symbol: "☷☱", maxim: "臨，元亨利貞" },
    Hexagram { name: "觀", symbol: "☴☷", maxim: "觀，盥而不荐" },
    Hexagram { name: "噬嗑", symbol: "☲☳", maxim: "噬嗑，亨利用獄" },
    Hexagram { name: "賁", symbol: "☶☲", maxim: "賁亨，柔來而文剛" },
    Hexagram { name: "剝", symbol: "☶☷", maxim: "剝，不利有攸往" },
    Hexagram { name: "復", symbol: "☷☳", maxim: "復亨，剛反" },
    Hexagram { name: "無妄", symbol: "☰☳", maxim: "無妄，元亨利貞" },
    Hexagram { name: "大畜", symbol: "☶☰", maxim: "大畜利貞" },
    Hexagram { name: "頤", symbol: "☶☳", maxim: "頤，貞吉" },
    Hexagram { name: "大過", symbol: "☱☴", maxim: "大過，棟橈" },
    Hexagram { name: "坎", symbol: "☵☵", maxim: "習坎，有孚" },
    Hexagram { name: "離", symbol: "☲☲", maxim: "離，利貞亨" },
    Hexagram { name: "咸", symbol: "☱☶", maxim: "咸亨利貞，取女吉" },
    Hexagram { name: "恆", symbol: "☳☴", maxim: "恆亨無咎，利貞" },
    Hexagram { name: "遯", symbol: "☰☶", maxim: "遯亨，小利貞" },
    Hexagram { name: "大壯", symbol: "☳☰", maxim: "大壯利貞" },
    Hexagram { name: "晉", symbol: "☲☷", maxim: "晉，康侯用錫馬" },
    Hexagram { name: "明夷", symbol: "☷☲", maxim: "明夷利艱貞" },
    Hexagram { name: "家人", symbol: "☴☲", maxim: "家人利女貞" },
    Hexagram { name: "睽", symbol: "☲☱", maxim: "睽小事吉" },
    Hexagram { name: "蹇", symbol: "☵☶", maxim: "蹇利西南" },
    Hexagram { name: "解", symbol: "☳☵", maxim: "解利西南" },
    Hexagram { name: "損", symbol: "☶☱", maxim: "損有孚" },
    Hexagram { name: "益", symbol: "☴☳", maxim: "益利有攸往" },
    Hexagram { name: "夬", symbol: "☱☰", maxim: "夬揚于王庭" },
    Hexagram { name: "姤", symbol: "☰☴", maxim: "姤，女壯" },
    Hexagram { name: "萃", symbol: "☱☷", maxim: "萃亨" },
    Hexagram { name: "升", symbol: "☷☴", maxim: "升元亨" },
    Hexagram { name: "困", symbol: "☱☵", maxim: "困亨貞" },
    Hexagram { name: "井", symbol: "☵☴", maxim: "井改邑不改井" },
    Hexagram { name: "革", symbol: "☱☲", maxim: "革，已日乃孚" },
    Hexagram { name: "鼎", symbol: "☲☴", maxim: "鼎元吉亨" },
    Hexagram { name: "震", symbol: "☳☳", maxim: "震亨" },
    Hexagram { name: "艮", symbol: "☶☶", maxim: "艮其背" },
    Hexagram { name: "漸", symbol: "☴☶", maxim: "漸女歸吉" },
    Hexagram { name: "歸妹", symbol: "☳☱", maxim: "歸妹征凶" },
    Hexagram { name: "豐", symbol: "☳☲", maxim: "豐亨" },
    Hexagram { name: "旅", symbol: "☲☶", maxim: "旅小亨" },
    Hexagram { name: "巽", symbol: "☴☴", maxim: "巽小亨" },
    Hexagram { name: "兌", symbol: "☱☱", maxim: "兌亨利貞" },
    Hexagram { name: "渙", symbol: "☴☵", maxim: "渙亨" },
    Hexagram { name: "節", symbol: "☵☱", maxim: "節亨" },
    Hexagram { name: "中孚", symbol: "☴☱", maxim: "中孚豚魚吉" },
    Hexagram { name: "小過", symbol: "☳☶", maxim: "小過亨利貞" },
    Hexagram { name: "既濟", symbol: "☵☲", maxim: "既濟亨小" },
    Hexagram { name: "未濟", symbol: "☲☵", maxim: "未濟亨" },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tier_tables_are_disjoint() {
        assert!(zodiac_tiers_are_disjoint());
    }

    #[test]
    fn test_hexagram_names_are_unique() {
        let names: HashSet<_> = HEXAGRAMS.iter().map(|h| h.name).collect();
        assert_eq!(names.len(), 64);
        for hexagram in HEXAGRAMS.iter() {
            assert_eq!(hexagram.symbol.chars().count(), 2);
        }
    }

    #[test]
    fn test_three_harmony_covers_every_animal_once() {
        let animals: Vec<Zodiac> = THREE_HARMONY.iter().flatten().copied().collect();
        let unique: HashSet<_> = animals.iter().collect();
        assert_eq!(animals.len(), 12);
        assert_eq!(unique.len(), 12);
    }
}
