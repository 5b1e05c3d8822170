//! Zodiac animal and the secondary chart attributes.
//!
//! Nayin, major star and palace are coarse stand-ins for the full
//! traditional computations and are reproduced exactly as such.

use super::tables::{MAJOR_STARS, NAYIN, PALACE_SUFFIX};
use super::types::{Branch, Zodiac};

pub fn zodiac(year: i32) -> Zodiac {
    Zodiac::from_index((year as i64 - 4).rem_euclid(12) as usize)
}

/// Nayin epithet from the 30-entry half-year cycle.
pub fn nayin(year: i32) -> &'static str {
    let idx = (year as i64 - 4).div_euclid(2).rem_euclid(NAYIN.len() as i64);
    NAYIN[idx as usize]
}

/// Major star picked by a fixed weighted sum over the birth tuple.
pub(crate) fn major_star(year: i32, month: u32, day: u32, hour: u32) -> &'static str {
    let seed = year as i64 * 31 + month as i64 * 17 + day as i64 * 13 + hour as i64 * 7;
    MAJOR_STARS[seed.rem_euclid(MAJOR_STARS.len() as i64) as usize]
}

/// Life palace, e.g. `寅宮`. Expects a validated month and hour block.
pub(crate) fn palace(month: u32, hour: u32) -> String {
    let idx = (12 + month as i64 - hour as i64).rem_euclid(12);
    format!("{}{}", Branch::from_index(idx as usize), PALACE_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zodiac() {
        assert_eq!(zodiac(1990), Zodiac::Horse);
        assert_eq!(zodiac(1988), Zodiac::Dragon);
        assert_eq!(zodiac(1984), Zodiac::Rat);
        assert_eq!(zodiac(2019), Zodiac::Pig);
    }

    #[test]
    fn test_nayin_uses_half_year_cycle() {
        assert_eq!(nayin(1984), "海中金");
        assert_eq!(nayin(1985), "海中金");
        assert_eq!(nayin(1988), "大林木");
        assert_eq!(nayin(1990), "路旁土");
        // 30 entries cover 60 years
        assert_eq!(nayin(2044), "海中金");
    }

    #[test]
    fn test_major_star() {
        // 1990*31 + 5*17 + 15*13 + 3*7 = 61991, 61991 % 14 = 13
        assert_eq!(major_star(1990, 5, 15, 3), "破軍");
        // 1988*31 + 11*17 + 2*13 + 9*7 = 61904, 61904 % 14 = 10
        assert_eq!(major_star(1988, 11, 2, 9), "天相");
    }

    #[test]
    fn test_palace() {
        assert_eq!(palace(5, 3), "寅宮");
        assert_eq!(palace(1, 11), "寅宮");
        assert_eq!(palace(12, 0), "子宮");
        assert_eq!(palace(1, 0), "丑宮");
    }
}
