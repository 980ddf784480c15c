//! Deterministic card selection.
//!
//! Every function here is a pure mapping from calendar dates to deck entries.
//! Offsets are arbitrary integers and are always folded into the deck with
//! floored (non-negative) modulo.

use crate::core::deck::{DECK, DECK_SIZE};
use crate::domain::model::{Blueprint, Card, Cycle, Insight};
use chrono::{Datelike, Duration, NaiveDate};

pub const DEFAULT_CYCLE_COUNT: usize = 7;
pub const CYCLE_LENGTH_DAYS: i64 = 52;

const RULING_OFFSET: i64 = 7;
const SOUL_RESOURCE_OFFSET: i64 = 14;
const SOUL_CHALLENGE_OFFSET: i64 = 21;
const CYCLE_CARD_STEP: i64 = 5;

const SPECIAL_FAMILY_DATES: [(u32, u32); 2] = [(1, 1), (12, 31)];

pub const LIFE_CARD_TITLE: &str = "生命牌";
pub const RULING_CARD_TITLE: &str = "守护牌";
pub const SOUL_RESOURCE_TITLE: &str = "灵魂资源牌";
pub const SOUL_CHALLENGE_TITLE: &str = "灵魂挑战牌";
pub const TODAY_CARD_TITLE: &str = "今日牌";

const COMPATIBILITY_LESSONS: [&str; 4] = [
    "共同探索信任与亲密的节奏。",
    "学习在彼此的价值观之间找到平衡。",
    "彼此鼓励坚持灵魂使命。",
    "激励对方更深刻地表达爱与愿景。",
];

/// 1-based ordinal day within the date's own calendar year.
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

pub fn pick_card(date: NaiveDate, offset: i64) -> &'static Card {
    let base = i64::from(day_of_year(date)) - 1;
    let index = (base + offset).rem_euclid(DECK_SIZE as i64);
    &DECK[index as usize]
}

pub fn is_special_family(date: NaiveDate) -> bool {
    SPECIAL_FAMILY_DATES.contains(&(date.month(), date.day()))
}

pub fn derive_blueprint(birth_date: NaiveDate) -> Blueprint {
    let special = is_special_family(birth_date);

    // 特殊家族日期沒有靈魂牌
    let (soul_resource, soul_challenge) = if special {
        (None, None)
    } else {
        (
            Some(pick_card(birth_date, SOUL_RESOURCE_OFFSET)),
            Some(pick_card(birth_date, SOUL_CHALLENGE_OFFSET)),
        )
    };

    Blueprint {
        life_card: Insight::from_card(LIFE_CARD_TITLE, pick_card(birth_date, 0)),
        ruling_card: Insight::from_card(RULING_CARD_TITLE, pick_card(birth_date, RULING_OFFSET)),
        soul_resource_card: soul_resource.map(|c| Insight::from_card(SOUL_RESOURCE_TITLE, c)),
        soul_challenge_card: soul_challenge.map(|c| Insight::from_card(SOUL_CHALLENGE_TITLE, c)),
        is_special_family: special,
    }
}

/// Birthday in `year`. A Feb 29 birthday lands on Feb 28 in non-leap years.
pub fn anchor_date(birth_date: NaiveDate, year: i32) -> Option<NaiveDate> {
    birth_date
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
}

/// Contiguous 52-day cycles starting at the birthday in `year`.
pub fn build_yearly_cycles(birth_date: NaiveDate, count: usize, year: i32) -> Vec<Cycle> {
    let Some(anchor) = anchor_date(birth_date, year) else {
        tracing::warn!("Year {} is outside the supported calendar range", year);
        return Vec::new();
    };

    (0..count)
        .map(|i| {
            let step = i as i64;
            let cycle_start = anchor + Duration::days(step * CYCLE_LENGTH_DAYS);
            let cycle_end = cycle_start + Duration::days(CYCLE_LENGTH_DAYS - 1);
            let card = pick_card(birth_date, step * CYCLE_CARD_STEP);

            Cycle {
                cycle_index: (i + 1) as u32,
                cycle_start,
                cycle_end,
                theme: format!("{} 的周期主题", card.name),
                advice: card.advice.to_string(),
            }
        })
        .collect()
}

/// Card of the day. `today` is sampled once by the caller; the offset is
/// negative when the birth date lies in the future.
pub fn draw_today_card(birth_date: NaiveDate, today: NaiveDate) -> Insight {
    let days_since_birth = today.signed_duration_since(birth_date).num_days();
    Insight::from_card(TODAY_CARD_TITLE, pick_card(birth_date, days_since_birth))
}

/// Ranges from 100 down to -2; not clamped.
pub fn compatibility_score(primary: NaiveDate, partner: NaiveDate) -> i32 {
    let difference = (day_of_year(primary) as i32 - day_of_year(partner) as i32).abs();
    100 - (difference % DECK_SIZE as i32) * 2
}

pub fn compatibility_lessons(primary: NaiveDate, partner: NaiveDate) -> Vec<String> {
    let offset = i64::from(day_of_year(primary) + day_of_year(partner));
    rotate(&COMPATIBILITY_LESSONS, offset)
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn compatibility_theme(primary: NaiveDate, partner: NaiveDate) -> String {
    let offset = i64::from(day_of_year(partner)) % DECK_SIZE as i64;
    let card = pick_card(primary, offset);
    format!("关系的核心能量来自 {}", card.name)
}

/// Left rotation: `items[k..] ++ items[..k]` with `k` folded into range.
pub fn rotate<T: Clone>(items: &[T], offset: i64) -> Vec<T> {
    if items.is_empty() {
        return Vec::new();
    }
    let k = offset.rem_euclid(items.len() as i64) as usize;
    items[k..].iter().chain(items[..k].iter()).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_of_year_counts_leap_days() {
        assert_eq!(day_of_year(date(2000, 1, 1)), 1);
        assert_eq!(day_of_year(date(2000, 3, 1)), 61);
        assert_eq!(day_of_year(date(2001, 3, 1)), 60);
        assert_eq!(day_of_year(date(2000, 12, 31)), 366);
        assert_eq!(day_of_year(date(2001, 12, 31)), 365);
    }

    #[test]
    fn test_life_card_example() {
        let birth = date(2000, 3, 15);
        assert_eq!(day_of_year(birth), 75);
        // (75 - 1) mod 52 = 22
        assert_eq!(pick_card(birth, 0).name, "Ten of Clubs");
        assert_eq!(pick_card(birth, 0), &DECK[22]);
    }

    #[test]
    fn test_pick_card_is_periodic_and_handles_negative_offsets() {
        let birth = date(1987, 11, 2);
        for offset in [-200_i64, -53, -52, -1, 0, 1, 51, 52, 103, 10_000] {
            assert_eq!(pick_card(birth, offset), pick_card(birth, offset + 52));
            assert_eq!(pick_card(birth, offset), pick_card(birth, offset));
        }
        assert_eq!(pick_card(date(2001, 1, 1), -1).name, "King of Spades");
    }

    #[test]
    fn test_blueprint_regular_date() {
        let birth = date(1990, 6, 15);
        let blueprint = derive_blueprint(birth);

        assert!(!blueprint.is_special_family);
        assert_eq!(
            blueprint.life_card,
            Insight::from_card(LIFE_CARD_TITLE, pick_card(birth, 0))
        );
        assert_eq!(
            blueprint.ruling_card,
            Insight::from_card(RULING_CARD_TITLE, pick_card(birth, 7))
        );
        assert_eq!(
            blueprint.soul_resource_card,
            Some(Insight::from_card(SOUL_RESOURCE_TITLE, pick_card(birth, 14)))
        );
        assert_eq!(
            blueprint.soul_challenge_card,
            Some(Insight::from_card(SOUL_CHALLENGE_TITLE, pick_card(birth, 21)))
        );
    }

    #[test]
    fn test_blueprint_special_family_dates() {
        for birth in [date(1999, 1, 1), date(2000, 1, 1), date(2000, 12, 31), date(1985, 12, 31)] {
            let blueprint = derive_blueprint(birth);
            assert!(blueprint.is_special_family, "{} should be special", birth);
            assert!(blueprint.soul_resource_card.is_none());
            assert!(blueprint.soul_challenge_card.is_none());
        }
        assert!(!is_special_family(date(2000, 12, 30)));
        assert!(!is_special_family(date(2000, 1, 2)));
    }

    #[test]
    fn test_cycles_are_contiguous() {
        let birth = date(1992, 8, 20);
        let cycles = build_yearly_cycles(birth, DEFAULT_CYCLE_COUNT, 2026);

        assert_eq!(cycles.len(), 7);
        assert_eq!(cycles[0].cycle_start, date(2026, 8, 20));
        for (i, cycle) in cycles.iter().enumerate() {
            assert_eq!(cycle.cycle_index, i as u32 + 1);
            assert_eq!((cycle.cycle_end - cycle.cycle_start).num_days(), 51);
        }
        for pair in cycles.windows(2) {
            assert_eq!(pair[0].cycle_end + Duration::days(1), pair[1].cycle_start);
        }
    }

    #[test]
    fn test_cycle_cards_step_by_five() {
        let birth = date(2000, 3, 15);
        let cycles = build_yearly_cycles(birth, 3, 2026);
        assert_eq!(cycles[0].theme, "Ten of Clubs 的周期主题");
        assert_eq!(cycles[1].theme, format!("{} 的周期主题", pick_card(birth, 5).name));
        assert_eq!(cycles[2].advice, pick_card(birth, 10).advice);
    }

    #[test]
    fn test_cycles_zero_count() {
        assert!(build_yearly_cycles(date(2000, 3, 15), 0, 2026).is_empty());
    }

    #[test]
    fn test_leap_day_anchor_clamps_to_feb_28() {
        let birth = date(2000, 2, 29);
        assert_eq!(anchor_date(birth, 2027), Some(date(2027, 2, 28)));
        assert_eq!(anchor_date(birth, 2028), Some(date(2028, 2, 29)));

        let cycles = build_yearly_cycles(birth, 2, 2027);
        assert_eq!(cycles[0].cycle_start, date(2027, 2, 28));
        assert_eq!(cycles[1].cycle_start, date(2027, 4, 21));
    }

    #[test]
    fn test_today_card_follows_calendar() {
        let birth = date(2000, 3, 15);
        assert_eq!(draw_today_card(birth, birth).title, "今日牌 · Ten of Clubs");
        assert_eq!(
            draw_today_card(birth, date(2000, 3, 16)).title,
            "今日牌 · Jack of Clubs"
        );
        // 52 days later wraps back to the same card
        assert_eq!(
            draw_today_card(birth, date(2000, 5, 6)),
            draw_today_card(birth, birth)
        );
    }

    #[test]
    fn test_today_card_with_future_birth_date() {
        let birth = date(2030, 1, 1);
        let insight = draw_today_card(birth, date(2029, 12, 31));
        assert_eq!(insight.title, "今日牌 · King of Spades");
    }

    #[test]
    fn test_compatibility_score_example() {
        let primary = date(2000, 3, 15);
        let partner = date(2000, 9, 10);
        assert_eq!(day_of_year(partner), 254);
        assert_eq!(compatibility_score(primary, partner), 54);
        assert_eq!(compatibility_score(partner, primary), 54);
    }

    #[test]
    fn test_compatibility_score_range() {
        assert_eq!(compatibility_score(date(2000, 1, 1), date(1990, 1, 1)), 100);
        // doy 1 vs doy 52: difference 51 gives the minimum
        assert_eq!(compatibility_score(date(2001, 1, 1), date(2001, 2, 21)), -2);
        // difference of exactly 52 folds back to 100
        assert_eq!(compatibility_score(date(2001, 1, 1), date(2001, 2, 22)), 100);
    }

    #[test]
    fn test_compatibility_score_is_symmetric() {
        let dates = [
            date(2000, 1, 1),
            date(1999, 7, 4),
            date(2004, 2, 29),
            date(1970, 12, 31),
            date(2012, 10, 10),
        ];
        for a in dates {
            for b in dates {
                assert_eq!(compatibility_score(a, b), compatibility_score(b, a));
            }
        }
    }

    #[test]
    fn test_compatibility_lessons_rotation() {
        let primary = date(2000, 3, 15);
        let partner = date(2000, 9, 10);
        // (75 + 254) mod 4 = 1
        let lessons = compatibility_lessons(primary, partner);
        assert_eq!(lessons.len(), 4);
        assert_eq!(lessons[0], COMPATIBILITY_LESSONS[1]);
        assert_eq!(lessons[3], COMPATIBILITY_LESSONS[0]);
    }

    #[test]
    fn test_rotate_round_trip() {
        let items = ["a", "b", "c", "d"];
        for k in 0..4_i64 {
            let rotated = rotate(&items, k);
            assert_eq!(rotate(&rotated, (4 - k) % 4), items.to_vec());
        }
        assert_eq!(rotate(&items, -1), vec!["d", "a", "b", "c"]);
        assert_eq!(rotate(&items, 6), vec!["c", "d", "a", "b"]);
        assert!(rotate::<&str>(&[], 3).is_empty());
    }

    #[test]
    fn test_compatibility_theme() {
        let primary = date(2000, 3, 15);
        let partner = date(2000, 9, 10);
        // offset 254 mod 52 = 46, index (74 + 46) mod 52 = 16
        assert_eq!(
            compatibility_theme(primary, partner),
            "关系的核心能量来自 Four of Clubs"
        );
    }
}
