//! Month aggregation over sparse sets of completion dates.
//!
//! Pure functions over data the service layer already fetched: month
//! bounds, the two streak measures, and the per-day completion percentage
//! series. Nothing here touches the database, and none of it fails on
//! well-formed input.
//!
//! Callers hand in completion sets already restricted to the target month;
//! adjacent months never influence a streak.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Completion percentage across all habits for one day of the month.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyStat {
    pub day: u32,
    pub percentage: f64,
}

/// First and last calendar day of `(year, month)`, or `None` when the pair
/// does not name a representable month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next_first.pred_opt()?))
}

/// Consecutive completed days ending at `min(today, last)`, walking
/// backward and stopping below `first` or at the first uncompleted day.
///
/// When `today` lies past the month the walk starts at the month's last
/// day; when the month is entirely in the future the start day precedes
/// `first` and the streak is 0. The streak is also 0 whenever the start day
/// itself is not completed; a run ending yesterday does not count today.
pub fn current_streak(
    completed: &BTreeSet<NaiveDate>,
    first: NaiveDate,
    last: NaiveDate,
    today: NaiveDate,
) -> u32 {
    let mut streak = 0;
    let mut day = today.min(last);
    while day >= first && completed.contains(&day) {
        streak += 1;
        day = match day.pred_opt() {
            Some(prev) => prev,
            None => break,
        };
    }
    streak
}

/// Longest run of consecutive calendar days among `completed`.
///
/// A pure interval-max over the set, independent of today. 0 for an empty
/// set.
pub fn best_streak(completed: &BTreeSet<NaiveDate>) -> u32 {
    let mut best = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;
    for &date in completed {
        run = match prev {
            Some(p) if p.succ_opt() == Some(date) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        prev = Some(date);
    }
    best
}

/// Per-day completion percentage across `habit_count` habits for every day
/// in `[first, last]`, rounded to one decimal place.
///
/// `per_habit` maps habit id to that habit's in-month completion dates;
/// habits without completions may be absent from the map but still count in
/// the denominator. With no habits at all every day reports 0.0.
pub fn daily_percentages(
    first: NaiveDate,
    last: NaiveDate,
    per_habit: &HashMap<i32, BTreeSet<NaiveDate>>,
    habit_count: usize,
) -> Vec<DailyStat> {
    let mut stats = Vec::new();
    let mut day = first;
    while day <= last {
        let done = per_habit
            .values()
            .filter(|dates| dates.contains(&day))
            .count();
        let percentage = if habit_count == 0 {
            0.0
        } else {
            round_one_decimal(done as f64 / habit_count as f64 * 100.0)
        };
        stats.push(DailyStat {
            day: day.day(),
            percentage,
        });
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    stats
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn days_of(year: i32, month: u32, days: &[u32]) -> BTreeSet<NaiveDate> {
        days.iter().map(|&d| date(year, month, d)).collect()
    }

    #[test]
    fn month_bounds_cover_regular_and_leap_months() {
        assert_eq!(
            month_bounds(2024, 5),
            Some((date(2024, 5, 1), date(2024, 5, 31)))
        );
        assert_eq!(
            month_bounds(2024, 12),
            Some((date(2024, 12, 1), date(2024, 12, 31)))
        );
        assert_eq!(
            month_bounds(2024, 2),
            Some((date(2024, 2, 1), date(2024, 2, 29)))
        );
        assert_eq!(
            month_bounds(2023, 2),
            Some((date(2023, 2, 1), date(2023, 2, 28)))
        );
    }

    #[test]
    fn month_bounds_reject_invalid_months() {
        assert_eq!(month_bounds(2024, 0), None);
        assert_eq!(month_bounds(2024, 13), None);
    }

    #[test]
    fn current_streak_counts_back_from_today() {
        let (first, last) = month_bounds(2024, 5).unwrap();
        let completed = days_of(2024, 5, &[13, 14, 15]);
        assert_eq!(current_streak(&completed, first, last, date(2024, 5, 15)), 3);
    }

    #[test]
    fn current_streak_is_zero_when_today_is_not_completed() {
        let (first, last) = month_bounds(2024, 5).unwrap();
        // A run ending yesterday does not count today.
        let completed = days_of(2024, 5, &[12, 13, 14]);
        assert_eq!(current_streak(&completed, first, last, date(2024, 5, 15)), 0);
    }

    #[test]
    fn current_streak_starts_at_month_end_when_today_is_later() {
        let (first, last) = month_bounds(2024, 5).unwrap();
        let completed = days_of(2024, 5, &[29, 30, 31]);
        assert_eq!(current_streak(&completed, first, last, date(2024, 6, 15)), 3);
    }

    #[test]
    fn current_streak_spans_the_whole_month_at_most() {
        let (first, last) = month_bounds(2024, 5).unwrap();
        let completed = days_of(2024, 5, &(1..=31).collect::<Vec<_>>());
        assert_eq!(
            current_streak(&completed, first, last, date(2024, 6, 15)),
            31
        );
    }

    #[test]
    fn current_streak_clips_at_the_first_of_the_month() {
        let (first, last) = month_bounds(2024, 5).unwrap();
        // The walk stops below day 1 even though the set only holds
        // in-month dates anyway.
        let completed = days_of(2024, 5, &[1, 2]);
        assert_eq!(current_streak(&completed, first, last, date(2024, 5, 2)), 2);
    }

    #[test]
    fn current_streak_is_zero_for_a_future_month() {
        let (first, last) = month_bounds(2024, 7).unwrap();
        let completed = days_of(2024, 7, &[1, 2, 3]);
        // Today is before the month starts, so the start day is outside it.
        assert_eq!(current_streak(&completed, first, last, date(2024, 6, 15)), 0);
    }

    #[test]
    fn best_streak_finds_the_longest_run_not_the_total() {
        let completed = days_of(2024, 5, &[3, 4, 5, 10]);
        assert_eq!(best_streak(&completed), 3);
    }

    #[test]
    fn best_streak_handles_empty_and_singleton_sets() {
        assert_eq!(best_streak(&BTreeSet::new()), 0);
        assert_eq!(best_streak(&days_of(2024, 5, &[17])), 1);
    }

    #[test]
    fn best_streak_picks_the_later_of_two_runs() {
        let completed = days_of(2024, 5, &[2, 3, 20, 21, 22, 23]);
        assert_eq!(best_streak(&completed), 4);
    }

    #[test]
    fn daily_percentages_are_zero_without_habits() {
        let (first, last) = month_bounds(2024, 5).unwrap();
        let stats = daily_percentages(first, last, &HashMap::new(), 0);
        assert_eq!(stats.len(), 31);
        assert!(stats.iter().all(|s| s.percentage == 0.0));
        assert_eq!(stats[0].day, 1);
        assert_eq!(stats[30].day, 31);
    }

    #[test]
    fn daily_percentages_divide_by_the_full_habit_count() {
        let (first, last) = month_bounds(2024, 5).unwrap();
        let mut per_habit = HashMap::new();
        per_habit.insert(1, days_of(2024, 5, &[10]));
        // Habit 2 has no completions and is absent from the map, but still
        // counts in the denominator.
        let stats = daily_percentages(first, last, &per_habit, 2);
        assert_eq!(stats[9].percentage, 50.0);
        assert_eq!(stats[10].percentage, 0.0);
    }

    #[test]
    fn daily_percentages_round_to_one_decimal() {
        let (first, last) = month_bounds(2024, 5).unwrap();
        let mut per_habit = HashMap::new();
        per_habit.insert(1, days_of(2024, 5, &[10]));
        let stats = daily_percentages(first, last, &per_habit, 3);
        assert_eq!(stats[9].percentage, 33.3);
    }

    #[test]
    fn daily_percentages_cover_february() {
        let (first, last) = month_bounds(2024, 2).unwrap();
        let stats = daily_percentages(first, last, &HashMap::new(), 0);
        assert_eq!(stats.len(), 29);
    }
}
