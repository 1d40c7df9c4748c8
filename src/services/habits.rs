use crate::db::SqlitePool;
use crate::models::{
    Completion, CreateHabitRequest, Habit, HabitCreated, HabitWithStreaks, MonthSummary, NewHabit,
};
use crate::schema::{completions, habits};
use crate::stats;
use chrono::{Datelike, Local, NaiveDate};
use diesel::prelude::*;
use rocket::State;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::error::ServiceError;

/// Cycled over at creation time, indexed by the current habit count.
pub const COLOR_PALETTE: [&str; 8] = [
    "bg-orange-100",
    "bg-blue-100",
    "bg-purple-100",
    "bg-green-100",
    "bg-yellow-100",
    "bg-red-100",
    "bg-pink-100",
    "bg-indigo-100",
];

pub const MAX_NAME_CHARS: usize = 100;
const DEFAULT_EMOJI: &str = "⭐";

/// Aggregate one month: every habit with its streaks, the month's
/// completion map, and the daily percentage series. `year`/`month` default
/// to today's.
pub fn month_summary(
    pool: &State<SqlitePool>,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<MonthSummary, ServiceError> {
    let mut conn = pool
        .get()
        .map_err(|e| ServiceError::InternalError(format!("DB connection error: {e}")))?;

    let today = Local::now().date_naive();
    let year = year.unwrap_or_else(|| today.year());
    let month = month.unwrap_or_else(|| today.month());
    let (first, last) = stats::month_bounds(year, month)
        .ok_or_else(|| ServiceError::InvalidInput("Invalid year or month".to_string()))?;

    let all_habits: Vec<Habit> = habits::table
        .order(habits::id.asc())
        .select(Habit::as_select())
        .load::<Habit>(&mut conn)?;

    let month_completions: Vec<Completion> = completions::table
        .filter(completions::date.between(first, last))
        .filter(completions::completed.eq(true))
        .order(completions::date.asc())
        .select(Completion::as_select())
        .load::<Completion>(&mut conn)?;

    let mut per_habit: HashMap<i32, BTreeSet<NaiveDate>> = HashMap::new();
    for completion in &month_completions {
        per_habit
            .entry(completion.habit_id)
            .or_default()
            .insert(completion.date);
    }

    let empty = BTreeSet::new();
    let habits_with_streaks: Vec<HabitWithStreaks> = all_habits
        .iter()
        .map(|habit| {
            let dates = per_habit.get(&habit.id).unwrap_or(&empty);
            HabitWithStreaks {
                id: habit.id,
                name: habit.name.clone(),
                emoji: habit.emoji.clone(),
                color: habit.color.clone(),
                current_streak: stats::current_streak(dates, first, last, today),
                best_streak: stats::best_streak(dates),
            }
        })
        .collect();

    let mut completion_map: BTreeMap<String, bool> = BTreeMap::new();
    for completion in &month_completions {
        completion_map.insert(
            format!("{}-{}", completion.habit_id, completion.date),
            true,
        );
    }

    let daily_stats = stats::daily_percentages(first, last, &per_habit, all_habits.len());

    Ok(MonthSummary {
        habits: habits_with_streaks,
        completions: completion_map,
        daily_stats,
    })
}

/// Validate and insert a new habit. The palette color is assigned from the
/// habit count inside the same transaction as the insert.
pub fn create_habit(
    pool: &State<SqlitePool>,
    create_req: CreateHabitRequest,
) -> Result<HabitCreated, ServiceError> {
    let name = create_req
        .name
        .as_deref()
        .ok_or_else(|| ServiceError::InvalidInput("Habit name is required".to_string()))?
        .trim();
    if name.is_empty() || name.chars().count() > MAX_NAME_CHARS {
        return Err(ServiceError::InvalidInput(
            "Habit name must be between 1-100 characters".to_string(),
        ));
    }

    let emoji: String = create_req
        .emoji
        .as_deref()
        .unwrap_or("")
        .trim()
        .chars()
        .take(2)
        .collect();
    let emoji = if emoji.is_empty() {
        DEFAULT_EMOJI.to_string()
    } else {
        emoji
    };

    let mut conn = pool
        .get()
        .map_err(|e| ServiceError::InternalError(format!("DB connection error: {e}")))?;

    let habit = conn.transaction::<Habit, ServiceError, _>(|conn| {
        let count: i64 = habits::table.count().get_result(conn)?;
        let color = COLOR_PALETTE[count as usize % COLOR_PALETTE.len()];
        let habit = diesel::insert_into(habits::table)
            .values(&NewHabit {
                name,
                emoji: &emoji,
                color,
            })
            .get_result::<Habit>(conn)?;
        Ok(habit)
    })?;

    log::info!("Created habit: {} - {}", habit.id, habit.name);
    Ok(HabitCreated { id: habit.id })
}

/// Delete a habit and all of its completions in one transaction.
pub fn delete_habit(pool: &State<SqlitePool>, habit_id: i32) -> Result<(), ServiceError> {
    let mut conn = pool
        .get()
        .map_err(|e| ServiceError::InternalError(format!("DB connection error: {e}")))?;

    conn.transaction::<_, ServiceError, _>(|conn| {
        diesel::delete(completions::table.filter(completions::habit_id.eq(habit_id)))
            .execute(conn)?;
        let deleted = diesel::delete(habits::table.find(habit_id)).execute(conn)?;
        if deleted == 0 {
            return Err(ServiceError::NotFound("Habit not found".to_string()));
        }
        Ok(())
    })?;

    log::info!("Deleted habit: {habit_id}");
    Ok(())
}
