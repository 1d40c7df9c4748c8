// habit_backend/src/models.rs
use crate::schema::{completions, habits};
use crate::stats::DailyStat;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Queryable, Identifiable, Selectable, Serialize, Debug, PartialEq, Clone)]
#[diesel(table_name = habits)]
pub struct Habit {
    pub id: i32,
    pub name: String,
    pub emoji: String,
    pub color: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = habits)]
pub struct NewHabit<'a> {
    pub name: &'a str,
    pub emoji: &'a str,
    pub color: &'a str,
}

#[derive(Queryable, Identifiable, Selectable, Associations, Debug, PartialEq, Clone)]
#[diesel(belongs_to(Habit))]
#[diesel(table_name = completions)]
pub struct Completion {
    pub id: i32,
    pub habit_id: i32,
    pub date: NaiveDate,
    pub completed: bool,
}

#[derive(Insertable)]
#[diesel(table_name = completions)]
pub struct NewCompletion {
    pub habit_id: i32,
    pub date: NaiveDate,
}

/// Completion of a (habit, day) pair as a two-state machine with a single
/// transition. A persisted row means `Completed`; no row means
/// `NotCompleted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionState {
    Completed,
    NotCompleted,
}

impl CompletionState {
    pub fn toggled(self) -> Self {
        match self {
            CompletionState::Completed => CompletionState::NotCompleted,
            CompletionState::NotCompleted => CompletionState::Completed,
        }
    }
}

// Used for creating a habit from a request. Missing fields surface as
// validation errors in the service layer, not as body-parse failures.
#[derive(Deserialize, Debug)]
pub struct CreateHabitRequest {
    pub name: Option<String>,
    pub emoji: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct HabitCreated {
    pub id: i32,
}

#[derive(Deserialize, Debug)]
pub struct ToggleCompletionRequest {
    pub habit_id: Option<i32>,
    pub date: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SuccessResponse {
    pub success: bool,
}

/// A habit decorated with its month-scoped streak figures.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HabitWithStreaks {
    pub id: i32,
    pub name: String,
    pub emoji: String,
    pub color: String,
    pub current_streak: u32,
    pub best_streak: u32,
}

/// Everything the month-grid view needs in one response: habits with
/// streaks, the `"<habit_id>-<YYYY-MM-DD>" -> true` completion map, and the
/// per-day percentage series for the chart.
#[derive(Serialize, Deserialize, Debug)]
pub struct MonthSummary {
    pub habits: Vec<HabitWithStreaks>,
    pub completions: BTreeMap<String, bool>,
    pub daily_stats: Vec<DailyStat>,
}
