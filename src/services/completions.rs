use crate::db::SqlitePool;
use crate::models::{
    Completion, CompletionState, NewCompletion, SuccessResponse, ToggleCompletionRequest,
};
use crate::schema::{completions, habits};
use chrono::NaiveDate;
use diesel::prelude::*;
use rocket::State;

use super::error::ServiceError;

/// Toggle the completion fact for one (habit, day) pair.
///
/// The stored row is the state: present means `Completed`, absent means
/// `NotCompleted`. The transition inserts or deletes accordingly, inside
/// one transaction, and both directions answer the same success body.
pub fn toggle_completion(
    pool: &State<SqlitePool>,
    toggle_req: ToggleCompletionRequest,
) -> Result<SuccessResponse, ServiceError> {
    let habit_id = toggle_req
        .habit_id
        .ok_or_else(|| ServiceError::InvalidInput("habit_id and date are required".to_string()))?;
    let date_str = toggle_req
        .date
        .as_deref()
        .ok_or_else(|| ServiceError::InvalidInput("habit_id and date are required".to_string()))?;
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| ServiceError::InvalidInput("Invalid date format. Use YYYY-MM-DD".to_string()))?;

    let mut conn = pool
        .get()
        .map_err(|e| ServiceError::InternalError(format!("DB connection error: {e}")))?;

    conn.transaction::<_, ServiceError, _>(|conn| {
        let habit_count: i64 = habits::table
            .filter(habits::id.eq(habit_id))
            .count()
            .get_result(conn)?;
        if habit_count == 0 {
            return Err(ServiceError::NotFound("Habit not found".to_string()));
        }

        let existing: Option<Completion> = completions::table
            .filter(completions::habit_id.eq(habit_id))
            .filter(completions::date.eq(date))
            .select(Completion::as_select())
            .first::<Completion>(conn)
            .optional()?;

        let state = match existing {
            Some(_) => CompletionState::Completed,
            None => CompletionState::NotCompleted,
        };
        match state.toggled() {
            CompletionState::Completed => {
                diesel::insert_into(completions::table)
                    .values(&NewCompletion { habit_id, date })
                    .execute(conn)?;
            }
            CompletionState::NotCompleted => {
                diesel::delete(
                    completions::table
                        .filter(completions::habit_id.eq(habit_id))
                        .filter(completions::date.eq(date)),
                )
                .execute(conn)?;
            }
        }
        Ok(())
    })?;

    Ok(SuccessResponse { success: true })
}
