//! Habit catalog storage.
//!
//! Habit and task ids are SQLite row ids exposed as strings, which is the
//! shape freeze scopes reference them by.

use jiff::Timestamp;
use rusqlite::params;

use crate::{
    error::{DatabaseResultExt, FreezeError, Result},
    models::{HabitWithTasks, TaskInfo},
};

const INSERT_HABIT_SQL: &str =
    "INSERT INTO habits (user_id, name, category, created_at) VALUES (?1, ?2, ?3, ?4)";
const SELECT_HABITS_SQL: &str = "SELECT id, name, category, current_streak FROM habits WHERE user_id = ?1 ORDER BY id";
const SELECT_TASKS_SQL: &str =
    "SELECT id, title FROM habit_tasks WHERE habit_id = ?1 ORDER BY task_order, id";
const CHECK_HABIT_OWNER_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM habits WHERE id = ?1 AND user_id = ?2)";
const GET_MAX_TASK_ORDER_SQL: &str =
    "SELECT COALESCE(MAX(task_order), 0) FROM habit_tasks WHERE habit_id = ?1";
const INSERT_TASK_SQL: &str =
    "INSERT INTO habit_tasks (habit_id, title, task_order, created_at) VALUES (?1, ?2, ?3, ?4)";
const COUNT_HABITS_SQL: &str = "SELECT COUNT(*) FROM habits WHERE user_id = ?1";
const COUNT_TASKS_SQL: &str = "SELECT COUNT(*) FROM habit_tasks t JOIN habits h ON h.id = t.habit_id WHERE h.user_id = ?1";

fn parse_habit_id(habit_id: &str) -> Result<i64> {
    habit_id.parse::<i64>().map_err(|_| {
        FreezeError::invalid_input("habit_id").with_reason(format!("'{habit_id}' is not a habit id"))
    })
}

impl super::Database {
    /// Adds a habit without tasks.
    pub fn add_habit(
        &mut self,
        user_id: &str,
        name: &str,
        category: Option<&str>,
        now: Timestamp,
    ) -> Result<HabitWithTasks> {
        if name.trim().is_empty() {
            return Err(FreezeError::invalid_input("name").with_reason("habit name is empty"));
        }

        self.connection
            .execute(
                INSERT_HABIT_SQL,
                params![user_id, name, category, now.to_string()],
            )
            .db_context("Failed to insert habit")?;

        Ok(HabitWithTasks {
            id: self.connection.last_insert_rowid().to_string(),
            name: name.to_string(),
            category: category.map(String::from),
            tasks: Vec::new(),
            current_streak: 0,
        })
    }

    /// Appends a task to one of the user's habits.
    pub fn add_task(
        &mut self,
        user_id: &str,
        habit_id: &str,
        title: &str,
        now: Timestamp,
    ) -> Result<TaskInfo> {
        let habit_row = parse_habit_id(habit_id)?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let owned: bool = tx
            .query_row(CHECK_HABIT_OWNER_SQL, params![habit_row, user_id], |row| {
                row.get(0)
            })
            .db_context("Failed to check habit ownership")?;
        if !owned {
            return Err(FreezeError::invalid_input("habit_id")
                .with_reason(format!("habit {habit_id} does not exist for user '{user_id}'")));
        }

        let max_order: i64 = tx
            .query_row(GET_MAX_TASK_ORDER_SQL, params![habit_row], |row| row.get(0))
            .db_context("Failed to get max task order")?;

        tx.execute(
            INSERT_TASK_SQL,
            params![habit_row, title, max_order + 1, now.to_string()],
        )
        .db_context("Failed to insert task")?;
        let id = tx.last_insert_rowid();

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(TaskInfo {
            id: id.to_string(),
            title: title.to_string(),
        })
    }

    /// The user's habits with their ordered tasks.
    pub fn get_habits_with_tasks(&self, user_id: &str) -> Result<Vec<HabitWithTasks>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_HABITS_SQL)
            .db_context("Failed to prepare habits query")?;
        let mut habits = stmt
            .query_map(params![user_id], |row| {
                Ok(HabitWithTasks {
                    id: row.get::<_, i64>(0)?.to_string(),
                    name: row.get(1)?,
                    category: row.get(2)?,
                    tasks: Vec::new(),
                    current_streak: row.get(3)?,
                })
            })
            .db_context("Failed to query habits")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch habits")?;

        let mut task_stmt = self
            .connection
            .prepare(SELECT_TASKS_SQL)
            .db_context("Failed to prepare tasks query")?;
        for habit in &mut habits {
            habit.tasks = task_stmt
                .query_map(params![parse_habit_id(&habit.id)?], |row| {
                    Ok(TaskInfo {
                        id: row.get::<_, i64>(0)?.to_string(),
                        title: row.get(1)?,
                    })
                })
                .db_context("Failed to query tasks")?
                .collect::<std::result::Result<Vec<_>, _>>()
                .db_context("Failed to fetch tasks")?;
        }

        Ok(habits)
    }

    /// `(habits, tasks)` owned by the user.
    pub fn habit_counts(&self, user_id: &str) -> Result<(u32, u32)> {
        let habits: u32 = self
            .connection
            .query_row(COUNT_HABITS_SQL, params![user_id], |row| row.get(0))
            .db_context("Failed to count habits")?;
        let tasks: u32 = self
            .connection
            .query_row(COUNT_TASKS_SQL, params![user_id], |row| row.get(0))
            .db_context("Failed to count tasks")?;
        Ok((habits, tasks))
    }
}
