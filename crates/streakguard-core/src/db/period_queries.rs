//! Holiday period creation, cancellation and queries.

use jiff::{civil::Date, tz::TimeZone, Timestamp};
use rusqlite::{params, types::Type, Connection, OptionalExtension, TransactionBehavior};

use super::tier_queries;
use crate::{
    allowance::{AllowancePolicy, Validator},
    error::{DatabaseResultExt, FreezeError, Result},
    models::{FreezeScope, HolidayPeriod, PeriodRecord},
    stats,
};

const PERIOD_COLUMNS: &str = "id, user_id, start_date, end_date, applies_to_all, frozen_habits, frozen_tasks, reason, created_at, is_active, deactivated_at";
const INSERT_PERIOD_SQL: &str = "INSERT INTO holiday_periods (user_id, start_date, end_date, applies_to_all, frozen_habits, frozen_tasks, reason, created_at, is_active) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 1)";
const SELECT_ACTIVE_ID_SQL: &str =
    "SELECT id FROM holiday_periods WHERE user_id = ?1 AND is_active = 1";
const EXPIRE_STALE_SQL: &str = "UPDATE holiday_periods SET is_active = 0 WHERE user_id = ?1 AND is_active = 1 AND end_date < ?2";
const CANCEL_PERIOD_SQL: &str = "UPDATE holiday_periods SET is_active = 0, deactivated_at = ?1 WHERE id = ?2 AND user_id = ?3 AND is_active = 1";
const EXPIRE_PERIOD_SQL: &str =
    "UPDATE holiday_periods SET is_active = 0 WHERE id = ?1 AND user_id = ?2 AND is_active = 1";

/// A period about to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPeriod {
    pub user_id: String,
    pub start_date: Date,
    pub end_date: Date,
    pub scope: FreezeScope,
    pub reason: Option<String>,
}

impl super::Database {
    /// Helper function to construct a record from a database row.
    fn build_record_from_row(row: &rusqlite::Row) -> rusqlite::Result<PeriodRecord> {
        let frozen_habits = row
            .get::<_, Option<String>>(5)?
            .map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;
        let frozen_tasks = row
            .get::<_, Option<String>>(6)?
            .map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;

        Ok(PeriodRecord {
            id: row.get::<_, i64>(0)? as u64,
            user_id: row.get(1)?,
            start_date: row.get(2)?,
            end_date: row.get(3)?,
            applies_to_all: row.get(4)?,
            frozen_habits,
            frozen_tasks,
            reason: row.get(7)?,
            created_at: row.get(8)?,
            is_active: row.get(9)?,
            deactivated_at: row.get(10)?,
        })
    }

    fn select_period(conn: &Connection, user_id: &str, id: u64) -> Result<Option<HolidayPeriod>> {
        let sql =
            format!("SELECT {PERIOD_COLUMNS} FROM holiday_periods WHERE id = ?1 AND user_id = ?2");
        conn.query_row(&sql, params![id as i64, user_id], Self::build_record_from_row)
            .optional()
            .db_context("Failed to query holiday period")?
            .map(HolidayPeriod::try_from)
            .transpose()
    }

    fn select_history(conn: &Connection, user_id: &str) -> Result<Vec<HolidayPeriod>> {
        let sql = format!(
            "SELECT {PERIOD_COLUMNS} FROM holiday_periods WHERE user_id = ?1 ORDER BY id DESC"
        );
        let mut stmt = conn
            .prepare(&sql)
            .db_context("Failed to prepare history query")?;
        let records = stmt
            .query_map(params![user_id], Self::build_record_from_row)
            .db_context("Failed to query holiday history")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch holiday history")?;

        records.into_iter().map(HolidayPeriod::try_from).collect()
    }

    /// Clear `is_active` on periods whose end date has passed.
    fn expire_stale(conn: &Connection, user_id: &str, today: Date) -> rusqlite::Result<usize> {
        let expired = conn.execute(EXPIRE_STALE_SQL, params![user_id, today.to_string()])?;
        if expired > 0 {
            log::warn!("Lazily deactivated {expired} expired holiday period(s) for user '{user_id}'");
        }
        Ok(expired)
    }

    /// Creates a holiday period.
    ///
    /// The allowance check, the "no other active period" check and the insert
    /// run in one `IMMEDIATE` transaction, so two racing requests cannot both
    /// pass.
    ///
    /// # Errors
    ///
    /// * `FreezeError::ActivePeriodExists` - the user already has a current
    ///   or scheduled period
    /// * validation errors of [`Validator::check`]
    /// * `FreezeError::CreateFailed` - any store failure
    pub fn create_period(
        &mut self,
        new: &NewPeriod,
        policy: &AllowancePolicy,
        today: Date,
        tz: &TimeZone,
        now: Timestamp,
    ) -> Result<HolidayPeriod> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .create_context("Failed to begin transaction")?;

        Self::expire_stale(&tx, &new.user_id, today)
            .create_context("Failed to expire stale periods")?;

        let active: Option<i64> = tx
            .query_row(SELECT_ACTIVE_ID_SQL, params![new.user_id], |row| row.get(0))
            .optional()
            .create_context("Failed to check for an active period")?;
        if let Some(id) = active {
            return Err(FreezeError::ActivePeriodExists { id: id as u64 });
        }

        let tier = tier_queries::tier_of(&tx, &new.user_id)?;
        let history = Self::select_history(&tx, &new.user_id)?;
        let usage = stats::aggregate(&history, tier, policy, today, tz, (0, 0));
        Validator::check(&usage, new.start_date, new.end_date, &new.scope, today)?;

        let (applies_to_all, frozen_habits, frozen_tasks) = PeriodRecord::scope_columns(&new.scope);
        let frozen_habits = frozen_habits.map(|h| serde_json::to_string(&h)).transpose()?;
        let frozen_tasks = frozen_tasks.map(|t| serde_json::to_string(&t)).transpose()?;

        tx.execute(
            INSERT_PERIOD_SQL,
            params![
                new.user_id,
                new.start_date.to_string(),
                new.end_date.to_string(),
                applies_to_all,
                frozen_habits,
                frozen_tasks,
                new.reason,
                now.to_string(),
            ],
        )
        .create_context("Failed to insert holiday period")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().create_context("Failed to commit transaction")?;

        log::info!(
            "Created holiday period {id} for user '{}' ({} to {})",
            new.user_id,
            new.start_date,
            new.end_date
        );

        Ok(HolidayPeriod {
            id,
            user_id: new.user_id.clone(),
            start_date: new.start_date,
            end_date: new.end_date,
            scope: new.scope.clone(),
            reason: new.reason.clone(),
            created_at: now,
            is_active: true,
            deactivated_at: None,
        })
    }

    /// Returns the user's current or scheduled period.
    ///
    /// Periods past their end date are deactivated first and never returned.
    pub fn get_active_period(&self, user_id: &str, today: Date) -> Result<Option<HolidayPeriod>> {
        Self::expire_stale(&self.connection, user_id, today)
            .db_context("Failed to expire stale periods")?;

        let sql = format!(
            "SELECT {PERIOD_COLUMNS} FROM holiday_periods WHERE user_id = ?1 AND is_active = 1"
        );
        self.connection
            .query_row(&sql, params![user_id], Self::build_record_from_row)
            .optional()
            .db_context("Failed to query active period")?
            .map(HolidayPeriod::try_from)
            .transpose()
    }

    /// All periods of the user, most recent first.
    pub fn get_history(&self, user_id: &str) -> Result<Vec<HolidayPeriod>> {
        Self::select_history(&self.connection, user_id)
    }

    /// A single period, if it exists and belongs to the user.
    pub fn get_period(&self, user_id: &str, id: u64) -> Result<Option<HolidayPeriod>> {
        Self::select_period(&self.connection, user_id, id)
    }

    /// Cancels a period, recording `now` as its deactivation time.
    ///
    /// Only a period that is still current can be cancelled; `deactivated_at`
    /// is written exactly once. A period whose end date already passed is
    /// deactivated as a natural expiry instead, without a cancellation
    /// timestamp.
    ///
    /// # Errors
    ///
    /// * `FreezeError::NotFound` - no such period for this user
    /// * `FreezeError::AlreadyInactive` - cancelled or expired before
    /// * `FreezeError::CancelFailed` - any store failure
    pub fn cancel_period(
        &mut self,
        user_id: &str,
        id: u64,
        today: Date,
        now: Timestamp,
    ) -> Result<HolidayPeriod> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .cancel_context("Failed to begin transaction")?;

        let period = Self::select_period(&tx, user_id, id)?.ok_or(FreezeError::NotFound { id })?;
        if !period.is_active {
            return Err(FreezeError::AlreadyInactive { id });
        }

        if period.end_date < today {
            tx.execute(EXPIRE_PERIOD_SQL, params![id as i64, user_id])
                .cancel_context("Failed to expire holiday period")?;
            tx.commit().cancel_context("Failed to commit transaction")?;
            log::warn!("Holiday period {id} had already expired on {}", period.end_date);
            return Err(FreezeError::AlreadyInactive { id });
        }

        let updated = tx
            .execute(CANCEL_PERIOD_SQL, params![now.to_string(), id as i64, user_id])
            .cancel_context("Failed to cancel holiday period")?;
        if updated == 0 {
            return Err(FreezeError::AlreadyInactive { id });
        }

        tx.commit().cancel_context("Failed to commit transaction")?;

        log::info!("Cancelled holiday period {id} for user '{user_id}'");

        Ok(HolidayPeriod {
            is_active: false,
            deactivated_at: Some(now),
            ..period
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::{db::Database, models::PlanTier};

    fn new_period(start: Date, end: Date, scope: FreezeScope) -> NewPeriod {
        NewPeriod {
            user_id: "alice".to_string(),
            start_date: start,
            end_date: end,
            scope,
            reason: None,
        }
    }

    fn at(ts: &str) -> Timestamp {
        ts.parse().unwrap()
    }

    #[test]
    fn test_create_and_read_back_scope() {
        let mut db = Database::in_memory().unwrap();
        let scope = FreezeScope::tasks([("1", ["10", "11"])]);
        let created = db
            .create_period(
                &new_period(date(2025, 3, 1), date(2025, 3, 5), scope.clone()),
                &AllowancePolicy::default(),
                date(2025, 2, 20),
                &TimeZone::UTC,
                at("2025-02-20T08:00:00Z"),
            )
            .unwrap();

        let loaded = db.get_period("alice", created.id).unwrap().unwrap();
        assert_eq!(loaded, created);
        assert_eq!(loaded.scope, scope);
    }

    #[test]
    fn test_second_active_period_is_rejected() {
        let mut db = Database::in_memory().unwrap();
        let policy = AllowancePolicy::default();
        let today = date(2025, 2, 20);
        let first = db
            .create_period(
                &new_period(date(2025, 3, 1), date(2025, 3, 5), FreezeScope::All),
                &policy,
                today,
                &TimeZone::UTC,
                at("2025-02-20T08:00:00Z"),
            )
            .unwrap();

        let err = db
            .create_period(
                &new_period(date(2025, 4, 1), date(2025, 4, 2), FreezeScope::All),
                &policy,
                today,
                &TimeZone::UTC,
                at("2025-02-20T08:05:00Z"),
            )
            .unwrap_err();
        assert!(matches!(err, FreezeError::ActivePeriodExists { id } if id == first.id));
    }

    #[test]
    fn test_allowance_rechecked_inside_transaction() {
        let mut db = Database::in_memory().unwrap();
        let policy = AllowancePolicy::default();
        let tz = TimeZone::UTC;

        for (i, day) in [1, 10, 20].into_iter().enumerate() {
            let start = date(2025, 1, day);
            let p = db
                .create_period(
                    &new_period(start, start, FreezeScope::All),
                    &policy,
                    start,
                    &tz,
                    at(&format!("2025-01-{day:02}T08:00:0{i}Z")),
                )
                .unwrap();
            db.cancel_period("alice", p.id, start, at(&format!("2025-01-{day:02}T09:00:00Z")))
                .unwrap();
        }

        let err = db
            .create_period(
                &new_period(date(2025, 2, 1), date(2025, 2, 2), FreezeScope::All),
                &policy,
                date(2025, 2, 1),
                &tz,
                at("2025-02-01T08:00:00Z"),
            )
            .unwrap_err();
        assert!(err.requires_premium());

        db.set_tier("alice", PlanTier::Premium, at("2025-02-01T08:01:00Z"))
            .unwrap();
        assert!(db
            .create_period(
                &new_period(date(2025, 2, 1), date(2025, 2, 2), FreezeScope::All),
                &policy,
                date(2025, 2, 1),
                &tz,
                at("2025-02-01T08:02:00Z"),
            )
            .is_ok());
    }

    #[test]
    fn test_cancel_twice_keeps_first_timestamp() {
        let mut db = Database::in_memory().unwrap();
        let today = date(2025, 4, 1);
        let p = db
            .create_period(
                &new_period(date(2025, 4, 1), date(2025, 4, 7), FreezeScope::All),
                &AllowancePolicy::default(),
                today,
                &TimeZone::UTC,
                at("2025-04-01T07:00:00Z"),
            )
            .unwrap();

        let cancelled = db
            .cancel_period("alice", p.id, date(2025, 4, 3), at("2025-04-03T10:00:00Z"))
            .unwrap();
        assert_eq!(cancelled.deactivated_at, Some(at("2025-04-03T10:00:00Z")));

        let err = db
            .cancel_period("alice", p.id, date(2025, 4, 4), at("2025-04-04T10:00:00Z"))
            .unwrap_err();
        assert!(matches!(err, FreezeError::AlreadyInactive { .. }));

        let stored = db.get_period("alice", p.id).unwrap().unwrap();
        assert_eq!(stored.deactivated_at, Some(at("2025-04-03T10:00:00Z")));
    }

    #[test]
    fn test_cancel_foreign_period_is_not_found() {
        let mut db = Database::in_memory().unwrap();
        let p = db
            .create_period(
                &new_period(date(2025, 4, 1), date(2025, 4, 2), FreezeScope::All),
                &AllowancePolicy::default(),
                date(2025, 4, 1),
                &TimeZone::UTC,
                at("2025-04-01T07:00:00Z"),
            )
            .unwrap();

        let err = db
            .cancel_period("mallory", p.id, date(2025, 4, 1), at("2025-04-01T08:00:00Z"))
            .unwrap_err();
        assert!(matches!(err, FreezeError::NotFound { .. }));
        assert!(matches!(
            db.cancel_period("alice", 999, date(2025, 4, 1), at("2025-04-01T08:00:00Z")),
            Err(FreezeError::NotFound { id: 999 })
        ));
    }

    #[test]
    fn test_expired_period_is_lazily_deactivated() {
        let mut db = Database::in_memory().unwrap();
        let p = db
            .create_period(
                &new_period(date(2025, 4, 1), date(2025, 4, 2), FreezeScope::All),
                &AllowancePolicy::default(),
                date(2025, 4, 1),
                &TimeZone::UTC,
                at("2025-04-01T07:00:00Z"),
            )
            .unwrap();

        assert!(db.get_active_period("alice", date(2025, 4, 2)).unwrap().is_some());
        assert!(db.get_active_period("alice", date(2025, 4, 3)).unwrap().is_none());

        let stored = db.get_period("alice", p.id).unwrap().unwrap();
        assert!(!stored.is_active);
        assert_eq!(stored.deactivated_at, None);
    }

    #[test]
    fn test_cancel_after_end_is_natural_expiry() {
        let mut db = Database::in_memory().unwrap();
        let p = db
            .create_period(
                &new_period(date(2025, 4, 1), date(2025, 4, 2), FreezeScope::All),
                &AllowancePolicy::default(),
                date(2025, 4, 1),
                &TimeZone::UTC,
                at("2025-04-01T07:00:00Z"),
            )
            .unwrap();

        let err = db
            .cancel_period("alice", p.id, date(2025, 4, 5), at("2025-04-05T07:00:00Z"))
            .unwrap_err();
        assert!(matches!(err, FreezeError::AlreadyInactive { .. }));

        let stored = db.get_period("alice", p.id).unwrap().unwrap();
        assert!(!stored.is_active);
        assert_eq!(stored.deactivated_at, None);
    }

    #[test]
    fn test_history_is_most_recent_first() {
        let mut db = Database::in_memory().unwrap();
        let policy = AllowancePolicy::default();
        let first = db
            .create_period(
                &new_period(date(2025, 4, 1), date(2025, 4, 1), FreezeScope::All),
                &policy,
                date(2025, 4, 1),
                &TimeZone::UTC,
                at("2025-04-01T07:00:00Z"),
            )
            .unwrap();
        let second = db
            .create_period(
                &new_period(date(2025, 4, 5), date(2025, 4, 6), FreezeScope::habits(["1"])),
                &policy,
                date(2025, 4, 3),
                &TimeZone::UTC,
                at("2025-04-03T07:00:00Z"),
            )
            .unwrap();

        let ids: Vec<u64> = db.get_history("alice").unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert!(db.get_history("bob").unwrap().is_empty());
    }
}
