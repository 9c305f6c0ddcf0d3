//! Per-user plan tier storage.

use jiff::Timestamp;
use rusqlite::{params, types::Type, Connection, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result},
    models::PlanTier,
};

const SELECT_TIER_SQL: &str = "SELECT tier FROM user_tiers WHERE user_id = ?1";
const UPSERT_TIER_SQL: &str = "INSERT INTO user_tiers (user_id, tier, updated_at) VALUES (?1, ?2, ?3) ON CONFLICT(user_id) DO UPDATE SET tier = excluded.tier, updated_at = excluded.updated_at";

/// Tier of `user_id`, [`PlanTier::Free`] when none was ever set.
pub(crate) fn tier_of(conn: &Connection, user_id: &str) -> Result<PlanTier> {
    let tier = conn
        .query_row(SELECT_TIER_SQL, params![user_id], |row| {
            let tier_str: String = row.get(0)?;
            tier_str.parse::<PlanTier>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(0, Type::Text, e.into())
            })
        })
        .optional()
        .db_context("Failed to query plan tier")?;

    Ok(tier.unwrap_or_default())
}

impl super::Database {
    /// Returns the user's plan tier.
    pub fn get_tier(&self, user_id: &str) -> Result<PlanTier> {
        tier_of(&self.connection, user_id)
    }

    /// Sets the user's plan tier.
    pub fn set_tier(&mut self, user_id: &str, tier: PlanTier, now: Timestamp) -> Result<PlanTier> {
        self.connection
            .execute(
                UPSERT_TIER_SQL,
                params![user_id, tier.as_str(), now.to_string()],
            )
            .db_context("Failed to store plan tier")?;

        log::info!("Set plan tier of user '{user_id}' to {}", tier.as_str());
        Ok(tier)
    }
}
