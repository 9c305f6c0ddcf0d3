//! Builder for creating and configuring HolidayService instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::{Clock, HolidayService};
use crate::{
    allowance::AllowancePolicy,
    db::Database,
    error::{FreezeError, Result},
};

/// Builder for creating and configuring HolidayService instances.
#[derive(Debug, Clone, Default)]
pub struct HolidayServiceBuilder {
    database_path: Option<PathBuf>,
    clock: Clock,
    policy: AllowancePolicy,
}

impl HolidayServiceBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/streakguard/streakguard.db` or
    /// `~/.local/share/streakguard/streakguard.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the clock "today" and "now" are read from.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Overrides the per-tier allowances.
    pub fn with_policy(mut self, policy: AllowancePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds the configured service instance.
    ///
    /// # Errors
    ///
    /// Returns `FreezeError::FileSystem` if the database directory cannot be
    /// created.
    /// Returns `FreezeError::Database` if database initialization fails
    pub async fn build(self) -> Result<HolidayService> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| FreezeError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), FreezeError>(())
        })
        .await
        .map_err(|e| FreezeError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        log::debug!("Using database at {}", db_path.display());

        Ok(HolidayService::new(db_path, self.clock, self.policy))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("streakguard")
            .place_data_file("streakguard.db")
            .map_err(|e| FreezeError::XdgDirectory(e.to_string()))
    }
}
