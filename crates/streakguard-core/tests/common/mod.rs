use jiff::civil::Date;
use streakguard_core::{Clock, HolidayService, HolidayServiceBuilder};
use tempfile::TempDir;

/// Helper function to create a test service whose clock is pinned to `today`
pub async fn create_test_service(today: Date) -> (TempDir, HolidayService) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let service = HolidayServiceBuilder::new()
        .with_database_path(Some(&db_path))
        .with_clock(Clock::fixed(today))
        .build()
        .await
        .expect("Failed to create service");
    (temp_dir, service)
}

/// A second service over the same database, seeing a different day
#[allow(dead_code)]
pub async fn reopen_on(service: &HolidayService, today: Date) -> HolidayService {
    HolidayServiceBuilder::new()
        .with_database_path(Some(service.database_path()))
        .with_clock(Clock::fixed(today))
        .build()
        .await
        .expect("Failed to reopen service")
}
