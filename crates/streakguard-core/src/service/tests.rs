//! Tests for the service module.

use std::path::Path;

use jiff::civil::{date, Date};
use tempfile::TempDir;

use super::*;
use crate::{
    models::{FreezeScope, FrozenTaskEntry, Limit, PeriodState, PlanTier},
    params::{
        AddHabit, AddTask, CanCreateParams, CancelPeriod, CreatePeriod, FrozenQuery, SetTier,
        UserParams,
    },
};

async fn service_on(path: &Path, today: Date) -> HolidayService {
    HolidayServiceBuilder::new()
        .with_database_path(Some(path))
        .with_clock(Clock::fixed(today))
        .build()
        .await
        .expect("Failed to create service")
}

/// Helper function to create a test service pinned to `today`
async fn create_test_service(today: Date) -> (TempDir, HolidayService) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let service = service_on(&temp_dir.path().join("test.db"), today).await;
    (temp_dir, service)
}

fn alice() -> UserParams {
    UserParams {
        user_id: "alice".to_string(),
    }
}

fn all_period(start: &str, end: &str) -> CreatePeriod {
    CreatePeriod {
        user_id: "alice".to_string(),
        start_date: start.to_string(),
        end_date: end.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_create_then_get_active() {
    let (_temp_dir, service) = create_test_service(date(2025, 1, 8)).await;

    let created = service
        .create_period(&CreatePeriod {
            reason: Some("Ski trip".to_string()),
            ..all_period("2025-01-10", "2025-01-14")
        })
        .await
        .expect("Failed to create period");
    assert_eq!(created.state, PeriodState::Scheduled);
    assert_eq!(created.duration_days, 5);
    assert_eq!(created.days_remaining, 6);

    let active = service
        .get_active_period(&alice())
        .await
        .expect("Failed to get active period")
        .expect("Expected an active period");
    assert_eq!(active.period.id, created.period.id);
    assert_eq!(active.period.reason.as_deref(), Some("Ski trip"));
}

#[tokio::test]
async fn test_active_period_expires_lazily() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.db");

    let service = service_on(&path, date(2025, 1, 10)).await;
    service
        .create_period(&all_period("2025-01-10", "2025-01-12"))
        .await
        .unwrap();

    let later = service_on(&path, date(2025, 1, 13)).await;
    assert!(later.get_active_period(&alice()).await.unwrap().is_none());

    let history = later.get_history(&alice()).await.unwrap();
    assert_eq!(history[0].state, PeriodState::Expired);
    assert!(!history[0].period.is_active);
    assert_eq!(history[0].period.deactivated_at, None);

    // the slot is free again
    later
        .create_period(&all_period("2025-01-13", "2025-01-14"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_free_user_without_allowance_needs_premium() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.db");

    for day in [5, 12, 19] {
        let start = date(2025, 2, day);
        let service = service_on(&path, start).await;
        let period = service
            .create_period(&all_period(&start.to_string(), &start.to_string()))
            .await
            .unwrap();
        service
            .cancel_period(&CancelPeriod {
                user_id: "alice".to_string(),
                id: period.period.id,
            })
            .await
            .unwrap();
    }

    let service = service_on(&path, date(2025, 3, 1)).await;
    let stats = service.get_stats(&alice()).await.unwrap();
    assert_eq!(stats.holidays_this_year, 3);
    assert_eq!(stats.remaining_allowance, Limit::Limited(0));

    let outcome = service
        .can_create(&CanCreateParams {
            user_id: "alice".to_string(),
            start_date: "2025-03-02".to_string(),
            end_date: "2025-03-03".to_string(),
        })
        .await
        .unwrap();
    assert!(!outcome.can_create);
    assert!(outcome.requires_premium);

    let err = service
        .create_period(&all_period("2025-03-02", "2025-03-03"))
        .await
        .unwrap_err();
    assert!(err.requires_premium());

    service
        .set_tier(&SetTier {
            user_id: "alice".to_string(),
            tier: "premium".to_string(),
        })
        .await
        .unwrap();
    let stats = service.get_stats(&alice()).await.unwrap();
    assert_eq!(stats.plan, PlanTier::Premium);
    assert_eq!(stats.remaining_allowance, Limit::Unlimited);
    assert!(service
        .create_period(&all_period("2025-03-02", "2025-04-30"))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_empty_task_selection_rejected_before_store() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.db");
    let service = service_on(&path, date(2025, 5, 1)).await;

    // removing the database proves the store is never opened
    std::fs::remove_file(&path).unwrap();
    let err = service
        .create_period(&CreatePeriod {
            scope: "tasks".to_string(),
            ..all_period("2025-05-02", "2025-05-03")
        })
        .await
        .unwrap_err();
    assert!(matches!(err, FreezeError::EmptySelection { .. }));
    assert!(!path.exists());
}

#[tokio::test]
async fn test_past_start_is_invalid_range() {
    let (_temp_dir, service) = create_test_service(date(2025, 5, 10)).await;
    let err = service
        .create_period(&all_period("2025-05-09", "2025-05-11"))
        .await
        .unwrap_err();
    assert!(matches!(err, FreezeError::InvalidDateRange { .. }));
    assert!(!err.requires_premium());
}

#[tokio::test]
async fn test_cancel_twice_is_already_inactive() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.db");

    let service = service_on(&path, date(2025, 4, 1)).await;
    let created = service
        .create_period(&all_period("2025-04-01", "2025-04-07"))
        .await
        .unwrap();
    let cancel = CancelPeriod {
        user_id: "alice".to_string(),
        id: created.period.id,
    };

    let on_third = service_on(&path, date(2025, 4, 3)).await;
    let cancelled = on_third.cancel_period(&cancel).await.unwrap();
    assert_eq!(cancelled.state, PeriodState::CancelledEarly);
    let first_stamp = cancelled.period.deactivated_at;
    assert!(first_stamp.is_some());

    let on_fourth = service_on(&path, date(2025, 4, 4)).await;
    let err = on_fourth.cancel_period(&cancel).await.unwrap_err();
    assert!(err.is_idempotent_success());

    let history = on_fourth.get_history(&alice()).await.unwrap();
    assert_eq!(history[0].period.deactivated_at, first_stamp);
}

#[tokio::test]
async fn test_cancel_unknown_period_is_not_found() {
    let (_temp_dir, service) = create_test_service(date(2025, 4, 1)).await;
    let err = service
        .cancel_period(&CancelPeriod {
            user_id: "alice".to_string(),
            id: 42,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, FreezeError::NotFound { id: 42 }));
}

#[tokio::test]
async fn test_history_reflects_early_cancellation() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.db");

    let premium = SetTier {
        user_id: "alice".to_string(),
        tier: "premium".to_string(),
    };
    let service = service_on(&path, date(2025, 4, 1)).await;
    service.set_tier(&premium).await.unwrap();
    let created = service
        .create_period(&all_period("2025-04-01", "2025-04-30"))
        .await
        .unwrap();

    let cancel_day = service_on(&path, date(2025, 4, 15)).await;
    cancel_day
        .cancel_period(&CancelPeriod {
            user_id: "alice".to_string(),
            id: created.period.id,
        })
        .await
        .unwrap();

    let query = |day: &str| FrozenQuery {
        user_id: "alice".to_string(),
        date: day.to_string(),
        habit_id: Some("7".to_string()),
        ..Default::default()
    };
    assert!(cancel_day.is_frozen(&query("2025-04-10")).await.unwrap());
    assert!(!cancel_day.is_frozen(&query("2025-04-20")).await.unwrap());

    let days = cancel_day
        .frozen_dates(&FrozenQuery {
            until: Some("2025-04-30".to_string()),
            ..query("2025-03-30")
        })
        .await
        .unwrap();
    assert_eq!(days.len(), 14);
    assert_eq!(days.first(), Some(&date(2025, 4, 1)));
    assert_eq!(days.last(), Some(&date(2025, 4, 14)));
}

#[tokio::test]
async fn test_task_scoped_period_from_catalog() {
    let (_temp_dir, service) = create_test_service(date(2025, 6, 1)).await;

    let gym = service
        .add_habit(&AddHabit {
            user_id: "alice".to_string(),
            name: "Gym".to_string(),
            category: Some("health".to_string()),
        })
        .await
        .unwrap();
    let legs = service
        .add_task(&AddTask {
            user_id: "alice".to_string(),
            habit_id: gym.id.clone(),
            title: "Legs".to_string(),
        })
        .await
        .unwrap();
    let arms = service
        .add_task(&AddTask {
            user_id: "alice".to_string(),
            habit_id: gym.id.clone(),
            title: "Arms".to_string(),
        })
        .await
        .unwrap();

    let habits = service.get_habits_with_tasks(&alice()).await.unwrap();
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0].task_count(), 2);

    let created = service
        .create_period(&CreatePeriod {
            scope: "tasks".to_string(),
            frozen_tasks: vec![FrozenTaskEntry {
                habit_id: gym.id.clone(),
                task_ids: vec![legs.id.clone()],
            }],
            ..all_period("2025-06-02", "2025-06-04")
        })
        .await
        .unwrap();
    assert_eq!(
        created.period.scope,
        FreezeScope::tasks([(gym.id.clone(), [legs.id.clone()])])
    );

    let query = |tasks: Vec<String>| FrozenQuery {
        user_id: "alice".to_string(),
        date: "2025-06-03".to_string(),
        habit_id: Some(gym.id.clone()),
        task_ids: tasks,
        ..Default::default()
    };
    assert!(service.is_frozen(&query(vec![legs.id.clone()])).await.unwrap());
    assert!(!service
        .is_frozen(&query(vec![legs.id.clone(), arms.id.clone()]))
        .await
        .unwrap());

    let stats = service.get_stats(&alice()).await.unwrap();
    assert_eq!((stats.total_habits, stats.total_tasks), (1, 2));
    assert_eq!(stats.total_days_this_year, 3);
}

#[tokio::test]
async fn test_second_period_while_one_is_scheduled() {
    let (_temp_dir, service) = create_test_service(date(2025, 6, 1)).await;
    let first = service
        .create_period(&all_period("2025-06-10", "2025-06-12"))
        .await
        .unwrap();

    let err = service
        .create_period(&all_period("2025-06-20", "2025-06-21"))
        .await
        .unwrap_err();
    assert!(matches!(err, FreezeError::ActivePeriodExists { id } if id == first.period.id));
}

#[tokio::test]
async fn test_bad_range_reported_even_with_scheduled_period() {
    let (_temp_dir, service) = create_test_service(date(2025, 1, 8)).await;
    service
        .create_period(&all_period("2025-01-10", "2025-01-12"))
        .await
        .unwrap();

    let inverted = service
        .create_period(&all_period("2025-01-20", "2025-01-15"))
        .await
        .unwrap_err();
    assert!(matches!(inverted, FreezeError::InvalidDateRange { .. }));

    let past = service
        .create_period(&all_period("2024-12-01", "2024-12-02"))
        .await
        .unwrap_err();
    assert!(matches!(past, FreezeError::InvalidDateRange { .. }));
}
