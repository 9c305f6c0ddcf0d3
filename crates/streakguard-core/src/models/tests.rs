#[cfg(test)]
mod model_tests {
    use jiff::{civil::date, Timestamp};

    use crate::{
        display::LocalDateTime,
        models::{
            FreezeScope, HolidayPeriod, HolidayStats, Limit, PeriodState, PeriodView, PlanTier,
        },
    };

    fn create_test_period() -> HolidayPeriod {
        HolidayPeriod {
            id: 12,
            user_id: "alice".to_string(),
            start_date: date(2025, 12, 22),
            end_date: date(2025, 12, 28),
            scope: FreezeScope::All,
            reason: Some("Winter break".to_string()),
            created_at: Timestamp::from_second(1764547200).unwrap(), // 2025-12-01 00:00:00 UTC
            is_active: true,
            deactivated_at: None,
        }
    }

    #[test]
    fn test_period_display_markdown() {
        let period = create_test_period();
        let output = period.to_string();

        assert!(output.starts_with("## Holiday 12\n"));
        assert!(output.contains("- Dates: 2025-12-22 → 2025-12-28 (7 days)"));
        assert!(output.contains("- Freezes: all habits"));
        assert!(output.contains("- Reason: Winter break"));
        assert!(output.contains(&format!("- Created: {}", LocalDateTime(&period.created_at))));
        assert!(!output.contains("Cancelled"));
    }

    #[test]
    fn test_period_view_shows_remaining_days_while_scheduled() {
        let view = PeriodView::new(create_test_period(), date(2025, 12, 20));
        assert_eq!(view.state, PeriodState::Scheduled);
        let output = view.to_string();
        assert!(output.contains("(○ Scheduled)"));
        assert!(output.contains("- Days remaining: 8"));
    }

    #[test]
    fn test_period_view_serializes_flat() {
        let view = PeriodView::new(create_test_period(), date(2025, 12, 24));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["id"], 12);
        assert_eq!(json["start_date"], "2025-12-22");
        assert_eq!(json["state"], "active");
        assert_eq!(json["days_remaining"], 4);
        assert_eq!(json["scope"]["type"], "all");
        assert!(json.get("deactivated_at").is_none());
    }

    #[test]
    fn test_stats_display() {
        let stats = HolidayStats {
            plan: PlanTier::Free,
            year: 2025,
            holidays_this_year: 2,
            total_days_this_year: 9,
            remaining_allowance: Limit::Limited(1),
            max_duration: Limit::Limited(7),
            total_habits: 3,
            total_tasks: 6,
        };
        let output = stats.to_string();
        assert!(output.contains("# Holiday usage 2025"));
        assert!(output.contains("- **Plan**: free"));
        assert!(output.contains("- **Holidays left**: 1"));
        assert!(output.contains("- **Longest holiday**: 7 days"));
        assert!(output.contains("3 habits, 6 tasks"));

        let premium = HolidayStats {
            plan: PlanTier::Premium,
            remaining_allowance: Limit::Unlimited,
            max_duration: Limit::Unlimited,
            ..stats
        };
        let output = premium.to_string();
        assert!(output.contains("- **Holidays left**: unlimited"));
        assert!(output.contains("- **Longest holiday**: unlimited"));
    }

    #[test]
    fn test_tier_and_state_parsing() {
        assert_eq!("premium".parse::<PlanTier>().unwrap(), PlanTier::Premium);
        assert_eq!("PRO".parse::<PlanTier>().unwrap(), PlanTier::Premium);
        assert!("gold".parse::<PlanTier>().is_err());
        assert_eq!(PlanTier::default(), PlanTier::Free);

        assert_eq!(PeriodState::CancelledEarly.to_string(), "cancelled_early");
        assert!(!PeriodState::Scheduled.is_terminal());
    }
}
