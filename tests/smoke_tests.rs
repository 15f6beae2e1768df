use slot_planner::commands::plan::{rejection_message, render_json, render_text};
use slot_planner::components::time_slots::{
    validate_time_slots, Assignee, Rejection, SlotBoard, SlotPlan, SlotRequest, ValidationResult,
};
use slot_planner::components::validate_time_slots_for;
use slot_planner::error::Error;

fn expect_plan(request: SlotRequest) -> SlotPlan {
    validate_time_slots(&request)
        .into_result()
        .unwrap_or_else(|rejection| panic!("unexpected rejection: {}", rejection))
}

fn expect_rejection(request: SlotRequest) -> Rejection {
    match validate_time_slots(&request) {
        ValidationResult::Invalid(rejection) => rejection,
        ValidationResult::Valid(plan) => panic!("expected a rejection, got {:?}", plan),
    }
}

/// A full working day with breaks and an hourly rate
#[test]
fn test_working_day_with_breaks() {
    let plan = expect_plan(SlotRequest::new("09:00", "17:00", 60, 10).with_hourly_rate(1500));

    assert_eq!(plan.slot_count, 7);
    assert_eq!(plan.used_minutes, 480);
    assert_eq!(plan.remaining_minutes, 0);

    let first = plan.first_slot().unwrap();
    assert_eq!(
        (first.start_time.to_string(), first.end_time.to_string()),
        ("09:00".to_string(), "10:00".to_string())
    );
    let last = plan.last_slot().unwrap();
    assert_eq!(
        (last.start_time.to_string(), last.end_time.to_string()),
        ("16:00".to_string(), "17:00".to_string())
    );

    assert_eq!(plan.total_earnings(), Some(10500));
    assert_eq!(plan.earnings.unwrap().per_slot, 1500);
}

/// A service longer than the window is rejected with both numbers
#[test]
fn test_service_longer_than_window() {
    assert_eq!(
        expect_rejection(SlotRequest::new("09:00", "10:00", 90, 0)),
        Rejection::ServiceDurationExceedsWindow {
            service_duration: 90,
            total_minutes: 60,
        }
    );
}

/// A window that crosses midnight is read as ending the next day
#[test]
fn test_window_across_midnight() {
    let plan = expect_plan(SlotRequest::new("23:30", "00:30", 60, 0));
    assert_eq!(plan.available_minutes, 60);
    assert_eq!(plan.slot_count, 1);
    assert_eq!(plan.slots[0].end_time.to_string(), "00:30");
}

/// A zero service duration is rejected before anything else is looked at
#[test]
fn test_zero_service_duration() {
    assert_eq!(
        expect_rejection(SlotRequest::new("09:00", "10:00", 0, 10)),
        Rejection::InvalidServiceDuration { service_duration: 0 }
    );
}

/// A service that exactly fills the window leaves no slack
#[test]
fn test_exact_single_slot() {
    let plan = expect_plan(SlotRequest::new("14:10", "15:00", 50, 0));
    assert_eq!(plan.slot_count, 1);
    assert_eq!(plan.used_minutes, 50);
    assert_eq!(plan.remaining_minutes, 0);
}

/// The first failing rule decides the rejection
#[test]
fn test_rules_short_circuit_in_order() {
    // Break check comes before time parsing
    assert_eq!(
        expect_rejection(SlotRequest::new("xx", "yy", 30, -10)),
        Rejection::InvalidBreakDuration {
            break_duration: -10
        }
    );
    // Time parsing comes before window length
    assert_eq!(
        expect_rejection(SlotRequest::new("10:00", "10:0x", 30, 0)),
        Rejection::MalformedTime {
            input: "10:0x".to_string()
        }
    );
}

/// A participant cap keeps only the first slots of the day
#[test]
fn test_participant_cap() {
    let capped = expect_plan(
        SlotRequest::new("09:00", "17:00", 60, 10)
            .with_hourly_rate(1500)
            .with_max_participants(3),
    );
    let full = expect_plan(SlotRequest::new("09:00", "17:00", 60, 10).with_hourly_rate(1500));

    assert_eq!(capped.slot_count, 3);
    assert_eq!(capped.physical_slot_count, full.slot_count);
    assert_eq!(capped.slots[..], full.slots[..3]);
    assert_eq!(capped.used_minutes, 200);
    assert_eq!(capped.remaining_minutes, 280);
    assert_eq!(capped.total_earnings(), Some(4500));

    // Zero and negative caps mean "no cap"
    for max in [0, -4] {
        let request = SlotRequest::new("09:00", "17:00", 60, 10)
            .with_hourly_rate(1500)
            .with_max_participants(max);
        assert_eq!(expect_plan(request), full);
    }
}

/// Results serialize the same way every time
#[test]
fn test_json_is_deterministic() {
    let request = SlotRequest::new("08:15", "12:40", 35, 5).with_hourly_rate(1234);
    let first = render_json(&validate_time_slots(&request)).unwrap();
    let second = render_json(&validate_time_slots(&request)).unwrap();
    assert_eq!(first, second);
}

/// Plans survive a JSON round trip, which is how callers store them
#[test]
fn test_plan_round_trips_through_json() {
    let result = validate_time_slots(&SlotRequest::new("10:00", "12:00", 25, 5).with_hourly_rate(900));
    let json = serde_json::to_string(&result).unwrap();
    let back: ValidationResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
}

/// Slots can be handed out after planning without touching the plan logic
#[test]
fn test_assign_slots_on_a_board() {
    let plan = validate_time_slots_for::<Assignee>(&SlotRequest::new("13:00", "15:00", 30, 0))
        .into_result()
        .unwrap();
    let mut board = SlotBoard::from_plan(plan);

    board.assign(1, Assignee::new("staff-1", "Mika")).unwrap();
    board.assign(4, Assignee::new("staff-2", "Sanna")).unwrap();
    assert!(board.assign(4, Assignee::new("staff-3", "Ville")).is_err());
    assert!(board.assign(5, Assignee::new("staff-3", "Ville")).is_err());

    assert_eq!(board.filled_count(), 2);
    assert_eq!(board.open_slots().map(|s| s.slot).collect::<Vec<_>>(), vec![2, 3]);

    board.assign(2, Assignee::new("staff-3", "Ville")).unwrap();
    board.assign(3, Assignee::new("staff-4", "Kaisa")).unwrap();
    assert!(matches!(
        board.assign(1, Assignee::new("staff-5", "Eero")),
        Err(Error::BoardFull { count: 4 })
    ));
}

/// The presentation layer turns reasons into messages
#[test]
fn test_localized_reports() {
    let rejection = Rejection::NoSlotsFit {
        total_minutes: 20,
        service_duration: 30,
    };
    assert_eq!(
        rejection_message(&rejection, "en"),
        "No slot can be created with these settings (window: 20 min, service: 30 min)"
    );

    let result = validate_time_slots(&SlotRequest::new("09:00", "10:30", 40, 10).with_hourly_rate(1500));
    let text = render_text(&result, "ja", true);
    assert!(text.contains("予約枠数: 2枠"));
    assert!(text.contains("総報酬: 2,000円"));
    assert!(text.contains("枠1: 09:00 〜 09:40（40分、1,000円）"));
}
