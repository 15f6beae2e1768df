use crate::components::time_slots::{Assignee, Rejection, SlotPlan, ValidationResult};
use crate::error::PlannerResult;
use crate::utils::format::{format_currency, format_duration};
use crate::utils::time::TimeOfDay;
use rust_i18n::t;
use serde::Serialize;

/// User-facing message for a rejection
pub fn rejection_message(rejection: &Rejection, locale: &str) -> String {
    let fmt_duration = |minutes: u64| format_duration(minutes, locale);

    match rejection {
        Rejection::MissingInput => t!("reason_missing_input", locale = locale).to_string(),
        Rejection::InvalidServiceDuration { service_duration } => t!(
            "reason_invalid_service_duration",
            locale = locale,
            service_duration = service_duration
        )
        .to_string(),
        Rejection::InvalidBreakDuration { break_duration } => t!(
            "reason_invalid_break_duration",
            locale = locale,
            break_duration = break_duration
        )
        .to_string(),
        Rejection::MalformedTime { input } => {
            t!("reason_malformed_time", locale = locale, input = input).to_string()
        }
        Rejection::InvertedOrEmptyWindow => {
            t!("reason_inverted_or_empty_window", locale = locale).to_string()
        }
        Rejection::ServiceDurationExceedsWindow {
            service_duration,
            total_minutes,
        } => t!(
            "reason_service_duration_exceeds_window",
            locale = locale,
            service_duration = fmt_duration(*service_duration),
            total_minutes = fmt_duration(*total_minutes)
        )
        .to_string(),
        Rejection::ZeroPeriodLength => t!("reason_zero_period_length", locale = locale).to_string(),
        Rejection::NoSlotsFit {
            total_minutes,
            service_duration,
        } => t!(
            "reason_no_slots_fit",
            locale = locale,
            total_minutes = fmt_duration(*total_minutes),
            service_duration = fmt_duration(*service_duration)
        )
        .to_string(),
        Rejection::CapacityOverflow {
            slot_count,
            used_minutes,
            total_minutes,
            excess_minutes,
        } => t!(
            "reason_capacity_overflow",
            locale = locale,
            slot_count = slot_count,
            used_minutes = fmt_duration(*used_minutes),
            total_minutes = fmt_duration(*total_minutes),
            excess_minutes = fmt_duration(*excess_minutes)
        )
        .to_string(),
    }
}

/// Suggestions for rejections caused by a window that is too short
pub fn remedies(rejection: &Rejection, locale: &str) -> Vec<String> {
    match rejection {
        Rejection::ServiceDurationExceedsWindow { .. }
        | Rejection::NoSlotsFit { .. }
        | Rejection::CapacityOverflow { .. } => vec![
            t!("remedy_shorten_service", locale = locale).to_string(),
            t!("remedy_reduce_breaks", locale = locale).to_string(),
            t!("remedy_extend_window", locale = locale).to_string(),
        ],
        _ => Vec::new(),
    }
}

/// Human-readable report of a validation result
pub fn render_text<P>(result: &ValidationResult<P>, locale: &str, show_earnings: bool) -> String {
    match result {
        ValidationResult::Valid(plan) => render_plan(plan, locale, show_earnings),
        ValidationResult::Invalid(rejection) => render_rejection(rejection, locale),
    }
}

fn render_plan<P>(plan: &SlotPlan<P>, locale: &str, show_earnings: bool) -> String {
    let fmt_duration = |minutes: u64| format_duration(minutes, locale);
    let mut lines = Vec::with_capacity(plan.slots.len() + 6);

    if let (Some(first), Some(last)) = (plan.first_slot(), plan.last_slot()) {
        // The window ends after the slack that follows the last slot
        let window_end = last.end_time.add_minutes(plan.remaining_minutes as i64);
        lines.push(
            t!(
                "report_title",
                locale = locale,
                start = first.start_time,
                end = window_end,
                available = fmt_duration(plan.available_minutes)
            )
            .to_string(),
        );
    }

    let slot_count = if plan.is_capped() {
        t!(
            "report_slot_count_capped",
            locale = locale,
            count = plan.slot_count,
            physical = plan.physical_slot_count
        )
    } else {
        t!("report_slot_count", locale = locale, count = plan.slot_count)
    };
    lines.push(slot_count.to_string());
    lines.push(t!("report_used", locale = locale, duration = fmt_duration(plan.used_minutes)).to_string());
    lines.push(
        t!(
            "report_remaining",
            locale = locale,
            duration = fmt_duration(plan.remaining_minutes)
        )
        .to_string(),
    );

    let earnings = plan.earnings.filter(|_| show_earnings);
    if show_earnings {
        let amount = earnings
            .map(|e| format_currency(e.total, locale))
            .unwrap_or_else(|| "-".to_string());
        lines.push(t!("report_total_earnings", locale = locale, amount = amount).to_string());
    }

    lines.push(String::new());
    for slot in &plan.slots {
        let line = match earnings {
            Some(e) => t!(
                "report_slot_line_earnings",
                locale = locale,
                slot = slot.slot,
                start = slot.start_time,
                end = slot.end_time,
                duration = fmt_duration(slot.duration),
                amount = format_currency(e.per_slot, locale)
            ),
            None => t!(
                "report_slot_line",
                locale = locale,
                slot = slot.slot,
                start = slot.start_time,
                end = slot.end_time,
                duration = fmt_duration(slot.duration)
            ),
        };
        lines.push(line.to_string());
    }

    lines.join("\n")
}

fn render_rejection(rejection: &Rejection, locale: &str) -> String {
    let mut lines = vec![
        t!("report_error_title", locale = locale).to_string(),
        rejection_message(rejection, locale),
    ];

    let hints = remedies(rejection, locale);
    if !hints.is_empty() {
        lines.push(t!("remedy_heading", locale = locale).to_string());
        lines.extend(hints.into_iter().map(|remedy| format!("  - {}", remedy)));
    }

    lines.join("\n")
}

/// Pretty JSON of a validation result
pub fn render_json<P: Serialize>(result: &ValidationResult<P>) -> PlannerResult<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// JSON schema describing validation results with [`Assignee`] payloads
pub fn render_schema() -> PlannerResult<String> {
    let schema = schemars::schema_for!(ValidationResult<Assignee>);
    Ok(serde_json::to_string_pretty(&schema)?)
}

/// Window start for the `now` keyword, at minute precision
pub fn current_time_of_day() -> TimeOfDay {
    TimeOfDay::from(chrono::Local::now().time())
}
