use super::earnings::calculate_earnings;
use super::models::{Rejection, SlotPlan, SlotRequest, SlotSpec, ValidationResult, Window};
use super::partition::{materialize, partition};
use crate::utils::time::TimeOfDay;
use tracing::{debug, error};

/// Validate a request and lay out its slots.
///
/// Checks run in a fixed order and the first failing one decides the
/// rejection.
pub fn validate_time_slots_for<P>(request: &SlotRequest) -> ValidationResult<P> {
    let result = plan(request);
    match &result {
        Ok(plan) => debug!(
            slot_count = plan.slot_count,
            physical_slot_count = plan.physical_slot_count,
            used_minutes = plan.used_minutes,
            remaining_minutes = plan.remaining_minutes,
            "Time slots computed"
        ),
        Err(rejection) if rejection.is_internal() => error!(
            ?request,
            %rejection,
            "Slot partition overran its window, this is a bug in the slot arithmetic"
        ),
        Err(rejection) => debug!(reason = rejection.code(), %rejection, "Time slot request rejected"),
    }
    result.into()
}

/// [`validate_time_slots_for`] without an assignee payload
pub fn validate_time_slots(request: &SlotRequest) -> ValidationResult {
    validate_time_slots_for(request)
}

fn plan<P>(request: &SlotRequest) -> Result<SlotPlan<P>, Rejection> {
    // 1. Both ends of the window are required
    let (start_text, end_text) = match (
        request.start_time.as_deref().filter(|s| !s.is_empty()),
        request.end_time.as_deref().filter(|s| !s.is_empty()),
    ) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err(Rejection::MissingInput),
    };

    // 2-3. Durations
    if request.service_duration <= 0 {
        return Err(Rejection::InvalidServiceDuration {
            service_duration: request.service_duration,
        });
    }
    if request.break_duration < 0 {
        return Err(Rejection::InvalidBreakDuration {
            break_duration: request.break_duration,
        });
    }
    let spec = SlotSpec::new(
        request.service_duration as u64,
        request.break_duration as u64,
    );

    // 4. Time format
    let window = Window::new(TimeOfDay::parse(start_text)?, TimeOfDay::parse(end_text)?);

    // 5. Window length
    let total_minutes = window.total_minutes();
    if total_minutes == 0 {
        return Err(Rejection::InvertedOrEmptyWindow);
    }

    // 6. A single service must fit
    if spec.service_duration > total_minutes {
        return Err(Rejection::ServiceDurationExceedsWindow {
            service_duration: spec.service_duration,
            total_minutes,
        });
    }

    // 7. Divisor of the slot count formula
    if spec.period() == 0 {
        return Err(Rejection::ZeroPeriodLength);
    }

    // 8. At least one slot
    let partition = partition(total_minutes, spec);
    if partition.slot_count < 1 {
        return Err(Rejection::NoSlotsFit {
            total_minutes,
            service_duration: spec.service_duration,
        });
    }

    let partition = partition.capped(spec, request.participant_cap());

    // 9. The formula must never overrun the window
    let remaining_minutes = match partition.remaining_minutes() {
        Some(remaining) => remaining,
        None => {
            return Err(Rejection::CapacityOverflow {
                slot_count: partition.slot_count,
                used_minutes: partition.used_minutes,
                total_minutes,
                excess_minutes: partition.used_minutes - total_minutes,
            })
        }
    };

    // used <= total < 1440 bounds both counts
    let slot_count = partition.slot_count as u32;
    let physical_slot_count = partition.physical_slot_count as u32;

    Ok(SlotPlan {
        slot_count,
        physical_slot_count,
        used_minutes: partition.used_minutes,
        remaining_minutes,
        available_minutes: total_minutes,
        slots: materialize(window.start, spec, slot_count),
        earnings: calculate_earnings(
            spec.service_duration,
            partition.slot_count,
            request.hourly_rate,
        ),
    })
}
