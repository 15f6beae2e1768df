use super::models::{Slot, SlotSpec};
use crate::utils::time::{TimeOfDay, MINUTES_PER_DAY};

/// Slot count and time usage for one window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    /// Slots to lay out, never more than `physical_slot_count`
    pub slot_count: u64,
    /// Slots the window holds before any cap
    pub physical_slot_count: u64,
    pub used_minutes: u64,
    pub total_minutes: u64,
}

impl Partition {
    /// Keep at most `max_slots` slots, recomputing the time they use
    pub fn capped(self, spec: SlotSpec, max_slots: Option<u64>) -> Partition {
        let slot_count = match max_slots {
            Some(max) => self.slot_count.min(max),
            None => self.slot_count,
        };
        Partition {
            slot_count,
            used_minutes: used_minutes(spec, slot_count),
            ..self
        }
    }

    /// Unused minutes, `None` if the partition overran the window
    pub fn remaining_minutes(&self) -> Option<u64> {
        self.total_minutes.checked_sub(self.used_minutes)
    }
}

/// Largest `n` with `n * service + (n - 1) * break <= total`.
///
/// Breaks only sit between slots, so one break is added to the window before
/// dividing by the full period. A zero period yields zero slots.
pub fn slot_count(total_minutes: u64, spec: SlotSpec) -> u64 {
    let period = spec.period();
    if period == 0 {
        return 0;
    }
    total_minutes.saturating_add(spec.break_duration) / period
}

/// Minutes occupied by `slot_count` services and the breaks between them
pub fn used_minutes(spec: SlotSpec, slot_count: u64) -> u64 {
    if slot_count == 0 {
        return 0;
    }
    spec.service_duration
        .saturating_mul(slot_count)
        .saturating_add(spec.break_duration.saturating_mul(slot_count - 1))
}

/// Fit as many slots as possible into `total_minutes`
pub fn partition(total_minutes: u64, spec: SlotSpec) -> Partition {
    let slot_count = slot_count(total_minutes, spec);
    Partition {
        slot_count,
        physical_slot_count: slot_count,
        used_minutes: used_minutes(spec, slot_count),
        total_minutes,
    }
}

/// Lay out `slot_count` slots back to back from `start`.
///
/// Each slot ends `service_duration` after it starts and the next one starts
/// `break_duration` after that. End times wrap past midnight.
pub fn materialize<P>(start: TimeOfDay, spec: SlotSpec, slot_count: u32) -> Vec<Slot<P>> {
    let service = wrap_offset(spec.service_duration);
    let gap = wrap_offset(spec.break_duration);

    let mut slots = Vec::with_capacity(slot_count as usize);
    let mut current = start;

    for index in 1..=slot_count {
        let end = current.add_minutes(service);
        slots.push(Slot {
            slot: index,
            start_time: current,
            end_time: end,
            duration: spec.service_duration,
            is_filled: false,
            assignee: None,
        });
        current = end.add_minutes(gap);
    }

    slots
}

// Offsets only matter modulo one day
fn wrap_offset(minutes: u64) -> i64 {
    (minutes % u64::from(MINUTES_PER_DAY)) as i64
}
