use super::models::Earnings;

/// Earnings for a plan, or `None` without a positive hourly rate.
///
/// `None` and a present zero are different results: a short service at a low
/// rate floors to zero.
pub fn calculate_earnings(
    service_duration: u64,
    slot_count: u64,
    hourly_rate: Option<i64>,
) -> Option<Earnings> {
    let rate = hourly_rate.filter(|rate| *rate > 0)? as u64;

    Some(Earnings {
        total: earnings_for_minutes(service_duration.saturating_mul(slot_count), rate),
        per_slot: earnings_for_minutes(service_duration, rate),
    })
}

/// `floor(minutes * hourly_rate / 60)`, saturating at `u64::MAX`
pub fn earnings_for_minutes(minutes: u64, hourly_rate: u64) -> u64 {
    let value = u128::from(minutes) * u128::from(hourly_rate) / 60;
    u64::try_from(value).unwrap_or(u64::MAX)
}
