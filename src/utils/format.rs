use rust_i18n::t;

/// Format a minute count, e.g. `90` as "1 h 30 min"
pub fn format_duration(minutes: u64, locale: &str) -> String {
    if minutes < 60 {
        return t!("duration_minutes", locale = locale, minutes = minutes).to_string();
    }

    let hours = minutes / 60;
    let mins = minutes % 60;

    if mins == 0 {
        return t!("duration_hours", locale = locale, hours = hours).to_string();
    }

    t!(
        "duration_hours_minutes",
        locale = locale,
        hours = hours,
        minutes = mins
    )
    .to_string()
}

/// Format an amount of money with thousands separators, e.g. `10500` as "¥10,500"
pub fn format_currency(amount: u64, locale: &str) -> String {
    t!("currency", locale = locale, amount = group_thousands(amount)).to_string()
}

/// Insert a comma between every group of three digits
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}
