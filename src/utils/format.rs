/// Group the integer digits of a number with commas, keeping one decimal
/// place only when the value has a fractional part.
pub fn thousands(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    let whole = rounded.trunc().abs() as u64;
    let digits = whole.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    let tenths = ((rounded.abs() - whole as f64) * 10.0).round() as u64;
    if tenths == 0 {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, tenths)
    }
}

/// Percentage of the year covered by `months`, for timeline bar geometry
pub fn year_percent(months: usize) -> String {
    format!("{:.4}", months as f64 * 100.0 / 12.0)
}
