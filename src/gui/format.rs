//! Metric value formatting for the tiles.

/// Insert thousands separators into a non-negative integer string.
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// "1234567" -> "1,234,567"
pub fn format_count(value: u64) -> String {
    group_digits(&value.to_string())
}

/// "$1,234,567.89" with the requested number of decimals.
pub fn format_money(value: f64, decimals: usize) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };
    match frac_part {
        Some(frac) => format!("{}${}.{}", sign, group_digits(int_part), frac),
        None => format!("{}${}", sign, group_digits(int_part)),
    }
}

/// "2.5x" style multiple.
pub fn format_multiple(value: f64) -> String {
    format!("{:.1}x", value)
}
