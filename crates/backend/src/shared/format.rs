/// Formats a number with thousands separators (dots)
///
/// # Examples
/// ```
/// use backend::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1.234.567");
/// assert_eq!(format_number(42), "42");
/// assert_eq!(format_number(0), "0");
/// ```
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Money amount rounded to whole units, e.g. `$1.234.568` or `-$90`
pub fn format_amount(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}${}", sign, format_number(rounded.abs() as usize))
}
