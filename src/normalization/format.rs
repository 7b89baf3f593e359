//! Display formatting shared by the normalizer and the report views.

/// Unit suffix for audience counts.
pub const PERSONS: &str = "명";
/// Unit suffix for revenue in won.
pub const WON: &str = "원";

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Rounds to a whole number first; negative and non-finite values render as `0`.
pub fn group_thousands_f64(x: f64) -> String {
    if !x.is_finite() || x <= 0.0 {
        return "0".to_string();
    }
    group_thousands(x.round() as u64)
}

/// `(1234, "명")` -> `"1,234 명"`.
pub fn with_unit(n: u64, unit: &str) -> String {
    format!("{} {}", group_thousands(n), unit)
}

/// Week-over-week rank movement: `NEW`, `▲3`, `▼2` or `-` when unchanged.
pub fn rank_change_label(change: i64, is_new_entry: bool) -> String {
    if is_new_entry {
        return "NEW".to_string();
    }
    match change {
        0 => "-".to_string(),
        c if c > 0 => format!("▲{c}"),
        c => format!("▼{}", c.unsigned_abs()),
    }
}

/// `12.3456` -> `"12.35%"`.
pub fn percent(x: f64) -> String {
    format!("{x:.2}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(12_345_678_901), "12,345,678,901");
    }

    #[test]
    fn formats_units_and_percentages() {
        assert_eq!(with_unit(150_000, PERSONS), "150,000 명");
        assert_eq!(with_unit(1_500_000_000, WON), "1,500,000,000 원");
        assert_eq!(percent(25.0), "25.00%");
        assert_eq!(percent(33.33333), "33.33%");
        assert_eq!(group_thousands_f64(75_000.4), "75,000");
        assert_eq!(group_thousands_f64(f64::NAN), "0");
    }

    #[test]
    fn labels_rank_movement() {
        assert_eq!(rank_change_label(0, false), "-");
        assert_eq!(rank_change_label(3, false), "▲3");
        assert_eq!(rank_change_label(-2, false), "▼2");
        assert_eq!(rank_change_label(0, true), "NEW");
        assert_eq!(rank_change_label(-5, true), "NEW");
    }
}
