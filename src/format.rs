//! Display formatting for money and areas

/// Group digits in threes: `1234567` → `"1,234,567"`.
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Whole-dollar amount: `"$13,700"`.
pub fn currency(value: u64) -> String {
    format!("${}", thousands(value))
}

/// Per-square-foot amount rounded to cents: `"$2.95"`.
pub fn per_area(value: f64) -> String {
    format!("${:.2}", (value * 100.0).round() / 100.0)
}

/// Project size in square feet, dropping a zero fraction: `"10,000 sq ft"`.
pub fn area(value: f64) -> String {
    if value.fract() == 0.0 && value >= 0.0 && value < u64::MAX as f64 {
        format!("{} sq ft", thousands(value as u64))
    } else {
        format!("{value} sq ft")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1_000), "1,000");
        assert_eq!(thousands(43_200), "43,200");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_currency_and_per_area() {
        assert_eq!(currency(16_650), "$16,650");
        assert_eq!(per_area(4.32), "$4.32");
        assert_eq!(per_area(2.7), "$2.70");
        assert_eq!(per_area(1.91), "$1.91");
    }

    #[test]
    fn test_area() {
        assert_eq!(area(10_000.0), "10,000 sq ft");
        assert_eq!(area(1_250.5), "1250.5 sq ft");
    }
}
