//! Indian-notation currency formatting for reports and insights.

const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;
const THOUSAND: f64 = 1_000.0;

/// Compact business notation: >= 1 crore renders "1.2Cr", >= 1 lakh "1.5L",
/// >= 1000 "12.3K", smaller values plain. Negatives keep the minus sign
/// ahead of the prefix.
pub fn format_compact(value: f64, prefix: &str) -> String {
    if !value.is_finite() {
        return format!("{prefix}0");
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    let body = if abs >= CRORE {
        scaled(abs / CRORE, "Cr")
    } else if abs >= LAKH {
        scaled(abs / LAKH, "L")
    } else if abs >= THOUSAND {
        scaled(abs / THOUSAND, "K")
    } else {
        trim_decimals(abs)
    };
    format!("{sign}{prefix}{body}")
}

/// Rupee-prefixed convenience wrapper.
pub fn format_inr(value: f64) -> String {
    format_compact(value, "₹")
}

/// Full amount with en-IN digit grouping and two decimals: `₹1,23,456.00`.
pub fn format_grouped(value: f64, prefix: &str) -> String {
    if !value.is_finite() {
        return format!("{prefix}0.00");
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let body = format!("{:.2}", value.abs());
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body.as_str(), "00"));
    format!("{sign}{prefix}{}.{frac_part}", group_indian(int_part))
}

/// Scaled magnitudes show one decimal until they reach three digits.
fn scaled(value: f64, suffix: &str) -> String {
    if value >= 100.0 {
        format!("{}{suffix}", value.round() as i64)
    } else {
        let rounded = (value * 10.0).round() / 10.0;
        if rounded.fract() == 0.0 {
            format!("{}{suffix}", rounded as i64)
        } else {
            format!("{rounded:.1}{suffix}")
        }
    }
}

fn trim_decimals(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded}")
    }
}

/// Indian grouping: last three digits, then pairs — `1234567` -> `12,34,567`.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let head_chars: Vec<char> = head.chars().collect();
    let mut groups: Vec<String> = Vec::new();
    let mut end = head_chars.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(head_chars[start..end].iter().collect());
        end = start;
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}
