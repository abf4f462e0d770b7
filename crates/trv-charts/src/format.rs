use trv_types::SnapshotMetric;

/// Converts a raw subgraph value into the number plotted on the chart.
pub type MetricFormatter = fn(&str) -> f64;

const MONEY_UNITS: [&str; 7] = ["", "K", "M", "B", "T", "P", "E"];

/// Parses the longest decimal prefix of `raw`, the way the subgraph values
/// have always been read: leading whitespace is skipped, trailing garbage is
/// ignored and a string without any digit is `None`.
pub fn parse_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        let negative = bytes.first() == Some(&b'-');
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let mut mantissa_digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        mantissa_digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// `parse_float`, with unparseable input rendered as a gap (`NaN`).
pub fn parse_or_nan(raw: &str) -> f64 {
    parse_float(raw).unwrap_or(f64::NAN)
}

/// Rounds to the nearest integer, halves toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

pub fn parse_rounded(raw: &str) -> f64 {
    round_half_up(parse_or_nan(raw))
}

/// Performance values are stored as fractions and charted as percentages.
pub fn parse_percentage(raw: &str) -> f64 {
    parse_or_nan(raw) * 100.0
}

pub fn metric_formatter(metric: SnapshotMetric) -> MetricFormatter {
    match metric {
        SnapshotMetric::TotalMarketValueUsd
        | SnapshotMetric::AccruedInterestUsd
        | SnapshotMetric::BenchmarkedEquityUsd
        | SnapshotMetric::CreditUsd
        | SnapshotMetric::DebtUsd
        | SnapshotMetric::NetDebtUsd
        | SnapshotMetric::PrincipalUsd
        | SnapshotMetric::NominalEquityUsd => parse_rounded,
        SnapshotMetric::NominalPerformance | SnapshotMetric::BenchmarkPerformance => {
            parse_percentage
        }
    }
}

pub fn format_number_fixed_decimals(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

/// Formats a fraction as a percentage with two decimals, e.g. `0.0512` ->
/// `"5.12"`.
pub fn format_percent(input: f64) -> String {
    format!("{:.2}", round_half_up(input * 10_000.0) / 100.0)
}

/// Two fixed decimals, used for prices.
pub fn format_price(input: f64) -> String {
    format!("{input:.2}")
}

/// Abbreviates large amounts with a K/M/B/... suffix and at most two
/// decimals, e.g. `1_234_567.0` -> `"1.23M"`.
pub fn format_big_money(input: f64) -> String {
    if !input.is_finite() {
        return input.to_string();
    }

    let sign = if input < 0.0 { "-" } else { "" };
    let mut value = input.abs();
    let mut unit = 0;
    while value >= 1000.0 && unit < MONEY_UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }

    let mut rounded = format_number_fixed_decimals(value, 2);
    // 999.999K rounds up into the next unit
    if rounded >= 1000.0 && unit < MONEY_UNITS.len() - 1 {
        rounded = format_number_fixed_decimals(rounded / 1000.0, 2);
        unit += 1;
    }

    format!("{sign}{rounded}{}", MONEY_UNITS[unit])
}
