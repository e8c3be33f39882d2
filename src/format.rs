//! Display formatting for report values
//!
//! Every formatter takes an `Option<f64>` and renders `None`, `NaN` and
//! infinities as an empty string.

use chrono::{Local, TimeZone};

/// Decimal places used for money and generic numbers.
pub const DEFAULT_DECIMALS: usize = 2;
/// Decimal places used for sizes and prices.
pub const PRECISE_DECIMALS: usize = 4;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}

/// Format a number with thousands separators and a fixed number of decimals.
///
/// ```
/// use hl_pnl_dashboard::format::fmt_num;
/// assert_eq!(fmt_num(Some(-1234567.891), 2), "-1,234,567.89");
/// assert_eq!(fmt_num(Some(f64::NAN), 2), "");
/// ```
pub fn fmt_num(v: Option<f64>, decimals: usize) -> String {
    let Some(v) = finite(v) else {
        return String::new();
    };

    let fixed = format!("{:.*}", decimals, v.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    // -0.001 at 2dp is still shown as "-0.00"
    let negative = v.is_sign_negative() && v != 0.0;

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// [`fmt_num`] with [`DEFAULT_DECIMALS`].
pub fn fmt_money(v: Option<f64>) -> String {
    fmt_num(v, DEFAULT_DECIMALS)
}

/// Format a percentage.
///
/// Values with `|v| <= 1` are treated as fractions and scaled by 100, anything
/// larger is taken as already scaled.
pub fn fmt_pct(v: Option<f64>) -> String {
    let Some(v) = finite(v) else {
        return String::new();
    };
    let scaled = if v.abs() <= 1.0 { v * 100.0 } else { v };
    format!("{}%", fmt_num(Some(scaled), DEFAULT_DECIMALS))
}

/// Format a millisecond epoch timestamp as local date-time.
pub fn fmt_ts(ms: Option<f64>) -> String {
    fmt_ts_in(ms, &Local)
}

pub(crate) fn fmt_ts_in<Tz>(ms: Option<f64>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let Some(ms) = finite(ms) else {
        return String::new();
    };
    match tz.timestamp_millis_opt(ms as i64).single() {
        Some(dt) => dt.format(TIMESTAMP_FORMAT).to_string(),
        None => String::new(),
    }
}

fn group_thousands(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut result = String::with_capacity(chars.len() + chars.len() / 3);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_fmt_num_grouping() {
        assert_eq!(fmt_num(Some(0.0), 2), "0.00");
        assert_eq!(fmt_num(Some(999.999), 2), "1,000.00");
        assert_eq!(fmt_num(Some(1234.5), 2), "1,234.50");
        assert_eq!(fmt_num(Some(-1234567.891), 2), "-1,234,567.89");
        assert_eq!(fmt_num(Some(12.3456789), 4), "12.3457");
        assert_eq!(fmt_num(Some(1234.0), 0), "1,234");
    }

    #[test]
    fn test_fmt_num_tiny_negative_keeps_sign() {
        assert_eq!(fmt_num(Some(-0.001), 2), "-0.00");
        assert_eq!(fmt_num(Some(-0.0), 2), "0.00");
    }

    #[test]
    fn test_non_finite_is_empty() {
        for v in [None, Some(f64::NAN), Some(f64::INFINITY), Some(f64::NEG_INFINITY)] {
            assert_eq!(fmt_num(v, 2), "");
            assert_eq!(fmt_money(v), "");
            assert_eq!(fmt_pct(v), "");
            assert_eq!(fmt_ts(v), "");
        }
    }

    #[test]
    fn test_fmt_pct_fraction_and_scaled_agree() {
        for v in [0.1234, -0.5, 0.02, 1.0, -1.0] {
            assert_eq!(fmt_pct(Some(v)), fmt_pct(Some(v * 100.0)), "v={v}");
        }
        assert_eq!(fmt_pct(Some(0.1234)), "12.34%");
        assert_eq!(fmt_pct(Some(-35.5)), "-35.50%");
        assert_eq!(fmt_pct(Some(1250.0)), "1,250.00%");
    }

    #[test]
    fn test_fmt_ts_utc() {
        assert_eq!(
            fmt_ts_in(Some(1_700_000_000_000.0), &Utc),
            "2023-11-14 22:13:20"
        );
        assert_eq!(fmt_ts_in(Some(f64::NAN), &Utc), "");
    }

    #[test]
    fn test_fmt_ts_local_shape() {
        let s = fmt_ts(Some(1_700_000_000_000.0));
        assert_eq!(s.len(), 19);
    }
}
