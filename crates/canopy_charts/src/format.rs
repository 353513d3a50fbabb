//! Number and date formatting for ticks, value labels and tooltips.

use chrono::NaiveDate;

/// Compact form with K/M/B suffixes: `12.4K`, `2M`, `0.25`.
pub fn format_compact(value: f32) -> String {
    if !value.is_finite() {
        return match value {
            v if v.is_nan() => "NaN".to_string(),
            v if v > 0.0 => "Inf".to_string(),
            _ => "-Inf".to_string(),
        };
    }
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1e9 {
        (value / 1e9, "B")
    } else if abs >= 1e6 {
        (value / 1e6, "M")
    } else if abs >= 1e3 {
        (value / 1e3, "K")
    } else {
        return trim_zeroes(format!("{value:.3}"));
    };
    format!("{}{suffix}", trim_zeroes(format!("{scaled:.2}")))
}

/// Share of `total` as a whole percentage; zero totals read as 0%.
pub fn format_percent(value: f32, total: f32) -> String {
    if total <= 0.0 || !total.is_finite() {
        return "0%".to_string();
    }
    format!("{:.0}%", value / total * 100.0)
}

/// Short axis date: `Jan 05`.
pub fn format_date_tick(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}

fn trim_zeroes(mut s: String) -> String {
    if let Some(dot) = s.find('.') {
        let trimmed = s.trim_end_matches('0').len();
        s.truncate(trimmed.max(dot));
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_uses_suffixes() {
        assert_eq!(format_compact(12_400.0), "12.4K");
        assert_eq!(format_compact(2_000_000.0), "2M");
        assert_eq!(format_compact(1_290.0), "1.29K");
    }

    #[test]
    fn small_values_keep_three_decimals() {
        assert_eq!(format_compact(85.0), "85");
        assert_eq!(format_compact(0.25), "0.25");
        assert_eq!(format_compact(-0.0001), "0");
    }

    #[test]
    fn percent_of_zero_total() {
        assert_eq!(format_percent(5.0, 0.0), "0%");
        assert_eq!(format_percent(25.0, 100.0), "25%");
    }

    #[test]
    fn date_ticks_are_short() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(format_date_tick(d), "Mar 07");
    }
}
