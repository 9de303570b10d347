use chrono::{DateTime, Utc};

/// Parses the validity period, in minutes.
///
/// Blank input means "use the default" and yields `Ok(None)`. Anything else
/// must be a positive whole number; `"1.5"`, `"12abc"`, `"0"` and `"-3"` are
/// rejected rather than coerced.
pub fn parse_validity_minutes(input: &str) -> Result<Option<u32>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    match input.parse::<u32>() {
        Ok(0) => Err("Must be a positive integer".to_string()),
        Ok(minutes) => Ok(Some(minutes)),
        Err(_) => Err("Must be a positive integer".to_string()),
    }
}

/// 格式化持续时间为人类可读的字符串
pub fn format_duration_human(from: DateTime<Utc>, to: DateTime<Utc>) -> String {
    let duration = to.signed_duration_since(from);

    if duration.num_seconds() < 0 {
        return "expired".to_string();
    }

    let days = duration.num_days();
    let hours = (duration.num_seconds() % 86400) / 3600;
    let minutes = (duration.num_seconds() % 3600) / 60;

    if days > 0 {
        if hours > 0 {
            format!("{}d {}h", days, hours)
        } else {
            format!("{}d", days)
        }
    } else if hours > 0 {
        if minutes > 0 {
            format!("{}h {}m", hours, minutes)
        } else {
            format!("{}h", hours)
        }
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}s", duration.num_seconds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_parse_validity_minutes() {
        assert_eq!(parse_validity_minutes(""), Ok(None));
        assert_eq!(parse_validity_minutes("  "), Ok(None));
        assert_eq!(parse_validity_minutes("30"), Ok(Some(30)));
        assert_eq!(parse_validity_minutes(" 1 "), Ok(Some(1)));
    }

    #[test]
    fn test_parse_validity_minutes_rejects_non_positive() {
        for bad in ["0", "-3", "1.5", "12abc", "abc", "99999999999"] {
            assert!(parse_validity_minutes(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_format_duration_human() {
        let now = Utc::now();
        assert_eq!(format_duration_human(now, now + Duration::minutes(30)), "30m");
        assert_eq!(
            format_duration_human(now, now + Duration::minutes(90)),
            "1h 30m"
        );
        assert_eq!(
            format_duration_human(now, now + Duration::hours(50)),
            "2d 2h"
        );
        assert_eq!(format_duration_human(now, now + Duration::seconds(5)), "5s");
        assert_eq!(
            format_duration_human(now, now - Duration::seconds(1)),
            "expired"
        );
    }
}
