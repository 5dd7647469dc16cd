use chrono::TimeDelta;

/// "2h 5m" for rounds over an hour, "47m" otherwise.
#[must_use]
pub fn format_round_duration(td: TimeDelta) -> String {
    const MINUTE: i64 = 60;
    const HOUR: i64 = 60 * MINUTE;

    let secs = td.num_seconds().max(0);
    let hours = secs / HOUR;
    let minutes = (secs % HOUR) / MINUTE;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Score relative to par as shown on a scorecard: "+3", "E" or "-2".
#[must_use]
pub fn format_relative_score(score: i64, par: i64) -> String {
    let relative = score - par;
    match relative {
        0 => "E".to_string(),
        r if r > 0 => format!("+{r}"),
        r => format!("{r}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(format_round_duration(TimeDelta::minutes(47)), "47m");
        assert_eq!(format_round_duration(TimeDelta::minutes(125)), "2h 5m");
        assert_eq!(format_round_duration(TimeDelta::seconds(59)), "0m");
        assert_eq!(format_round_duration(TimeDelta::seconds(-10)), "0m");
    }

    #[test]
    fn relative_scores() {
        assert_eq!(format_relative_score(72, 72), "E");
        assert_eq!(format_relative_score(75, 72), "+3");
        assert_eq!(format_relative_score(70, 72), "-2");
    }
}
