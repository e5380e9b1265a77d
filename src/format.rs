//! Time label formatting

/// Format elapsed seconds as `M:SS`
///
/// Minutes are not wrapped into hours. NaN, negative and infinite inputs
/// (e.g. a duration before metadata loads) format as `0:00`.
///
/// # Example
/// ```
/// use dolphin::format::format_time;
/// assert_eq!(format_time(65.0), "1:05");
/// assert_eq!(format_time(f64::NAN), "0:00");
/// ```
pub fn format_time(seconds: f64) -> String {
    let seconds = if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    };
    let minutes = (seconds / 60.0).floor() as u64;
    let remainder = (seconds % 60.0).floor() as u64;
    format!("{}:{:02}", minutes, remainder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0.0, "0:00" ; "zero")]
    #[test_case(9.99, "0:09" ; "truncates fractions")]
    #[test_case(59.999, "0:59" ; "just under a minute")]
    #[test_case(60.0, "1:00" ; "one minute")]
    #[test_case(65.0, "1:05" ; "pads seconds")]
    #[test_case(3599.0, "59:59" ; "just under an hour")]
    #[test_case(3600.0, "60:00" ; "no hour component")]
    #[test_case(-5.0, "0:00" ; "negative")]
    #[test_case(f64::NAN, "0:00" ; "nan")]
    #[test_case(f64::INFINITY, "0:00" ; "infinite")]
    fn test_format_time(seconds: f64, expected: &str) {
        assert_eq!(format_time(seconds), expected);
    }
}
