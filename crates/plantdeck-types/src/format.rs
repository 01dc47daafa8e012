//! Metric value formatting.

/// Placeholder text for a missing or unusable sensor value.
pub const PLACEHOLDER: &str = "--";

/// Format a possibly-absent metric for display.
///
/// Present, finite values render with one decimal place; everything else
/// renders as [`PLACEHOLDER`]. This is the only place a raw value becomes
/// display text, so the "never show 0 for a missing sensor" rule is enforced
/// once.
///
/// # Examples
///
/// ```
/// use plantdeck_types::format_metric;
///
/// assert_eq!(format_metric(Some(3.0)), "3.0");
/// assert_eq!(format_metric(Some(3.14159)), "3.1");
/// assert_eq!(format_metric(None), "--");
/// ```
pub fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.1}", v),
        _ => PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_values() {
        assert_eq!(format_metric(Some(3.0)), "3.0");
        assert_eq!(format_metric(Some(3.14159)), "3.1");
        assert_eq!(format_metric(Some(-0.04)), "-0.0");
        assert_eq!(format_metric(Some(1234.56)), "1234.6");
    }

    #[test]
    fn test_absent_values() {
        assert_eq!(format_metric(None), PLACEHOLDER);
        assert_eq!(format_metric(Some(f64::NAN)), PLACEHOLDER);
        assert_eq!(format_metric(Some(f64::INFINITY)), PLACEHOLDER);
        assert_eq!(format_metric(Some(f64::NEG_INFINITY)), PLACEHOLDER);
    }
}
