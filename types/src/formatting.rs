//! Centralized number formatting utilities.
//!
//! All numeric display formatting goes through this module so the panels,
//! the statistics workbook and the PDF reports print the same text for the
//! same value.

/// Placeholder for a missing or non-finite value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Strip trailing zeros (and a dangling `.`) from a fixed-point string.
///
/// A negative zero left over after trimming is printed as `0`.
fn trim_fraction(s: String) -> String {
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Format a descriptive statistic.
///
/// - Missing and non-finite values print as `N/A`
/// - Whole numbers print without a fraction
/// - Everything else is rounded to 4 decimals with trailing zeros trimmed
///
/// # Examples
/// ```
/// use dino_types::formatting::format_stat_value;
/// assert_eq!(format_stat_value(None), "N/A");
/// assert_eq!(format_stat_value(Some(37.0)), "37");
/// assert_eq!(format_stat_value(Some(9.512345)), "9.5123");
/// assert_eq!(format_stat_value(Some(2.5)), "2.5");
/// assert_eq!(format_stat_value(Some(f64::NAN)), "N/A");
/// ```
pub fn format_stat_value(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        None => NOT_AVAILABLE.to_string(),
        Some(v) if v.fract() == 0.0 => format!("{v}"),
        Some(v) => trim_fraction(format!("{v:.4}")),
    }
}

/// Format with a fixed number of decimals, or `N/A` when missing.
///
/// # Examples
/// ```
/// use dino_types::formatting::format_fixed;
/// assert_eq!(format_fixed(Some(13.0), 2), "13.00");
/// assert_eq!(format_fixed(Some(0.97297), 4), "0.9730");
/// assert_eq!(format_fixed(None, 4), "N/A");
/// ```
pub fn format_fixed(value: Option<f64>, decimals: usize) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("{v:.decimals$}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Format a model score (AIC, BIC, KS statistic) for the comparison table.
///
/// Magnitudes too small for 4 decimals switch to exponent notation with
/// 2 fraction digits.
///
/// # Examples
/// ```
/// use dino_types::formatting::format_score;
/// assert_eq!(format_score(Some(187.23456)), "187.2346");
/// assert_eq!(format_score(Some(0.0000001234)), "1.23e-7");
/// assert_eq!(format_score(Some(0.0)), "0.0000");
/// assert_eq!(format_score(None), "N/A");
/// ```
pub fn format_score(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) if v != 0.0 && v.abs() < 1e-6 => format!("{v:.2e}"),
        Some(v) => format!("{v:.4}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Format a percentage with one decimal.
///
/// # Examples
/// ```
/// use dino_types::formatting::format_percentage;
/// assert_eq!(format_percentage(62.5), "62.5%");
/// assert_eq!(format_percentage(100.0 / 3.0), "33.3%");
/// ```
pub fn format_percentage(percent: f64) -> String {
    format!("{percent:.1}%")
}

/// Format a list of parameter values, `N/A` for holes.
///
/// # Examples
/// ```
/// use dino_types::formatting::format_param_values;
/// assert_eq!(format_param_values(&[Some(1.5), None]), "1.5000, N/A");
/// ```
pub fn format_param_values(values: &[Option<f64>]) -> String {
    values
        .iter()
        .map(|v| format_fixed(*v, 4))
        .collect::<Vec<_>>()
        .join(", ")
}
