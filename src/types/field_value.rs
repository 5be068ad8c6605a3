//! Defines [`FieldValue`], the per-column value of a parsed buoy observation.

use std::fmt;

/// Token used by the buoy feed for "no measurement".
pub const MISSING_TOKEN: &str = "MM";

/// A single cleaned column value from the observation feed.
///
/// Most columns are numeric, but some stations publish quality codes or other
/// non-numeric markers in the same positions. Those are kept verbatim as
/// [`FieldValue::Text`] instead of failing the whole row.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// The source reported no measurement (`MM`), or the column was absent.
    #[default]
    Missing,
    /// A numeric measurement.
    Number(f64),
    /// A non-numeric token kept as-is.
    Text(String),
}

impl FieldValue {
    /// Applies the feed's value-cleaning rule to one raw token.
    ///
    /// Tokens that parse to a non-finite float (`nan`, `inf`) count as
    /// missing, so they never reach an average.
    ///
    /// # Examples
    ///
    /// ```
    /// use buoycast::FieldValue;
    ///
    /// assert_eq!(FieldValue::clean("MM"), FieldValue::Missing);
    /// assert_eq!(FieldValue::clean("1.5"), FieldValue::Number(1.5));
    /// assert_eq!(FieldValue::clean("N/A"), FieldValue::Text("N/A".to_string()));
    /// ```
    pub fn clean(raw: &str) -> Self {
        if raw == MISSING_TOKEN {
            return FieldValue::Missing;
        }
        match raw.parse::<f64>() {
            Ok(number) if number.is_finite() => FieldValue::Number(number),
            Ok(_) => FieldValue::Missing,
            Err(_) => FieldValue::Text(raw.to_string()),
        }
    }

    /// Returns the numeric value, if any. Text and non-finite numbers count
    /// as not present.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(number) if number.is_finite() => Some(*number),
            _ => None,
        }
    }

    /// True for [`FieldValue::Missing`] only. Text is not missing.
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }
}

impl From<Option<f64>> for FieldValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(FieldValue::Missing, FieldValue::Number)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Missing => write!(f, "{}", MISSING_TOKEN),
            FieldValue::Number(number) => write!(f, "{}", number),
            FieldValue::Text(text) => write!(f, "{}", text),
        }
    }
}
