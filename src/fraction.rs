//! Ratio parsing for recipe data.
//!
//! Recipes encode every per-unit rate (ingredient consumption, building
//! throughput, by-product yield) as a string of the form `"a"` or `"a/b"`.
//! Everything past this module works in plain `f64`.

/// Errors produced when a ratio string is malformed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// One side of the ratio is not a decimal number.
    #[error("invalid number '{value}' in ratio '{ratio}'")]
    InvalidNumber { ratio: String, value: String },

    /// The ratio contains more than one `/`.
    #[error("ratio '{0}' has more than one '/' separator")]
    TooManySeparators(String),

    /// The denominator is zero.
    #[error("ratio '{0}' divides by zero")]
    DivisionByZero(String),

    /// The ratio evaluates to infinity or NaN.
    #[error("ratio '{0}' is not a finite number")]
    NotFinite(String),
}

/// Parses a ratio string into its numeric value.
///
/// # Example
///
/// ```
/// use buildchain::fraction::parse_fraction;
///
/// assert_eq!(parse_fraction("3/2").unwrap(), 1.5);
/// assert_eq!(parse_fraction("4").unwrap(), 4.0);
/// assert!(parse_fraction("1/0").is_err());
/// ```
pub fn parse_fraction(ratio: &str) -> Result<f64, ParseError> {
    let parts: Vec<&str> = ratio.split('/').collect();

    let value = match parts.as_slice() {
        [whole] => parse_side(ratio, whole)?,
        [lhs, rhs] => {
            let numerator = parse_side(ratio, lhs)?;
            let denominator = parse_side(ratio, rhs)?;
            if denominator == 0.0 {
                return Err(ParseError::DivisionByZero(ratio.to_string()));
            }
            numerator / denominator
        }
        _ => return Err(ParseError::TooManySeparators(ratio.to_string())),
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseError::NotFinite(ratio.to_string()))
    }
}

fn parse_side(ratio: &str, side: &str) -> Result<f64, ParseError> {
    let side = side.trim();
    let value: f64 = side.parse().map_err(|_| ParseError::InvalidNumber {
        ratio: ratio.to_string(),
        value: side.to_string(),
    })?;

    // "inf" and "NaN" are accepted by `f64::from_str`
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParseError::NotFinite(ratio.to_string()))
    }
}
