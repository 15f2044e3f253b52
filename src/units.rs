//! Feet-and-inches tokens.
//!
//! A token looks like `ft:in`. Feet are a whole number, inches may carry a
//! fraction, and either side may be left empty:
//!
//! ```text
//! "2:6"    ->  2'  6"
//! ":3"     ->  0'  3"
//! "4"      ->  4'  0"
//! "-4:3"   -> -4' -3"   (the feet sign applies to the inches)
//! "-:5"    ->  0' +5"   (probably not what was meant, write ":-5")
//! ```

use crate::errors::MalformedUnitError;
use crate::types::{FtIn, INCHES_PER_FOOT, Millimeters};

/// Split a token into its feet and inch parts without checking signs.
pub fn parse_ft_in_pair(token: &str) -> Result<FtIn, MalformedUnitError> {
    let (feet_str, inch_str) = token.split_once(':').unwrap_or((token, ""));
    let feet_str = feet_str.trim();
    let inch_str = inch_str.trim();

    let feet = match feet_str {
        "" | "-" | "+" => 0,
        s => s.parse::<i32>().map_err(|_| MalformedUnitError::InvalidFeet {
            token: token.to_string(),
        })?,
    };

    let inches = if inch_str.is_empty() {
        0.0
    } else {
        inch_str
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| MalformedUnitError::InvalidInches {
                token: token.to_string(),
            })?
    };

    Ok(FtIn { feet, inches })
}

/// Convert feet and inches to millimetres: `(ft*12 + sign(ft)*in) * 25.4`,
/// with `sign(0) = +1`.
///
/// Mixed signs are rejected: a negative total is only expressible through
/// negative feet.
pub fn to_millimeters(value: FtIn, token: &str) -> Result<Millimeters, MalformedUnitError> {
    if value.feet > 0 && value.inches < 0.0 {
        return Err(MalformedUnitError::MixedSign {
            token: token.to_string(),
        });
    }
    if value.feet < 0 && value.inches < 0.0 {
        return Err(MalformedUnitError::DoubleNegative {
            token: token.to_string(),
        });
    }

    let sign = if value.feet < 0 { -1.0 } else { 1.0 };
    let inches = f64::from(value.feet) * f64::from(INCHES_PER_FOOT) + sign * value.inches;
    Ok(Millimeters::from_inches(inches))
}

/// Parse a `ft:in` token straight to millimetres.
pub fn parse_ft_in(token: &str) -> Result<Millimeters, MalformedUnitError> {
    to_millimeters(parse_ft_in_pair(token)?, token)
}
