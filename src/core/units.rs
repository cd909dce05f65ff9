//! Field readings and Gaj / square-foot conversions.
//!
//! Every value typed into a plot form reaches the calculators through
//! [`FieldInput`]. A field is either present as a finite, non-negative number
//! or it is absent; nothing in this module produces NaN or infinity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Square feet in one Gaj.
pub const SQ_FT_PER_GAJ: f64 = 9.0;

/// Raw value of a form field.
///
/// `filled` is the "is this field filled in" reading used for sides, rates and
/// totals: blank text, garbage, negative numbers **and zero** count as missing.
/// `numeric` keeps zero, which commission fields need (0 % is a real answer).
pub trait FieldInput {
    fn numeric(&self) -> Option<f64>;

    fn filled(&self) -> Option<f64> {
        self.numeric().filter(|v| *v != 0.0)
    }
}

fn accept(value: f64) -> Option<f64> {
    // `+ 0.0` folds a typed "-0" into plain zero
    (value.is_finite() && value >= 0.0).then_some(value + 0.0)
}

impl FieldInput for f64 {
    fn numeric(&self) -> Option<f64> {
        accept(*self)
    }
}

impl FieldInput for str {
    fn numeric(&self) -> Option<f64> {
        let trimmed = self.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse::<f64>().ok().and_then(accept)
    }
}

impl FieldInput for String {
    fn numeric(&self) -> Option<f64> {
        self.as_str().numeric()
    }
}

impl<T: FieldInput + ?Sized> FieldInput for &T {
    fn numeric(&self) -> Option<f64> {
        (**self).numeric()
    }
}

impl<T: FieldInput> FieldInput for Option<T> {
    fn numeric(&self) -> Option<f64> {
        self.as_ref().and_then(FieldInput::numeric)
    }
}

/// Unit a plot area (or a rate per area) is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaUnit {
    #[default]
    Gaj,
    SqFt,
}

impl fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaUnit::Gaj => write!(f, "gaj"),
            AreaUnit::SqFt => write!(f, "sq_ft"),
        }
    }
}

impl std::str::FromStr for AreaUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gaj" | "sq_yd" | "sqyd" => Ok(AreaUnit::Gaj),
            "sq_ft" | "sqft" | "ft2" => Ok(AreaUnit::SqFt),
            other => Err(format!("unknown area unit '{}'", other)),
        }
    }
}

/// Rounds to three decimal places, half away from zero.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Rounds to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Fixed three-decimal text with a whole-number `.000` tail dropped.
pub fn format_rate(value: f64) -> String {
    let text = format!("{:.3}", round3(value));
    match text.strip_suffix(".000") {
        Some(whole) => whole.to_string(),
        None => text,
    }
}

/// Shortest text for a number, `6000000` rather than `6000000.0`.
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// Renders an absent value as a blank field.
pub fn blank_or<T: fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn convert_gaj_to_sq_ft(gaj: impl FieldInput) -> Option<f64> {
    gaj.numeric().map(|g| g * SQ_FT_PER_GAJ)
}

pub fn convert_sq_ft_to_gaj(sq_ft: impl FieldInput) -> Option<f64> {
    sq_ft.filled().map(|s| round3(s / SQ_FT_PER_GAJ))
}

pub fn convert_price_per_gaj_to_sq_ft(price_per_gaj: impl FieldInput) -> Option<f64> {
    price_per_gaj.numeric().map(|p| p / SQ_FT_PER_GAJ)
}

pub fn convert_price_per_sq_ft_to_gaj(price_per_sq_ft: impl FieldInput) -> Option<f64> {
    price_per_sq_ft
        .numeric()
        .map(|p| round3(p * SQ_FT_PER_GAJ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_garbage_are_absent() {
        assert_eq!("".numeric(), None);
        assert_eq!("   ".numeric(), None);
        assert_eq!("abc".numeric(), None);
        assert_eq!("NaN".numeric(), None);
        assert_eq!("inf".numeric(), None);
        assert_eq!("-4".numeric(), None);
        assert_eq!(None::<f64>.numeric(), None);
    }

    #[test]
    fn test_zero_is_numeric_but_not_filled() {
        assert_eq!("0".numeric(), Some(0.0));
        assert_eq!("0".filled(), None);
        assert_eq!(0.0_f64.filled(), None);
        assert_eq!(" 12.5 ".filled(), Some(12.5));
    }

    #[test]
    fn test_format_rate_drops_whole_tail() {
        assert_eq!(format_rate(50000.0), "50000");
        assert_eq!(format_rate(333.3333), "333.333");
        assert_eq!(format_rate(12.5), "12.500");
    }

    #[test]
    fn test_format_rate_rounds_ties_up() {
        // 0.0625 and 100.0625 are exact ties at three places
        assert_eq!(format_rate(0.0625), "0.063");
        assert_eq!(format_rate(100.0625), "100.063");
        assert_eq!(format_rate(round3(0.0625)), format_rate(0.0625));
    }

    #[test]
    fn test_negative_zero_reads_as_zero() {
        let zero = "-0".numeric().unwrap();
        assert!(zero.is_sign_positive());
        assert_eq!(format_number(zero), "0");
        assert_eq!((-0.0_f64).numeric().map(format_number).as_deref(), Some("0"));
        assert_eq!("-0".filled(), None);
    }

    #[test]
    fn test_format_number_has_no_trailing_zero() {
        assert_eq!(format_number(6_000_000.0), "6000000");
        assert_eq!(format_number(120.5), "120.5");
    }

    #[test]
    fn test_conversions() {
        assert_eq!(convert_gaj_to_sq_ft(120.0), Some(1080.0));
        assert_eq!(convert_sq_ft_to_gaj(1080.0), Some(120.0));
        assert_eq!(convert_sq_ft_to_gaj(1000.0), Some(111.111));
        assert_eq!(convert_sq_ft_to_gaj(""), None);
        assert_eq!(convert_sq_ft_to_gaj(0.0), None);
        assert_eq!(convert_price_per_gaj_to_sq_ft(900.0), Some(100.0));
        assert_eq!(convert_price_per_sq_ft_to_gaj(100.0), Some(900.0));
        assert_eq!(convert_price_per_sq_ft_to_gaj("x"), None);
    }

    #[test]
    fn test_area_unit_parsing() {
        assert_eq!("Gaj".parse::<AreaUnit>().unwrap(), AreaUnit::Gaj);
        assert_eq!("sqft".parse::<AreaUnit>().unwrap(), AreaUnit::SqFt);
        assert!("acre".parse::<AreaUnit>().is_err());
    }
}
