//! Engineering-notation numeric codec
//!
//! Parses and formats SI-suffixed magnitudes (`1k`, `2.2u`, `3p`) used by part
//! parameters, and rounds values to a fixed number of significant digits.
//!
//! The suffix table is the schematic editor's legacy table, where `u`/`μ` map to
//! 10^-9 and `n` maps to 10^-6. Stored parameter values depend on this table, so
//! it is kept as-is.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of significant digits kept by rounding and formatting
pub const DEFAULT_SIGNIFICANT_DIGITS: usize = 6;

/// Default suffix order for unit selection lists
pub const DEFAULT_SELECT_SUFFIXES: [&str; 8] = ["G", "M", "k", "", "m", "u", "n", "p"];

static PLAIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)$").unwrap());

static SCIENTIFIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+))[eE]([+-]?[0-9]+)$").unwrap());

static SUFFIXED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+))([pnuμmkMG])$").unwrap());

static SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9.]+)([GMkmunp]?)$").unwrap());

/// Errors reported by the numeric codec
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumericError {
    #[error("Malformed number: {0:?}")]
    MalformedNumber(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Engineering magnitude suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Suffix {
    Pico,
    Micro,
    Nano,
    Milli,
    #[default]
    None,
    Kilo,
    Mega,
    Giga,
}

impl Suffix {
    /// All suffixes, largest power first
    pub fn all() -> &'static [Suffix] {
        &[
            Suffix::Giga,
            Suffix::Mega,
            Suffix::Kilo,
            Suffix::None,
            Suffix::Milli,
            Suffix::Nano,
            Suffix::Micro,
            Suffix::Pico,
        ]
    }

    /// Power of ten this suffix stands for
    pub fn power(self) -> i32 {
        match self {
            Suffix::Pico => -12,
            Suffix::Micro => -9,
            Suffix::Nano => -6,
            Suffix::Milli => -3,
            Suffix::None => 0,
            Suffix::Kilo => 3,
            Suffix::Mega => 6,
            Suffix::Giga => 9,
        }
    }

    /// Canonical stored symbol (`μ` is stored as `u`)
    pub fn as_str(self) -> &'static str {
        match self {
            Suffix::Pico => "p",
            Suffix::Micro => "u",
            Suffix::Nano => "n",
            Suffix::Milli => "m",
            Suffix::None => "",
            Suffix::Kilo => "k",
            Suffix::Mega => "M",
            Suffix::Giga => "G",
        }
    }

    /// Localized numeral-prefix label
    pub fn localized(self) -> &'static str {
        match self {
            Suffix::Pico => "皮",
            Suffix::Micro => "微",
            Suffix::Nano => "纳",
            Suffix::Milli => "毫",
            Suffix::None => "",
            Suffix::Kilo => "千",
            Suffix::Mega => "兆",
            Suffix::Giga => "吉",
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            'p' => Some(Suffix::Pico),
            'u' | 'μ' => Some(Suffix::Micro),
            'n' => Some(Suffix::Nano),
            'm' => Some(Suffix::Milli),
            'k' => Some(Suffix::Kilo),
            'M' => Some(Suffix::Mega),
            'G' => Some(Suffix::Giga),
            _ => None,
        }
    }
}

impl std::fmt::Display for Suffix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Suffix {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok(Suffix::None),
            (Some(c), None) => {
                Suffix::from_char(c).ok_or_else(|| NumericError::MalformedNumber(s.to_string()))
            }
            _ => Err(NumericError::MalformedNumber(s.to_string())),
        }
    }
}

/// Multiply a decimal literal by 10^power without intermediate float error
fn scale(mantissa: &str, power: i32) -> f64 {
    format!("{}e{}", mantissa, power).parse().unwrap_or(f64::NAN)
}

/// Largest power of ten that is a finite `f64`
const MAX_POWER: i32 = 308;

/// Multiply by 10^power, using exact powers of ten for both directions
///
/// Powers past `f64` range (subnormal inputs need them) are applied in two
/// halves so the factor never overflows.
fn shift(value: f64, power: i32) -> f64 {
    if power.abs() > MAX_POWER {
        let half = power / 2;
        return shift(shift(value, half), power - half);
    }
    if power >= 0 {
        value * 10f64.powi(power)
    } else {
        value / 10f64.powi(-power)
    }
}

/// Parse an engineering-notation literal
///
/// Accepts plain decimals (`1.5`), scientific notation (`1.5e-3`), and
/// SI-suffixed values (`2.2u`). A single leading sign is allowed. Anything else
/// yields `NaN`; this never fails.
pub fn parse(text: &str) -> f64 {
    let text = text.trim();

    if PLAIN.is_match(text) {
        return text.parse().unwrap_or(f64::NAN);
    }

    if let Some(caps) = SCIENTIFIC.captures(text) {
        return match caps[2].parse::<i32>() {
            Ok(exponent) => scale(&caps[1], exponent),
            Err(_) => f64::NAN,
        };
    }

    if let Some(caps) = SUFFIXED.captures(text) {
        let suffix = caps[2].chars().next().and_then(Suffix::from_char);
        return match suffix {
            Some(suffix) => scale(&caps[1], suffix.power()),
            None => f64::NAN,
        };
    }

    f64::NAN
}

/// Split a stored parameter value into mantissa and suffix
///
/// Stricter than [`parse`]: no sign, no exponent, no `μ`.
pub fn split(text: &str) -> Result<(String, Suffix), NumericError> {
    let caps = SPLIT
        .captures(text)
        .ok_or_else(|| NumericError::MalformedNumber(text.to_string()))?;
    let suffix = caps[2].parse()?;
    Ok((caps[1].to_string(), suffix))
}

/// `floor(log10(value))`
///
/// Only defined for finite positive values; zero, negatives, infinities and
/// `NaN` are rejected with [`NumericError::InvalidArgument`].
pub fn order_of_magnitude(value: f64) -> Result<i32, NumericError> {
    if value.is_nan() {
        return Err(NumericError::InvalidArgument("value is NaN".to_string()));
    }
    if !value.is_finite() || value <= 0.0 {
        return Err(NumericError::InvalidArgument(format!(
            "order of magnitude requires a finite positive value, got {}",
            value
        )));
    }
    Ok(value.log10().floor() as i32)
}

/// Round to `digits` significant digits, half away from zero
///
/// Zero rounds to zero. `NaN`, infinities and `digits == 0` are rejected.
pub fn round_to_significant_digits(value: f64, digits: usize) -> Result<f64, NumericError> {
    if value.is_nan() {
        return Err(NumericError::InvalidArgument("value is NaN".to_string()));
    }
    if !value.is_finite() {
        return Err(NumericError::InvalidArgument(format!(
            "cannot round non-finite value {}",
            value
        )));
    }
    if digits == 0 {
        return Err(NumericError::InvalidArgument(
            "significant digits must be at least 1".to_string(),
        ));
    }
    if value == 0.0 {
        return Ok(0.0);
    }

    let magnitude = value.abs();
    // Power of ten of the least significant retained digit
    let m = order_of_magnitude(magnitude)? - digits as i32 + 1;
    let scaled = shift(magnitude, -m).round();
    let numeral = format!("{:.0}", scaled);

    let text = if m >= 0 {
        format!("{}{}", numeral, "0".repeat(m as usize))
    } else if (-m) as usize >= numeral.len() {
        let zeros = (-m) as usize - numeral.len();
        format!("0.{}{}", "0".repeat(zeros), numeral)
    } else {
        let point = numeral.len() - (-m) as usize;
        format!("{}.{}", &numeral[..point], &numeral[point..])
    };

    let rounded: f64 = text
        .parse()
        .map_err(|_| NumericError::InvalidArgument(format!("cannot round {:e}", value)))?;
    Ok(if value < 0.0 { -rounded } else { rounded })
}

/// Format a value at the given suffix, e.g. `format(1500.0, Suffix::Kilo) == "1.5k"`
pub fn format(value: f64, suffix: Suffix) -> Result<String, NumericError> {
    let mantissa = round_to_significant_digits(
        shift(value, -suffix.power()),
        DEFAULT_SIGNIFICANT_DIGITS,
    )?;
    Ok(format!("{}{}", mantissa, suffix.as_str()))
}

/// Format a value with the largest suffix not exceeding its magnitude
pub fn format_engineering(value: f64) -> Result<String, NumericError> {
    if value.is_nan() {
        return Err(NumericError::InvalidArgument("value is NaN".to_string()));
    }
    if value == 0.0 {
        return Ok("0".to_string());
    }

    let magnitude = value.abs();
    let suffix = Suffix::all()
        .iter()
        .copied()
        .find(|s| magnitude >= shift(1.0, s.power()))
        .unwrap_or(Suffix::Pico);
    format(value, suffix)
}

/// An entry in a unit selection list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Display label, e.g. `kΩ` or `千Ω`
    pub label: String,
    /// Stored suffix symbol, e.g. `k`
    pub value: String,
}

/// Build unit selection options for the given suffixes
///
/// Each option stores the canonical suffix (`μ` becomes `u`) and is labelled
/// either with the suffix as written or with its localized numeral prefix.
pub fn format_select_options(
    suffixes: &[&str],
    unit: &str,
    localized: bool,
) -> Result<Vec<SelectOption>, NumericError> {
    suffixes
        .iter()
        .map(|symbol| {
            let suffix: Suffix = symbol
                .parse()
                .map_err(|_| NumericError::InvalidArgument(format!("unknown suffix {:?}", symbol)))?;
            let prefix = if localized { suffix.localized() } else { symbol };
            Ok(SelectOption {
                label: format!("{}{}", prefix, unit),
                value: suffix.as_str().to_string(),
            })
        })
        .collect()
}
