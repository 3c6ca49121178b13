//! Boolean, integer and string conversions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("the value '{0}' cannot be converted")]
    InvalidCast(String),
}

/// Textual style used by [`BoolExt::to_styled_string`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoolStyle {
    #[default]
    TrueOrFalse,
    YesOrNo,
    YOrN,
}

impl BoolStyle {
    fn render(self, value: bool) -> &'static str {
        match (self, value) {
            (Self::TrueOrFalse, true) => "True",
            (Self::TrueOrFalse, false) => "False",
            (Self::YesOrNo, true) => "Yes",
            (Self::YesOrNo, false) => "No",
            (Self::YOrN, true) => "Y",
            (Self::YOrN, false) => "N",
        }
    }
}

impl FromStr for BoolStyle {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TrueOrFalse" => Ok(Self::TrueOrFalse),
            "YesOrNo" => Ok(Self::YesOrNo),
            "YOrN" => Ok(Self::YOrN),
            other => Err(ConversionError::InvalidCast(other.to_string())),
        }
    }
}

impl fmt::Display for BoolStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TrueOrFalse => "TrueOrFalse",
            Self::YesOrNo => "YesOrNo",
            Self::YOrN => "YOrN",
        };
        f.write_str(name)
    }
}

/// Conversions out of `bool` and `Option<bool>`.
///
/// The `Option<bool>` implementation maps `None` to `None` for the integer
/// conversions and to an empty string for the textual ones.
pub trait BoolExt {
    type Int;

    /// Maps `true`/`false` to the supplied codes.
    fn to_i32_or(&self, true_value: i32, false_value: i32) -> Self::Int;

    /// Maps `true`/`false` to `1`/`0`.
    fn to_i32(&self) -> Self::Int {
        self.to_i32_or(1, 0)
    }

    fn to_styled_string(&self, style: BoolStyle) -> String;

    /// Like [`to_styled_string`](Self::to_styled_string) with the style given
    /// by name. An unrecognised name renders as an empty string.
    fn to_string_by_style_name(&self, style: &str) -> String {
        style
            .parse::<BoolStyle>()
            .map(|style| self.to_styled_string(style))
            .unwrap_or_default()
    }
}

impl BoolExt for bool {
    type Int = i32;

    fn to_i32_or(&self, true_value: i32, false_value: i32) -> i32 {
        if *self { true_value } else { false_value }
    }

    fn to_styled_string(&self, style: BoolStyle) -> String {
        style.render(*self).to_string()
    }
}

impl BoolExt for Option<bool> {
    type Int = Option<i32>;

    fn to_i32_or(&self, true_value: i32, false_value: i32) -> Option<i32> {
        self.map(|value| value.to_i32_or(true_value, false_value))
    }

    fn to_styled_string(&self, style: BoolStyle) -> String {
        self.map(|value| value.to_styled_string(style))
            .unwrap_or_default()
    }
}

pub trait IntExt {
    /// Anything greater than zero is `true`.
    fn to_bool(&self) -> bool;
}

impl IntExt for i32 {
    fn to_bool(&self) -> bool {
        *self > 0
    }
}

impl IntExt for i64 {
    fn to_bool(&self) -> bool {
        *self > 0
    }
}

/// Parses one of `1`, `0`, `-1`, `yes`, `no`, `true`, `false`, `y`, `n`,
/// ignoring case and surrounding whitespace.
pub fn parse_bool(value: &str) -> Result<bool, ConversionError> {
    match value.trim().to_ascii_uppercase().as_str() {
        "1" | "YES" | "TRUE" | "Y" => Ok(true),
        "0" | "-1" | "NO" | "FALSE" | "N" => Ok(false),
        _ => Err(ConversionError::InvalidCast(value.to_string())),
    }
}
