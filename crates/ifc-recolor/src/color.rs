// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Colour codec: `#RRGGBB` text and normalized RGB triples

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Two channels closer than this are the same colour
pub const COLOR_EPSILON: f64 = 1e-6;

/// Why a colour specification was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorSpecError {
    #[error("color requires hex or rgb")]
    Missing,
    #[error("color has both hex and rgb")]
    Ambiguous,
    #[error("'{0}' is not a #RRGGBB hex color")]
    MalformedHex(String),
    #[error("rgb channel {0} is not a finite number")]
    NonFinite(usize),
}

/// Normalized RGB colour, channels nominally in `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (leading `#` optional, surrounding whitespace ignored)
    pub fn from_hex(hex: &str) -> Result<Self, ColorSpecError> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorSpecError::MalformedHex(hex.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map(|v| f64::from(v) / 255.0)
                .map_err(|_| ColorSpecError::MalformedHex(hex.to_string()))
        };

        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Render as upper-case `#RRGGBB`, rounding and clamping each channel
    pub fn to_hex(&self) -> String {
        let byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", byte(self.r), byte(self.g), byte(self.b))
    }

    pub fn channels(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Channel-wise equality within [`COLOR_EPSILON`]
    pub fn approx_eq(&self, other: &Rgb) -> bool {
        self.channels()
            .iter()
            .zip(other.channels())
            .all(|(a, b)| (a - b).abs() < COLOR_EPSILON)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Colour as written in a rule: exactly one of `hex` or `rgb`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rgb: Option<[f64; 3]>,
}

impl ColorSpec {
    pub fn hex(hex: impl Into<String>) -> Self {
        Self {
            hex: Some(hex.into()),
            rgb: None,
        }
    }

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self {
            hex: None,
            rgb: Some([r, g, b]),
        }
    }

    /// Resolve to an RGB triple
    ///
    /// Explicit triples are taken verbatim; only non-finite channels are
    /// rejected.
    pub fn parse(&self) -> Result<Rgb, ColorSpecError> {
        match (&self.hex, &self.rgb) {
            (None, None) => Err(ColorSpecError::Missing),
            (Some(_), Some(_)) => Err(ColorSpecError::Ambiguous),
            (Some(hex), None) => Rgb::from_hex(hex),
            (None, Some(rgb)) => {
                if let Some(bad) = rgb.iter().position(|c| !c.is_finite()) {
                    return Err(ColorSpecError::NonFinite(bad));
                }
                Ok(Rgb::new(rgb[0], rgb[1], rgb[2]))
            }
        }
    }
}
