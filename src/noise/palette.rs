//! Color stops and perceptually uniform palette lookup

use crate::io::error::{Result, SynthError, invalid_parameter};
use crate::math::color::Lab;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// An 8-bit sRGB color, written as `#rrggbb` in manifests and on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// Parse a `#rrggbb` (or `rrggbb`) hex string
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not six hexadecimal digits
    pub fn parse_hex(text: &str) -> Result<Self> {
        let digits = text.trim().trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            digits
                .get(range)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
        };

        match (digits.len(), channel(0..2), channel(2..4), channel(4..6)) {
            (6, Some(r), Some(g), Some(b)) => Ok(Self([r, g, b])),
            _ => Err(invalid_parameter(
                "color",
                &text,
                &"expected a hex color such as #1a2b3c",
            )),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl FromStr for Rgb {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = SynthError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse_hex(&value)
    }
}

/// A `(position, color)` anchor of a palette
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ColorStop {
    /// Position of the stop in `[0, 1]`
    pub offset: f64,
    /// Color at that position
    pub color: Rgb,
}

impl ColorStop {
    /// Create a stop from an offset and raw RGB channels
    pub const fn new(offset: f64, color: [u8; 3]) -> Self {
        Self {
            offset,
            color: Rgb(color),
        }
    }
}

impl FromStr for ColorStop {
    type Err = SynthError;

    /// Parse `OFFSET:#RRGGBB`, e.g. `0.5:#3f7cac`
    fn from_str(s: &str) -> Result<Self> {
        let (offset_text, color_text) = s
            .split_once(':')
            .ok_or_else(|| invalid_parameter("color_stops", &s, &"expected OFFSET:#RRGGBB"))?;
        let offset = offset_text
            .trim()
            .parse::<f64>()
            .map_err(|e| invalid_parameter("color_stops", &offset_text, &e))?;
        Ok(Self {
            offset,
            color: Rgb::parse_hex(color_text)?,
        })
    }
}

/// Check that stops are ordered and span the whole `[0, 1]` domain
///
/// # Errors
///
/// Returns an error if:
/// - Fewer than two stops are given
/// - An offset is not finite or lies outside `[0, 1]`
/// - Offsets decrease anywhere
/// - The first offset is not 0 or the last offset is not 1
pub fn validate_color_stops(stops: &[ColorStop]) -> Result<()> {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Err(invalid_parameter(
            "color_stops",
            &"[]",
            &"at least two color stops are required",
        ));
    };
    if stops.len() < 2 {
        return Err(invalid_parameter(
            "color_stops",
            &stops.len(),
            &"at least two color stops are required",
        ));
    }

    for stop in stops {
        if !stop.offset.is_finite() || !(0.0..=1.0).contains(&stop.offset) {
            return Err(invalid_parameter(
                "color_stops",
                &stop.offset,
                &"offsets must lie in [0, 1]",
            ));
        }
    }

    for pair in stops.windows(2) {
        if let [lo, hi] = pair {
            if hi.offset < lo.offset {
                return Err(invalid_parameter(
                    "color_stops",
                    &format!("{} after {}", hi.offset, lo.offset),
                    &"offsets must be non-decreasing",
                ));
            }
        }
    }

    if first.offset.abs() > f64::EPSILON || (last.offset - 1.0).abs() > f64::EPSILON {
        return Err(invalid_parameter(
            "color_stops",
            &format!("{}..{}", first.offset, last.offset),
            &"stops must start at 0 and end at 1",
        ));
    }

    Ok(())
}

#[derive(Debug, Clone, Copy)]
struct PaletteEntry {
    offset: f64,
    lab: Lab,
    rgb: [u8; 3],
}

/// Continuous palette interpolated in CIE L*a*b* between validated stops
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Validate `stops` and precompute their L*a*b* coordinates
    ///
    /// # Errors
    ///
    /// Returns an error if the stops fail [`validate_color_stops`]
    pub fn new(stops: &[ColorStop]) -> Result<Self> {
        validate_color_stops(stops)?;
        let entries = stops
            .iter()
            .map(|stop| PaletteEntry {
                offset: stop.offset,
                lab: Lab::from_rgb(stop.color.0),
                rgb: stop.color.0,
            })
            .collect();
        Ok(Self { entries })
    }

    /// Number of stops
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the palette has no stops (never true for a validated palette)
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Color at `position`; positions outside the stops clamp to the nearest stop
    pub fn color_at(&self, position: f64) -> [u8; 3] {
        let (Some(first), Some(last)) = (self.entries.first(), self.entries.last()) else {
            return [0, 0, 0];
        };
        if position.is_nan() || position <= first.offset {
            return first.rgb;
        }
        if position >= last.offset {
            return last.rgb;
        }

        for pair in self.entries.windows(2) {
            if let [lo, hi] = pair {
                if position > hi.offset {
                    continue;
                }
                let span = hi.offset - lo.offset;
                if span <= 0.0 {
                    return hi.rgb;
                }
                let t = (position - lo.offset) / span;
                if t <= 0.0 {
                    return lo.rgb;
                }
                if t >= 1.0 {
                    return hi.rgb;
                }
                return lo.lab.mix(hi.lab, t).to_rgb();
            }
        }

        last.rgb
    }
}
