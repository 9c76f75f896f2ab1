//! Stroke/fill color formatting and RGBA conversion.

use crate::annotation::ColorValue;

/// Formats a stored annotation color as a `#`-prefixed CSS hex string.
///
/// Strings that already start with `#` pass through unchanged. Anything else
/// is read as a base-10 integer, written in lowercase hexadecimal and left-padded
/// with zeros to six characters. This is a plain decimal-to-hex conversion, not
/// a per-channel one: `255` becomes `#0000ff`.
///
/// Missing or unparsable colors format as `#000000`.
///
/// # Examples
///
/// ```
/// use slidemark::annotation::ColorValue;
/// use slidemark::draw::format_color;
/// assert_eq!(format_color(Some(&ColorValue::Int(255))), "#0000ff");
/// assert_eq!(format_color(Some(&ColorValue::from("#1a2b3c"))), "#1a2b3c");
/// ```
pub fn format_color(color: Option<&ColorValue>) -> String {
    match color {
        None => colour_to_hex(0),
        Some(ColorValue::Int(value)) => colour_to_hex(*value),
        Some(ColorValue::Float(value)) if value.is_finite() => colour_to_hex(value.trunc() as i64),
        Some(ColorValue::Float(_)) => colour_to_hex(0),
        Some(ColorValue::Text(text)) if text.starts_with('#') => text.clone(),
        Some(ColorValue::Text(text)) => colour_to_hex(parse_leading_int(text).unwrap_or(0)),
    }
}

fn colour_to_hex(value: i64) -> String {
    let hex = if value < 0 {
        format!("-{:x}", value.unsigned_abs())
    } else {
        format!("{value:x}")
    };
    format!("#{hex:0>6}")
}

/// Reads an optionally signed run of leading decimal digits, ignoring leading whitespace.
fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parses a `#rrggbb` or `#rgb` string into an opaque color.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').filter(|d| d.is_ascii())?;
        let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f64 / 255.0);
        match digits.len() {
            6 => Some(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
                1.0,
            )),
            3 => {
                let expand = |i: usize| {
                    let c = &digits[i..i + 1];
                    channel(&format!("{c}{c}"))
                };
                Some(Self::new(expand(0)?, expand(1)?, expand(2)?, 1.0))
            }
            _ => None,
        }
    }
}

/// Predefined black color, used when a stroke color cannot be parsed
pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};
