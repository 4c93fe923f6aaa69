//! CSS-flavoured color and gradient string parsing.
//!
//! Accepts the two spellings produced by the briefing front-end:
//! `rgb(r,g,b)` / `rgba(r,g,b,a)` with `a` in `[0,1]`, and hex
//! `#RRGGBB` / `#RRGGBBAA`. Unparsable input degrades to opaque white,
//! never to an error: a bad color string must not sink a whole format.

/// Straight (non-premultiplied) 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white, the universal fallback color.
    pub const WHITE: Rgba8 = Rgba8::opaque(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Rgba8 = Rgba8::opaque(0, 0, 0);

    /// Construct an opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Channels as an `[r, g, b, a]` array, the `image` pixel layout.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// A parsed `linear-gradient(...)`-style specification.
///
/// Only the first and last stops take part in interpolation; intermediate
/// stops are carried but ignored by the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientSpec {
    /// Gradient direction in CSS degrees (90 = left-to-right).
    pub angle_deg: f64,
    /// Color stops in source order. May be empty for garbage input.
    pub stops: Vec<Rgba8>,
}

/// Parse a color string, falling back to opaque white.
pub fn parse_color(s: &str) -> Rgba8 {
    try_parse_color(s).unwrap_or(Rgba8::WHITE)
}

/// Parse a color string, reporting failure to the caller.
pub fn try_parse_color(s: &str) -> Option<Rgba8> {
    let s = s.trim();
    if let Some(body) = s.strip_prefix("rgba(").or_else(|| s.strip_prefix("rgb(")) {
        let (args, _) = body.split_once(')')?;
        return parse_rgba_args(args);
    }
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    None
}

fn parse_rgba_args(args: &str) -> Option<Rgba8> {
    let mut parts = args.split(',').map(str::trim);
    let r = parts.next()?.parse::<u8>().ok()?;
    let g = parts.next()?.parse::<u8>().ok()?;
    let b = parts.next()?.parse::<u8>().ok()?;
    let a = match parts.next() {
        Some(raw) => alpha_to_byte(raw.parse::<f64>().ok()?),
        None => 255,
    };
    if parts.next().is_some() {
        return None;
    }
    Some(Rgba8 { r, g, b, a })
}

/// Unit-interval alpha to byte, round-half-up (normative rounding rule).
fn alpha_to_byte(a: f64) -> u8 {
    (a * 255.0).round().clamp(0.0, 255.0) as u8
}

fn parse_hex(hex: &str) -> Option<Rgba8> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => {
            let r = parse_byte(&hex[0..2])?;
            let g = parse_byte(&hex[2..4])?;
            let b = parse_byte(&hex[4..6])?;
            Some(Rgba8::opaque(r, g, b))
        }
        8 => {
            let r = parse_byte(&hex[0..2])?;
            let g = parse_byte(&hex[2..4])?;
            let b = parse_byte(&hex[4..6])?;
            let a = parse_byte(&hex[6..8])?;
            Some(Rgba8 { r, g, b, a })
        }
        _ => None,
    }
}

fn parse_byte(s: &str) -> Option<u8> {
    u8::from_str_radix(s, 16).ok()
}

/// Parse a gradient string: direction angle plus every color token in order.
///
/// Each discovered token is parsed with the usual white fallback, matching
/// the per-token degradation of solid colors. A string with no recognizable
/// color tokens yields an empty stop list, which the background renderer
/// treats as plain white.
pub fn parse_gradient(s: &str) -> GradientSpec {
    GradientSpec {
        angle_deg: find_angle(s).unwrap_or(90.0),
        stops: find_color_tokens(s).iter().map(|t| parse_color(t)).collect(),
    }
}

fn find_angle(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut search_from = 0;
    while let Some(rel) = s[search_from..].find("deg") {
        let at = search_from + rel;
        let mut start = at;
        while start > 0 && bytes[start - 1].is_ascii_digit() {
            start -= 1;
        }
        if start < at {
            return s[start..at].parse::<f64>().ok();
        }
        search_from = at + 3;
    }
    None
}

fn find_color_tokens(s: &str) -> Vec<&str> {
    let bytes = s.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let rest = &s[i..];
        if rest.starts_with("rgba(") || rest.starts_with("rgb(") {
            match rest.find(')') {
                Some(close) => {
                    tokens.push(&s[i..i + close + 1]);
                    i += close + 1;
                }
                None => break,
            }
        } else if bytes[i] == b'#' {
            let mut end = i + 1;
            while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_') {
                end += 1;
            }
            tokens.push(&s[i..end]);
            i = end;
        } else {
            i += 1;
        }
    }
    tokens
}
