//! Fill-color token resolution.
//!
//! Accepts `#rgb`, `#rrggbb`, `rgb()`/`rgba()`, and a fixed named-color
//! table. Anything unparsable degrades to a default gray; `none` and the
//! empty token resolve to the transparent sentinel the walker treats as
//! "no region".

use crate::model::Color;

pub const DEFAULT_GRAY: Color = Color { r: 0x9E, g: 0x9E, b: 0x9E, a: 255 };

pub fn resolve_fill(token: &str) -> Color {
    let t = token.trim();
    if t.is_empty() {
        return Color::TRANSPARENT;
    }
    let lower = t.to_ascii_lowercase();
    if lower == "none" || lower == "transparent" {
        return Color::TRANSPARENT;
    }
    if let Some(hex) = lower.strip_prefix('#') {
        return parse_hex(hex);
    }
    if lower.starts_with("rgb(") || lower.starts_with("rgba(") {
        return parse_rgb(&lower);
    }
    named(&lower).unwrap_or(DEFAULT_GRAY)
}

fn parse_hex(hex: &str) -> Color {
    let expanded;
    let digits = match hex.len() {
        3 => {
            let mut s = String::with_capacity(6);
            for ch in hex.chars() {
                s.push(ch);
                s.push(ch);
            }
            expanded = s;
            expanded.as_str()
        }
        6 => hex,
        _ => return DEFAULT_GRAY,
    };
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
    match (channel(0), channel(2), channel(4)) {
        (Ok(r), Ok(g), Ok(b)) => Color { r, g, b, a: 255 },
        _ => DEFAULT_GRAY,
    }
}

fn parse_rgb(lower: &str) -> Color {
    let open = match lower.find('(') {
        Some(i) => i,
        None => return DEFAULT_GRAY,
    };
    let body = lower[open + 1..].trim_end_matches(')');
    let mut nums = body
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| t.parse::<f32>().ok());
    let mut channel = || {
        nums.next()
            .flatten()
            .map(|v| v.clamp(0.0, 255.0) as u8)
            .unwrap_or(0)
    };
    let r = channel();
    let g = channel();
    let b = channel();
    // Alpha is given on 0..1 and scales to 0..255; absent means opaque.
    let a = nums
        .next()
        .flatten()
        .map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
        .unwrap_or(255);
    Color { r, g, b, a }
}

fn named(lower: &str) -> Option<Color> {
    let key: String = lower
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .collect();
    let rgb = match key.as_str() {
        "white" => (0xFF, 0xFF, 0xFF),
        "black" => (0x00, 0x00, 0x00),
        "red" => (0xF4, 0x43, 0x36),
        "green" => (0x4C, 0xAF, 0x50),
        "blue" => (0x21, 0x96, 0xF3),
        "yellow" => (0xFF, 0xEB, 0x3B),
        "orange" => (0xFF, 0x98, 0x00),
        "purple" => (0x9C, 0x27, 0xB0),
        "pink" => (0xE9, 0x1E, 0x63),
        "brown" => (0x79, 0x55, 0x48),
        "gray" | "grey" => (0x9E, 0x9E, 0x9E),
        "cyan" => (0x00, 0xBC, 0xD4),
        "lime" => (0xCD, 0xDC, 0x39),
        "indigo" => (0x3F, 0x51, 0xB5),
        "teal" => (0x00, 0x96, 0x88),
        "amber" => (0xFF, 0xC1, 0x07),
        "deeporange" => (0xFF, 0x57, 0x22),
        "deeppurple" => (0x67, 0x3A, 0xB7),
        "lightblue" => (0x03, 0xA9, 0xF4),
        "lightgreen" => (0x8B, 0xC3, 0x4A),
        _ => return None,
    };
    Some(Color { r: rgb.0, g: rgb.1, b: rgb.2, a: 255 })
}
