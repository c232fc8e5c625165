//! Line-level primitives for the MDL scanner
//!
//! Every helper here returns `Option`: a line that does not match the
//! expected shape is reported as `None` and the caller moves on.

use mdltoobj_core::{Color, Uv, Vertex};

/// Strip trailing newline, carriage-return and tab characters
pub fn trim_line_end(line: &str) -> &str {
    line.trim_end_matches(|c: char| matches!(c, '\n' | '\r' | '\t'))
}

/// Check whether `key` occurs anywhere in `line`
pub fn has_key(line: &str, key: &str) -> bool {
    !line.is_empty() && line.contains(key)
}

/// Return the remainder of `line` after the first occurrence of `key`
pub fn value_for_key<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    if line.is_empty() {
        return None;
    }
    let start = line.find(key)? + key.len();
    let value = &line[start..];
    let end = value.find(|c: char| c == '\n' || c == '\r').unwrap_or(value.len());
    Some(&value[..end])
}

/// Parse a floating-point value, ignoring surrounding whitespace
pub fn parse_f64(text: &str) -> Option<f64> {
    text.trim().parse().ok()
}

/// Parse a non-negative count, ignoring surrounding whitespace
pub fn parse_count(text: &str) -> Option<usize> {
    text.trim().parse().ok()
}

/// Float value following `key`
pub fn f64_for_key(line: &str, key: &str) -> Option<f64> {
    value_for_key(line, key).and_then(parse_f64)
}

/// Count following `key`
pub fn count_for_key(line: &str, key: &str) -> Option<usize> {
    value_for_key(line, key).and_then(parse_count)
}

/// Decode a percent-triplet color such as `255128000`.
///
/// The value is cut into three fields at byte offsets 0, 3 and 6 (the last
/// field runs to the end), each divided by 255. Any field failing to parse
/// rejects the whole color.
pub fn parse_percent_color(text: &str) -> Option<Color> {
    let red = parse_f64(text.get(0..3)?)?;
    let green = parse_f64(text.get(3..6)?)?;
    let blue = parse_f64(text.get(6..)?)?;
    Some([red / 255.0, green / 255.0, blue / 255.0])
}

/// Percent-triplet color following `key`
pub fn color_for_key(line: &str, key: &str) -> Option<Color> {
    value_for_key(line, key).and_then(parse_percent_color)
}

/// Parse exactly `N` whitespace-separated floats
fn parse_floats<const N: usize>(line: &str) -> Option<[f64; N]> {
    let mut values = [0.0; N];
    let mut tokens = line.split_whitespace();
    for value in values.iter_mut() {
        *value = tokens.next()?.parse().ok()?;
    }
    if tokens.next().is_some() {
        return None;
    }
    Some(values)
}

/// Parse an `x y z` row
pub fn parse_vertex(line: &str) -> Option<Vertex> {
    let [x, y, z] = parse_floats::<3>(line)?;
    Some(Vertex::new(x, y, z))
}

/// Parse an `x y z u v` row
pub fn parse_vertex_uv(line: &str) -> Option<(Vertex, Uv)> {
    let [x, y, z, u, v] = parse_floats::<5>(line)?;
    Some((Vertex::new(x, y, z), Uv::new(u, v)))
}

/// Split a line into signed integers, dropping tokens that do not parse
pub fn parse_indices(line: &str) -> Vec<i32> {
    line.split_whitespace()
        .filter_map(|token| token.parse().ok())
        .collect()
}
