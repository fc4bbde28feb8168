//! SVG-style path data for shapes: `M x y C c1x c1y c2x c2y x y ...`.
//!
//! Only absolute `M` (once, first) and `C` commands are produced and
//! accepted. `C` may carry several implicit segments, and numbers may be
//! separated by whitespace or commas. Numbers follow SVG syntax (optional
//! sign, leading `.`, exponent) but must be finite. A trailing partial
//! group of vertices is not representable and is left out on export.

use crate::model::{Vertex, Vertices};
use crate::shape::BezierShape;
use std::fmt::Write;
use winnow::ascii::float;
use winnow::combinator::{preceded, separated_pair};
use winnow::prelude::*;
use winnow::token::take_while;

/// Emit the start point and every complete segment of `shape`.
#[must_use]
pub fn emit_path_data(shape: &BezierShape) -> String {
    let Some(first) = shape.vertex(0) else {
        return String::new();
    };
    let mut out = String::with_capacity(16 + shape.n_curves() * 48);
    let _ = write!(out, "M {} {}", format_num(first.x), format_num(first.y));
    for i in 0..shape.n_curves() {
        if let [_, c1, c2, end] = shape.bezier(i) {
            let _ = write!(
                out,
                " C {} {} {} {} {} {}",
                format_num(c1.x),
                format_num(c1.y),
                format_num(c2.x),
                format_num(c2.y),
                format_num(end.x),
                format_num(end.y)
            );
        }
    }
    out
}

/// Parse path data into a vertex sequence.
#[must_use = "parsing result should be used"]
pub fn parse_path_data(input: &str) -> Result<Vertices, String> {
    let mut vertices = Vertices::new();
    let mut rest = input;

    skip_separators(&mut rest);
    if rest.is_empty() {
        return Ok(vertices);
    }

    let Some(after_move) = rest.strip_prefix('M') else {
        return Err(format!("Path data error: expected `M` near `{}`", snippet(rest)));
    };
    rest = after_move;
    skip_separators(&mut rest);
    let start = parse_vertex
        .parse_next(&mut rest)
        .map_err(|e| format!("Path data error: bad start point: {e}"))?;
    vertices.push(start);
    skip_separators(&mut rest);

    while !rest.is_empty() {
        let Some(after_curve) = rest.strip_prefix('C') else {
            return Err(format!(
                "Path data error: unsupported command near `{}`",
                snippet(rest)
            ));
        };
        rest = after_curve;
        skip_separators(&mut rest);
        loop {
            let segment = parse_segment
                .parse_next(&mut rest)
                .map_err(|e| format!("Path data error: bad curve segment: {e}"))?;
            vertices.extend(segment);
            skip_separators(&mut rest);
            if rest.is_empty() || rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
                break;
            }
        }
    }

    Ok(vertices)
}

// ─── Low-level parsers ──────────────────────────────────────────────────

fn skip_separators(input: &mut &str) {
    *input = input.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
}

fn parse_separator(input: &mut &str) -> ModalResult<()> {
    take_while(1.., |c: char| c.is_whitespace() || c == ',')
        .void()
        .parse_next(input)
}

fn parse_number(input: &mut &str) -> ModalResult<f64> {
    float::<_, f64, _>
        .verify(|n: &f64| n.is_finite())
        .parse_next(input)
}

fn parse_vertex(input: &mut &str) -> ModalResult<Vertex> {
    separated_pair(parse_number, parse_separator, parse_number)
        .map(|(x, y)| Vertex::new(x, y))
        .parse_next(input)
}

fn parse_segment(input: &mut &str) -> ModalResult<[Vertex; 3]> {
    (
        parse_vertex,
        preceded(parse_separator, parse_vertex),
        preceded(parse_separator, parse_vertex),
    )
        .map(|(c1, c2, end)| [c1, c2, end])
        .parse_next(input)
}

fn snippet(s: &str) -> &str {
    let end = s.char_indices().nth(12).map_or(s.len(), |(i, _)| i);
    &s[..end]
}

/// Format a coordinate compactly: integers without a fraction, others with
/// at most three decimals.
fn format_num(n: f64) -> String {
    if n == n.trunc() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n:.3}")
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}
