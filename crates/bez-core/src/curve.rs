//! Closed-form math for one axis of a cubic Bézier segment.
//!
//! A *component* is the four control values of a single axis
//! (`[anchor, control1, control2, anchor]`). Extrema come from the roots of
//! the derivative, which is a quadratic, so no sampling is involved.

use smallvec::SmallVec;

/// One axis of a cubic segment.
pub type Component = [f64; 4];

/// Coefficients smaller than this are treated as zero.
const EPSILON: f64 = 1e-12;

/// Evaluate `A(1-t)³ + 3B·t(1-t)² + 3C·t²(1-t) + D·t³`. `t` is not clamped.
pub fn evaluate(component: &Component, t: f64) -> f64 {
    let [a, b, c, d] = *component;
    let mt = 1.0 - t;
    a * mt * mt * mt + 3.0 * b * t * mt * mt + 3.0 * c * t * t * mt + d * t * t * t
}

/// Parameters in `[0, 1]` where the derivative of `component` is zero.
///
/// When the cubic term vanishes the derivative is linear and its single root
/// is used instead; a constant derivative has no roots.
pub fn extrema_parameters(component: &Component) -> SmallVec<[f64; 2]> {
    let [p1, p2, p3, p4] = *component;
    let a = 3.0 * (-p1 + 3.0 * p2 - 3.0 * p3 + p4);
    let b = 6.0 * (p1 - 2.0 * p2 + p3);
    let c = 3.0 * (p2 - p1);

    let mut roots = SmallVec::new();
    if a.abs() < EPSILON {
        if b.abs() >= EPSILON {
            roots.push(-c / b);
        }
    } else {
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return roots;
        }
        let sqrt_d = disc.sqrt();
        roots.push((-b + sqrt_d) / (2.0 * a));
        roots.push((-b - sqrt_d) / (2.0 * a));
    }
    roots.retain(|t| *t >= 0.0 && *t <= 1.0);
    roots
}

/// `(min, max)` of the component over `t ∈ [0, 1]`.
pub fn component_bounds(component: &Component) -> (f64, f64) {
    let mut min = component[0].min(component[3]);
    let mut max = component[0].max(component[3]);
    for t in extrema_parameters(component) {
        let v = evaluate(component, t);
        min = min.min(v);
        max = max.max(v);
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_hits_anchors_at_ends() {
        let c = [2.0, 7.0, -3.0, 11.0];
        assert_eq!(evaluate(&c, 0.0), 2.0);
        assert_eq!(evaluate(&c, 1.0), 11.0);
    }

    #[test]
    fn evaluate_is_not_clamped() {
        let line = [0.0, 1.0, 2.0, 3.0];
        assert!((evaluate(&line, 2.0) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn symmetric_arch_peaks_at_half() {
        // a = 0 here, so the linear fallback finds the root
        let arch = [0.0, 10.0, 10.0, 0.0];
        let roots = extrema_parameters(&arch);
        assert_eq!(roots.len(), 1);
        assert!((roots[0] - 0.5).abs() < 1e-12);
        assert!((evaluate(&arch, 0.5) - 7.5).abs() < 1e-12);
    }

    #[test]
    fn straight_line_has_no_extrema() {
        assert!(extrema_parameters(&[0.0, 1.0, 2.0, 3.0]).is_empty());
        assert!(extrema_parameters(&[4.0, 4.0, 4.0, 4.0]).is_empty());
    }

    #[test]
    fn negative_discriminant_has_no_extrema() {
        // monotone with no stationary point
        assert!(extrema_parameters(&[0.0, 5.0, 5.0, 30.0]).is_empty());
    }

    #[test]
    fn roots_outside_unit_interval_are_dropped() {
        // raw roots are ≈ -0.809 and ≈ 0.309
        let roots = extrema_parameters(&[0.0, 1.0, 3.0, 2.0]);
        assert_eq!(roots.len(), 1);
        assert!((roots[0] - 0.309).abs() < 1e-3);
    }

    #[test]
    fn overshooting_controls_extend_bounds() {
        let (min, max) = component_bounds(&[0.0, 40.0, -30.0, 10.0]);
        assert!(max > 10.0);
        assert!(min < 0.0);
    }
}
