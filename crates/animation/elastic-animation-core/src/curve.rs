//! Cubic-bezier timing curves.
//!
//! A timing curve maps normalized time `x` onto eased progress `y`. The curve is a
//! parametric cubic in `t`, so evaluating it means first solving `x(t) = x` for `t`
//! (Newton-Raphson seeded at `t = x`) and then evaluating `y(t)`.

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;

/// Newton-Raphson iteration cap.
const MAX_NEWTON_STEPS: usize = 10;
/// Successive iterates closer than this are considered converged.
const NEWTON_TOLERANCE: f64 = 1e-8;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub x: f64,
    pub y: f64,
}

impl ControlPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Power-basis coefficients of one component of the cubic:
/// `a*t^3 + b*t^2 + c*t + d`.
#[derive(Copy, Clone, Debug)]
struct Cubic {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl Cubic {
    #[inline]
    fn from_components(p0: f64, p1: f64, p2: f64, p3: f64) -> Self {
        Self {
            a: -p0 + 3.0 * p1 - 3.0 * p2 + p3,
            b: 3.0 * p0 - 6.0 * p1 + 3.0 * p2,
            c: -3.0 * p0 + 3.0 * p1,
            d: p0,
        }
    }

    #[inline]
    fn value(&self, t: f64) -> f64 {
        ((self.a * t + self.b) * t + self.c) * t + self.d
    }

    #[inline]
    fn derivative(&self, t: f64) -> f64 {
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }
}

/// A cubic bezier timing function defined by four control points.
///
/// The first and last points are `(0, 0)` and `(1, 1)` for every standard curve, but
/// they are kept explicit so arbitrary segments can be evaluated.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    control_points: [ControlPoint; 4],
}

impl CubicBezier {
    /// Build a curve from four control points. The x coordinate of every point must lie
    /// in `[0, 1]`; outside that range the x-cubic may fold back on itself.
    pub fn new(control_points: [ControlPoint; 4]) -> Result<Self, AnimationError> {
        let curve = Self { control_points };
        curve.validate()?;
        Ok(curve)
    }

    /// CSS-style constructor: `(0,0)`, `(x1,y1)`, `(x2,y2)`, `(1,1)`.
    pub fn css(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self, AnimationError> {
        Self::new(css_points(x1, y1, x2, y2))
    }

    const fn preset(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            control_points: css_points(x1, y1, x2, y2),
        }
    }

    pub fn control_points(&self) -> [ControlPoint; 4] {
        self.control_points
    }

    pub fn validate(&self) -> Result<(), AnimationError> {
        for (index, point) in self.control_points.iter().enumerate() {
            if !(0.0..=1.0).contains(&point.x) {
                return Err(AnimationError::NonMonotonicCurve { index, x: point.x });
            }
        }
        Ok(())
    }

    /// Eased progress for normalized time `x`.
    ///
    /// Inputs outside `[0, 1]` are not clamped; the cubic is simply extrapolated.
    pub fn value_at(&self, x: f64) -> f64 {
        let [p0, p1, p2, p3] = self.control_points;
        let xs = Cubic::from_components(p0.x, p1.x, p2.x, p3.x);
        let ys = Cubic::from_components(p0.y, p1.y, p2.y, p3.y);
        ys.value(solve_for_t(&xs, x))
    }
}

const fn css_points(x1: f64, y1: f64, x2: f64, y2: f64) -> [ControlPoint; 4] {
    [
        ControlPoint::new(0.0, 0.0),
        ControlPoint::new(x1, y1),
        ControlPoint::new(x2, y2),
        ControlPoint::new(1.0, 1.0),
    ]
}

/// Find `t` with `xs(t) == x` by Newton-Raphson. Non-convergence is not an error:
/// whatever estimate is current when the iteration budget runs out is returned.
fn solve_for_t(xs: &Cubic, x: f64) -> f64 {
    let mut t = x;
    for _ in 0..MAX_NEWTON_STEPS {
        let residual = xs.value(t) - x;
        if residual.abs() < NEWTON_TOLERANCE {
            break;
        }
        let slope = xs.derivative(t);
        // Flat tangent: a Newton step would diverge, keep the current estimate.
        if slope.abs() < f64::EPSILON {
            break;
        }
        let next = t - residual / slope;
        let settled = (next - t).abs() < NEWTON_TOLERANCE;
        t = next;
        if settled {
            break;
        }
    }
    t
}

/// Named timing curves.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Curve {
    Default,
    EaseIn,
    EaseOut,
    #[default]
    EaseInEaseOut,
    Linear,
    Custom(CubicBezier),
}

impl Curve {
    pub const DEFAULT_BEZIER: CubicBezier = CubicBezier::preset(0.25, 0.1, 0.25, 1.0);
    pub const EASE_IN_BEZIER: CubicBezier = CubicBezier::preset(0.42, 0.0, 1.0, 1.0);
    pub const EASE_OUT_BEZIER: CubicBezier = CubicBezier::preset(0.0, 0.0, 0.58, 1.0);
    pub const EASE_IN_EASE_OUT_BEZIER: CubicBezier = CubicBezier::preset(0.42, 0.0, 0.58, 1.0);
    pub const LINEAR_BEZIER: CubicBezier = CubicBezier::preset(0.0, 0.0, 1.0, 1.0);

    /// Custom curve from CSS-style control points.
    pub fn custom(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self, AnimationError> {
        CubicBezier::css(x1, y1, x2, y2).map(Curve::Custom)
    }

    pub fn bezier(&self) -> CubicBezier {
        match self {
            Curve::Default => Self::DEFAULT_BEZIER,
            Curve::EaseIn => Self::EASE_IN_BEZIER,
            Curve::EaseOut => Self::EASE_OUT_BEZIER,
            Curve::EaseInEaseOut => Self::EASE_IN_EASE_OUT_BEZIER,
            Curve::Linear => Self::LINEAR_BEZIER,
            Curve::Custom(bezier) => *bezier,
        }
    }

    pub fn validate(&self) -> Result<(), AnimationError> {
        match self {
            Curve::Custom(bezier) => bezier.validate(),
            _ => Ok(()),
        }
    }

    /// Eased progress for normalized time `x`. Linear skips root finding.
    pub fn value_at(&self, x: f64) -> f64 {
        match self {
            Curve::Linear => x,
            other => other.bezier().value_at(x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_rejects_out_of_range_x() {
        let err = CubicBezier::css(1.2, 0.0, 0.5, 1.0).unwrap_err();
        assert_eq!(err, AnimationError::NonMonotonicCurve { index: 1, x: 1.2 });
        assert!(Curve::custom(0.3, -0.5, 0.7, 1.5).is_ok(), "y may overshoot");
    }

    #[test]
    fn ease_out_starts_on_a_flat_tangent() {
        // x'(0) == 0 for ease-out; the zero-residual check must win over the slope guard.
        let y = Curve::EaseOut.value_at(0.0);
        assert!(y.is_finite());
        assert!(y.abs() < 1e-12);
    }

    #[test]
    fn preset_curves_serialize_as_snake_case() {
        let json = serde_json::to_string(&Curve::EaseInEaseOut).unwrap();
        assert_eq!(json, "\"ease_in_ease_out\"");
        let back: Curve = serde_json::from_str("\"ease_out\"").unwrap();
        assert_eq!(back, Curve::EaseOut);
    }
}
