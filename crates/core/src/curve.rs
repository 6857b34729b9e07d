//! Piecewise curves keyed on a normalized input, used for isp against pressure fraction.
//!
//! Between two keys the curve is a cubic Hermite segment. A key may carry explicit
//! in/out tangents; where a tangent is missing the segment's secant slope is used,
//! so a curve without tangents interpolates linearly. Inputs outside the key range
//! clamp to the nearest end key.

/// A single control point of a [`FloatCurve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveKey {
    pub time: f64,
    pub value: f64,
    pub in_tangent: Option<f64>,
    pub out_tangent: Option<f64>,
}

impl CurveKey {
    /// Key without explicit tangents.
    pub fn new(time: f64, value: f64) -> Self {
        Self {
            time,
            value,
            in_tangent: None,
            out_tangent: None,
        }
    }

    /// Key with explicit in/out tangents.
    pub fn with_tangents(time: f64, value: f64, in_tangent: f64, out_tangent: f64) -> Self {
        Self {
            time,
            value,
            in_tangent: Some(in_tangent),
            out_tangent: Some(out_tangent),
        }
    }
}

/// Ordered set of [`CurveKey`]s with deterministic evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FloatCurve {
    keys: Vec<CurveKey>,
}

impl FloatCurve {
    /// Build a curve, sorting keys by time.
    pub fn new(mut keys: Vec<CurveKey>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// Convenience constructor from `(time, value)` pairs.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        Self::new(points.iter().map(|&(t, v)| CurveKey::new(t, v)).collect())
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn min_time(&self) -> Option<f64> {
        self.keys.first().map(|k| k.time)
    }

    pub fn max_time(&self) -> Option<f64> {
        self.keys.last().map(|k| k.time)
    }

    /// Evaluate the curve at `x`. Returns NaN for an empty curve.
    pub fn evaluate(&self, x: f64) -> f64 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return f64::NAN,
        };
        if x <= first.time {
            return first.value;
        }
        if x >= last.time {
            return last.value;
        }

        // first key with time > x; x lies strictly inside the key range here
        let upper = self.keys.partition_point(|k| k.time <= x);
        let lo = &self.keys[upper - 1];
        if lo.time == x {
            return lo.value;
        }
        let hi = &self.keys[upper];
        hermite(lo, hi, x)
    }
}

fn hermite(lo: &CurveKey, hi: &CurveKey, x: f64) -> f64 {
    let dt = hi.time - lo.time;
    if dt <= 0.0 {
        return hi.value;
    }
    let secant = (hi.value - lo.value) / dt;
    let m0 = lo.out_tangent.unwrap_or(secant) * dt;
    let m1 = hi.in_tangent.unwrap_or(secant) * dt;

    let t = (x - lo.time) / dt;
    let t2 = t * t;
    let t3 = t2 * t;
    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    h00 * lo.value + h10 * m0 + h01 * hi.value + h11 * m1
}
