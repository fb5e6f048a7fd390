//! Gap smoothing: piecewise interpolating polynomials over sample indices.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::GlueError;

/// Polynomial order used to smooth a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum InterpolationOrder {
    #[default]
    Linear,
    Quadratic,
    Cubic,
}

impl InterpolationOrder {
    pub const ALL: [InterpolationOrder; 3] = [
        InterpolationOrder::Linear,
        InterpolationOrder::Quadratic,
        InterpolationOrder::Cubic,
    ];

    pub fn degree(self) -> usize {
        match self {
            InterpolationOrder::Linear => 1,
            InterpolationOrder::Quadratic => 2,
            InterpolationOrder::Cubic => 3,
        }
    }

    /// Number of samples needed to fit this order.
    pub fn min_points(self) -> usize {
        self.degree() + 1
    }

    /// The order actually usable for `n` samples. Only ever steps down, and only to linear.
    pub fn feasible_for(self, n: usize) -> InterpolationOrder {
        if n >= self.min_points() {
            self
        } else {
            InterpolationOrder::Linear
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InterpolationOrder::Linear => "linear",
            InterpolationOrder::Quadratic => "quadratic",
            InterpolationOrder::Cubic => "cubic",
        }
    }
}

impl TryFrom<u8> for InterpolationOrder {
    type Error = GlueError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(InterpolationOrder::Linear),
            2 => Ok(InterpolationOrder::Quadratic),
            3 => Ok(InterpolationOrder::Cubic),
            other => Err(GlueError::InvalidOrder(other)),
        }
    }
}

impl From<InterpolationOrder> for u8 {
    fn from(o: InterpolationOrder) -> u8 {
        o.degree() as u8
    }
}

impl fmt::Display for InterpolationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degree())
    }
}

/// A piecewise polynomial through `(i, ys[i])` for `i in 0..ys.len()`.
///
/// Each evaluation uses the `degree + 1` nodes nearest to `x` (clamped at the
/// ends, so positions outside `[0, len - 1]` extrapolate from the edge piece).
#[derive(Debug, Clone, Copy)]
pub struct Interpolant<'a> {
    ys: &'a [f64],
    order: InterpolationOrder,
}

impl<'a> Interpolant<'a> {
    /// Fit `ys` with `requested`, downgrading to linear when there are too few points.
    /// Returns `None` for fewer than two samples.
    pub fn fit(ys: &'a [f64], requested: InterpolationOrder) -> Option<Self> {
        if ys.len() < 2 {
            return None;
        }
        let order = requested.feasible_for(ys.len());
        if order != requested {
            debug!(
                "{} interpolation needs {} points, have {}; falling back to linear",
                requested.label(),
                requested.min_points(),
                ys.len()
            );
        }
        Some(Self { ys, order })
    }

    /// Order in effect after any fallback.
    pub fn order(&self) -> InterpolationOrder {
        self.order
    }

    pub fn eval(&self, x: f64) -> f64 {
        let n = self.ys.len();
        let k = self.order.degree();
        let last = (n - 1) as f64;
        let base = if x.is_nan() { 0.0 } else { x.floor().clamp(0.0, last) } as isize;
        // Window of k + 1 nodes, centered on [base, base + 1] for odd k.
        let max_start = (n - (k + 1)) as isize;
        let start = (base - (k as isize - 1) / 2).clamp(0, max_start) as usize;
        lagrange(&self.ys[start..=start + k], start as f64, x)
    }
}

/// Lagrange form through `(x0 + j, ys[j])`. Exact at the nodes.
fn lagrange(ys: &[f64], x0: f64, x: f64) -> f64 {
    let mut acc = 0.0;
    for (j, &yj) in ys.iter().enumerate() {
        let xj = x0 + j as f64;
        let mut basis = 1.0;
        for m in 0..ys.len() {
            if m != j {
                let xm = x0 + m as f64;
                basis *= (x - xm) / (xj - xm);
            }
        }
        acc += yj * basis;
    }
    acc
}

/// Smooth a gap sequence with the requested order, evaluated back at every index.
///
/// Never fails: fewer than two samples, or a fit that produces non-finite values,
/// hand back the input unchanged.
pub fn interpolate(gap: &[f64], order: InterpolationOrder) -> Vec<f64> {
    let Some(fit) = Interpolant::fit(gap, order) else {
        debug!("gap of {} samples is too short to interpolate", gap.len());
        return gap.to_vec();
    };
    let out: Vec<f64> = (0..gap.len()).map(|i| fit.eval(i as f64)).collect();
    if out.iter().any(|v| !v.is_finite()) {
        debug!("interpolated gap has non-finite values; keeping unsmoothed gap");
        return gap.to_vec();
    }
    out
}

/// `n` points evenly spaced from `a` to `b`, both included.
pub fn linspace(a: f64, b: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![a],
        _ => {
            let step = (b - a) / (n - 1) as f64;
            let mut v: Vec<f64> = (0..n).map(|i| a + step * i as f64).collect();
            v[n - 1] = b;
            v
        }
    }
}
