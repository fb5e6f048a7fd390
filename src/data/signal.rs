//! Signal buffers and the regions selected on them.

use std::ops::{Deref, Range};
use std::sync::Arc;

use crate::error::{GlueError, RegionProblem, Result, Side};

/// An ordered, fixed-length sequence of samples.
///
/// Cloning is cheap: the samples are shared. A signal is never edited in place;
/// reloading a file produces a new one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signal {
    samples: Arc<[f64]>,
}

impl Signal {
    pub fn new(samples: impl Into<Arc<[f64]>>) -> Self {
        Self {
            samples: samples.into(),
        }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples paired with their index, ready for a line plot.
    pub fn indexed_points(&self) -> Vec<[f64; 2]> {
        self.samples
            .iter()
            .enumerate()
            .map(|(i, &v)| [i as f64, v])
            .collect()
    }
}

impl From<Vec<f64>> for Signal {
    fn from(v: Vec<f64>) -> Self {
        Self::new(v)
    }
}

impl From<&[f64]> for Signal {
    fn from(v: &[f64]) -> Self {
        Self::new(v)
    }
}

impl Deref for Signal {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.samples
    }
}

/// A contiguous, end-exclusive selection `[start, end)` on one signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Region {
    pub start: usize,
    pub end: usize,
}

impl Region {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The whole of a signal of length `len`.
    pub fn full(len: usize) -> Self {
        Self { start: 0, end: len }
    }

    /// Build a region from plot coordinates, truncating toward zero the way the
    /// region selector reports them. Bounds are clamped to `[0, len]` and put in order.
    pub fn from_plot_bounds(a: f64, b: f64, len: usize) -> Self {
        let clamp = |x: f64| -> usize {
            if x.is_nan() || x <= 0.0 {
                0
            } else {
                (x.trunc() as usize).min(len)
            }
        };
        let (a, b) = (clamp(a), clamp(b));
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Check the region against a signal of `len` samples.
    ///
    /// Splicing needs a boundary sample on both sides, so an empty region is an
    /// error here even though it is a valid slice.
    pub fn validate(&self, which: Side, len: usize) -> Result<()> {
        let problem = if self.start > self.end {
            Some(RegionProblem::Reversed)
        } else if self.end > len {
            Some(RegionProblem::OutOfBounds)
        } else if self.start == self.end {
            Some(RegionProblem::Empty)
        } else {
            None
        };
        match problem {
            Some(problem) => Err(GlueError::InvalidRegion {
                which,
                start: self.start,
                end: self.end,
                len,
                problem,
            }),
            None => Ok(()),
        }
    }

    /// Borrow the selected samples after validating the bounds.
    pub fn extract<'a>(&self, signal: &'a Signal, which: Side) -> Result<&'a [f64]> {
        self.validate(which, signal.len())?;
        Ok(&signal.samples()[self.range()])
    }
}
