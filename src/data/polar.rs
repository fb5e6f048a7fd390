//! Circular trace: one radius per sample, spread evenly around a closed outline.
//!
//! Angle zero points north and angles grow clockwise, so sample `i` of `n`
//! sits at `2π·i/n` and the outline closes back on sample 0.

use std::f64::consts::TAU;
use std::path::Path;

use log::info;

use super::interpolate::linspace;
use super::signal::Signal;
use crate::error::{GlueError, Result};

/// Radii shown on the circular page until a file is loaded.
pub const DEMO_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct CircularTrace {
    radii: Signal,
}

impl CircularTrace {
    pub fn new(radii: impl Into<Signal>) -> Self {
        Self { radii: radii.into() }
    }

    /// `1..=100` in 100 steps.
    pub fn demo() -> Self {
        Self::new(linspace(1.0, 100.0, DEMO_LEN))
    }

    pub fn radii(&self) -> &Signal {
        &self.radii
    }

    /// Points in the closed outline: every sample plus the repeated first one.
    /// Zero when there are fewer than two samples, which draw nothing.
    pub fn outline_len(&self) -> usize {
        match self.radii.len() {
            n if n < 2 => 0,
            n => n + 1,
        }
    }

    /// Cartesian `[x, y]` of the first `visible` outline points.
    pub fn points(&self, visible: usize) -> Vec<[f64; 2]> {
        let n = self.radii.len();
        if n < 2 {
            return Vec::new();
        }
        (0..=n)
            .take(visible)
            .map(|i| {
                let theta = TAU * i as f64 / n as f64;
                polar_to_xy(self.radii[i % n], theta)
            })
            .collect()
    }

    /// Largest absolute radius, for sizing guide rings.
    pub fn max_radius(&self) -> f64 {
        self.radii
            .iter()
            .filter(|r| r.is_finite())
            .fold(0.0, |acc: f64, r| acc.max(r.abs()))
    }
}

/// North-up, clockwise.
pub fn polar_to_xy(radius: f64, theta: f64) -> [f64; 2] {
    [radius * theta.sin(), radius * theta.cos()]
}

/// Closed circle of `radius` with `segments` chords.
pub fn ring(radius: f64, segments: usize) -> Vec<[f64; 2]> {
    let segments = segments.max(3);
    (0..=segments)
        .map(|i| polar_to_xy(radius, TAU * i as f64 / segments as f64))
        .collect()
}

/// Comma-separated numbers, any number per row, read row by row. `#` starts a comment.
pub fn load_circular(path: impl AsRef<Path>) -> Result<CircularTrace> {
    let path = path.as_ref();
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_path(path)?;
    let mut radii = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line() as usize);
        for raw in record.iter() {
            let v = raw.parse::<f64>().map_err(|e| GlueError::Parse {
                path: path.to_path_buf(),
                line,
                message: format!("{raw:?}: {e}"),
            })?;
            radii.push(v);
        }
    }
    info!("loaded {} radii from {}", radii.len(), path.display());
    Ok(CircularTrace::new(radii))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f64; 2], b: [f64; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-9 && (a[1] - b[1]).abs() < 1e-9
    }

    #[test]
    fn quarter_turns_go_clockwise_from_north() {
        let t = CircularTrace::new(vec![1.0, 2.0, 3.0, 4.0]);
        let pts = t.points(usize::MAX);
        assert_eq!(pts.len(), 5);
        assert!(close(pts[0], [0.0, 1.0]));
        assert!(close(pts[1], [2.0, 0.0]));
        assert!(close(pts[2], [0.0, -3.0]));
        assert!(close(pts[3], [-4.0, 0.0]));
        assert!(close(pts[4], pts[0]));
    }

    #[test]
    fn ring_is_closed() {
        let r = ring(2.0, 8);
        assert_eq!(r.len(), 9);
        assert!(close(r[0], r[8]));
        assert!(close(r[2], [2.0, 0.0]));
    }
}
