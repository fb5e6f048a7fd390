//! Merging two loaded signals onto one plot.

use super::loader::LoadedSignal;
use super::signal::Signal;

/// Both signals end to end: time axes and amplitudes concatenated.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedSignal {
    pub time: Vec<f64>,
    pub signal: Signal,
    /// Index of the first sample that came from the second signal.
    pub boundary: usize,
}

impl MergedSignal {
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.time
            .iter()
            .zip(self.signal.iter())
            .map(|(&t, &v)| [t, v])
            .collect()
    }
}

pub fn merge(first: &LoadedSignal, second: &LoadedSignal) -> MergedSignal {
    let mut time = Vec::with_capacity(first.time.len() + second.time.len());
    time.extend_from_slice(&first.time);
    time.extend_from_slice(&second.time);
    let mut samples = Vec::with_capacity(first.signal.len() + second.signal.len());
    samples.extend_from_slice(first.signal.samples());
    samples.extend_from_slice(second.signal.samples());
    MergedSignal {
        time,
        signal: Signal::from(samples),
        boundary: first.signal.len(),
    }
}

/// Merge toggle of the viewer page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeState {
    #[default]
    Separate,
    Merged,
}

impl MergeState {
    pub fn toggled(self) -> Self {
        match self {
            MergeState::Separate => MergeState::Merged,
            MergeState::Merged => MergeState::Separate,
        }
    }

    /// Button text: the action the button performs next.
    pub fn button_text(self) -> &'static str {
        match self {
            MergeState::Separate => "Merge",
            MergeState::Merged => "Unmerge",
        }
    }
}
