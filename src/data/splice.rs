//! The glue engine: join two segments with an interpolated bridge.

use std::ops::Range;

use log::debug;
use serde::{Deserialize, Serialize};

use super::interpolate::{interpolate, linspace, InterpolationOrder};
use super::signal::{Region, Signal};
use crate::error::{Result, Side};

/// Whether the bridge keeps the two boundary samples it was spaced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinMode {
    /// Gap block holds all `length + 2` spaced points, repeating the last
    /// sample of the lead and the first sample of the trail.
    #[default]
    Inclusive,
    /// Gap block holds only the `length` interior points.
    Trimmed,
}

/// Requested bridge between the two segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GapSpec {
    pub length: usize,
    pub order: InterpolationOrder,
    #[serde(default)]
    pub join: JoinMode,
}

impl GapSpec {
    pub fn new(length: usize, order: InterpolationOrder) -> Self {
        Self {
            length,
            order,
            join: JoinMode::Inclusive,
        }
    }

    pub fn with_join(mut self, join: JoinMode) -> Self {
        self.join = join;
        self
    }
}

/// Which part of a composite a block came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockRole {
    Lead,
    Gap,
    Trail,
}

impl BlockRole {
    pub const ALL: [BlockRole; 3] = [BlockRole::Lead, BlockRole::Gap, BlockRole::Trail];

    pub fn name(self) -> &'static str {
        match self {
            BlockRole::Lead => "signal 1",
            BlockRole::Gap => "gap",
            BlockRole::Trail => "signal 2",
        }
    }
}

/// A role-tagged index range inside a composite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub role: BlockRole,
    pub range: Range<usize>,
}

/// Lead segment, bridge and trail segment laid end to end.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeSignal {
    samples: Vec<f64>,
    blocks: [Block; 3],
}

impl CompositeSignal {
    fn assemble(lead: &[f64], gap: &[f64], trail: &[f64]) -> Self {
        let mut samples = Vec::with_capacity(lead.len() + gap.len() + trail.len());
        samples.extend_from_slice(lead);
        samples.extend_from_slice(gap);
        samples.extend_from_slice(trail);
        let a = lead.len();
        let b = a + gap.len();
        let c = b + trail.len();
        Self {
            samples,
            blocks: [
                Block { role: BlockRole::Lead, range: 0..a },
                Block { role: BlockRole::Gap, range: a..b },
                Block { role: BlockRole::Trail, range: b..c },
            ],
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

    pub fn blocks(&self) -> &[Block; 3] {
        &self.blocks
    }

    pub fn block(&self, role: BlockRole) -> &Block {
        match role {
            BlockRole::Lead => &self.blocks[0],
            BlockRole::Gap => &self.blocks[1],
            BlockRole::Trail => &self.blocks[2],
        }
    }

    pub fn block_samples(&self, role: BlockRole) -> &[f64] {
        &self.samples[self.block(role).range.clone()]
    }

    /// `[index, value]` pairs of one block, indexed in composite coordinates.
    pub fn block_points(&self, role: BlockRole) -> Vec<[f64; 2]> {
        let range = self.block(role).range.clone();
        range
            .clone()
            .zip(&self.samples[range])
            .map(|(i, &v)| [i as f64, v])
            .collect()
    }

    pub fn to_signal(&self) -> Signal {
        Signal::from(self.samples.as_slice())
    }
}

/// Splice `signal1[region1]` and `signal2[region2]` with a bridge built from `gap`.
///
/// The bridge is `gap.length + 2` points spaced from the last lead sample to the
/// first trail sample, then smoothed with the requested order.
pub fn splice(
    signal1: &Signal,
    region1: Region,
    signal2: &Signal,
    region2: Region,
    gap: GapSpec,
) -> Result<CompositeSignal> {
    let lead = region1.extract(signal1, Side::First)?;
    let trail = region2.extract(signal2, Side::Second)?;

    // Both non-empty after extract.
    let from = lead[lead.len() - 1];
    let to = trail[0];
    let spaced = linspace(from, to, gap.length + 2);
    let bridge = interpolate(&spaced, gap.order);
    let bridge = match gap.join {
        JoinMode::Inclusive => &bridge[..],
        JoinMode::Trimmed => &bridge[1..bridge.len() - 1],
    };

    let composite = CompositeSignal::assemble(lead, bridge, trail);
    debug!(
        "spliced {} + {} + {} samples ({} order, {:?})",
        lead.len(),
        bridge.len(),
        trail.len(),
        gap.order.label(),
        gap.join
    );
    Ok(composite)
}

/// Live re-splice state for the glue window: the two sources, their current
/// regions and gap, and the single current composite.
#[derive(Debug, Clone)]
pub struct Splicer {
    pub signal1: Signal,
    pub signal2: Signal,
    pub region1: Region,
    pub region2: Region,
    pub gap: GapSpec,
    current: Option<CompositeSignal>,
}

impl Splicer {
    /// Start with both regions covering their whole signal.
    pub fn new(signal1: Signal, signal2: Signal, gap: GapSpec) -> Self {
        let region1 = Region::full(signal1.len());
        let region2 = Region::full(signal2.len());
        Self {
            signal1,
            signal2,
            region1,
            region2,
            gap,
            current: None,
        }
    }

    /// Recompute the composite from the current parameters.
    ///
    /// On error the previous composite is dropped so a stale result is never shown.
    pub fn resplice(&mut self) -> Result<&CompositeSignal> {
        self.current = None;
        let composite = splice(&self.signal1, self.region1, &self.signal2, self.region2, self.gap)?;
        Ok(self.current.insert(composite))
    }

    pub fn current(&self) -> Option<&CompositeSignal> {
        self.current.as_ref()
    }
}
