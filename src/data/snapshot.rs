//! Saved snapshots queued for the report.
//!
//! A save captures Signal 1, Signal 2 and any glued results: one rendered
//! snapshot reference and one [`Statistics`] per label. Entries wait in a FIFO
//! [`SnapshotStore`] until a report drains them.

use std::collections::VecDeque;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::signal::Signal;
use super::splice::CompositeSignal;
use super::statistics::{Statistics, DEFAULT_PRECISION};
use crate::error::Result;

/// Logical role of a signal inside a saved record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalLabel {
    Signal1,
    Signal2,
    /// `None` when the save had a single glued signal, else the 1-based index.
    Glued(Option<usize>),
}

impl fmt::Display for SignalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalLabel::Signal1 => write!(f, "Signal 1"),
            SignalLabel::Signal2 => write!(f, "Signal 2"),
            SignalLabel::Glued(None) => write!(f, "Glued Signal"),
            SignalLabel::Glued(Some(n)) => write!(f, "Glued Signal {n}"),
        }
    }
}

/// Opaque handle to a rendered snapshot, typically an image path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotRef(pub PathBuf);

impl SnapshotRef {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Turns a signal into a snapshot reference (e.g. writes a PNG and returns its path).
///
/// `Ok(None)` means the renderer deliberately produced nothing.
pub trait SnapshotRenderer {
    fn render(&mut self, label: SignalLabel, samples: &[f64]) -> Result<Option<SnapshotRef>>;
}

/// One labelled signal inside a saved record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub label: SignalLabel,
    pub snapshot: Option<SnapshotRef>,
    pub statistics: Statistics,
}

/// Everything captured by one save, in label order.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRecord {
    signal1: Signal,
    signal2: Signal,
    entries: Vec<SnapshotEntry>,
}

impl SnapshotRecord {
    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.entries
    }

    pub fn get(&self, label: SignalLabel) -> Option<&SnapshotEntry> {
        self.entries.iter().find(|e| e.label == label)
    }

    fn same_sources(&self, signal1: &Signal, signal2: &Signal) -> bool {
        self.signal1 == *signal1 && self.signal2 == *signal2
    }
}

/// Result of [`SnapshotStore::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Appended at this queue position.
    Saved(usize),
    /// Signal 1 and Signal 2 were already queued; nothing was appended.
    Duplicate,
}

/// FIFO of saved records, drained once by report generation.
///
/// Duplicate check and append happen under one lock, as does take-all,
/// so a save racing a drain can neither be lost nor emitted twice.
#[derive(Debug)]
pub struct SnapshotStore {
    queue: Mutex<VecDeque<SnapshotRecord>>,
    precision: u32,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}

impl SnapshotStore {
    /// `precision` is the number of decimals kept in saved statistics.
    pub fn new(precision: u32) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            precision,
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<SnapshotRecord>> {
        // A panic while holding the lock cannot leave a half-written record.
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queue Signal 1, Signal 2 and `composites`, unless this signal pair is
    /// already queued.
    pub fn save(
        &self,
        signal1: &Signal,
        signal2: &Signal,
        composites: &[CompositeSignal],
        renderer: &mut dyn SnapshotRenderer,
    ) -> Result<SaveOutcome> {
        let mut queue = self.lock();
        if queue.iter().any(|r| r.same_sources(signal1, signal2)) {
            info!("Signal 1 and Signal 2 already saved; skipping");
            return Ok(SaveOutcome::Duplicate);
        }

        let mut sources: Vec<(SignalLabel, &[f64])> = vec![
            (SignalLabel::Signal1, signal1.samples()),
            (SignalLabel::Signal2, signal2.samples()),
        ];
        match composites {
            [] => {}
            [single] => sources.push((SignalLabel::Glued(None), single.samples())),
            many => sources.extend(
                many.iter()
                    .enumerate()
                    .map(|(i, c)| (SignalLabel::Glued(Some(i + 1)), c.samples())),
            ),
        }

        let entries = sources
            .into_iter()
            .map(|(label, samples)| SnapshotEntry {
                label,
                snapshot: render_or_skip(&mut *renderer, label, samples),
                statistics: Statistics::with_precision(samples, self.precision),
            })
            .collect();

        queue.push_back(SnapshotRecord {
            signal1: signal1.clone(),
            signal2: signal2.clone(),
            entries,
        });
        info!("saved snapshot set #{}", queue.len());
        Ok(SaveOutcome::Saved(queue.len() - 1))
    }

    /// Remove and return every queued record, oldest first.
    pub fn drain(&self) -> Vec<SnapshotRecord> {
        let mut queue = self.lock();
        std::mem::take(&mut *queue).into()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

fn render_or_skip(
    renderer: &mut dyn SnapshotRenderer,
    label: SignalLabel,
    samples: &[f64],
) -> Option<SnapshotRef> {
    match renderer.render(label, samples) {
        Ok(r) => r,
        Err(e) => {
            warn!("no snapshot for {label}: {e}");
            None
        }
    }
}

/// Renderer that produces no image; every entry gets statistics only.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSnapshots;

impl SnapshotRenderer for NoSnapshots {
    fn render(&mut self, _label: SignalLabel, _samples: &[f64]) -> Result<Option<SnapshotRef>> {
        Ok(None)
    }
}
