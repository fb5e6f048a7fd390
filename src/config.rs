//! Configuration shared by the viewer, the glue window and the report pipeline.
//!
//! Every field has a default, so a config file only needs the values it changes.
//! Files are YAML (`.yaml`/`.yml`) or JSON (`.json`).

use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::data::interpolate::InterpolationOrder;
use crate::data::playback::SpeedControl;
use crate::data::report::ReportLayout;
use crate::data::splice::{GapSpec, JoinMode};
use crate::data::statistics::{DEFAULT_PRECISION, MAX_PRECISION};
use crate::error::{GlueError, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Gap
// ─────────────────────────────────────────────────────────────────────────────

/// Initial gap controls of the glue window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GapConfig {
    /// Initial gap length in samples. Default: `1`.
    pub length: usize,
    /// Upper bound of the gap slider. Default: `100`.
    pub max_length: usize,
    pub order: InterpolationOrder,
    pub join: JoinMode,
}

impl Default for GapConfig {
    fn default() -> Self {
        Self {
            length: 1,
            max_length: 100,
            order: InterpolationOrder::Linear,
            join: JoinMode::Inclusive,
        }
    }
}

impl GapConfig {
    pub fn gap_spec(&self) -> GapSpec {
        GapSpec::new(self.length.min(self.max_length), self.order).with_join(self.join)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Snapshots and report output
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Render PNG snapshots on save. When `false` only statistics are kept.
    pub enabled: bool,
    /// Where snapshots go. `None` = system temp dir.
    pub dir: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
            width: 640,
            height: 480,
        }
    }
}

impl SnapshotConfig {
    pub fn resolved_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    Json,
    Text,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub layout: ReportLayout,
    pub format: ReportFormat,
    /// `None` = system temp dir.
    pub output_dir: Option<PathBuf>,
    /// File stem of the written report.
    pub file_stem: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            layout: ReportLayout::default(),
            format: ReportFormat::Json,
            output_dir: None,
            file_stem: "Signal_Statistics_Report".to_string(),
        }
    }
}

impl ReportConfig {
    pub fn output_path(&self) -> PathBuf {
        let ext = match self.format {
            ReportFormat::Json => "json",
            ReportFormat::Text => "txt",
        };
        self.output_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
            .join(format!("{}.{ext}", self.file_stem))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Playback
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub speed: SpeedControl,
    /// Samples revealed per tick. Default: `5`.
    pub points_per_tick: usize,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: SpeedControl::default(),
            points_per_tick: 5,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// GlueConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration.
///
/// | Field        | Purpose |
/// |--------------|---------|
/// | `gap`        | Initial gap length, order and join mode |
/// | `precision`  | Decimals kept in statistics |
/// | `snapshot`   | PNG snapshot rendering |
/// | `report`     | Report layout and output |
/// | `playback`   | Viewer playback speed |
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlueConfig {
    /// Native window title.
    pub title: String,
    pub gap: GapConfig,
    /// Capped at `MAX_PRECISION` (15) on load.
    pub precision: u32,
    pub snapshot: SnapshotConfig,
    pub report: ReportConfig,
    pub playback: PlaybackConfig,
}

impl Default for GlueConfig {
    fn default() -> Self {
        Self {
            title: "Signal Glue".to_string(),
            gap: GapConfig::default(),
            precision: DEFAULT_PRECISION,
            snapshot: SnapshotConfig::default(),
            report: ReportConfig::default(),
            playback: PlaybackConfig::default(),
        }
    }
}

impl GlueConfig {
    pub fn from_yaml(txt: &str) -> Result<Self> {
        Ok(serde_yaml::from_str::<Self>(txt)?.clamped())
    }

    pub fn from_json(txt: &str) -> Result<Self> {
        Ok(serde_json::from_str::<Self>(txt)?.clamped())
    }

    fn clamped(mut self) -> Self {
        if self.precision > MAX_PRECISION {
            warn!("precision {} capped at {MAX_PRECISION}", self.precision);
            self.precision = MAX_PRECISION;
        }
        self
    }

    /// Load from a `.yaml`, `.yml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self> {
        let txt = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&txt),
            Some("json") => Self::from_json(&txt),
            _ => Err(GlueError::UnsupportedFormat(format!(
                "config {} (expected .yaml, .yml or .json)",
                path.display()
            ))),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
