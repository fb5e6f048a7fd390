//! Signal Glue crate root: re-exports and module wiring.
//!
//! A desktop viewer for time-series signals with a splice ("glue") window:
//! - `data`: signals, interpolation, splicing, statistics, the snapshot store
//!   and the report compiler, plus file loaders and writers
//! - `config`: serde-backed settings loaded from YAML or JSON
//! - `panels`: the viewer and circular pages and the glue window (egui)
//! - `app`: eframe shell and the native entry point

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod panels;

pub use app::{run_glue, GlueApp, Page, Startup};
pub use config::GlueConfig;
pub use data::interpolate::{interpolate, InterpolationOrder};
pub use data::report::{ReportCompiler, ReportDocument};
pub use data::signal::{Region, Signal};
pub use data::snapshot::{SnapshotRecord, SnapshotRenderer, SnapshotStore};
pub use data::splice::{splice, CompositeSignal, GapSpec, JoinMode, Splicer};
pub use data::statistics::Statistics;
pub use error::{GlueError, Result};
