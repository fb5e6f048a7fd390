pub mod export;
pub mod interpolate;
pub mod loader;
pub mod merge;
pub mod playback;
pub mod polar;
pub mod report;
pub mod signal;
pub mod snapshot;
pub mod splice;
pub mod statistics;
pub mod trace_look;
