//! Application shell: the viewer and circular pages, the glue window and the native entry point.
//!
//! | Sub-module   | Responsibility |
//! | ------------ | -------------- |
//! | [`glue_app`] | [`GlueApp`] state and per-frame update |
//! | [`run`]      | [`run_glue()`] native entry point and its [`Startup`] |

mod glue_app;
mod run;

pub use glue_app::{GlueApp, Page};
pub use run::{run_glue, Startup};
