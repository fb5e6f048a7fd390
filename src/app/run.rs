//! Native entry point.

use std::path::PathBuf;

use eframe::egui;

use super::GlueApp;
use crate::config::GlueConfig;
use crate::data::loader::LoadedSignal;
use crate::data::polar::CircularTrace;

/// What to show when the window opens.
#[derive(Debug, Default)]
pub struct Startup {
    pub signals: Vec<LoadedSignal>,
    /// Open the glue window right away. Needs two signals.
    pub open_glue: bool,
    /// Start on the circular page with this trace and its source file.
    pub circular: Option<(CircularTrace, PathBuf)>,
}

/// Open the viewer in a native window. Blocks until the window is closed.
pub fn run_glue(config: GlueConfig, startup: Startup) -> eframe::Result<()> {
    let title = config.title.clone();
    let mut app = GlueApp::new(config);
    let Startup {
        signals,
        open_glue,
        circular,
    } = startup;
    app.load_signals(signals);
    if let Some((trace, path)) = circular {
        app.show_circular(trace, Some(path));
    }
    if open_glue && !app.open_glue_from_viewer() {
        log::warn!("--glue needs two signals, starting on the viewer");
    }

    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(egui::vec2(1400.0, 900.0)),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}
