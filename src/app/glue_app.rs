use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use eframe::egui;
use log::info;

use crate::config::GlueConfig;
use crate::data::export::PngSnapshotRenderer;
use crate::data::loader::LoadedSignal;
use crate::data::polar::CircularTrace;
use crate::data::signal::Signal;
use crate::data::snapshot::{NoSnapshots, SnapshotRenderer, SnapshotStore};
use crate::panels::panel_trait::Panel;
use crate::panels::{GluePanel, PolarPanel, ViewerPanel};

/// Page shown in the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Viewer,
    Circular,
}

/// Standalone eframe app: the viewer and circular pages plus at most one glue window.
pub struct GlueApp {
    pub config: GlueConfig,
    store: Arc<SnapshotStore>,
    pub page: Page,
    pub viewer: ViewerPanel,
    pub polar: PolarPanel,
    glue: Option<GluePanel>,
    /// Set by the glue window's close callback, consumed on the next frame.
    glue_closed: Rc<Cell<bool>>,
}

impl GlueApp {
    pub fn new(config: GlueConfig) -> Self {
        let store = Arc::new(SnapshotStore::new(config.precision));
        Self::with_store(config, store)
    }

    /// Share an existing store, e.g. one that outlives the window.
    pub fn with_store(config: GlueConfig, store: Arc<SnapshotStore>) -> Self {
        Self {
            page: Page::Viewer,
            viewer: ViewerPanel::new(&config.playback),
            polar: PolarPanel::new(&config.playback),
            config,
            store,
            glue: None,
            glue_closed: Rc::new(Cell::new(false)),
        }
    }

    /// Fill the viewer slots in order; extra signals are ignored.
    pub fn load_signals(&mut self, signals: impl IntoIterator<Item = LoadedSignal>) {
        for (i, loaded) in signals.into_iter().take(2).enumerate() {
            self.viewer.set_signal(i, loaded);
        }
    }

    /// Show `trace` on the circular page and switch to it.
    pub fn show_circular(&mut self, trace: CircularTrace, source: Option<PathBuf>) {
        self.polar.set_trace(trace, source);
        self.page = Page::Circular;
    }

    pub fn store(&self) -> &Arc<SnapshotStore> {
        &self.store
    }

    pub fn glue(&self) -> Option<&GluePanel> {
        self.glue.as_ref()
    }

    pub fn glue_mut(&mut self) -> Option<&mut GluePanel> {
        self.glue.as_mut()
    }

    fn renderer(&self) -> Box<dyn SnapshotRenderer> {
        let snap = &self.config.snapshot;
        if snap.enabled {
            Box::new(PngSnapshotRenderer::new(snap.resolved_dir(), snap.width, snap.height))
        } else {
            Box::new(NoSnapshots)
        }
    }

    /// Open the glue window on two signals, replacing any open one.
    pub fn open_glue(&mut self, signal1: Signal, signal2: Signal) {
        let closed = self.glue_closed.clone();
        closed.set(false);
        info!(
            "opening glue window ({} and {} samples)",
            signal1.len(),
            signal2.len()
        );
        self.glue = Some(GluePanel::new(
            signal1,
            signal2,
            &self.config,
            self.store.clone(),
            self.renderer(),
            move || closed.set(true),
        ));
    }

    /// Open the glue window on whatever the viewer holds. Returns whether it opened.
    pub fn open_glue_from_viewer(&mut self) -> bool {
        self.viewer.request_glue();
        self.poll_glue_request()
    }

    fn poll_glue_request(&mut self) -> bool {
        match self.viewer.take_glue_request() {
            Some((a, b)) => {
                self.open_glue(a, b);
                true
            }
            None => false,
        }
    }

    /// Drop the glue window once its close callback fired.
    pub fn reap_closed_glue(&mut self) {
        if self.glue_closed.replace(false) {
            info!("glue window closed");
            self.glue = None;
        }
    }
}

impl eframe::App for GlueApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.reap_closed_glue();
        egui::TopBottomPanel::top("pages").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for (page, state) in [(Page::Viewer, self.viewer.state), (Page::Circular, self.polar.state)] {
                    ui.selectable_value(&mut self.page, page, format!("{} {}", state.icon, state.title));
                }
            });
        });
        egui::CentralPanel::default().show(ctx, |ui| match self.page {
            Page::Viewer => self.viewer.render_panel(ui),
            Page::Circular => self.polar.render_panel(ui),
        });
        self.poll_glue_request();
        if let Some(glue) = &mut self.glue {
            glue.show(ctx);
        }
    }
}
