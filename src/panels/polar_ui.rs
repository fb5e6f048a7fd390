//! Circular page: one signal drawn as radii around a closed outline, revealed over time.

use std::path::{Path, PathBuf};

use egui::{Color32, Ui};
use egui_phosphor::regular as icons;
use egui_plot::{Line, Plot};
use log::{info, warn};

use super::panel_trait::{Panel, PanelState};
use crate::config::PlaybackConfig;
use crate::data::playback::{Playback, PlaybackState, SpeedControl};
use crate::data::polar::{load_circular, ring, CircularTrace};
use crate::error::Result;

const GUIDE_RINGS: usize = 4;

pub struct PolarPanel {
    pub state: PanelState,
    trace: CircularTrace,
    source: Option<PathBuf>,
    playback: Playback,
    points_per_tick: usize,
    speed: SpeedControl,
    last_tick: Option<f64>,
    pub color: Color32,
    status: Option<String>,
}

impl PolarPanel {
    /// Starts on the demo trace.
    pub fn new(playback: &PlaybackConfig) -> Self {
        let trace = CircularTrace::demo();
        Self {
            state: PanelState::new("Circular Signal", icons::COMPASS),
            playback: Playback::new(trace.outline_len(), playback.points_per_tick),
            trace,
            source: None,
            points_per_tick: playback.points_per_tick,
            speed: playback.speed.clone(),
            last_tick: None,
            color: Color32::WHITE,
            status: None,
        }
    }

    pub fn trace(&self) -> &CircularTrace {
        &self.trace
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Replace the trace and rewind. The outline is hidden until played.
    pub fn set_trace(&mut self, trace: CircularTrace, source: Option<PathBuf>) {
        self.playback = Playback::new(trace.outline_len(), self.points_per_tick);
        self.last_tick = None;
        if trace.outline_len() == 0 {
            self.status = Some("Need at least two samples to draw a circle.".to_string());
        } else {
            self.status = None;
        }
        self.trace = trace;
        self.source = source;
    }

    /// On failure the current trace stays.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        match load_circular(path) {
            Ok(trace) => {
                info!("circular page now shows {:?}", path);
                self.set_trace(trace, Some(path.to_path_buf()));
                Ok(())
            }
            Err(e) => {
                self.status = Some(format!("Could not load {}: {e}", path.display()));
                Err(e)
            }
        }
    }

    pub fn toggle_play(&mut self) {
        self.playback.toggle();
    }

    pub fn reset(&mut self) {
        self.playback.reset();
        self.last_tick = None;
    }

    pub fn cycle_speed(&mut self) {
        self.speed.cycle();
    }

    /// Tick when at least one speed-scaled interval has passed since the last tick.
    pub fn advance_to(&mut self, now: f64) -> bool {
        let interval = self.speed.interval().as_secs_f64();
        match self.last_tick {
            Some(last) if now - last < interval => false,
            _ => {
                self.last_tick = Some(now);
                self.playback.tick()
            }
        }
    }

    pub fn visible_points(&self) -> Vec<[f64; 2]> {
        self.trace.points(self.playback.visible())
    }

    fn pick_and_load(&mut self) {
        let picked = rfd::FileDialog::new().add_filter("CSV", &["csv"]).pick_file();
        if let Some(path) = picked {
            if let Err(e) = self.load(&path) {
                warn!("load failed: {e}");
            }
        }
    }

    fn render_controls(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            let state = self.playback.state();
            let playable = state != PlaybackState::Finished && !self.playback.is_empty();
            if ui
                .add_enabled(playable, egui::Button::new(state.button_text()))
                .clicked()
            {
                self.toggle_play();
            }
            if ui.button(format!("{} Reset", icons::ARROW_COUNTER_CLOCKWISE)).clicked() {
                self.reset();
            }
            if ui.button(self.speed.button_text()).clicked() {
                self.cycle_speed();
            }
            ui.separator();
            if ui.button(format!("{} Replace Signal", icons::FOLDER_OPEN)).clicked() {
                self.pick_and_load();
            }
            ui.label("Set Color");
            ui.color_edit_button_srgba(&mut self.color);
            if let Some(path) = &self.source {
                ui.label(path.display().to_string());
            }
        });
        if let Some(msg) = &self.status {
            ui.colored_label(Color32::LIGHT_RED, msg);
        }
    }

    fn render_plot(&self, ui: &mut Ui) {
        let r_max = self.trace.max_radius();
        let points = self.visible_points();
        Plot::new("polar_plot")
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                if r_max > 0.0 {
                    for k in 1..=GUIDE_RINGS {
                        let r = r_max * k as f64 / GUIDE_RINGS as f64;
                        plot_ui.line(
                            Line::new(format!("r = {r:.1}"), ring(r, 96))
                                .color(Color32::DARK_GRAY)
                                .width(1.0),
                        );
                    }
                }
                plot_ui.line(Line::new("signal", points).color(self.color).width(2.0));
            });
    }
}

impl Panel for PolarPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui) {
        let now = ui.ctx().input(|i| i.time);
        self.advance_to(now);
        if self.playback.state() == PlaybackState::Playing {
            ui.ctx().request_repaint_after(self.speed.interval());
        }
        self.render_controls(ui);
        ui.separator();
        self.render_plot(ui);
    }
}
