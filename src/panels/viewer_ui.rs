//! Viewer page: up to two loaded signals with playback, merge and the glue entry point.

use std::path::Path;

use egui::{Color32, Ui};
use egui_phosphor::regular as icons;
use egui_plot::{Legend, Line, Plot, VLine};
use log::{info, warn};

use super::panel_trait::{Panel, PanelState};
use crate::config::PlaybackConfig;
use crate::data::loader::{load_signal, LoadedSignal, SignalFormat};
use crate::data::merge::{merge, MergeState, MergedSignal};
use crate::data::playback::{Playback, PlaybackState, SignalMode, SpeedControl};
use crate::data::signal::Signal;
use crate::data::trace_look::{GLUED_COLOR, SIGNAL1_COLOR, SIGNAL2_COLOR};
use crate::error::Result;

/// One loaded signal and its reveal cursor.
#[derive(Debug, Clone)]
pub struct SignalSlot {
    pub loaded: LoadedSignal,
    pub playback: Playback,
}

impl SignalSlot {
    fn visible_points(&self) -> Vec<[f64; 2]> {
        let mut pts = self.loaded.points();
        pts.truncate(self.playback.visible());
        pts
    }
}

pub struct ViewerPanel {
    pub state: PanelState,
    slots: [Option<SignalSlot>; 2],
    mode: SignalMode,
    merge_state: MergeState,
    merged: Option<MergedSignal>,
    /// Play/pause acts on both signals at once.
    pub linked: bool,
    speed: SpeedControl,
    points_per_tick: usize,
    last_tick: Option<f64>,
    glue_requested: bool,
    status: Option<String>,
}

impl ViewerPanel {
    pub fn new(playback: &PlaybackConfig) -> Self {
        Self {
            state: PanelState::new("Signal Viewer", icons::WAVEFORM),
            slots: [None, None],
            mode: SignalMode::Idle,
            merge_state: MergeState::Separate,
            merged: None,
            linked: false,
            speed: playback.speed.clone(),
            points_per_tick: playback.points_per_tick,
            last_tick: None,
            glue_requested: false,
            status: None,
        }
    }

    pub fn slot(&self, index: usize) -> Option<&SignalSlot> {
        self.slots.get(index).and_then(|s| s.as_ref())
    }

    pub fn mode(&self) -> SignalMode {
        self.mode
    }

    pub fn merge_state(&self) -> MergeState {
        self.merge_state
    }

    pub fn merged(&self) -> Option<&MergedSignal> {
        self.merged.as_ref()
    }

    pub fn speed(&self) -> &SpeedControl {
        &self.speed
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Replace slot `index` (0 or 1). Returns the page to idle and resets that slot's playback.
    pub fn set_signal(&mut self, index: usize, loaded: LoadedSignal) {
        let Some(slot) = self.slots.get_mut(index) else {
            warn!("no signal slot {index}");
            return;
        };
        let playback = Playback::new(loaded.signal.len(), self.points_per_tick);
        *slot = Some(SignalSlot { loaded, playback });
        self.mode = SignalMode::Idle;
        if self.merge_state == MergeState::Merged {
            self.refresh_merge();
        }
    }

    pub fn load_into(&mut self, index: usize, path: &Path) -> Result<()> {
        match load_signal(path) {
            Ok(loaded) => {
                info!("loaded {} samples from {:?}", loaded.signal.len(), path);
                self.status = None;
                self.set_signal(index, loaded);
                Ok(())
            }
            Err(e) => {
                self.status = Some(format!("Could not load {}: {e}", path.display()));
                Err(e)
            }
        }
    }

    pub fn toggle_adding(&mut self) {
        self.mode = self.mode.toggle_adding();
    }

    pub fn toggle_changing(&mut self) {
        self.mode = self.mode.toggle_changing();
    }

    /// Play/pause slot `index`, or both slots when linked.
    pub fn toggle_play(&mut self, index: usize) {
        let linked = self.linked;
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if let Some(slot) = slot {
                if linked || i == index {
                    slot.playback.toggle();
                }
            }
        }
    }

    pub fn reset_playback(&mut self) {
        for slot in self.slots.iter_mut().flatten() {
            slot.playback.reset();
        }
        self.last_tick = None;
    }

    pub fn cycle_speed(&mut self) {
        self.speed.cycle();
    }

    /// Advance every playing slot by one tick. Returns whether anything moved.
    pub fn tick(&mut self) -> bool {
        let mut moved = false;
        for slot in self.slots.iter_mut().flatten() {
            if slot.playback.state() == PlaybackState::Playing {
                moved |= slot.playback.tick();
            }
        }
        moved
    }

    /// Tick when at least one speed-scaled interval has passed since the last tick.
    pub fn advance_to(&mut self, now: f64) -> bool {
        let interval = self.speed.interval().as_secs_f64();
        match self.last_tick {
            Some(last) if now - last < interval => false,
            _ => {
                self.last_tick = Some(now);
                self.tick()
            }
        }
    }

    pub fn is_playing(&self) -> bool {
        self.slots
            .iter()
            .flatten()
            .any(|s| s.playback.state() == PlaybackState::Playing)
    }

    /// Merge needs both slots. Returns the new state.
    pub fn toggle_merge(&mut self) -> MergeState {
        if self.merge_state == MergeState::Separate && !self.has_both() {
            self.status = Some("Load two signals to merge.".to_string());
            return self.merge_state;
        }
        self.merge_state = self.merge_state.toggled();
        self.refresh_merge();
        self.merge_state
    }

    fn refresh_merge(&mut self) {
        self.merged = match (self.merge_state, &self.slots) {
            (MergeState::Merged, [Some(a), Some(b)]) => Some(merge(&a.loaded, &b.loaded)),
            _ => None,
        };
    }

    fn has_both(&self) -> bool {
        self.slots.iter().all(|s| s.is_some())
    }

    /// Ask for the glue window; only honored with two signals loaded.
    pub fn request_glue(&mut self) -> bool {
        if self.has_both() {
            self.glue_requested = true;
        } else {
            self.status = Some("Load two signals to glue.".to_string());
        }
        self.glue_requested
    }

    /// The two signals to glue, once per request.
    pub fn take_glue_request(&mut self) -> Option<(Signal, Signal)> {
        if !std::mem::take(&mut self.glue_requested) {
            return None;
        }
        match &self.slots {
            [Some(a), Some(b)] => Some((a.loaded.signal.clone(), b.loaded.signal.clone())),
            _ => None,
        }
    }

    fn pick_and_load(&mut self, index: usize) {
        let picked = rfd::FileDialog::new()
            .add_filter("Signal files", &SignalFormat::EXTENSIONS)
            .pick_file();
        if let Some(path) = picked {
            if let Err(e) = self.load_into(index, &path) {
                warn!("load failed: {e}");
            }
        }
    }

    fn render_plots(&self, ui: &mut Ui) {
        if let Some(merged) = &self.merged {
            let boundary = merged.time.get(merged.boundary).copied();
            Plot::new("viewer_merged")
                .legend(Legend::default())
                .show(ui, |plot_ui| {
                    plot_ui.line(Line::new("Merged", merged.points()).color(GLUED_COLOR));
                    if let Some(x) = boundary {
                        plot_ui.vline(VLine::new("boundary", x).color(Color32::YELLOW));
                    }
                });
            return;
        }
        for (i, color) in [SIGNAL1_COLOR, SIGNAL2_COLOR].into_iter().enumerate() {
            let Some(slot) = self.slot(i) else {
                continue;
            };
            let name = format!("Signal {}", i + 1);
            ui.label(format!("{name}: {}", slot.loaded.path.display()));
            Plot::new(format!("viewer_signal{i}"))
                .height(220.0)
                .show(ui, |plot_ui| {
                    plot_ui.line(Line::new(name, slot.visible_points()).color(color).width(2.0));
                });
        }
    }

    fn render_controls(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            match self.mode {
                SignalMode::AddingSignal => {
                    let target = if self.slots[0].is_none() { 0 } else { 1 };
                    if ui.button(format!("{} Choose file", icons::FOLDER_OPEN)).clicked() {
                        self.pick_and_load(target);
                    }
                }
                SignalMode::ChangingSignal => {
                    for i in 0..2 {
                        if ui.button(format!("Replace Signal {}", i + 1)).clicked() {
                            self.pick_and_load(i);
                        }
                    }
                }
                SignalMode::Idle => {}
            }
            if matches!(self.mode, SignalMode::Idle | SignalMode::AddingSignal)
                && ui.button(self.mode.add_button_text()).clicked()
            {
                self.toggle_adding();
            }
            if matches!(self.mode, SignalMode::Idle | SignalMode::ChangingSignal)
                && ui.button(self.mode.change_button_text()).clicked()
            {
                self.toggle_changing();
            }
        });

        if !self.mode.shows_main_controls() {
            return;
        }

        ui.horizontal(|ui| {
            for i in 0..2 {
                let Some(state) = self.slot(i).map(|s| s.playback.state()) else {
                    continue;
                };
                let text = format!("{} {}", i + 1, state.button_text());
                if ui
                    .add_enabled(state != PlaybackState::Finished, egui::Button::new(text))
                    .clicked()
                {
                    self.toggle_play(i);
                }
            }
            if ui.button(format!("{} Reset", icons::ARROW_COUNTER_CLOCKWISE)).clicked() {
                self.reset_playback();
            }
            if ui.button(self.speed.button_text()).clicked() {
                self.cycle_speed();
            }
            ui.checkbox(&mut self.linked, "Link");
            ui.separator();
            if ui.button(self.merge_state.button_text()).clicked() {
                self.toggle_merge();
            }
            if ui.button(format!("{} Glue", icons::LINK)).clicked() {
                self.request_glue();
            }
        });

        if let Some(msg) = &self.status {
            ui.colored_label(Color32::LIGHT_RED, msg);
        }
    }
}

impl Panel for ViewerPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui) {
        let now = ui.ctx().input(|i| i.time);
        self.advance_to(now);
        if self.is_playing() {
            ui.ctx().request_repaint_after(self.speed.interval());
        }
        self.render_controls(ui);
        ui.separator();
        self.render_plots(ui);
    }
}
