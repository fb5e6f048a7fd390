//! Incremental reveal of a loaded signal, and the viewer page's mode toggles.
//!
//! Each state enum owns its button text so the UI never infers state from labels.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Play/pause state of one signal's playback cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing,
    Finished,
}

impl PlaybackState {
    pub fn button_text(self) -> &'static str {
        match self {
            PlaybackState::Paused => "Play ▶",
            PlaybackState::Playing => "Pause ⏸",
            PlaybackState::Finished => "Finished",
        }
    }
}

/// How many samples of a signal are currently drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playback {
    len: usize,
    cursor: usize,
    points_per_tick: usize,
    state: PlaybackState,
}

impl Playback {
    pub fn new(len: usize, points_per_tick: usize) -> Self {
        Self {
            len,
            cursor: 0,
            points_per_tick: points_per_tick.max(1),
            state: PlaybackState::Paused,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Number of leading samples to draw.
    pub fn visible(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn play(&mut self) {
        self.state = if self.cursor >= self.len {
            PlaybackState::Finished
        } else {
            PlaybackState::Playing
        };
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Play when paused, pause when playing. A finished cursor stays finished.
    pub fn toggle(&mut self) {
        match self.state {
            PlaybackState::Paused => self.play(),
            PlaybackState::Playing => self.pause(),
            PlaybackState::Finished => {}
        }
    }

    /// Advance one timer tick. Returns `true` if the visible range changed.
    pub fn tick(&mut self) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        let before = self.cursor;
        self.cursor = (self.cursor + self.points_per_tick).min(self.len);
        if self.cursor >= self.len {
            self.state = PlaybackState::Finished;
        }
        self.cursor != before
    }

    /// Back to the start, paused.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.state = PlaybackState::Paused;
    }
}

/// Speed multipliers cycled by the speed button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedControl {
    pub speeds: Vec<f64>,
    pub index: usize,
    /// Tick interval at 1x.
    pub base_interval_ms: u64,
}

impl Default for SpeedControl {
    fn default() -> Self {
        Self {
            speeds: vec![0.5, 1.0, 2.0, 4.0, 16.0, 32.0],
            index: 1,
            base_interval_ms: 100,
        }
    }
}

impl SpeedControl {
    pub fn speed(&self) -> f64 {
        self.speeds.get(self.index).copied().unwrap_or(1.0)
    }

    pub fn cycle(&mut self) {
        if !self.speeds.is_empty() {
            self.index = (self.index + 1) % self.speeds.len();
        }
    }

    /// Time between ticks at the current speed.
    pub fn interval(&self) -> Duration {
        let speed = self.speed();
        let speed = if speed > 0.0 { speed } else { 1.0 };
        Duration::from_millis((self.base_interval_ms as f64 / speed) as u64)
    }

    pub fn button_text(&self) -> String {
        format!("{}X", self.speed())
    }
}

/// Whether the add/change controls of the viewer page are open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignalMode {
    #[default]
    Idle,
    AddingSignal,
    ChangingSignal,
}

impl SignalMode {
    /// Toggle add mode. Only reachable from idle; cancelling returns to idle.
    pub fn toggle_adding(self) -> Self {
        match self {
            SignalMode::Idle => SignalMode::AddingSignal,
            SignalMode::AddingSignal => SignalMode::Idle,
            other => other,
        }
    }

    pub fn toggle_changing(self) -> Self {
        match self {
            SignalMode::Idle => SignalMode::ChangingSignal,
            SignalMode::ChangingSignal => SignalMode::Idle,
            other => other,
        }
    }

    pub fn add_button_text(self) -> &'static str {
        match self {
            SignalMode::AddingSignal => "Cancel",
            _ => "Add Signal",
        }
    }

    pub fn change_button_text(self) -> &'static str {
        match self {
            SignalMode::ChangingSignal => "Cancel",
            _ => "Change Signal",
        }
    }

    /// Play, merge, glue and speed controls are hidden while picking a target graph.
    pub fn shows_main_controls(self) -> bool {
        self == SignalMode::Idle
    }
}
