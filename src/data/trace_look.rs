//! TraceLook: colors and line styles for the glue plots and snapshots.

use eframe::egui;
use egui_plot::LineStyle;

use super::snapshot::SignalLabel;
use super::splice::BlockRole;

/// The visual presentation of a trace.
#[derive(Debug, Clone)]
pub struct TraceLook {
    pub color: egui::Color32,
    pub width: f32,
    pub style: LineStyle,
}

impl Default for TraceLook {
    fn default() -> Self {
        Self {
            color: egui::Color32::GRAY,
            width: 2.0,
            style: LineStyle::Solid,
        }
    }
}

pub const SIGNAL1_COLOR: egui::Color32 = egui::Color32::from_rgb(31, 119, 180);
pub const SIGNAL2_COLOR: egui::Color32 = egui::Color32::from_rgb(44, 160, 44);
pub const GAP_COLOR: egui::Color32 = egui::Color32::WHITE;
pub const GLUED_COLOR: egui::Color32 = egui::Color32::from_rgb(214, 39, 40);

impl TraceLook {
    pub fn with_color(color: egui::Color32) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Lead blue, gap white, trail green.
    pub fn for_block(role: BlockRole) -> Self {
        match role {
            BlockRole::Lead => Self::with_color(SIGNAL1_COLOR),
            BlockRole::Gap => Self::with_color(GAP_COLOR),
            BlockRole::Trail => Self::with_color(SIGNAL2_COLOR),
        }
    }

    pub fn for_label(label: SignalLabel) -> Self {
        match label {
            SignalLabel::Signal1 => Self::with_color(SIGNAL1_COLOR),
            SignalLabel::Signal2 => Self::with_color(SIGNAL2_COLOR),
            SignalLabel::Glued(_) => Self::with_color(GLUED_COLOR),
        }
    }

    /// Short color name used in snapshot file names.
    pub fn color_name(label: SignalLabel) -> String {
        match label {
            SignalLabel::Signal1 => "blue".to_string(),
            SignalLabel::Signal2 => "green".to_string(),
            SignalLabel::Glued(None) => "red".to_string(),
            SignalLabel::Glued(Some(n)) => format!("red{n}"),
        }
    }
}
