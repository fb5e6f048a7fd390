//! Glue window: pick a region on each signal, tune the gap, save and report.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use egui::{Color32, Ui};
use egui_phosphor::regular as icons;
use egui_plot::{Legend, Line, Plot, VLine};
use log::{debug, error, info, warn};

use super::panel_trait::{Panel, PanelState};
use crate::config::{GlueConfig, ReportConfig, ReportFormat};
use crate::data::export;
use crate::data::interpolate::InterpolationOrder;
use crate::data::report::ReportCompiler;
use crate::data::signal::{Region, Signal};
use crate::data::snapshot::{SaveOutcome, SnapshotRenderer, SnapshotStore};
use crate::data::splice::{BlockRole, Splicer};
use crate::data::trace_look::{TraceLook, SIGNAL1_COLOR, SIGNAL2_COLOR};
use crate::error::{Result, Side};

/// Last user-facing message of the glue window.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Info(String),
    Error(String),
}

pub struct GluePanel {
    pub state: PanelState,
    splicer: Splicer,
    max_gap: usize,
    store: Arc<SnapshotStore>,
    renderer: Box<dyn SnapshotRenderer>,
    compiler: ReportCompiler,
    report: ReportConfig,
    status: Option<Status>,
    on_close: Option<Box<dyn FnOnce()>>,
    open: bool,
    /// Plot x where a drag selection started, per source plot.
    drag_anchor: [Option<f64>; 2],
}

impl GluePanel {
    /// `on_close` runs once, when the window is closed by Back or its close button.
    pub fn new(
        signal1: Signal,
        signal2: Signal,
        config: &GlueConfig,
        store: Arc<SnapshotStore>,
        renderer: Box<dyn SnapshotRenderer>,
        on_close: impl FnOnce() + 'static,
    ) -> Self {
        let mut panel = Self {
            state: PanelState::new("Glue Signal Portions", icons::LINK),
            splicer: Splicer::new(signal1, signal2, config.gap.gap_spec()),
            max_gap: config.gap.max_length,
            store,
            renderer,
            compiler: ReportCompiler::new(config.report.layout.clone()),
            report: config.report.clone(),
            status: None,
            on_close: Some(Box::new(on_close)),
            open: true,
            drag_anchor: [None, None],
        };
        panel.resplice();
        panel
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn splicer(&self) -> &Splicer {
        &self.splicer
    }

    pub fn set_regions(&mut self, region1: Region, region2: Region) {
        self.splicer.region1 = region1;
        self.splicer.region2 = region2;
        self.resplice();
    }

    fn set_region(&mut self, side: Side, region: Region) {
        match side {
            Side::First => self.splicer.region1 = region,
            Side::Second => self.splicer.region2 = region,
        }
        self.resplice();
    }

    /// Select the span between two plot x coordinates on one source signal.
    pub fn select_from_plot(&mut self, side: Side, a: f64, b: f64) -> Region {
        let len = match side {
            Side::First => self.splicer.signal1.len(),
            Side::Second => self.splicer.signal2.len(),
        };
        let region = Region::from_plot_bounds(a, b, len);
        self.set_region(side, region);
        region
    }

    /// Range offered by the gap slider.
    pub fn gap_range(&self) -> RangeInclusive<usize> {
        0..=self.max_gap
    }

    pub fn set_gap_length(&mut self, length: usize) {
        self.splicer.gap.length = length.min(self.max_gap);
        self.resplice();
    }

    pub fn set_order(&mut self, order: InterpolationOrder) {
        self.splicer.gap.order = order;
        self.resplice();
    }

    fn resplice(&mut self) {
        match self.splicer.resplice() {
            Ok(c) => {
                debug!("glued signal has {} samples", c.len());
                if matches!(self.status, Some(Status::Error(_))) {
                    self.status = None;
                }
            }
            Err(e) => {
                self.status = Some(Status::Error(format!("Error during glue operation: {e}")));
            }
        }
    }

    /// Queue both sources and the current glued signal for the report.
    pub fn save_data(&mut self) -> Result<SaveOutcome> {
        let composites: Vec<_> = self.splicer.current().cloned().into_iter().collect();
        let outcome = self.store.save(
            &self.splicer.signal1,
            &self.splicer.signal2,
            &composites,
            self.renderer.as_mut(),
        )?;
        self.status = Some(match outcome {
            SaveOutcome::Saved(_) => Status::Info("Data saved successfully.".to_string()),
            SaveOutcome::Duplicate => {
                Status::Info("Signal 1 and Signal 2 already saved, not saving.".to_string())
            }
        });
        Ok(outcome)
    }

    /// Write the current glued signal as `index,role,value` rows.
    /// Returns `false` when there is nothing to export.
    pub fn export_csv(&mut self, path: &Path) -> Result<bool> {
        let Some(composite) = self.splicer.current() else {
            self.status = Some(Status::Error("No glued signal to export.".to_string()));
            return Ok(false);
        };
        export::write_composite_csv_path(path, composite)?;
        info!("exported {} glued samples to {:?}", composite.len(), path);
        self.status = Some(Status::Info(format!("Glued signal exported to {}", path.display())));
        Ok(true)
    }

    /// Drain everything saved so far into a report file.
    pub fn generate_report(&mut self) -> Result<PathBuf> {
        let doc = self.compiler.compile_from(&self.store);
        let path = self.report.output_path();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        match self.report.format {
            ReportFormat::Json => export::write_report_json(&doc, &path)?,
            ReportFormat::Text => export::write_report_text(&doc, &path)?,
        }
        info!("report with {} blocks at {:?}", doc.block_count(), path);
        self.status = Some(Status::Info(format!("Report generated at {}", path.display())));
        Ok(path)
    }

    /// Close the window and notify the owner.
    pub fn close(&mut self) {
        self.open = false;
        if let Some(cb) = self.on_close.take() {
            cb();
        }
    }

    /// Show as a floating window. Handles the title-bar close button.
    pub fn show(&mut self, ctx: &egui::Context) {
        let mut open = self.open;
        egui::Window::new(format!("{} {}", self.state.icon, self.state.title))
            .open(&mut open)
            .default_size([1280.0, 700.0])
            .show(ctx, |ui| self.render_panel(ui));
        if !open && self.open {
            self.close();
        }
    }

    /// Start/End sliders over the source plot. Dragging on the plot selects a span too.
    fn render_source_plot(&mut self, ui: &mut Ui, side: Side) {
        let (id, signal, mut region, color, slot) = match side {
            Side::First => ("glue_signal1", self.splicer.signal1.clone(), self.splicer.region1, SIGNAL1_COLOR, 0),
            Side::Second => ("glue_signal2", self.splicer.signal2.clone(), self.splicer.region2, SIGNAL2_COLOR, 1),
        };
        let len = signal.len();
        let mut changed = false;
        ui.horizontal(|ui| {
            ui.label("Start:");
            changed |= ui.add(egui::Slider::new(&mut region.start, 0..=len)).changed();
            ui.label("End:");
            changed |= ui.add(egui::Slider::new(&mut region.end, 0..=len)).changed();
        });
        if changed {
            self.set_region(side, region);
        }

        let points = signal.indexed_points();
        let (start, end) = (region.start as f64, region.end as f64);
        let plot_response = Plot::new(id)
            .height(150.0)
            .allow_scroll(false)
            .allow_drag(false)
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(id.to_string(), points).color(color).width(2.0));
                plot_ui.vline(VLine::new("start", start).color(Color32::YELLOW));
                plot_ui.vline(VLine::new("end", end).color(Color32::YELLOW));
            });

        let response = &plot_response.response;
        let pointer_x = response
            .interact_pointer_pos()
            .map(|pos| plot_response.transform.value_from_position(pos).x);
        if response.drag_started() {
            self.drag_anchor[slot] = pointer_x;
        }
        if response.dragged() {
            if let (Some(a), Some(b)) = (self.drag_anchor[slot], pointer_x) {
                let selected = Region::from_plot_bounds(a, b, len);
                if selected != region {
                    self.select_from_plot(side, a, b);
                }
            }
        }
        if response.drag_stopped() {
            self.drag_anchor[slot] = None;
        }
    }

    fn render_glued_plot(&self, ui: &mut Ui) {
        let Some(composite) = self.splicer.current() else {
            ui.label("No glued signal: select a non-empty region on both signals.");
            return;
        };
        Plot::new("glued_plot")
            .height(200.0)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                for role in BlockRole::ALL {
                    let look = TraceLook::for_block(role);
                    plot_ui.line(
                        Line::new(role.name(), composite.block_points(role))
                            .color(look.color)
                            .width(look.width)
                            .style(look.style),
                    );
                }
            });
    }

    fn render_controls(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label("Interpolation Order:");
            let mut order = self.splicer.gap.order;
            egui::ComboBox::from_id_salt("glue_order")
                .selected_text(order.to_string())
                .show_ui(ui, |ui| {
                    for o in InterpolationOrder::ALL {
                        ui.selectable_value(&mut order, o, o.to_string());
                    }
                });
            if order != self.splicer.gap.order {
                self.set_order(order);
            }

            ui.separator();
            ui.label("Gap:");
            let mut gap = self.splicer.gap.length;
            if ui.add(egui::Slider::new(&mut gap, self.gap_range())).changed() {
                self.set_gap_length(gap);
            }
            ui.label(format!("Gap: {}", self.splicer.gap.length));
        });

        ui.horizontal(|ui| {
            if ui.button(format!("{} Back", icons::ARROW_LEFT)).clicked() {
                self.close();
            }
            if ui.button(format!("{} Save Data", icons::FLOPPY_DISK)).clicked() {
                if let Err(e) = self.save_data() {
                    error!("Error saving data: {e}");
                    self.status = Some(Status::Error(format!("Error saving data: {e}")));
                }
            }
            if ui.button(format!("{} Get Report", icons::FILE_TEXT)).clicked() {
                if let Err(e) = self.generate_report() {
                    error!("Error generating report: {e}");
                    self.status = Some(Status::Error(format!("Error generating report: {e}")));
                }
            }
            let can_export = self.splicer.current().is_some();
            if ui
                .add_enabled(can_export, egui::Button::new(format!("{} Export CSV", icons::EXPORT)))
                .clicked()
            {
                if let Some(path) = rfd::FileDialog::new()
                    .set_file_name("glued_signal.csv")
                    .add_filter("CSV", &["csv"])
                    .save_file()
                {
                    if let Err(e) = self.export_csv(&path) {
                        warn!("Failed to export glued signal: {e}");
                        self.status = Some(Status::Error(format!("Error exporting CSV: {e}")));
                    }
                }
            }
            ui.label(format!("{} queued", self.store.len()));
        });

        match &self.status {
            Some(Status::Info(msg)) => {
                ui.label(msg);
            }
            Some(Status::Error(msg)) => {
                ui.colored_label(Color32::LIGHT_RED, msg);
            }
            None => {}
        }
    }
}

impl Panel for GluePanel {
    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui) {
        ui.strong("Signal 1 Portion");
        self.render_source_plot(ui, Side::First);
        ui.strong("Signal 2 Portion");
        self.render_source_plot(ui, Side::Second);

        ui.separator();
        ui.strong("Glued Signal");
        self.render_glued_plot(ui);
        ui.separator();
        self.render_controls(ui);
    }
}
