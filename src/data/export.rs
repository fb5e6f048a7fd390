//! Writers: PNG snapshots, report documents, and composite CSV.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;

use super::report::ReportDocument;
use super::snapshot::{SignalLabel, SnapshotRef, SnapshotRenderer};
use super::splice::{BlockRole, CompositeSignal};
use super::trace_look::TraceLook;
use crate::error::{GlueError, Result};

/// Renders each signal as a line plot PNG in `dir`.
#[derive(Debug, Clone)]
pub struct PngSnapshotRenderer {
    pub dir: PathBuf,
    pub width: u32,
    pub height: u32,
    counter: u64,
}

impl PngSnapshotRenderer {
    pub fn new(dir: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            dir: dir.into(),
            width,
            height,
            counter: 0,
        }
    }

    fn next_path(&mut self, label: SignalLabel) -> PathBuf {
        self.counter += 1;
        let stamp = chrono::Local::now().format("%Y%m%d%H%M%S");
        let name = format!(
            "signal_{}_{stamp}_{}_snapshot.png",
            TraceLook::color_name(label),
            self.counter
        );
        self.dir.join(name)
    }
}

impl SnapshotRenderer for PngSnapshotRenderer {
    fn render(&mut self, label: SignalLabel, samples: &[f64]) -> Result<Option<SnapshotRef>> {
        let color = TraceLook::for_label(label).color;
        let pixmap = draw_line_plot(samples, self.width, self.height, [color.r(), color.g(), color.b()])?;
        let img = image::RgbaImage::from_raw(self.width, self.height, pixmap.take())
            .ok_or_else(|| GlueError::Render("pixel buffer size mismatch".to_string()))?;
        fs::create_dir_all(&self.dir)?;
        let path = self.next_path(label);
        img.save(&path)?;
        info!("saved {label} snapshot to {:?}", path);
        Ok(Some(SnapshotRef(path)))
    }
}

fn draw_line_plot(samples: &[f64], width: u32, height: u32, rgb: [u8; 3]) -> Result<tiny_skia::Pixmap> {
    use tiny_skia::{Color, Paint, PathBuilder, Pixmap, Stroke, Transform};

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| GlueError::Render(format!("invalid snapshot size {width}x{height}")))?;
    pixmap.fill(Color::WHITE);

    let pad = 0.06 * width.min(height) as f32;
    let (w, h) = (width as f32 - 2.0 * pad, height as f32 - 2.0 * pad);

    let mut frame = Paint::default();
    frame.set_color_rgba8(200, 200, 200, 255);
    if let Some(rect) = tiny_skia::Rect::from_xywh(pad, pad, w, h) {
        let path = PathBuilder::from_rect(rect);
        pixmap.stroke_path(&path, &frame, &Stroke::default(), Transform::identity(), None);
    }

    let finite: Vec<f64> = samples.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return Ok(pixmap);
    }
    let lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = if hi > lo { hi - lo } else { 1.0 };
    let n = samples.len();
    let x_at = |i: usize| -> f32 {
        if n > 1 {
            pad + w * i as f32 / (n - 1) as f32
        } else {
            pad
        }
    };
    let y_at = |v: f64| -> f32 { pad + h * (1.0 - ((v - lo) / span) as f32) };

    let mut pb = PathBuilder::new();
    let mut pen_down = false;
    for (i, &v) in samples.iter().enumerate() {
        if !v.is_finite() {
            pen_down = false;
            continue;
        }
        if pen_down {
            pb.line_to(x_at(i), y_at(v));
        } else {
            pb.move_to(x_at(i), y_at(v));
            pen_down = true;
        }
    }
    if n == 1 {
        pb.line_to(pad + w, y_at(samples[0]));
    }

    if let Some(path) = pb.finish() {
        let mut paint = Paint::default();
        paint.set_color_rgba8(rgb[0], rgb[1], rgb[2], 255);
        paint.anti_alias = true;
        let stroke = Stroke {
            width: 2.0,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
    Ok(pixmap)
}

/// Save a compiled report as pretty JSON.
pub fn write_report_json<P: AsRef<Path>>(doc: &ReportDocument, path: P) -> Result<()> {
    let txt = serde_json::to_string_pretty(doc)?;
    fs::write(path.as_ref(), txt)?;
    info!("report written to {:?}", path.as_ref());
    Ok(())
}

/// Plain-text rendering of a report, one section per block.
pub fn report_to_text(doc: &ReportDocument) -> String {
    let mut out = String::new();
    out.push_str(&doc.title);
    out.push('\n');
    out.push_str(&doc.subtitle);
    out.push('\n');
    for (i, page) in doc.pages.iter().enumerate() {
        out.push_str(&format!("\n=== Page {} ===\n", i + 1));
        for block in &page.blocks {
            out.push_str(&format!("\n[{}]\n", block.label));
            for line in &block.lines {
                out.push_str("  ");
                out.push_str(line);
                out.push('\n');
            }
            if let Some(img) = &block.image {
                out.push_str(&format!("  snapshot: {}\n", img.snapshot.path().display()));
            }
        }
    }
    out
}

pub fn write_report_text<P: AsRef<Path>>(doc: &ReportDocument, path: P) -> Result<()> {
    fs::write(path.as_ref(), report_to_text(doc))?;
    info!("report written to {:?}", path.as_ref());
    Ok(())
}

/// `index,role,value` rows for every composite sample.
pub fn write_composite_csv<W: Write>(w: W, composite: &CompositeSignal) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record(["index", "role", "value"])?;
    for role in BlockRole::ALL {
        let range = composite.block(role).range.clone();
        for (i, v) in range.clone().zip(&composite.samples()[range]) {
            wtr.write_record([i.to_string(), role.name().to_string(), v.to_string()])?;
        }
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_composite_csv_path<P: AsRef<Path>>(path: P, composite: &CompositeSignal) -> Result<()> {
    let f = fs::File::create(path.as_ref())?;
    write_composite_csv(f, composite)
}
