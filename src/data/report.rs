//! Report content model: drained snapshot records laid out on pages.
//!
//! Coordinates are PDF-style points with the origin at the bottom-left of the
//! page. Turning a [`ReportDocument`] into a file is left to a writer (see
//! [`crate::data::export`]).

use log::debug;
use serde::{Deserialize, Serialize};

use super::snapshot::{SnapshotRecord, SnapshotRef, SnapshotStore};

const INCH: f32 = 72.0;

/// Page geometry and block placement, in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLayout {
    pub title: String,
    pub subtitle: String,
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    /// Distance from the top edge to the first block on page one (leaves room for the title).
    pub first_page_offset: f32,
    /// Vertical distance between consecutive blocks.
    pub block_pitch: f32,
    /// No block starts below this cursor height; a new page is opened instead.
    pub min_cursor: f32,
    pub frame_height: f32,
    /// Gap between the cursor and the frame's top edge.
    pub frame_top_gap: f32,
    pub text_inset: f32,
    pub text_top: f32,
    pub line_spacing: f32,
    pub image_size: f32,
    /// Distance from the right margin to the image's left edge.
    pub image_offset: f32,
    pub image_top_gap: f32,
}

impl Default for ReportLayout {
    fn default() -> Self {
        // US letter.
        Self {
            title: "Signal Statistics Report".to_string(),
            subtitle: "Generated by Signal Glue".to_string(),
            page_width: 8.5 * INCH,
            page_height: 11.0 * INCH,
            margin: 0.7 * INCH,
            first_page_offset: 1.8 * INCH,
            block_pitch: 5.0 * INCH,
            min_cursor: 5.0 * INCH,
            frame_height: 4.4 * INCH,
            frame_top_gap: 0.1 * INCH,
            text_inset: 0.2 * INCH,
            text_top: 0.5 * INCH,
            line_spacing: 0.2 * INCH,
            image_size: 3.8 * INCH,
            image_offset: 4.0 * INCH,
            image_top_gap: 0.2 * INCH,
        }
    }
}

/// Axis-aligned rectangle; `y` is the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePlacement {
    pub snapshot: SnapshotRef,
    pub rect: Rect,
}

/// One bordered section: label, statistics lines and an optional snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportBlock {
    pub label: String,
    pub lines: Vec<String>,
    pub frame: Rect,
    /// Baseline of the label; each following line sits `line_spacing` lower.
    pub text_origin: [f32; 2],
    pub line_spacing: f32,
    pub image: Option<ImagePlacement>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportPage {
    pub blocks: Vec<ReportBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub title: String,
    pub subtitle: String,
    pub page_size: [f32; 2],
    pub pages: Vec<ReportPage>,
}

impl ReportDocument {
    pub fn blocks(&self) -> impl Iterator<Item = &ReportBlock> {
        self.pages.iter().flat_map(|p| p.blocks.iter())
    }

    pub fn block_count(&self) -> usize {
        self.pages.iter().map(|p| p.blocks.len()).sum()
    }
}

/// Lays out drained records as a paginated [`ReportDocument`].
#[derive(Debug, Clone, Default)]
pub struct ReportCompiler {
    pub layout: ReportLayout,
}

impl ReportCompiler {
    pub fn new(layout: ReportLayout) -> Self {
        Self { layout }
    }

    /// Drain `store` and lay out everything that was queued.
    pub fn compile_from(&self, store: &SnapshotStore) -> ReportDocument {
        let records = store.drain();
        self.compile(&records)
    }

    /// One block per labelled entry, in record order then label order.
    pub fn compile(&self, records: &[SnapshotRecord]) -> ReportDocument {
        let l = &self.layout;
        let mut pages = vec![ReportPage::default()];
        let mut cursor = l.page_height - l.first_page_offset;

        for entry in records.iter().flat_map(|r| r.entries()) {
            let page_has_blocks = pages.last().is_some_and(|p| !p.blocks.is_empty());
            if cursor < l.min_cursor && page_has_blocks {
                pages.push(ReportPage::default());
                cursor = l.page_height - l.margin;
            }

            let frame = Rect {
                x: l.margin,
                y: cursor - l.frame_top_gap - l.frame_height,
                width: l.page_width - 2.0 * l.margin,
                height: l.frame_height,
            };
            let image = entry.snapshot.as_ref().map(|snapshot| ImagePlacement {
                snapshot: snapshot.clone(),
                rect: Rect {
                    x: l.page_width - l.margin - l.image_offset,
                    y: cursor - l.image_top_gap - l.image_size,
                    width: l.image_size,
                    height: l.image_size,
                },
            });
            let block = ReportBlock {
                label: entry.label.to_string(),
                lines: entry.statistics.lines(),
                frame,
                text_origin: [l.margin + l.text_inset, cursor - l.text_top],
                line_spacing: l.line_spacing,
                image,
            };
            if let Some(page) = pages.last_mut() {
                page.blocks.push(block);
            }
            cursor -= l.block_pitch;
        }

        let doc = ReportDocument {
            title: l.title.clone(),
            subtitle: l.subtitle.clone(),
            page_size: [l.page_width, l.page_height],
            pages,
        };
        debug!(
            "compiled report: {} blocks on {} pages",
            doc.block_count(),
            doc.pages.len()
        );
        doc
    }
}
