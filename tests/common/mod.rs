//! Page fixtures shared by the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tablift::layout::{DocumentLayout, PageLayout, RawBlock, RawSpan};
use tablift::Rect;

/// A 10pt single-span block `[x0, x1]` wide with its top at `y0`.
pub fn text(t: &str, x0: f64, y0: f64, x1: f64) -> RawBlock {
    RawBlock::from_spans(vec![RawSpan::new(
        t,
        Rect::new(x0, y0, x1, y0 + 10.0),
        10.0,
        "Helvetica",
    )])
}

fn hline(x0: f64, x1: f64, y: f64) -> Rect {
    Rect::new(x0, y, x1, y)
}

fn vline(x: f64, y0: f64, y1: f64) -> Rect {
    Rect::new(x, y0, x, y1)
}

/// Outer frame plus three column rules around a 3x3 grid of text.
pub fn bordered_lines() -> Vec<Rect> {
    let mut lines = vec![hline(50.0, 350.0, 100.0), hline(50.0, 350.0, 160.0)];
    lines.extend([50.0, 150.0, 250.0, 350.0].map(|x| vline(x, 100.0, 160.0)));
    lines
}

pub fn bordered_blocks() -> Vec<RawBlock> {
    vec![
        text("Name", 66.0, 104.0, 96.0),
        text("Qty", 158.0, 104.0, 198.0),
        text("Price", 266.0, 104.0, 306.0),
        text("Apple", 56.0, 124.0, 126.0),
        text("12", 158.0, 124.0, 208.0),
        text("0.50", 256.0, 124.0, 271.0),
        text("Banana", 56.0, 144.0, 121.0),
        text("7", 158.0, 144.0, 203.0),
        text("0.25", 256.0, 144.0, 286.0),
    ]
}

pub fn borderless_blocks() -> Vec<RawBlock> {
    vec![
        text("Region", 92.0, 200.0, 122.0),
        text("Units", 180.0, 200.0, 200.0),
        text("Revenue", 289.0, 200.0, 329.0),
        text("North", 82.0, 216.0, 142.0),
        text("120", 180.0, 216.0, 230.0),
        text("4,200", 289.0, 216.0, 319.0),
        text("South", 82.0, 232.0, 152.0),
        text("95", 180.0, 232.0, 215.0),
        text("3,150", 289.0, 232.0, 324.0),
    ]
}

pub fn prose_blocks() -> Vec<RawBlock> {
    vec![
        text("Quarterly results were broadly in line", 40.0, 80.0, 300.0),
        text("with expectations", 120.0, 140.0, 200.0),
        text("although margins narrowed in the south", 250.0, 230.0, 520.0),
    ]
}

pub fn page(lines: Vec<Rect>, blocks: Vec<RawBlock>) -> PageLayout {
    PageLayout {
        width: 612.0,
        height: 792.0,
        lines,
        blocks,
    }
}

/// 3x3 grid framed by lines.
pub fn bordered_page() -> PageLayout {
    page(bordered_lines(), bordered_blocks())
}

/// Three rows of aligned text, no lines.
pub fn borderless_page() -> PageLayout {
    page(Vec::new(), borderless_blocks())
}

/// Three blocks sharing no column.
pub fn prose_page() -> PageLayout {
    page(Vec::new(), prose_blocks())
}

/// The bordered grid with the aligned text underneath it.
pub fn mixed_page() -> PageLayout {
    let mut blocks = bordered_blocks();
    blocks.extend(borderless_blocks());
    page(bordered_lines(), blocks)
}

pub fn document(pages: Vec<PageLayout>) -> DocumentLayout {
    DocumentLayout {
        source: None,
        pages,
    }
}

/// Serialize `layout` to `dir/name` and return the path.
pub fn write_layout(dir: &Path, name: &str, layout: &DocumentLayout) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_vec(layout).unwrap()).unwrap();
    path
}
