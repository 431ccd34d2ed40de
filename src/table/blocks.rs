//! Text block assembly from raw parser spans.

use std::collections::BTreeSet;

use tracing::warn;

use super::{LineSet, TextBlock};
use crate::config::AdjacencyPolicy;
use crate::geometry::Rect;
use crate::layout::{RawBlock, RawSpan};

/// Merges each parser block's spans into one [`TextBlock`].
#[derive(Debug, Clone, Copy)]
pub struct TextBlockAssembler {
    pub line_margin: f64,
    pub adjacency: AdjacencyPolicy,
}

impl TextBlockAssembler {
    pub fn new(line_margin: f64, adjacency: AdjacencyPolicy) -> Self {
        Self {
            line_margin,
            adjacency,
        }
    }

    /// Assemble the blocks of page `page`.
    ///
    /// Blocks without renderable text are skipped. `block_no` keeps the
    /// parser's block index, so skipped blocks leave gaps.
    pub fn assemble(&self, page: usize, raw_blocks: &[RawBlock], lines: &LineSet) -> Vec<TextBlock> {
        raw_blocks
            .iter()
            .enumerate()
            .filter_map(|(block_no, raw)| self.assemble_block(page, block_no, raw, lines))
            .collect()
    }

    fn assemble_block(
        &self,
        page: usize,
        block_no: usize,
        raw: &RawBlock,
        lines: &LineSet,
    ) -> Option<TextBlock> {
        let mut texts: Vec<&str> = Vec::new();
        let mut bbox: Option<Rect> = None;
        let mut size_sum = 0.0;
        let mut font_names = BTreeSet::new();

        for span in raw.spans() {
            let text = span.text.trim();
            if text.is_empty() {
                continue;
            }
            if !is_measurable(span) {
                warn!(
                    "Page {}: dropping unmeasurable span {:?} in block {block_no}",
                    page + 1,
                    text
                );
                continue;
            }
            let span_box = span.bbox.normalized();
            bbox = Some(bbox.map_or(span_box, |b| b.union(&span_box)));
            texts.push(text);
            size_sum += span.size;
            if !span.font.is_empty() {
                font_names.insert(span.font.clone());
            }
        }

        let bbox = bbox?;
        #[allow(clippy::cast_precision_loss)]
        let font_size = size_sum / texts.len() as f64;

        Some(TextBlock {
            bbox,
            text: texts.join(" "),
            block_no,
            page,
            font_size,
            font_names,
            border_adjacent: self.is_border_adjacent(&bbox, lines),
        })
    }

    /// Whether the block's edges sit on ruling lines, per [`AdjacencyPolicy`].
    pub fn is_border_adjacent(&self, bbox: &Rect, lines: &LineSet) -> bool {
        let near = |a: f64, b: f64| (a - b).abs() <= self.line_margin;
        match self.adjacency {
            AdjacencyPolicy::AnyEdge => lines.iter().any(|line| {
                let l = &line.rect;
                near(l.x0, bbox.x0) || near(l.x1, bbox.x1) || near(l.y0, bbox.y0) || near(l.y1, bbox.y1)
            }),
            AdjacencyPolicy::AllEdges => {
                lines.iter().any(|line| near(line.rect.x0, bbox.x0))
                    && lines.iter().any(|line| near(line.rect.x1, bbox.x1))
                    && lines.iter().any(|line| near(line.rect.y0, bbox.y0))
                    && lines.iter().any(|line| near(line.rect.y1, bbox.y1))
            }
        }
    }
}

fn is_measurable(span: &RawSpan) -> bool {
    span.bbox.is_finite() && span.size.is_finite() && span.size > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::RawLine;
    use crate::table::LineClassifier;

    fn span(text: &str, x0: f64, y0: f64, x1: f64, y1: f64, size: f64, font: &str) -> RawSpan {
        RawSpan::new(text, Rect::new(x0, y0, x1, y1), size, font)
    }

    fn assembler() -> TextBlockAssembler {
        TextBlockAssembler::new(2.0, AdjacencyPolicy::AnyEdge)
    }

    #[test]
    fn joins_spans_and_unions_boxes() {
        let raw = RawBlock {
            lines: vec![
                RawLine {
                    spans: vec![
                        span("Total", 10.0, 20.0, 40.0, 30.0, 10.0, "Helvetica"),
                        span("  ", 40.0, 20.0, 44.0, 30.0, 10.0, "Helvetica"),
                        span("revenue ", 44.0, 20.0, 90.0, 30.0, 12.0, "Helvetica-Bold"),
                    ],
                },
                RawLine {
                    spans: vec![span("2024", 10.0, 32.0, 35.0, 44.0, 14.0, "Helvetica")],
                },
            ],
        };
        let blocks = assembler().assemble(3, &[raw], &LineSet::default());
        assert_eq!(blocks.len(), 1);
        let block = &blocks[0];
        assert_eq!(block.text, "Total revenue 2024");
        assert_eq!(block.bbox, Rect::new(10.0, 20.0, 90.0, 44.0));
        assert!((block.font_size - 12.0).abs() < 1e-9);
        assert_eq!(block.page, 3);
        assert_eq!(block.font_names.len(), 2);
        assert!(!block.border_adjacent);
    }

    #[test]
    fn skips_blocks_without_text_but_keeps_indices() {
        let raw = vec![
            RawBlock::default(),
            RawBlock::from_spans(vec![span("   ", 0.0, 0.0, 5.0, 5.0, 10.0, "F")]),
            RawBlock::from_spans(vec![span("kept", 0.0, 0.0, 20.0, 10.0, 10.0, "F")]),
        ];
        let blocks = assembler().assemble(0, &raw, &LineSet::default());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].block_no, 2);
    }

    #[test]
    fn unmeasurable_spans_are_dropped() {
        let raw = vec![
            RawBlock::from_spans(vec![span("ghost", 0.0, 0.0, 20.0, 10.0, 0.0, "F")]),
            RawBlock::from_spans(vec![
                span("bad", f64::NAN, 0.0, 20.0, 10.0, 10.0, "F"),
                span("good", 30.0, 0.0, 50.0, 10.0, 10.0, "F"),
            ]),
        ];
        let blocks = assembler().assemble(0, &raw, &LineSet::default());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "good");
        assert_eq!(blocks[0].bbox, Rect::new(30.0, 0.0, 50.0, 10.0));
    }

    #[test]
    fn any_edge_adjacency_is_loose() {
        let lines = LineClassifier::new(2.0).classify(&[Rect::new(9.0, 200.0, 300.0, 200.0)]);
        let raw = [RawBlock::from_spans(vec![span("cell", 10.0, 20.0, 40.0, 30.0, 10.0, "F")])];

        let loose = assembler().assemble(0, &raw, &lines);
        assert!(loose[0].border_adjacent, "left edge alone is enough");

        let strict = TextBlockAssembler::new(2.0, AdjacencyPolicy::AllEdges).assemble(0, &raw, &lines);
        assert!(!strict[0].border_adjacent);
    }

    #[test]
    fn all_edges_adjacency_requires_every_side() {
        let lines = LineClassifier::new(2.0).classify(&[
            Rect::new(10.0, 19.0, 40.0, 19.0),
            Rect::new(10.0, 31.0, 40.0, 31.0),
            Rect::new(9.0, 19.0, 9.0, 31.0),
            Rect::new(41.0, 19.0, 41.0, 31.0),
        ]);
        let bbox = Rect::new(10.0, 20.0, 40.0, 30.0);
        let strict = TextBlockAssembler::new(2.0, AdjacencyPolicy::AllEdges);
        assert!(strict.is_border_adjacent(&bbox, &lines));
    }
}
