use crate::markup::{Rect, RunPainter, StyleMask, StyledRun};
use crate::ui::render::util::Segment;
use lipgloss::Style;

/// Collects markup runs as lipgloss segments on top of a base style.
pub struct SegmentPainter<'a> {
    base: &'a Style,
    pub segments: Vec<Segment>,
}

impl<'a> SegmentPainter<'a> {
    pub fn new(base: &'a Style) -> Self {
        SegmentPainter {
            base,
            segments: Vec::new(),
        }
    }
}

pub fn run_style(base: &Style, run: &StyledRun) -> Style {
    let mut style = base
        .clone()
        .bold(run.style.contains(StyleMask::BOLD))
        .italic(run.style.contains(StyleMask::ITALIC));
    if let Some(color) = run.color {
        style = style.foreground(color.to_lipgloss());
    }
    style
}

impl RunPainter for SegmentPainter<'_> {
    // runs arrive left to right and touch each other, so the rect is implied
    fn paint(&mut self, run: &StyledRun, _rect: Rect) {
        self.segments.push(Segment {
            text: run.text.clone(),
            style: run_style(self.base, run),
        });
    }
}
