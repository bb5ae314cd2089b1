//! A status bar: an ordered list of parts plus their cached layout.

use crate::layout::{LayoutMetrics, Part, PartLayoutState, measure_part, relax};
use crate::measure::{CellMeasure, TextMeasure};
use std::ops::Range;
use tracing::trace;

#[derive(Debug, Clone)]
pub struct StatusBar<M: TextMeasure = CellMeasure> {
    parts: Vec<Part>,
    states: Vec<PartLayoutState>,
    metrics: LayoutMetrics,
    measure: M,
    available: i32,
}

impl StatusBar<CellMeasure> {
    pub fn new(metrics: LayoutMetrics) -> Self {
        StatusBar::with_measure(metrics, CellMeasure::default())
    }
}

impl Default for StatusBar<CellMeasure> {
    fn default() -> Self {
        StatusBar::new(LayoutMetrics::default())
    }
}

impl<M: TextMeasure> StatusBar<M> {
    pub fn with_measure(metrics: LayoutMetrics, measure: M) -> Self {
        StatusBar {
            parts: Vec::new(),
            states: Vec::new(),
            metrics,
            measure,
            available: 0,
        }
    }

    /// Adds or replaces a part.
    ///
    /// `None` appends. With `replace` the index must name an existing part;
    /// otherwise the part is inserted before `index`, and `index == len`
    /// appends. Returns `false` when the index is out of range.
    pub fn set_part(&mut self, index: Option<usize>, part: Part, replace: bool) -> bool {
        let len = self.parts.len();
        let index = index.unwrap_or(len);
        let in_range = if replace { index < len } else { index <= len };
        if !in_range {
            trace!(index, len, replace, "set_part index out of range");
            return false;
        }

        let state = measure_part(&part, self.metrics, &self.measure);
        if replace {
            self.parts[index] = part;
            self.states[index] = state;
        } else {
            self.parts.insert(index, part);
            self.states.insert(index, state);
        }
        relax(&mut self.states, self.available, self.metrics);
        true
    }

    pub fn push(&mut self, part: Part) {
        self.set_part(None, part, false);
    }

    pub fn remove(&mut self, index: usize) -> Option<Part> {
        if index >= self.parts.len() {
            return None;
        }
        self.states.remove(index);
        let part = self.parts.remove(index);
        relax(&mut self.states, self.available, self.metrics);
        Some(part)
    }

    pub fn clear(&mut self) {
        self.parts.clear();
        self.states.clear();
    }

    pub fn relayout(&mut self, available: i32) {
        self.available = available;
        relax(&mut self.states, available, self.metrics);
    }

    pub fn available(&self) -> i32 {
        self.available
    }

    pub fn metrics(&self) -> LayoutMetrics {
        self.metrics
    }

    pub fn measure(&self) -> &M {
        &self.measure
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn states(&self) -> &[PartLayoutState] {
        &self.states
    }

    pub fn total_width(&self) -> i32 {
        self.states.iter().map(|s| s.calculated_width).sum()
    }

    pub fn part_rects(&self) -> Vec<Range<i32>> {
        let mut x = 0;
        self.states
            .iter()
            .map(|s| {
                let start = x;
                x += s.calculated_width;
                start..x
            })
            .collect()
    }

    /// Tooltip of the part under `x`. Borders do not count as part of it.
    pub fn tooltip_at(&self, x: i32) -> Option<&str> {
        let border = self.metrics.border;
        self.part_rects()
            .into_iter()
            .zip(&self.parts)
            .find(|(span, _)| x >= span.start + border && x < span.end - border)
            .map(|(_, part)| part.tooltip.as_str())
            .filter(|tip| !tip.is_empty())
    }

    /// The label to draw for part `index`, `None` when it is collapsed to
    /// its icon or does not exist.
    pub fn display_text(&self, index: usize) -> Option<&str> {
        let part = self.parts.get(index)?;
        let state = self.states.get(index)?;
        if state.collapsed {
            None
        } else if state.shortened {
            Some(part.short_label())
        } else {
            Some(&part.text)
        }
    }
}
