//! Status line layout.
//!
//! Widths start at each part's default width. Slack is spread evenly over
//! the non-fixed parts, with the rounding remainder going to the last one.
//! On overflow the parts degrade one step at a time: first every non-fixed
//! part is shortened, then parts with a collapsed icon collapse. Within a
//! pass the part with the highest `shorten_priority` goes first, and among
//! equal priorities the rightmost one does.

use crate::markup::measure_markup;
use crate::measure::TextMeasure;
use serde::Deserialize;
use std::cmp::Reverse;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// One segment of a status line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Part {
    pub text: String,
    /// Label used once the part is shortened; `text` when absent or empty.
    pub short_text: Option<String>,
    pub tooltip: String,
    pub icon: Option<String>,
    /// Glyph drawn instead of the label once the part collapses. Parts
    /// without one never collapse.
    pub collapsed_icon: Option<String>,
    pub align: Align,
    /// Fixed parts keep their default width: no shortening, no slack.
    pub fixed_width: bool,
    /// Explicit widths; unset or zero means measure the text.
    pub width: Option<i32>,
    pub short_width: Option<i32>,
    pub shorten_priority: i32,
}

impl Part {
    pub fn new(text: impl Into<String>) -> Self {
        Part {
            text: text.into(),
            ..Part::default()
        }
    }

    pub fn short(mut self, short_text: impl Into<String>) -> Self {
        self.short_text = Some(short_text.into());
        self
    }

    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = tooltip.into();
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn collapsed_icon(mut self, icon: impl Into<String>) -> Self {
        self.collapsed_icon = Some(icon.into());
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn fixed(mut self) -> Self {
        self.fixed_width = true;
        self
    }

    pub fn width(mut self, width: i32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn short_width(mut self, width: i32) -> Self {
        self.short_width = Some(width);
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.shorten_priority = priority;
        self
    }

    pub fn short_label(&self) -> &str {
        match self.short_text.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => &self.text,
        }
    }

    fn requested_width(&self) -> Option<i32> {
        self.width.filter(|&w| w > 0)
    }

    fn requested_short_width(&self) -> Option<i32> {
        self.short_width
            .filter(|&w| w > 0)
            .or_else(|| self.requested_width())
    }
}

/// Fixed extents added around measured text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutMetrics {
    pub border: i32,
    pub icon_width: i32,
}

impl LayoutMetrics {
    /// One cell of padding and two-cell icons, for terminal hosts.
    pub const CELLS: LayoutMetrics = LayoutMetrics {
        border: 1,
        icon_width: 2,
    };

    pub fn collapsed_width(&self) -> i32 {
        self.icon_width + 2 * self.border
    }
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        LayoutMetrics::CELLS
    }
}

/// Per-part result of a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PartLayoutState {
    pub measured_default_width: i32,
    pub measured_short_width: i32,
    pub fixed: bool,
    pub can_collapse: bool,
    pub shorten_priority: i32,
    pub shortened: bool,
    pub collapsed: bool,
    pub calculated_width: i32,
}

impl PartLayoutState {
    fn current_width(&self, metrics: LayoutMetrics) -> i32 {
        if self.collapsed {
            metrics.collapsed_width()
        } else if self.shortened {
            self.measured_short_width
        } else {
            self.measured_default_width
        }
    }
}

/// Measures the default and short widths of one part.
///
/// Measured widths include the icon and the border on both sides; explicit
/// widths are taken as they are.
pub fn measure_part<M: TextMeasure + ?Sized>(
    part: &Part,
    metrics: LayoutMetrics,
    measure: &M,
) -> PartLayoutState {
    let chrome = |text: &str| {
        let icon = if part.icon.is_some() { metrics.icon_width } else { 0 };
        measure_markup(text, measure) + icon + 2 * metrics.border
    };
    let default_width = part
        .requested_width()
        .unwrap_or_else(|| chrome(&part.text));
    let short_width = part
        .requested_short_width()
        .unwrap_or_else(|| chrome(part.short_label()));

    PartLayoutState {
        measured_default_width: default_width,
        measured_short_width: short_width,
        fixed: part.fixed_width,
        can_collapse: part.collapsed_icon.is_some(),
        shorten_priority: part.shorten_priority,
        shortened: false,
        collapsed: false,
        calculated_width: 0,
    }
}

pub fn measure_parts<M: TextMeasure + ?Sized>(
    parts: &[Part],
    metrics: LayoutMetrics,
    measure: &M,
) -> Vec<PartLayoutState> {
    parts
        .iter()
        .map(|p| measure_part(p, metrics, measure))
        .collect()
}

/// Measures `parts` and fits them into `available`.
pub fn compute_layout<M: TextMeasure + ?Sized>(
    parts: &[Part],
    available: i32,
    metrics: LayoutMetrics,
    measure: &M,
) -> Vec<PartLayoutState> {
    let mut states = measure_parts(parts, metrics, measure);
    relax(&mut states, available, metrics);
    states
}

/// Recomputes `calculated_width` for already measured states and returns
/// the number of degradation steps taken.
///
/// Each step shortens or collapses one part, so there are at most
/// `2 * states.len()` of them. Fixed parts may make the total overflow
/// `available`; that is left to the caller.
pub fn relax(states: &mut [PartLayoutState], available: i32, metrics: LayoutMetrics) -> usize {
    for s in states.iter_mut() {
        s.shortened = false;
        s.collapsed = false;
        s.calculated_width = s.measured_default_width;
    }
    if states.is_empty() {
        return 0;
    }

    let order = degrade_order(states);
    let mut steps = 0;
    loop {
        let mut total = 0;
        let mut non_fixed = 0;
        for s in states.iter_mut() {
            s.calculated_width = s.current_width(metrics);
            total += s.calculated_width;
            if !s.fixed {
                non_fixed += 1;
            }
        }

        if total <= available && non_fixed > 0 {
            distribute(states, available, total, non_fixed);
            debug!(steps, available, "status line fits");
            return steps;
        }
        if !degrade(states, &order) {
            debug!(steps, available, total, "status line overflows, nothing left to degrade");
            return steps;
        }
        steps += 1;
    }
}

fn distribute(states: &mut [PartLayoutState], available: i32, total: i32, non_fixed: i32) {
    let extra = (available - total) / non_fixed;
    let mut new_total = 0;
    let mut last = None;
    for (i, s) in states.iter_mut().enumerate() {
        if !s.fixed {
            s.calculated_width += extra;
            last = Some(i);
        }
        new_total += s.calculated_width;
    }
    if let Some(i) = last {
        states[i].calculated_width += available - new_total;
    }
}

// highest priority first, rightmost first among equals
fn degrade_order(states: &[PartLayoutState]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..states.len()).rev().collect();
    order.sort_by_key(|&i| Reverse(states[i].shorten_priority));
    order
}

fn degrade(states: &mut [PartLayoutState], order: &[usize]) -> bool {
    if let Some(&i) = order
        .iter()
        .find(|&&i| !states[i].fixed && !states[i].shortened)
    {
        trace!(part = i, "shorten");
        states[i].shortened = true;
        return true;
    }
    if let Some(&i) = order
        .iter()
        .find(|&&i| !states[i].fixed && !states[i].collapsed && states[i].can_collapse)
    {
        trace!(part = i, "collapse");
        states[i].collapsed = true;
        return true;
    }
    false
}
