use crate::bar::StatusBar;
use crate::color::Rgb;
use crate::layout::Align;
use crate::markup::{Rect, RenderMode, parse_markup};
use crate::measure::cell_width;
use crate::ui::model::{DEFAULT_WIDTH, Model};
use crate::ui::render::painter::SegmentPainter;
use crate::ui::render::styles::STYLE_STATUS_TEXT;
use crate::ui::render::util::{Segment, clip_to_width, fit_segments};
use lipgloss::Style;

const DARKER: f32 = 0.8;
const LIGHTER: f32 = 1.25;

/// Background for part `index`: shades alternate around the bar colour.
pub fn part_background(color: Rgb, index: usize) -> Rgb {
    if index % 2 == 0 {
        color.darker(DARKER)
    } else {
        color.lighter(LIGHTER)
    }
}

/// Draws `bar` as one line of exactly `width` cells.
///
/// Parts take their calculated widths; whatever does not fit on screen is
/// clipped, and leftover cells get the bar colour.
pub fn render_statusline(bar: &StatusBar, color: Rgb, width: usize) -> String {
    let fill = STYLE_STATUS_TEXT.clone().background(color.to_lipgloss());
    let mut out = String::new();
    let mut used = 0usize;

    for (i, span) in bar.part_rects().into_iter().enumerate() {
        if used >= width {
            break;
        }
        let part_width = (span.end - span.start).max(0) as usize;
        let budget = part_width.min(width - used);
        let style = STYLE_STATUS_TEXT
            .clone()
            .background(part_background(color, i).to_lipgloss());
        out.push_str(&fit_segments(&part_segments(bar, i, &style), budget, &style));
        used += budget;
    }

    if used < width {
        out.push_str(&fit_segments(&[], width - used, &fill));
    }
    out
}

// border, aligned content, border
fn part_segments(bar: &StatusBar, index: usize, style: &Style) -> Vec<Segment> {
    let metrics = bar.metrics();
    let border = metrics.border.max(0) as usize;
    let state = bar.states()[index];
    let part = &bar.parts()[index];
    let inner = (state.calculated_width as usize).saturating_sub(2 * border);
    let icon_cells = metrics.icon_width.max(0) as usize;

    let mut content = Vec::new();
    let icon = if state.collapsed {
        part.collapsed_icon.as_deref()
    } else {
        part.icon.as_deref()
    };
    if let Some(icon) = icon {
        let (glyph, w) = clip_to_width(icon, icon_cells);
        content.push(Segment::new(glyph, style));
        content.push(Segment::blank(icon_cells - w, style));
    }
    if let Some(text) = bar.display_text(index) {
        let line = parse_markup(text, bar.measure());
        let mut painter = SegmentPainter::new(style);
        line.render(Rect::default(), RenderMode::Draw, &mut painter);
        content.extend(painter.segments);
    }

    let content_width: usize = content.iter().map(|s| cell_width(&s.text) as usize).sum();
    let slack = inner.saturating_sub(content_width);
    let (left, right) = match part.align {
        Align::Left => (0, slack),
        Align::Center => (slack / 2, slack - slack / 2),
        Align::Right => (slack, 0),
    };

    let mut segments = vec![Segment::blank(border + left, style)];
    // clip before the right border so it survives too-wide content
    segments.extend(clip_segments(content, inner));
    segments.push(Segment::blank(right + border, style));
    segments
}

fn clip_segments(segments: Vec<Segment>, width: usize) -> Vec<Segment> {
    let mut used = 0;
    let mut out = Vec::new();
    for seg in segments {
        if used >= width {
            break;
        }
        let (text, w) = clip_to_width(&seg.text, width - used);
        used += w;
        out.push(Segment {
            text: text.to_string(),
            style: seg.style,
        });
    }
    out
}

pub fn render_statusline_padded(m: &Model) -> String {
    let width = if m.screen_width > 0 {
        m.screen_width
    } else {
        DEFAULT_WIDTH
    };
    render_statusline(&m.bar, m.bar_color, width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutMetrics, Part};
    use regex::Regex;
    use unicode_width::UnicodeWidthStr;

    fn strip_ansi(s: &str) -> String {
        let re = Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").unwrap();
        re.replace_all(s, "").to_string()
    }

    fn bar(parts: Vec<Part>, width: i32) -> StatusBar {
        let mut bar = StatusBar::new(LayoutMetrics::CELLS);
        for p in parts {
            bar.push(p);
        }
        bar.relayout(width);
        bar
    }

    #[test]
    fn line_is_exact_width() {
        for w in [10usize, 25, 80] {
            let b = bar(
                vec![
                    Part::new("%bmain.rs%r src/main.rs").short("main.rs"),
                    Part::new("UTF-8").align(Align::Center),
                    Part::new("1/2").fixed(),
                ],
                w as i32,
            );
            let out = strip_ansi(&render_statusline(&b, Rgb::new(95, 95, 95), w));
            assert_eq!(UnicodeWidthStr::width(out.as_str()), w, "width {w}: `{out}`");
        }
    }

    #[test]
    fn alignment_places_text() {
        let b = bar(
            vec![
                Part::new("ab"),
                Part::new("cd").align(Align::Center),
                Part::new("ef").align(Align::Right),
            ],
            24,
        );
        // three parts of eight cells
        let out = strip_ansi(&render_statusline(&b, Rgb::new(95, 95, 95), 24));
        assert_eq!(out, " ab        cd        ef ");
    }

    #[test]
    fn markup_is_not_printed() {
        let b = bar(vec![Part::new("%bbold%r %cFF0000red%r 5%%")], 20);
        let out = strip_ansi(&render_statusline(&b, Rgb::new(0, 0, 80), 20));
        assert_eq!(out.trim_end(), " bold red 5%");
    }

    #[test]
    fn collapsed_part_shows_its_icon() {
        let b = bar(
            vec![
                Part::new("long label").short("lbl").collapsed_icon("@"),
                Part::new("x").fixed(),
            ],
            7,
        );
        assert!(b.states()[0].collapsed);
        let out = strip_ansi(&render_statusline(&b, Rgb::new(95, 95, 95), 7));
        assert_eq!(out, " @   x ");
    }

    #[test]
    fn wide_collapsed_icon_counts_two_cells() {
        let b = bar(
            vec![
                Part::new("main.rs src/main.rs").short("main.rs").collapsed_icon("📄"),
                Part::new("ANSI").short("A"),
                Part::new("12B").fixed(),
            ],
            12,
        );
        assert!(b.states()[0].collapsed);
        let out = strip_ansi(&render_statusline(&b, Rgb::new(95, 95, 95), 12));
        assert!(out.contains('📄'));
        assert_eq!(UnicodeWidthStr::width(out.as_str()), 12, "`{out}`");
        // the glyph is one char but two cells
        assert_eq!(out.chars().count(), 11);
    }

    #[test]
    fn overflowing_fixed_parts_are_clipped() {
        let b = bar(vec![Part::new("abcdefgh").fixed(), Part::new("ij").fixed()], 6);
        let out = strip_ansi(&render_statusline(&b, Rgb::new(95, 95, 95), 6));
        assert_eq!(out, " abcde");
    }

    #[test]
    fn shades_alternate() {
        let c = Rgb::new(100, 100, 100);
        assert_eq!(part_background(c, 0), Rgb::new(80, 80, 80));
        assert_eq!(part_background(c, 1), Rgb::new(125, 125, 125));
        assert_eq!(part_background(c, 2), part_background(c, 0));
    }
}
