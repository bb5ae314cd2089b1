//! Inline markup for status bar labels.
//!
//! A label is plain text with `%` escapes:
//!
//! | escape      | effect                                             |
//! |-------------|----------------------------------------------------|
//! | `%%`        | literal `%`                                        |
//! | `%i`        | italic on                                          |
//! | `%b`        | bold on                                            |
//! | `%cRRGGBB`  | text color for the following runs                  |
//! | `%r`        | reset style bits and color                         |
//!
//! Style bits accumulate until `%r`. A `%c` without six hex digits after it
//! is kept as literal text. Any other character after `%` is dropped
//! together with the `%`.

use crate::color::Rgb;
use crate::measure::TextMeasure;
use bitflags::bitflags;
use tracing::debug;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleMask: u8 {
        const ITALIC = 0b01;
        const BOLD = 0b10;
    }
}

/// The directive that opened a run. The first run of a line has `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyleCommand {
    #[default]
    None,
    Italic,
    Bold,
    Color,
    Reset,
}

/// One literal segment with the style that was active when it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub text: String,
    pub x_offset: i32,
    pub width: i32,
    pub command: StyleCommand,
    pub style: StyleMask,
    /// Active color, `None` means inherit the surface color.
    pub color: Option<Rgb>,
}

/// Parsed markup: the run sequence and its total measured width.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkupLine {
    pub runs: Vec<StyledRun>,
    pub total_width: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Measure,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Render callback for [`RenderMode::Draw`].
pub trait RunPainter {
    fn paint(&mut self, run: &StyledRun, rect: Rect);
}

#[derive(Default)]
struct RunBuilder {
    runs: Vec<StyledRun>,
    pending: String,
    x: i32,
    command: StyleCommand,
    style: StyleMask,
    color: Option<Rgb>,
}

impl RunBuilder {
    fn flush<M: TextMeasure + ?Sized>(&mut self, measure: &M) {
        if self.pending.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.pending);
        let width = measure.measure(&text, self.style);
        self.runs.push(StyledRun {
            text,
            x_offset: self.x,
            width,
            command: self.command,
            style: self.style,
            color: self.color,
        });
        self.x += width;
    }

    fn apply<M: TextMeasure + ?Sized>(&mut self, measure: &M, command: StyleCommand) {
        self.flush(measure);
        self.command = command;
    }
}

/// Splits `text` into styled runs, measuring each with `measure`.
pub fn parse_markup<M: TextMeasure + ?Sized>(text: &str, measure: &M) -> MarkupLine {
    let mut b = RunBuilder::default();
    let mut rest = text;

    while let Some(pos) = rest.find('%') {
        b.pending.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let Some(directive) = after.chars().next() else {
            // lone trailing '%'
            b.pending.push('%');
            rest = "";
            break;
        };
        let tail = &after[directive.len_utf8()..];
        match directive {
            '%' => {
                b.pending.push('%');
                rest = tail;
            }
            'i' => {
                b.apply(measure, StyleCommand::Italic);
                b.style |= StyleMask::ITALIC;
                rest = tail;
            }
            'b' => {
                b.apply(measure, StyleCommand::Bold);
                b.style |= StyleMask::BOLD;
                rest = tail;
            }
            'r' => {
                b.apply(measure, StyleCommand::Reset);
                b.style = StyleMask::empty();
                b.color = None;
                rest = tail;
            }
            'c' => match tail.get(..6).and_then(Rgb::from_hex) {
                Some(color) => {
                    b.apply(measure, StyleCommand::Color);
                    b.color = Some(color);
                    rest = &tail[6..];
                }
                None => {
                    debug!(at = text.len() - rest.len() + pos, "malformed %c directive kept as text");
                    b.pending.push('%');
                    rest = after;
                }
            },
            other => {
                debug!(directive = %other, "unknown markup directive dropped");
                rest = tail;
            }
        }
    }

    b.pending.push_str(rest);
    b.flush(measure);
    MarkupLine {
        total_width: b.x,
        runs: b.runs,
    }
}

impl MarkupLine {
    /// Walks the runs once. In draw mode each run is painted at
    /// `bounds.x + x_offset`; both modes return [`MarkupLine::total_width`].
    pub fn render(&self, bounds: Rect, mode: RenderMode, painter: &mut dyn RunPainter) -> i32 {
        for run in &self.runs {
            if mode == RenderMode::Draw {
                let rect = Rect {
                    x: bounds.x + run.x_offset,
                    y: bounds.y,
                    width: run.width,
                    height: bounds.height,
                };
                painter.paint(run, rect);
            }
        }
        self.total_width
    }

    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// Parses `text` and renders it in one call.
pub fn render_markup<M: TextMeasure + ?Sized>(
    text: &str,
    measure: &M,
    bounds: Rect,
    mode: RenderMode,
    painter: &mut dyn RunPainter,
) -> i32 {
    parse_markup(text, measure).render(bounds, mode, painter)
}

/// Escapes `%` so `text` renders literally.
pub fn escape_markup(text: &str) -> String {
    text.replace('%', "%%")
}

/// Width of `text` with directives removed.
pub fn measure_markup<M: TextMeasure + ?Sized>(text: &str, measure: &M) -> i32 {
    parse_markup(text, measure).total_width
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::CellMeasure;

    // bold text is one unit wider per character so style reaches the measurer
    fn measurer(text: &str, style: StyleMask) -> i32 {
        let n = text.chars().count() as i32;
        if style.contains(StyleMask::BOLD) {
            n * 2
        } else {
            n
        }
    }

    #[derive(Default)]
    struct Recorder {
        painted: Vec<(String, Rect)>,
    }

    impl RunPainter for Recorder {
        fn paint(&mut self, run: &StyledRun, rect: Rect) {
            self.painted.push((run.text.clone(), rect));
        }
    }

    #[test]
    fn plain_text_is_one_unstyled_run() {
        let line = parse_markup("plain text", &measurer);
        assert_eq!(line.runs.len(), 1);
        let run = &line.runs[0];
        assert_eq!(run.text, "plain text");
        assert_eq!(run.x_offset, 0);
        assert_eq!(run.style, StyleMask::empty());
        assert_eq!(run.command, StyleCommand::None);
        assert_eq!(run.color, None);
        assert_eq!(line.total_width, measurer("plain text", StyleMask::empty()));
    }

    #[test]
    fn bold_then_reset_splits_runs() {
        let line = parse_markup("%bBold%r normal", &measurer);
        assert_eq!(line.runs.len(), 2);
        assert_eq!(line.runs[0].text, "Bold");
        assert_eq!(line.runs[0].style, StyleMask::BOLD);
        assert_eq!(line.runs[0].width, 8);
        assert_eq!(line.runs[1].text, " normal");
        assert_eq!(line.runs[1].style, StyleMask::empty());
        assert_eq!(line.runs[1].command, StyleCommand::Reset);
        assert_eq!(line.runs[1].x_offset, line.runs[0].width);
        assert_eq!(line.total_width, 8 + 7);
    }

    #[test]
    fn double_percent_is_literal() {
        let line = parse_markup("100%%", &measurer);
        assert_eq!(line.plain_text(), "100%");
        assert_eq!(line.total_width, measurer("100%", StyleMask::empty()));
        assert_eq!(line.runs.len(), 1);
    }

    #[test]
    fn styles_accumulate_until_reset() {
        let line = parse_markup("a%ib%bc%rd", &measurer);
        let styles: Vec<_> = line.runs.iter().map(|r| (r.text.as_str(), r.style)).collect();
        assert_eq!(
            styles,
            vec![
                ("a", StyleMask::empty()),
                ("b", StyleMask::ITALIC),
                ("c", StyleMask::ITALIC | StyleMask::BOLD),
                ("d", StyleMask::empty()),
            ]
        );
    }

    #[test]
    fn color_is_independent_of_style_bits() {
        let line = parse_markup("%cFF0000red%bbold%rplain", &measurer);
        let red = Some(Rgb::new(0xFF, 0, 0));
        assert_eq!(line.runs[0].text, "red");
        assert_eq!(line.runs[0].command, StyleCommand::Color);
        assert_eq!(line.runs[0].color, red);
        assert_eq!(line.runs[1].text, "bold");
        assert_eq!(line.runs[1].color, red);
        assert_eq!(line.runs[1].style, StyleMask::BOLD);
        assert_eq!(line.runs[2].color, None);
        assert_eq!(line.runs[2].style, StyleMask::empty());
    }

    #[test]
    fn short_color_directive_stays_literal() {
        let line = parse_markup("x%c12", &measurer);
        assert_eq!(line.plain_text(), "x%c12");
        assert_eq!(line.runs.len(), 1);
        assert_eq!(line.runs[0].color, None);

        let line = parse_markup("%cZZZZZZok", &measurer);
        assert_eq!(line.plain_text(), "%cZZZZZZok");
    }

    #[test]
    fn unknown_directive_is_dropped() {
        let line = parse_markup("a%qb", &measurer);
        assert_eq!(line.plain_text(), "ab");
        let line = parse_markup("tail%", &measurer);
        assert_eq!(line.plain_text(), "tail%");
    }

    #[test]
    fn empty_text_has_no_runs() {
        let line = parse_markup("", &measurer);
        assert!(line.runs.is_empty());
        assert_eq!(line.total_width, 0);
        let line = parse_markup("%b%r", &measurer);
        assert!(line.runs.is_empty());
    }

    #[test]
    fn draw_and_measure_walk_the_same_runs() {
        let line = parse_markup("ab%bcd%ref", &CellMeasure::default());
        let bounds = Rect { x: 10, y: 3, width: 40, height: 1 };

        let mut idle = Recorder::default();
        let measured = line.render(bounds, RenderMode::Measure, &mut idle);
        assert!(idle.painted.is_empty());

        let mut rec = Recorder::default();
        let drawn = line.render(bounds, RenderMode::Draw, &mut rec);
        assert_eq!(measured, drawn);
        let xs: Vec<i32> = rec.painted.iter().map(|(_, r)| r.x).collect();
        assert_eq!(xs, vec![10, 12, 14]);
        assert!(rec.painted.iter().all(|(_, r)| r.y == 3 && r.height == 1));
    }

    #[test]
    fn escaped_text_round_trips_to_plain() {
        let raw = "50% done %b";
        let line = parse_markup(&escape_markup(raw), &measurer);
        assert_eq!(line.plain_text(), raw);
        assert_eq!(line.runs.len(), 1);
    }

    #[test]
    fn multibyte_text_around_directives() {
        let line = parse_markup("é%b日本", &CellMeasure::default());
        assert_eq!(line.runs[0].text, "é");
        assert_eq!(line.runs[1].text, "日本");
        assert_eq!(line.total_width, 1 + 4);
    }
}
