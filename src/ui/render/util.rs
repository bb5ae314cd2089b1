use lipgloss::Style;
use unicode_width::UnicodeWidthChar;

/// Styled text before rendering, so it can be clipped by cell width.
#[derive(Clone)]
pub struct Segment {
    pub text: String,
    pub style: Style,
}

impl Segment {
    pub fn new(text: impl Into<String>, style: &Style) -> Self {
        Segment {
            text: text.into(),
            style: style.clone(),
        }
    }

    pub fn blank(cells: usize, style: &Style) -> Self {
        Segment::new(" ".repeat(cells), style)
    }
}

/// Longest prefix of `text` that fits in `max` cells, with its width.
pub fn clip_to_width(text: &str, max: usize) -> (&str, usize) {
    let mut used = 0;
    for (i, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > max {
            return (&text[..i], used);
        }
        used += w;
    }
    (text, used)
}

/// Clips `segments` to `width` cells and pads the rest with `fill`.
pub fn fit_segments(segments: &[Segment], width: usize, fill: &Style) -> String {
    let mut out = String::new();
    let mut used = 0;
    for seg in segments {
        if used >= width {
            break;
        }
        let (text, w) = clip_to_width(&seg.text, width - used);
        if !text.is_empty() {
            out.push_str(&seg.style.render(text));
        }
        used += w;
    }
    if used < width {
        out.push_str(&fill.render(&" ".repeat(width - used)));
    }
    out
}

pub fn normalize_and_pad(lines: Vec<String>, total_width: usize, per: usize) -> String {
    let line_style = Style::new().width(total_width as i32);
    let mut normalized: Vec<String> = lines.into_iter().map(|l| line_style.render(&l)).collect();
    if normalized.len() > per {
        normalized.truncate(per);
    } else {
        while normalized.len() < per {
            normalized.push(line_style.render(""));
        }
    }
    normalized.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clips_on_cell_boundaries() {
        assert_eq!(clip_to_width("hello", 3), ("hel", 3));
        assert_eq!(clip_to_width("hi", 10), ("hi", 2));
        // a wide glyph that does not fit is dropped whole
        assert_eq!(clip_to_width("a日b", 2), ("a", 1));
        assert_eq!(clip_to_width("", 0), ("", 0));
    }

    #[test]
    fn fit_pads_and_clips() {
        let style = Style::new();
        let segs = [Segment::new("abc", &style), Segment::new("def", &style)];
        let re = regex::Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").unwrap();
        let plain = |s: String| re.replace_all(&s, "").to_string();
        assert_eq!(plain(fit_segments(&segs, 4, &style)), "abcd");
        assert_eq!(plain(fit_segments(&segs, 8, &style)), "abcdef  ");
        assert_eq!(plain(fit_segments(&segs, 0, &style)), "");
    }
}
