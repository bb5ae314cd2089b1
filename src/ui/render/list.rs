use crate::ui::model::{DEFAULT_WIDTH, FileEntry, Model};
use crate::ui::render::styles::{
    STYLE_ENCODING, STYLE_ERROR, STYLE_LABEL, STYLE_LINENUM, STYLE_SELECTED,
};
use crate::ui::render::util::{Segment, clip_to_width, fit_segments, normalize_and_pad};
use lipgloss::Style;

const NUMBER_CELLS: usize = 4;

// one row: number, path, then the encoding flush right
fn render_row(entry: &FileEntry, index: usize, selected: bool, width: usize) -> String {
    let number = format!("{:>3} ", index + 1);
    let (tag, tag_style) = match &entry.verdict {
        Some(v) => (v.to_string(), &*STYLE_ENCODING),
        None => (entry.encoding_label(), &*STYLE_ERROR),
    };
    let label_style: &Style = if selected { &*STYLE_SELECTED } else { &*STYLE_LABEL };

    let path = entry.path.display().to_string();
    let tag_cells = clip_to_width(&tag, width.saturating_sub(NUMBER_CELLS)).1;
    let path_room = width.saturating_sub(NUMBER_CELLS + tag_cells + 1);
    let (path, path_cells) = clip_to_width(&path, path_room);
    let gap = width.saturating_sub(NUMBER_CELLS + path_cells + tag_cells);

    let segments = [
        Segment::new(number, &STYLE_LINENUM),
        Segment::new(path, label_style),
        Segment::blank(gap, label_style),
        Segment::new(tag, tag_style),
    ];
    fit_segments(&segments, width, &Style::new())
}

pub fn render_list_content(m: &Model) -> String {
    let width = if m.screen_width > 0 {
        m.screen_width
    } else {
        DEFAULT_WIDTH
    };
    let lines: Vec<String> = m
        .files
        .iter()
        .enumerate()
        .skip(m.offset)
        .take(m.per_page)
        .map(|(i, entry)| render_row(entry, i, i == m.selected, width))
        .collect();
    normalize_and_pad(lines, width, m.per_page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use unicode_width::UnicodeWidthStr;

    fn strip_ansi(s: &str) -> String {
        let re = Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").unwrap();
        re.replace_all(s, "").to_string()
    }

    #[test]
    fn row_puts_encoding_on_the_right() {
        let e = FileEntry::from_bytes("notes.txt", "naïve".as_bytes());
        let row = strip_ansi(&render_row(&e, 0, false, 30));
        assert_eq!(UnicodeWidthStr::width(row.as_str()), 30);
        assert!(row.starts_with("  1 notes.txt"));
        assert!(row.ends_with("UTF-8"));
    }

    #[test]
    fn long_paths_are_clipped() {
        let e = FileEntry::from_bytes("a/very/long/path/to/some/file.txt", b"x");
        let row = strip_ansi(&render_row(&e, 9, true, 24));
        assert_eq!(UnicodeWidthStr::width(row.as_str()), 24);
        assert!(row.starts_with(" 10 a/very"));
    }
}
