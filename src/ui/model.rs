use crate::bar::StatusBar;
use crate::color::Rgb;
use crate::config::BarConfig;
use crate::encoding::{EncodingVerdict, detect_encoding};
use crate::layout::{Align, Part};
use crate::markup::escape_markup;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::warn;

// small constants reused by rendering code
pub const STATUSLINE_LINES: usize = 1;
pub const DEFAULT_WIDTH: usize = 80;
pub const DEFAULT_HEIGHT: usize = 24;
pub const DEFAULT_BAR_COLOR: Rgb = Rgb::new(95, 95, 95);
/// Bytes read from each file for sniffing.
pub const SNIFF_LIMIT: u64 = 64 * 1024;

/// One inspected file.
#[derive(Clone, Debug)]
pub struct FileEntry {
    pub path: PathBuf,
    pub size: u64,
    pub verdict: Option<EncodingVerdict>,
    pub error: Option<String>,
}

impl FileEntry {
    /// Reads the head of `path` and sniffs it. Failures are kept on the
    /// entry so one unreadable file does not stop the inspector.
    pub fn sniff(path: &Path) -> FileEntry {
        match read_prefix(path) {
            Ok((bytes, size)) => FileEntry {
                size,
                ..FileEntry::from_bytes(path, &bytes)
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot sniff file");
                FileEntry {
                    path: path.to_path_buf(),
                    size: 0,
                    verdict: None,
                    error: Some(format!("{e:#}")),
                }
            }
        }
    }

    pub fn from_bytes(path: impl Into<PathBuf>, bytes: &[u8]) -> FileEntry {
        FileEntry {
            path: path.into(),
            size: bytes.len() as u64,
            verdict: Some(detect_encoding(bytes)),
            error: None,
        }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn encoding_label(&self) -> String {
        match &self.verdict {
            Some(v) => v.to_string(),
            None => "unreadable".to_string(),
        }
    }
}

/// Reads at most [`SNIFF_LIMIT`] bytes and returns them with the file size.
pub fn read_prefix(path: &Path) -> Result<(Vec<u8>, u64)> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let size = file
        .metadata()
        .with_context(|| format!("failed to stat {}", path.display()))?
        .len();
    let mut bytes = Vec::new();
    file.take(SNIFF_LIMIT)
        .read_to_end(&mut bytes)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok((bytes, size))
}

#[derive(Clone, Debug)]
pub struct Model {
    pub files: Vec<FileEntry>,
    pub selected: usize,
    // first visible list row
    pub offset: usize,
    pub per_page: usize,
    pub screen_width: usize,
    pub bar: StatusBar,
    pub bar_color: Rgb,
}

pub fn initial_model(files: Vec<FileEntry>, config: &BarConfig) -> Model {
    let mut m = Model {
        files,
        selected: 0,
        offset: 0,
        per_page: DEFAULT_HEIGHT - STATUSLINE_LINES,
        screen_width: DEFAULT_WIDTH,
        bar: StatusBar::new(config.metrics()),
        bar_color: config.background.unwrap_or(DEFAULT_BAR_COLOR),
    };
    m.bar.relayout(DEFAULT_WIDTH as i32);
    m.refresh_bar();
    m
}

impl Model {
    // wrapper update that delegates to the update module
    pub fn update(&mut self, msg: crate::ui::Msg) {
        crate::ui::update::handle_update(self, msg);
    }

    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.files.get(self.selected)
    }

    /// Rebuilds the status bar parts for the current selection.
    pub fn refresh_bar(&mut self) {
        let parts = status_parts(self.selected_entry(), self.selected, self.files.len());
        if self.bar.len() == parts.len() {
            for (i, part) in parts.into_iter().enumerate() {
                self.bar.set_part(Some(i), part, true);
            }
        } else {
            self.bar.clear();
            for part in parts {
                self.bar.push(part);
            }
        }
    }

    /// Scrolls the list so the selected row is visible.
    pub fn scroll_to_selected(&mut self) {
        if self.per_page == 0 {
            self.offset = self.selected;
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + self.per_page {
            self.offset = self.selected + 1 - self.per_page;
        }
    }

    pub fn render_list_content(&self) -> String {
        crate::ui::render::render_list_content(self)
    }
    pub fn render_statusline(&self) -> String {
        crate::ui::render::render_statusline_padded(self)
    }
    pub fn render_full(&self) -> String {
        crate::ui::render::render_full(self)
    }
}

/// Path, encoding, size and position parts for one entry.
pub fn status_parts(entry: Option<&FileEntry>, index: usize, total: usize) -> Vec<Part> {
    let position = Part::new(format!("%i{}/{}%r", (index + 1).min(total), total))
        .tooltip("position in list")
        .align(Align::Right)
        .fixed();

    let Some(entry) = entry else {
        return vec![
            Part::new("%ino files%r"),
            Part::new(""),
            Part::new(""),
            position,
        ];
    };

    let name = escape_markup(&entry.file_name());
    let full = escape_markup(&entry.path.display().to_string());
    let path = Part::new(format!("%b{name}%r {full}"))
        .short(format!("%b{name}%r"))
        .tooltip(entry.path.display().to_string())
        .collapsed_icon("📄");

    let encoding = match (&entry.verdict, &entry.error) {
        (Some(v), _) => Part::new(v.to_string())
            .short(v.encoding.short_label())
            .tooltip(format!("codepage {}", v.codepage()))
            .align(Align::Center),
        (None, err) => Part::new("%cFF5F5Funreadable%r")
            .short("%cFF5F5F!%r")
            .tooltip(err.clone().unwrap_or_default())
            .align(Align::Center),
    };

    let size = Part::new(format!("{} bytes", entry.size))
        .short(human_size(entry.size))
        .tooltip("file size")
        .align(Align::Right)
        .priority(1);

    vec![path, encoding, size, position]
}

pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "K", "M", "G"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes}B")
    } else {
        format!("{value:.1}{}", UNITS[unit])
    }
}
