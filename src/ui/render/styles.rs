use lipgloss::{Color, Style};
use once_cell::sync::Lazy;

// Styles kept local to render module
pub static STYLE_LABEL: Lazy<Style> =
    Lazy::new(|| Style::new().foreground(Color::from_rgb(200, 200, 200)));
pub static STYLE_SELECTED: Lazy<Style> = Lazy::new(|| {
    Style::new()
        .foreground(Color::from_rgb(238, 0, 238))
        .bold(true)
});
pub static STYLE_ENCODING: Lazy<Style> =
    Lazy::new(|| Style::new().foreground(Color::from_rgb(0, 238, 238)));
pub static STYLE_ERROR: Lazy<Style> =
    Lazy::new(|| Style::new().foreground(Color::from_rgb(255, 95, 95)));
pub static STYLE_LINENUM: Lazy<Style> = Lazy::new(|| Style::new().faint(true));
pub static STYLE_STATUS_TEXT: Lazy<Style> =
    Lazy::new(|| Style::new().foreground(Color::from_rgb(255, 255, 255)));
