use crate::ui::Msg;
use crate::ui::model::{Model, STATUSLINE_LINES};
use tracing::trace;

pub fn handle_update(m: &mut Model, msg: Msg) {
    match msg {
        Msg::WindowSize { width, height } => handle_window_size(m, width, height),
        Msg::KeyUp => select(m, m.selected.saturating_sub(1)),
        Msg::KeyDown => select(m, m.selected + 1),
        Msg::KeyHome => select(m, 0),
        Msg::KeyEnd => select(m, usize::MAX),
    }
}

fn handle_window_size(m: &mut Model, width: usize, height: usize) {
    m.screen_width = width;
    m.per_page = height.saturating_sub(STATUSLINE_LINES);
    m.bar.relayout(width as i32);
    m.scroll_to_selected();
    trace!(width, height, "relayout status bar");
}

// clamps to the last entry
fn select(m: &mut Model, index: usize) {
    if m.files.is_empty() {
        return;
    }
    let index = index.min(m.files.len() - 1);
    if index == m.selected {
        return;
    }
    m.selected = index;
    m.scroll_to_selected();
    m.refresh_bar();
}
