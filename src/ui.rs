// Terminal inspector: file list on top, status bar on the last line.

pub mod model;
pub mod render;
pub mod run;
pub mod update;

pub use model::{FileEntry, Model, initial_model};
pub use render::{render_full, render_statusline, render_statusline_padded};
pub use run::run;
pub use update::handle_update;

// Messages used by the update logic
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    WindowSize { width: usize, height: usize },
    KeyUp,
    KeyDown,
    KeyHome,
    KeyEnd,
}
