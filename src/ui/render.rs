// Render module split into focused submodules.

pub mod full;
pub mod list;
pub mod painter;
pub mod statusline;
pub mod styles;
pub mod util;

pub use full::render_full;
pub use list::render_list_content;
pub use statusline::{render_statusline, render_statusline_padded};
