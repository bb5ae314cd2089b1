use crate::ui::model::Model;

pub fn render_full(m: &Model) -> String {
    let mut lines: Vec<String> = if m.per_page > 0 {
        m.render_list_content().lines().map(str::to_string).collect()
    } else {
        Vec::new()
    };
    lines.push(m.render_statusline());
    lines.join("\n")
}
