//! JSON status bar definitions.
//!
//! ```json
//! {
//!   "border": 1,
//!   "iconWidth": 2,
//!   "background": "#3a3a5a",
//!   "parts": [
//!     { "text": "%bmain.rs%r", "shortText": "main", "tooltip": "open file" },
//!     { "text": "UTF-8", "fixedWidth": true }
//!   ]
//! }
//! ```

use crate::bar::StatusBar;
use crate::color::Rgb;
use crate::layout::{LayoutMetrics, Part};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BarConfig {
    pub border: i32,
    pub icon_width: i32,
    /// Bar colour; parts alternate between shades of it.
    pub background: Option<Rgb>,
    pub parts: Vec<Part>,
}

impl Default for BarConfig {
    fn default() -> Self {
        let metrics = LayoutMetrics::CELLS;
        BarConfig {
            border: metrics.border,
            icon_width: metrics.icon_width,
            background: None,
            parts: Vec::new(),
        }
    }
}

impl BarConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read bar config {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("invalid bar config {}", path.display()))?;
        debug!(path = %path.display(), parts = config.parts.len(), "loaded bar config");
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: BarConfig =
            serde_json::from_str(text).context("failed to parse bar config JSON")?;
        anyhow::ensure!(config.border >= 0, "border must not be negative");
        anyhow::ensure!(config.icon_width >= 0, "iconWidth must not be negative");
        Ok(config)
    }

    pub fn metrics(&self) -> LayoutMetrics {
        LayoutMetrics {
            border: self.border,
            icon_width: self.icon_width,
        }
    }

    /// A bar holding every configured part, not yet laid out.
    pub fn status_bar(&self) -> StatusBar {
        let mut bar = StatusBar::new(self.metrics());
        for part in &self.parts {
            bar.push(part.clone());
        }
        bar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Align;

    #[test]
    fn empty_object_uses_cell_defaults() {
        let config = BarConfig::from_json("{}").unwrap();
        assert_eq!(config, BarConfig::default());
        assert_eq!(config.metrics(), LayoutMetrics::CELLS);
    }

    #[test]
    fn parts_use_camel_case_keys() {
        let config = BarConfig::from_json(
            r#"{
                "border": 2,
                "background": "404060",
                "parts": [
                    { "text": "%bname%r", "shortText": "n", "tooltip": "file name",
                      "shortenPriority": 3, "collapsedIcon": "@" },
                    { "text": "UTF-8", "fixedWidth": true, "width": 7, "align": "right" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.border, 2);
        assert_eq!(config.icon_width, 2);
        assert_eq!(config.background, Some(Rgb::new(0x40, 0x40, 0x60)));
        let name = &config.parts[0];
        assert_eq!(name.short_text.as_deref(), Some("n"));
        assert_eq!(name.shorten_priority, 3);
        assert_eq!(name.collapsed_icon.as_deref(), Some("@"));
        let enc = &config.parts[1];
        assert!(enc.fixed_width);
        assert_eq!(enc.width, Some(7));
        assert_eq!(enc.align, Align::Right);
    }

    #[test]
    fn status_bar_is_built_from_parts() {
        let config =
            BarConfig::from_json(r#"{ "parts": [ { "text": "a" }, { "text": "bb" } ] }"#).unwrap();
        let mut bar = config.status_bar();
        bar.relayout(20);
        assert_eq!(bar.len(), 2);
        assert_eq!(bar.total_width(), 20);
    }

    #[test]
    fn bad_input_is_an_error() {
        assert!(BarConfig::from_json("[").is_err());
        assert!(BarConfig::from_json(r#"{ "border": -1 }"#).is_err());
        assert!(BarConfig::from_json(r#"{ "background": "red" }"#).is_err());
        assert!(BarConfig::load("/definitely/not/here.json").is_err());
    }
}
