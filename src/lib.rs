//! richline - status line layout with inline markup, and text encoding
//! detection
//!
//! The library holds the layout engine ([`layout`], [`bar`]), the markup
//! parser ([`markup`]) and the encoding sniffer ([`encoding`], [`utf8`]).
//! [`ui`] is the terminal inspector the binary runs.
//!
//! Tests live close to the modules they exercise as unit tests.

pub mod bar;
pub mod color;
pub mod config;
pub mod encoding;
pub mod layout;
pub mod markup;
pub mod measure;
pub mod utf8;

pub mod ui;

pub use bar::StatusBar;
pub use encoding::{Encoding, EncodingVerdict, detect_encoding};
pub use layout::{Align, LayoutMetrics, Part, PartLayoutState, compute_layout};
pub use markup::{MarkupLine, StyleMask, StyledRun, parse_markup, render_markup};
pub use measure::{CellMeasure, TextMeasure};
