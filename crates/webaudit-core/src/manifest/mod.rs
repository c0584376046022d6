//! Manifest parsing and inspection helpers.

pub mod color;
pub mod icons;
pub mod parser;

pub use color::is_valid_css_color;
pub use icons::{icons_exist, sizes_at_least};
pub use parser::parse_manifest;
