pub mod render;

pub use render::{to_csv, to_html, to_json};
