pub mod formatter;

pub use formatter::{format_detail, format_ranked_table, format_tsv, should_use_colors};
