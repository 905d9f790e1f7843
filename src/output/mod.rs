pub mod formatter;

pub use formatter::{format_breakdown, format_ranked_table, format_summary, should_use_colors};
