//! Display formatting for terminal output

pub mod report;

pub use report::{format_bar, format_header, format_percentage, separator, truncate};
