//! Output module for crawl results
//!
//! This module handles:
//! - Writing results as JSON to a file or any writer
//! - Printing a human-readable summary

mod json;
pub mod stats;

pub use json::{write_result, write_result_to};
pub use stats::{format_summary, print_summary};
