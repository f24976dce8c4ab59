//! State module for tracking crawl progress
//!
//! This module provides the state shared by every task of one crawl.
//!
//! # Components
//!
//! - `CrawlState`: the visited set and the word accumulator

mod crawl_state;

// Re-export main types
pub use crawl_state::CrawlState;
