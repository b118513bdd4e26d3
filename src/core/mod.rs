//! Core module - Shared data structures and utilities
//!
//! This module provides:
//! - Book listing model (Record, Dataset, Query)
//! - Error type for the I/O edges
//! - Viewer configuration
//! - Rendering for the supported output formats
//! - Source path helpers

pub mod config;
pub mod error;
pub mod model;
pub mod paths;
pub mod render;
pub mod util;
