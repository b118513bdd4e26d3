//! App module - Interactive viewer state
//!
//! Provides:
//! - controller: owns the dataset, the query and the visible subset
//! - presenter: the `Presentation` port and the terminal presenter
//! - debounce: quiescence delay for typed search input

pub mod controller;
pub mod debounce;
pub mod presenter;
