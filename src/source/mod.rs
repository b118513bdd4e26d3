//! Source module - Where datasets and the source list come from
//!
//! Provides:
//! - fetch: the `SourceFetcher` port and its filesystem adapter
//! - manifest: loading, fallback and generation of `manifest.json`

pub mod fetch;
pub mod manifest;
