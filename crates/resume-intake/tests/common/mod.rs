//! Shared test utilities for resume-intake integration tests.
//!
//! This module provides:
//! - `GatedAnalyzer`, an analysis provider that blocks until released
//! - `BlockingAnalyzer`, which finishes even after its task is aborted
//! - `TestHarness` wiring a pipeline to a recording observer

pub mod analyzers;
pub mod harness;

pub use analyzers::{BlockingAnalyzer, BlockingControl, GatedAnalyzer, Script};
pub use harness::{docx, pdf, TestHarness};
