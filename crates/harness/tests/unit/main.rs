//! Unit tests for the public harness API.

/// Shared fixtures.
///
/// This module provides helpers that write dump files into temporary
/// directories for the other unit test modules.
pub mod common;

/// Marker checking against dump files on disk.
///
/// This module verifies that whole dump files are judged correctly, covering
/// aligned and misaligned markers, dumps without markers and missing files.
pub mod alignment;

/// Name resolution and test ordering.
///
/// This module verifies how source and configuration names are resolved and
/// in which order the resulting tests run.
pub mod selection;
