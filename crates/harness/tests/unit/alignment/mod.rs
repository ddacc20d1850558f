//! # Alignment Check Tests
//!
//! Dump-file level checks of the `SHOULD_ALIGN_<N>_HERE` oracle.

/// Scenarios over whole dump files.
///
/// This module verifies the pass/fail verdict for realistic `objdump -d`
/// excerpts, dumps without markers and files that cannot be read.
pub mod dump_scenarios;
