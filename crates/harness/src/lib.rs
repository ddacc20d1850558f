//! RISC-V relaxation alignment test harness.
//!
//! Drives an external assembler, linker and disassembler over a fixed set of
//! assembly sources and relaxation/compression configurations, then checks
//! that every `SHOULD_ALIGN_<N>_HERE` label in the disassembly sits on an
//! `N`-byte boundary. It can also turn the captured results into binutils
//! and lld regression tests.

/// Marker extraction from disassembly and the modulo check.
///
/// Scans `objdump -d` text for `SHOULD_ALIGN_<N>_HERE` labels, parses the
/// hex address in front of each one and reports whether it is a multiple of
/// `N`. Markers that cannot be parsed count as misaligned.
pub mod alignment;

/// Command construction and the subprocess runner seam.
///
/// Builds the assemble, link, disassemble and convert invocations for a test
/// and defines the [`command::CommandRunner`] trait that executes them, so
/// tests can swap the real toolchain for a scripted one.
pub mod command;

/// Error type shared by every module.
///
/// Missing tools, failing steps, unreadable dumps and malformed settings each
/// get their own variant so callers can tell them apart.
pub mod error;

/// Emitters for binutils `.d` descriptors and lld lit scripts.
///
/// Both generators re-run each selected pair to refresh its dump and skip the
/// smoke test. A pair whose run fails gets a placeholder instead of stale
/// expectations.
pub mod generate;

/// The test pipeline, batch runs and artifact cleanup.
///
/// [`Harness`] runs the assemble, link and disassemble steps for one pair,
/// checks the resulting dump and iterates over the selected cross-product.
pub mod harness;

/// Fixed configuration and source registries.
///
/// Closed enums for the four relaxation/compression variants and the thirteen
/// sources, plus the artifact naming for each pair.
pub mod registry;

/// Ordered results, summary rendering and JSON reports.
///
/// Keeps pass/fail per label in run order and renders it as the end-of-run
/// table or as a machine-readable report.
pub mod summary;

/// Tool locations and layered settings.
///
/// Default paths under a toolchain root, overridden field by field by a TOML
/// settings file and then by command-line flags.
pub mod toolchain;

pub use crate::error::{HarnessError, Result};
pub use crate::harness::{Harness, clean, select_tests};
pub use crate::registry::{Configuration, Source, TestId};
pub use crate::summary::TestResults;
pub use crate::toolchain::{Toolchain, ToolchainSettings};
