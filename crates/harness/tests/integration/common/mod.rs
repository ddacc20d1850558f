//! Common integration test infrastructure.

/// A scripted stand-in for the external toolchain.
pub mod toolchain;
