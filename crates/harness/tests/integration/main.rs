//! End-to-end harness tests against a scripted toolchain.

mod common;

mod clean;
