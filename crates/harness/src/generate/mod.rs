//! Emitters for external test-suite formats.
//!
//! Both generators re-run each selected test to refresh its dump, then turn
//! the captured data into files another test framework can run on its own:
//! binutils `run_dump_test` descriptors ([`binutils`]) and lld lit scripts
//! ([`lld`]). The smoke-test source is never emitted.

use std::fs;
use std::path::{Path, PathBuf};

use crate::command::CommandRunner;
use crate::error::{HarnessError, Result};
use crate::harness::Harness;
use crate::registry::TestId;

pub mod binutils;
pub mod lld;

/// Drops the smoke test from a selection, keeping order.
pub fn generation_targets(tests: &[TestId]) -> Vec<TestId> {
    tests
        .iter()
        .copied()
        .filter(|id| !id.source.is_smoke_test())
        .collect()
}

pub(crate) fn prepare_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| HarnessError::io(dir, e))
}

/// Writes one generated file, logging instead of failing the batch.
pub(crate) fn emit(path: PathBuf, contents: &str, written: &mut Vec<PathBuf>) {
    match fs::write(&path, contents) {
        Ok(()) => {
            println!("Generated {}", path.display());
            written.push(path);
        }
        Err(e) => log::error!("could not write {}: {}", path.display(), e),
    }
}

impl<R: CommandRunner> Harness<R> {
    /// Re-runs `id` and returns its dump if the pipeline produced one.
    ///
    /// A dump with misaligned markers is still returned. If any step fails,
    /// a dump left by an earlier run is removed and `None` is returned.
    pub(crate) fn refresh_dump(&self, id: TestId) -> Option<PathBuf> {
        let label = id.label();
        println!("\n=== Running test: {} ===", label);

        match self.build_dump(&id) {
            Ok(dump) => {
                if !self.check_alignment(&dump, &label) {
                    log::warn!("{} did not pass; generating from its fresh dump", label);
                }
                Some(dump)
            }
            Err(err) => {
                log::error!("{}", err);
                let stale = self.work_dir().join(id.dump_file());
                if stale.exists() {
                    if let Err(e) = fs::remove_file(&stale) {
                        log::warn!("could not remove stale {}: {}", stale.display(), e);
                    }
                }
                None
            }
        }
    }
}
